/// Naming-rule categories
use std::fmt;

/// One naming convention checked by the linter
///
/// Declaration categories inspect the identifier after a declaration
/// keyword; label categories inspect a statement label near a structural
/// construct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    Constant,
    Variable,
    Signal,
    Type,
    Instance,
    Process,
    Block,
    Generate,
}

/// Allowed prefixes for signal names
pub const SIGNAL_PREFIXES: [&str; 7] = ["rst", "reset", "clk", "clock", "r_", "w_", "i_"];

impl Category {
    pub const ALL: [Category; 8] = [
        Category::Constant,
        Category::Variable,
        Category::Signal,
        Category::Type,
        Category::Instance,
        Category::Process,
        Category::Block,
        Category::Generate,
    ];

    /// Stable key used in configuration and reports
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Category::Constant => "constant",
            Category::Variable => "variable",
            Category::Signal => "signal",
            Category::Type => "type",
            Category::Instance => "inst_",
            Category::Process => "p_",
            Category::Block => "b_",
            Category::Generate => "g_",
        }
    }

    /// What the rule expects, for diagnostics
    #[must_use]
    pub fn expectation(self) -> &'static str {
        match self {
            Category::Constant => "constant names must be all uppercase",
            Category::Variable => "variable names must start with v_",
            Category::Signal => "signal names must start with rst/reset/clk/clock/r_/w_/i_",
            Category::Type => "type names must start with t_",
            Category::Instance => "instantiation labels must start with inst_",
            Category::Process => "process labels must start with p_",
            Category::Block => "block labels must start with b_",
            Category::Generate => "generate labels must start with g_",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}
