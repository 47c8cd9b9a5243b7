//! Naming-convention linter.
//!
//! Scans the buffer line by line, truncating each line at its first comment
//! delimiter, and collects identifier spans that break a category's rule.
//! Label placement differs by construct: instantiation labels sit on the
//! line before the `port map`/`generic map` line, while process, block and
//! generate labels sit on the construct's own line. A construct with no
//! label at all is never flagged.

use std::collections::BTreeMap;
use std::ops::Range;

use crate::config::Config;
use crate::lint::category::{Category, SIGNAL_PREFIXES};
use crate::parser::char_filter::comment_start;
use crate::parser::patterns::{
    BLOCK_LABEL_RE, CONSTANT_DECL_RE, GENERATE_WORD_RE, LABEL_RE, MAP_LINE_RE, PROCESS_WORD_RE,
    SIGNAL_DECL_RE, TYPE_DECL_RE, VARIABLE_DECL_RE,
};

/// A single rule violation: where it is and what identifier broke it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Offense {
    pub row: usize,
    pub span: Range<usize>,
    pub identifier: String,
}

/// Offense spans grouped by category
///
/// Every category is present conceptually; categories with no offenses
/// report an empty slice. The host replaces its previous highlights per
/// category with whatever this run produced.
#[derive(Debug, Clone, Default)]
pub struct LintReport {
    offenses: BTreeMap<Category, Vec<Offense>>,
}

impl LintReport {
    fn push(&mut self, category: Category, offense: Offense) {
        self.offenses.entry(category).or_default().push(offense);
    }

    /// Offenses recorded for one category
    #[must_use]
    pub fn offenses(&self, category: Category) -> &[Offense] {
        self.offenses.get(&category).map_or(&[], Vec::as_slice)
    }

    /// Iterate over categories that have at least one offense
    pub fn iter(&self) -> impl Iterator<Item = (Category, &[Offense])> {
        self.offenses
            .iter()
            .map(|(category, offenses)| (*category, offenses.as_slice()))
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.offenses.values().map(Vec::len).sum()
    }

    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.total() == 0
    }

    /// Status line naming the categories that had offenses
    #[must_use]
    pub fn summary(&self) -> String {
        if self.is_clean() {
            return "Coding rules: clean".to_string();
        }
        let names: Vec<&str> = self
            .offenses
            .iter()
            .filter(|(_, offenses)| !offenses.is_empty())
            .map(|(category, _)| category.key())
            .collect();
        format!("Coding rules error: {}", names.join(", "))
    }
}

/// Line content up to its first comment delimiter
fn code_of(line: &str) -> &str {
    match comment_start(line) {
        Some(pos) => &line[..pos],
        None => line,
    }
}

fn starts_with_prefix(identifier: &str, prefix: &str) -> bool {
    identifier.to_lowercase().starts_with(prefix)
}

fn signal_name_ok(identifier: &str) -> bool {
    let lower = identifier.to_lowercase();
    SIGNAL_PREFIXES.iter().any(|p| lower.starts_with(p))
}

/// Check a declaration-keyword category on one line
fn check_declaration(
    report: &mut LintReport,
    category: Category,
    row: usize,
    code: &str,
    violates: impl Fn(&str) -> bool,
) {
    let pattern = match category {
        Category::Constant => &*CONSTANT_DECL_RE,
        Category::Variable => &*VARIABLE_DECL_RE,
        Category::Signal => &*SIGNAL_DECL_RE,
        Category::Type => &*TYPE_DECL_RE,
        _ => return,
    };
    for caps in pattern.captures_iter(code) {
        let Some(ident) = caps.get(1) else { continue };
        if violates(ident.as_str()) {
            report.push(
                category,
                Offense {
                    row,
                    span: ident.start()..ident.end(),
                    identifier: ident.as_str().to_string(),
                },
            );
        }
    }
}

/// Check a label against a required prefix; no label means no offense
fn check_label(
    report: &mut LintReport,
    category: Category,
    row: usize,
    line_code: &str,
    prefix: &str,
) {
    let Some(caps) = LABEL_RE.captures(line_code) else {
        return;
    };
    let Some(label) = caps.get(1) else { return };
    if !starts_with_prefix(label.as_str(), prefix) {
        report.push(
            category,
            Offense {
                row,
                span: label.start()..label.end(),
                identifier: label.as_str().to_string(),
            },
        );
    }
}

/// Run every enabled naming check over the buffer
#[must_use]
pub fn lint_buffer(text: &str, config: &Config) -> LintReport {
    let lines: Vec<&str> = text.split('\n').collect();
    let mut report = LintReport::default();

    for (row, line) in lines.iter().enumerate() {
        let code = code_of(line);

        if config.check_enabled(Category::Constant) {
            check_declaration(&mut report, Category::Constant, row, code, |ident| {
                ident != ident.to_uppercase()
            });
        }
        if config.check_enabled(Category::Variable) {
            check_declaration(&mut report, Category::Variable, row, code, |ident| {
                !starts_with_prefix(ident, "v_")
            });
        }
        if config.check_enabled(Category::Signal) {
            check_declaration(&mut report, Category::Signal, row, code, |ident| {
                !signal_name_ok(ident)
            });
        }
        if config.check_enabled(Category::Type) {
            check_declaration(&mut report, Category::Type, row, code, |ident| {
                !starts_with_prefix(ident, "t_")
            });
        }

        // Instantiation labels live on the line before the map line
        if config.check_enabled(Category::Instance) && MAP_LINE_RE.is_match(code) && row > 0 {
            check_label(
                &mut report,
                Category::Instance,
                row - 1,
                code_of(lines[row - 1]),
                "inst_",
            );
        }
        if config.check_enabled(Category::Process) && PROCESS_WORD_RE.is_match(code) {
            check_label(&mut report, Category::Process, row, code, "p_");
        }
        if config.check_enabled(Category::Block) && BLOCK_LABEL_RE.is_match(code) {
            check_label(&mut report, Category::Block, row, code, "b_");
        }
        if config.check_enabled(Category::Generate) && GENERATE_WORD_RE.is_match(code) {
            check_label(&mut report, Category::Generate, row, code, "g_");
        }
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lint(text: &str) -> LintReport {
        lint_buffer(text, &Config::default())
    }

    #[test]
    fn test_signal_prefix() {
        let report = lint("signal my_sig : std_logic;");
        let offenses = report.offenses(Category::Signal);
        assert_eq!(offenses.len(), 1);
        assert_eq!(offenses[0].identifier, "my_sig");
        assert_eq!(offenses[0].row, 0);
        assert_eq!(offenses[0].span, 7..13);

        assert!(lint("signal rst_n : std_logic;").is_clean());
        assert!(lint("signal clk_div : std_logic;").is_clean());
        assert!(lint("signal i_data : std_logic;").is_clean());
    }

    #[test]
    fn test_constant_uppercase() {
        assert!(!lint("constant width : integer := 8;")
            .offenses(Category::Constant)
            .is_empty());
        assert!(lint("constant WIDTH : integer := 8;").is_clean());
        assert!(lint("constant C_WIDTH_8 : integer := 8;").is_clean());
    }

    #[test]
    fn test_variable_prefix() {
        assert!(!lint("variable count : integer;")
            .offenses(Category::Variable)
            .is_empty());
        assert!(lint("variable v_count : integer;").is_clean());
        assert!(lint("variable V_COUNT : integer;").is_clean());
    }

    #[test]
    fn test_type_prefix() {
        assert!(!lint("type state is (IDLE, RUN);")
            .offenses(Category::Type)
            .is_empty());
        assert!(lint("type t_state is (IDLE, RUN);").is_clean());
        // subtype is a different keyword and is not checked
        assert!(lint("subtype nibble is std_logic_vector(3 downto 0);").is_clean());
    }

    #[test]
    fn test_instantiation_label_previous_line() {
        let report = lint("u0 : counter\nport map (\nclk => clk);");
        let offenses = report.offenses(Category::Instance);
        assert_eq!(offenses.len(), 1);
        assert_eq!(offenses[0].row, 0);
        assert_eq!(offenses[0].identifier, "u0");

        assert!(lint("inst_cnt : counter\nport map (\nclk => clk);").is_clean());
    }

    #[test]
    fn test_map_after_unlabeled_line_not_flagged() {
        // Neither "x <= y;" nor the generic map line carries a label, so the
        // map trigger reports nothing
        let report = lint("x <= y;\nport map (clk => clk);");
        assert!(report.offenses(Category::Instance).is_empty());
        let report = lint("inst_cnt : counter\ngeneric map (N => 4)\nport map (clk => clk);");
        assert!(report.offenses(Category::Instance).is_empty());
    }

    #[test]
    fn test_process_label_same_line() {
        let report = lint("main : process (clk)");
        let offenses = report.offenses(Category::Process);
        assert_eq!(offenses.len(), 1);
        assert_eq!(offenses[0].identifier, "main");

        assert!(lint("p_main : process (clk)").is_clean());
        // Unlabeled process is not an offense
        assert!(lint("process (clk)").is_clean());
        assert!(lint("end process;").is_clean());
    }

    #[test]
    fn test_block_label() {
        assert!(!lint("regs : block").offenses(Category::Block).is_empty());
        assert!(lint("b_regs : block").is_clean());
    }

    #[test]
    fn test_generate_label() {
        let report = lint("lanes : for i in 0 to 3 generate");
        assert_eq!(report.offenses(Category::Generate).len(), 1);
        assert!(lint("g_lanes : for i in 0 to 3 generate").is_clean());
        assert!(lint("end generate;").is_clean());
    }

    #[test]
    fn test_comment_text_excluded() {
        assert!(lint("-- signal bad_name : std_logic;").is_clean());
        assert!(lint("x <= y; -- constant lower : integer;").is_clean());
    }

    #[test]
    fn test_category_independence() {
        let bad_signal = lint("signal my_sig : std_logic;\nconstant WIDTH : integer := 8;");
        assert_eq!(bad_signal.offenses(Category::Signal).len(), 1);
        assert!(bad_signal.offenses(Category::Constant).is_empty());

        let bad_constant = lint("signal rst_n : std_logic;\nconstant width : integer := 8;");
        assert!(bad_constant.offenses(Category::Signal).is_empty());
        assert_eq!(bad_constant.offenses(Category::Constant).len(), 1);
    }

    #[test]
    fn test_disabled_category() {
        let mut config = Config::default();
        config.check_dict.insert("signal".to_string(), false);
        let report = lint_buffer("signal my_sig : std_logic;", &config);
        assert!(report.offenses(Category::Signal).is_empty());
    }

    #[test]
    fn test_summary() {
        assert_eq!(lint("signal rst_n : std_logic;").summary(), "Coding rules: clean");
        let report = lint("signal my_sig : std_logic;\nconstant width : integer := 8;");
        assert_eq!(report.summary(), "Coding rules error: constant, signal");
    }
}
