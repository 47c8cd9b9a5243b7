//! Command-line interface for vprettier.
//!
//! Defines CLI arguments using clap builder API

use std::path::PathBuf;

use clap::{Arg, ArgAction, Command};

/// CLI arguments parsed from command line
#[derive(Debug, Clone)]
pub struct CliArgs {
    /// Files or directories to format
    pub inputs: Vec<PathBuf>,

    /// Number of spaces per indent level
    pub tab_size: Option<usize>,

    /// Indent with literal tabs instead of spaces
    pub use_tabs: bool,

    /// Disable indentation
    pub no_indent: bool,

    /// Disable vertical alignment
    pub no_align: bool,

    /// Run the naming linter instead of formatting
    pub lint: bool,

    /// Clean whitespace only (no operator padding or alignment)
    pub clean: bool,

    /// Naming categories to disable (constant, variable, signal, type,
    /// inst_, p_, b_, g_)
    pub disable_checks: Vec<String>,

    /// Output to stdout instead of in-place
    pub stdout: bool,

    /// Show diff without modifying files
    pub diff: bool,

    /// Config file path
    pub config: Option<PathBuf>,

    /// Recursive directory processing
    pub recursive: bool,

    /// Silent mode (no output)
    pub silent: bool,

    /// Number of parallel jobs (0 = auto, 1 = sequential)
    pub jobs: Option<usize>,

    /// Exclude patterns for files/directories (glob patterns)
    pub exclude: Vec<String>,

    /// Custom VHDL file extensions (in addition to defaults)
    pub vhdl_extensions: Vec<String>,

    /// Enable debug output
    pub debug: bool,
}

/// Build the clap Command for parsing CLI arguments
#[must_use]
pub fn build_cli() -> Command {
    Command::new("vprettier")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Formatter and naming-convention linter for VHDL source code")
        .arg(
            Arg::new("inputs")
                .help("Files or directories to format")
                .value_name("FILE")
                .num_args(1..)
                .required(false)
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("tab-size")
                .short('t')
                .long("tab-size")
                .help("Number of spaces per indent level [default: 4]")
                .value_name("NUM")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            Arg::new("use-tabs")
                .long("use-tabs")
                .help("Indent with literal tab characters instead of spaces")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("no-indent")
                .long("no-indent")
                .help("Skip the indentation pass")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("no-align")
                .long("no-align")
                .help("Skip the vertical alignment passes")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("lint")
                .short('c')
                .long("lint")
                .help("Check naming conventions instead of formatting")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("clean")
                .long("clean")
                .help("Clean whitespace only (tabs, trailing space, separators)")
                .action(ArgAction::SetTrue)
                .conflicts_with("lint"),
        )
        .arg(
            Arg::new("disable-check")
                .long("disable-check")
                .help("Disable a naming category (repeatable): constant, variable, signal, type, inst_, p_, b_, g_")
                .value_name("CATEGORY")
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("stdout")
                .short('s')
                .long("stdout")
                .help("Write formatted output to stdout instead of modifying files")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("diff")
                .short('d')
                .long("diff")
                .help("Show what would change without modifying files")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .help("Path to a vprettier.toml config file")
                .value_name("PATH")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("recursive")
                .short('r')
                .long("recursive")
                .help("Process directories recursively")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("silent")
                .short('q')
                .long("silent")
                .help("Suppress per-file output")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("jobs")
                .short('j')
                .long("jobs")
                .help("Number of parallel jobs (0 = auto, 1 = sequential)")
                .value_name("NUM")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            Arg::new("exclude")
                .short('e')
                .long("exclude")
                .help("Glob pattern of files or directories to skip (repeatable)")
                .value_name("PATTERN")
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("vhdl")
                .long("vhdl-ext")
                .help("Additional VHDL file extension to accept (repeatable)")
                .value_name("EXT")
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("debug")
                .long("debug")
                .help("Print debug diagnostics to stderr")
                .action(ArgAction::SetTrue),
        )
}

/// Parse CLI arguments from the process environment
#[must_use]
pub fn parse_args() -> CliArgs {
    args_from_matches(&build_cli().get_matches())
}

/// Parse CLI arguments from an explicit iterator (used in tests)
pub fn parse_args_from<I, T>(args: I) -> CliArgs
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    args_from_matches(&build_cli().get_matches_from(args))
}

fn args_from_matches(matches: &clap::ArgMatches) -> CliArgs {
    CliArgs {
        inputs: matches
            .get_many::<PathBuf>("inputs")
            .map(|vals| vals.cloned().collect())
            .unwrap_or_default(),
        tab_size: matches.get_one::<usize>("tab-size").copied(),
        use_tabs: matches.get_flag("use-tabs"),
        no_indent: matches.get_flag("no-indent"),
        no_align: matches.get_flag("no-align"),
        lint: matches.get_flag("lint"),
        clean: matches.get_flag("clean"),
        disable_checks: matches
            .get_many::<String>("disable-check")
            .map(|vals| vals.cloned().collect())
            .unwrap_or_default(),
        stdout: matches.get_flag("stdout"),
        diff: matches.get_flag("diff"),
        config: matches.get_one::<PathBuf>("config").cloned(),
        recursive: matches.get_flag("recursive"),
        silent: matches.get_flag("silent"),
        jobs: matches.get_one::<usize>("jobs").copied(),
        exclude: matches
            .get_many::<String>("exclude")
            .map(|vals| vals.cloned().collect())
            .unwrap_or_default(),
        vhdl_extensions: matches
            .get_many::<String>("vhdl")
            .map(|vals| vals.cloned().collect())
            .unwrap_or_default(),
        debug: matches.get_flag("debug"),
    }
}
