//! vprettier - Formatter and naming-convention linter for VHDL source code

#![warn(clippy::all)]
#![warn(clippy::pedantic)]

use std::fs::File;
use std::io::{self, IsTerminal, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use glob::Pattern;
use rayon::prelude::*;
use vprettier::process::{run_command, CommandResult};
use vprettier::{parse_args, CliArgs, Command, Config, CursorPos, Result};
use walkdir::WalkDir;

/// VHDL file extensions to process
const VHDL_EXTENSIONS: &[&str] = &["vhd", "vhdl", "VHD", "VHDL"];

/// Default maximum file size in bytes (100 MB)
/// Files larger than this are skipped to prevent memory exhaustion
const DEFAULT_MAX_FILE_SIZE: u64 = 100 * 1024 * 1024;

/// Directory walk depth cap for --recursive
const MAX_WALK_DEPTH: usize = 256;

fn main() -> Result<()> {
    // Parse CLI arguments
    let args = parse_args();

    // Check if we should read from stdin
    let use_stdin =
        args.inputs.is_empty() || (args.inputs.len() == 1 && args.inputs[0].as_os_str() == "-");

    // If no inputs and running interactively, print usage; otherwise read from stdin
    if args.inputs.is_empty() && io::stdin().is_terminal() {
        print_usage();
        return Ok(());
    }

    if use_stdin {
        // Process stdin - use current directory for config discovery
        let config = build_config(&args, None)?;
        return process_stdin(&config, &args);
    }

    // Build base configuration for parallel processing
    // For explicit config files, we use one config for all files
    // For auto-discovery, each file may have its own config
    let use_per_file_config = args.config.is_none();
    let base_config = if use_per_file_config {
        None
    } else {
        Some(build_config(&args, None)?)
    };

    // Configure thread pool if --jobs specified
    if let Some(jobs) = args.jobs {
        if jobs > 0 {
            if let Err(e) = rayon::ThreadPoolBuilder::new()
                .num_threads(jobs)
                .build_global()
            {
                eprintln!("Warning: failed to configure thread pool: {e}");
            }
        }
    }

    // Collect all files to process
    let files = collect_files(&args);

    if files.is_empty() {
        if !args.silent {
            eprintln!("No VHDL files found to process.");
        }
        return Ok(());
    }

    // Process files
    let offense_count = AtomicUsize::new(0);
    let use_sequential = args.stdout || args.lint || args.jobs == Some(1);
    if use_sequential {
        // Sequential processing for stdout, lint reports, or --jobs 1
        process_files_sequential(&files, base_config.as_ref(), &args, &offense_count);
    } else {
        // Parallel processing for in-place formatting
        process_files_parallel(&files, base_config.as_ref(), &args, &offense_count);
    }

    if args.lint && offense_count.load(Ordering::Relaxed) > 0 {
        std::process::exit(1);
    }

    Ok(())
}

/// Build configuration from CLI args and optional config file
///
/// If `for_path` is provided and no explicit config file is specified,
/// uses auto-discovery to find config files in parent directories.
fn build_config(args: &CliArgs, for_path: Option<&Path>) -> Result<Config> {
    let mut config = if let Some(config_path) = &args.config {
        // Explicit config file specified
        if args.debug {
            eprintln!(
                "[DEBUG] Using explicit config file: {}",
                config_path.display()
            );
        }
        Config::from_toml_file(config_path)?
    } else if let Some(path) = for_path {
        // Auto-discover config files from parent directories
        if args.debug {
            let discovered = Config::discover_config_files(path);
            if discovered.is_empty() {
                eprintln!("[DEBUG] No config files discovered for: {}", path.display());
            } else {
                eprintln!("[DEBUG] Discovered config files for {}:", path.display());
                for f in &discovered {
                    eprintln!("[DEBUG]   - {}", f.display());
                }
            }
        }
        Config::from_discovered_files(path)
    } else {
        // No path provided, use current directory for discovery
        if args.debug {
            let cwd = std::env::current_dir().unwrap_or_default();
            let discovered = Config::discover_config_files(&cwd);
            if discovered.is_empty() {
                eprintln!("[DEBUG] No config files discovered in current directory");
            } else {
                eprintln!("[DEBUG] Discovered config files:");
                for f in &discovered {
                    eprintln!("[DEBUG]   - {}", f.display());
                }
            }
        }
        Config::from_discovered_files(&std::env::current_dir().unwrap_or_default())
    };

    // Override with CLI arguments
    if let Some(tab_size) = args.tab_size {
        config.tab_size = tab_size;
    }
    if args.use_tabs {
        config.use_tabs = true;
    }
    if args.no_indent {
        config.impose_indent = false;
    }
    if args.no_align {
        config.impose_alignment = false;
    }
    for category in &args.disable_checks {
        config.check_dict.insert(category.clone(), false);
    }

    // Print final config in debug mode
    if args.debug {
        print_config_debug(&config);
    }

    // Validate configuration
    if let Some(error) = config.validate() {
        anyhow::bail!("Invalid configuration: {error}");
    }

    Ok(config)
}

/// Print configuration values in debug mode
fn print_config_debug(config: &Config) {
    eprintln!("[DEBUG] Configuration:");
    eprintln!("[DEBUG]   tab_size: {}", config.tab_size);
    eprintln!("[DEBUG]   use_tabs: {}", config.use_tabs);
    eprintln!("[DEBUG]   impose_indent: {}", config.impose_indent);
    eprintln!("[DEBUG]   impose_alignment: {}", config.impose_alignment);
    eprintln!("[DEBUG]   lint_on_load: {}", config.lint_on_load);
    eprintln!("[DEBUG]   lint_on_save: {}", config.lint_on_save);
    eprintln!("[DEBUG]   clean_on_save: {}", config.clean_on_save);
    eprintln!("[DEBUG]   auto_lint: {}", config.auto_lint);
    eprintln!("[DEBUG]   auto_lint_delay_ms: {}", config.auto_lint_delay_ms);
    if !config.check_dict.is_empty() {
        eprintln!("[DEBUG]   check_dict: {:?}", config.check_dict);
    }
}

/// Collect the VHDL files named by the inputs
///
/// Explicit file arguments are taken as-is (whatever their extension);
/// directories are scanned for VHDL sources, one level deep unless
/// --recursive is set.
fn collect_files(args: &CliArgs) -> Vec<PathBuf> {
    let excludes: Vec<Pattern> = args
        .exclude
        .iter()
        .filter_map(|p| match Pattern::new(p) {
            Ok(pattern) => Some(pattern),
            Err(e) => {
                eprintln!("Warning: ignoring invalid exclude pattern '{p}': {e}");
                None
            }
        })
        .collect();

    let mut files = Vec::new();
    for input in &args.inputs {
        if input.is_file() {
            if !is_excluded(input, &excludes) {
                files.push(input.clone());
            }
        } else if input.is_dir() {
            let depth = if args.recursive { MAX_WALK_DEPTH } else { 1 };
            // follow_links(true) makes WalkDir report symlink loops as
            // errors; those entries are skipped.
            for entry in WalkDir::new(input)
                .follow_links(true)
                .max_depth(depth)
                .into_iter()
                .filter_map(std::result::Result::ok)
            {
                let path = entry.path();
                if path.is_file()
                    && is_vhdl_file(path, &args.vhdl_extensions)
                    && !is_excluded(path, &excludes)
                {
                    files.push(path.to_path_buf());
                }
            }
        } else if !args.silent {
            eprintln!(
                "Warning: skipping {}: not a file or directory",
                input.display()
            );
        }
    }

    files
}

/// Check whether a path matches any exclude pattern
///
/// Patterns are tried against the full path, the file name, and every path
/// component, so both `*_tb.vhd` and bare directory names like `sim` work.
fn is_excluded(path: &Path, patterns: &[Pattern]) -> bool {
    if patterns.is_empty() {
        return false;
    }

    let full = path.to_string_lossy();
    let file_name = path.file_name().map(std::ffi::OsStr::to_string_lossy);

    patterns.iter().any(|pattern| {
        pattern.matches(&full)
            || file_name.as_deref().is_some_and(|name| pattern.matches(name))
            || path.components().any(|component| match component {
                std::path::Component::Normal(part) => pattern.matches(&part.to_string_lossy()),
                _ => false,
            })
    })
}

/// Check if a file has a VHDL extension
/// Checks against both default extensions and any custom extensions provided
fn is_vhdl_file(path: &Path, custom_extensions: &[String]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            // Check default extensions
            if VHDL_EXTENSIONS.contains(&ext) {
                return true;
            }
            // Check custom extensions (with or without leading dot)
            for custom in custom_extensions {
                let custom_ext = custom.strip_prefix('.').unwrap_or(custom);
                if ext == custom_ext {
                    return true;
                }
            }
            false
        })
}

/// Process files sequentially (for stdout output and lint reports)
fn process_files_sequential(
    files: &[PathBuf],
    base_config: Option<&Config>,
    args: &CliArgs,
    offense_count: &AtomicUsize,
) {
    for path in files {
        // Use base config if provided, otherwise discover per-file config
        let file_result = if let Some(config) = base_config {
            process_single_file(path, config, args, offense_count)
        } else {
            match build_config(args, Some(path)) {
                Ok(config) => process_single_file(path, &config, args, offense_count),
                Err(e) => Err(e),
            }
        };

        if let Err(e) = file_result {
            eprintln!("Error processing {}: {}", path.display(), e);
        }
    }
}

/// Process files in parallel using Rayon
fn process_files_parallel(
    files: &[PathBuf],
    base_config: Option<&Config>,
    args: &CliArgs,
    offense_count: &AtomicUsize,
) {
    let success_count = AtomicUsize::new(0);
    let error_count = AtomicUsize::new(0);

    files.par_iter().for_each(|path| {
        // Use base config if provided, otherwise discover per-file config
        let file_result = if let Some(config) = base_config {
            process_single_file(path, config, args, offense_count)
        } else {
            match build_config(args, Some(path)) {
                Ok(config) => process_single_file(path, &config, args, offense_count),
                Err(e) => Err(e),
            }
        };

        match file_result {
            Ok(()) => {
                success_count.fetch_add(1, Ordering::Relaxed);
            }
            Err(e) => {
                error_count.fetch_add(1, Ordering::Relaxed);
                eprintln!("Error processing {}: {}", path.display(), e);
            }
        }
    });

    let success = success_count.load(Ordering::Relaxed);
    let errors = error_count.load(Ordering::Relaxed);

    if !args.silent {
        if errors == 0 {
            eprintln!("Processed {success} files successfully.");
        } else {
            eprintln!("Processed {success} files, {errors} errors.");
        }
    }
}

/// Which command the CLI mode flags select
fn selected_command(args: &CliArgs) -> Command {
    if args.lint {
        Command::Lint
    } else if args.clean {
        Command::CleanWhitespace
    } else {
        Command::Format
    }
}

/// Process a single file
fn process_single_file(
    path: &PathBuf,
    config: &Config,
    args: &CliArgs,
    offense_count: &AtomicUsize,
) -> Result<()> {
    // Check file size BEFORE reading to prevent memory exhaustion
    let metadata = std::fs::metadata(path)?;
    let file_size = metadata.len();
    if file_size > DEFAULT_MAX_FILE_SIZE {
        if !args.silent {
            let size_mb = file_size / (1024 * 1024);
            let limit_mb = DEFAULT_MAX_FILE_SIZE / (1024 * 1024);
            eprintln!(
                "Skipping {} ({} MB exceeds limit of {} MB)",
                path.display(),
                size_mb,
                limit_mb
            );
        }
        return Ok(());
    }

    let mut text = String::new();
    File::open(path)?.read_to_string(&mut text)?;

    if !args.silent && !args.stdout && !args.lint {
        eprintln!("Formatting: {}", path.display());
    }

    match run_command(selected_command(args), &text, CursorPos::default(), config) {
        CommandResult::Formatted {
            text: formatted, ..
        } => {
            if args.stdout {
                io::stdout().write_all(formatted.as_bytes())?;
            } else if args.diff {
                if formatted != text {
                    if !args.silent {
                        println!("=== {} ===", path.display());
                    }
                    io::stdout().write_all(formatted.as_bytes())?;
                }
            } else {
                // Write back to file (in-place)
                std::fs::write(path, formatted.as_bytes())?;
            }
        }
        CommandResult::Linted(report) => {
            offense_count.fetch_add(report.total(), Ordering::Relaxed);
            for (category, offenses) in report.iter() {
                for offense in offenses {
                    println!(
                        "{}:{}:{}: {}: '{}' ({})",
                        path.display(),
                        offense.row + 1,
                        offense.span.start + 1,
                        category,
                        offense.identifier,
                        category.expectation()
                    );
                }
            }
            if !args.silent {
                eprintln!("{}: {}", path.display(), report.summary());
            }
        }
    }

    Ok(())
}

/// Process input from stdin, output to stdout
fn process_stdin(config: &Config, args: &CliArgs) -> Result<()> {
    // Read all input from stdin
    let mut text = String::new();
    io::stdin().read_to_string(&mut text)?;

    // Check size after reading to prevent processing extremely large input
    let stdin_size = text.len() as u64;
    if stdin_size > DEFAULT_MAX_FILE_SIZE {
        anyhow::bail!(
            "stdin input too large ({} MB exceeds limit of {} MB)",
            stdin_size / (1024 * 1024),
            DEFAULT_MAX_FILE_SIZE / (1024 * 1024)
        );
    }

    match run_command(selected_command(args), &text, CursorPos::default(), config) {
        CommandResult::Formatted {
            text: formatted, ..
        } => {
            // Always output to stdout when reading from stdin
            io::stdout().write_all(formatted.as_bytes())?;
            if !args.silent {
                eprintln!("Formatted stdin successfully.");
            }
        }
        CommandResult::Linted(report) => {
            for (category, offenses) in report.iter() {
                for offense in offenses {
                    println!(
                        "stdin:{}:{}: {}: '{}' ({})",
                        offense.row + 1,
                        offense.span.start + 1,
                        category,
                        offense.identifier,
                        category.expectation()
                    );
                }
            }
            if !args.silent {
                eprintln!("{}", report.summary());
            }
            if !report.is_clean() {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

fn print_usage() {
    println!(
        "vprettier v{} - VHDL source code formatter and linter",
        env!("CARGO_PKG_VERSION")
    );
    println!();
    println!("Usage:");
    println!("  vprettier [OPTIONS] <FILE>...");
    println!("  vprettier [OPTIONS] -r <DIRECTORY>");
    println!("  vprettier [OPTIONS] -              # Read from stdin");
    println!("  cat top.vhd | vprettier            # Pipe input");
    println!();
    println!("Examples:");
    println!("  vprettier top.vhd               # Format single file in-place");
    println!("  vprettier *.vhd                 # Format multiple files");
    println!("  vprettier -r rtl/               # Recursively format directory");
    println!("  vprettier --stdout top.vhd      # Output to stdout");
    println!("  vprettier --lint top.vhd        # Check naming conventions");
    println!("  vprettier --clean top.vhd       # Whitespace cleanup only");
    println!("  vprettier -t 2 top.vhd          # Use 2-space indent");
    println!();
    println!("Options:");
    println!("  -t, --tab-size <NUM>            Indent size [default: 4]");
    println!("  --use-tabs                      Indent with literal tab characters");
    println!("  --no-indent                     Skip the indentation pass");
    println!("  --no-align                      Skip the vertical alignment passes");
    println!("  -c, --lint                      Check naming conventions instead of formatting");
    println!("  --clean                         Clean whitespace only");
    println!("  --disable-check <CATEGORY>      Disable a naming category (repeatable)");
    println!("  -r, --recursive                 Process directories recursively");
    println!("  -e, --exclude <PATTERN>         Exclude files/dirs matching pattern (repeatable)");
    println!("  --vhdl-ext <EXT>                Additional VHDL extension (repeatable)");
    println!("  -j, --jobs <NUM>                Parallel jobs (0=auto, 1=sequential)");
    println!("  -s, --stdout                    Output to stdout");
    println!("  -d, --diff                      Show what would change");
    println!("  --config <FILE>                 Config file path (overrides auto-discovery)");
    println!("  -q, --silent                    Silent mode");
    println!("  --debug                         Enable debug output");
    println!("  -h, --help                      Print help");
    println!();
    println!("Naming categories:");
    println!("  constant   constants must be all uppercase");
    println!("  variable   variables must start with v_");
    println!("  signal     signals must start with rst/reset/clk/clock/r_/w_/i_");
    println!("  type       types must start with t_");
    println!("  inst_      instantiation labels must start with inst_");
    println!("  p_         process labels must start with p_");
    println!("  b_         block labels must start with b_");
    println!("  g_         generate labels must start with g_");
    println!();
    println!("Supported extensions: .vhd, .vhdl (case-insensitive)");
    println!();
    println!("Config file auto-discovery:");
    println!("  Searches for vprettier.toml in parent directories");
    println!("  starting from the file being formatted up to the root directory.");
    println!("  Also checks vprettier.toml in the home directory.");
    println!("  More specific configs (closer to file) override less specific ones.");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exclude_matches_name_and_component() {
        let patterns = vec![
            Pattern::new("*_tb.vhd").unwrap(),
            Pattern::new("sim").unwrap(),
        ];
        assert!(is_excluded(Path::new("rtl/top_tb.vhd"), &patterns));
        assert!(is_excluded(Path::new("proj/sim/top.vhd"), &patterns));
        assert!(!is_excluded(Path::new("rtl/top.vhd"), &patterns));
        assert!(!is_excluded(Path::new("rtl/top.vhd"), &[]));
    }

    #[test]
    fn test_vhdl_extension_detection() {
        assert!(is_vhdl_file(Path::new("a.vhd"), &[]));
        assert!(is_vhdl_file(Path::new("a.VHDL"), &[]));
        assert!(!is_vhdl_file(Path::new("a.v"), &[]));
        assert!(is_vhdl_file(Path::new("a.hdl"), &["hdl".to_string()]));
        assert!(is_vhdl_file(Path::new("a.hdl"), &[".hdl".to_string()]));
    }
}
