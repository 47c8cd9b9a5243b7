//! Configuration management for vprettier.
//!
//! This module provides the [`Config`] struct which controls all formatting
//! and linting behavior. Configuration can be loaded from:
//! - TOML files (`vprettier.toml`)
//! - CLI arguments (which override file settings)
//!
//! Config files are auto-discovered by searching parent directories from the
//! file being formatted up to the filesystem root, plus the user's home
//! directory.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::lint::Category;

/// Config file names to search for (in order of priority, later overrides earlier)
const CONFIG_FILE_NAMES: &[&str] = &["vprettier.toml"];

/// Get the user's home directory
fn dirs_home() -> Option<PathBuf> {
    // Try HOME environment variable first (works on Unix and some Windows setups)
    if let Ok(home) = std::env::var("HOME") {
        return Some(PathBuf::from(home));
    }
    // Fallback for Windows
    if let Ok(userprofile) = std::env::var("USERPROFILE") {
        return Some(PathBuf::from(userprofile));
    }
    None
}

// Serde default functions
fn default_tab_size() -> usize {
    4
}
fn default_true() -> bool {
    true
}
fn default_auto_lint_delay() -> u64 {
    10000
}

/// Main configuration struct for vprettier
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Number of spaces per indent level (default: 4)
    #[serde(default = "default_tab_size")]
    pub tab_size: usize,

    /// Indent with literal tab characters instead of spaces (default: false)
    #[serde(default)]
    pub use_tabs: bool,

    /// Impose indentation (default: true)
    #[serde(default = "default_true")]
    pub impose_indent: bool,

    /// Impose vertical alignment (default: true)
    #[serde(default = "default_true")]
    pub impose_alignment: bool,

    /// Per-category naming check toggles, keyed by category name
    /// (`constant`, `variable`, `signal`, `type`, `inst_`, `p_`, `b_`, `g_`);
    /// unlisted categories stay enabled
    #[serde(default)]
    pub check_dict: HashMap<String, bool>,

    /// Lint when a file is opened or activated (default: false)
    #[serde(default)]
    pub lint_on_load: bool,

    /// Lint just before a file is saved (default: false)
    #[serde(default)]
    pub lint_on_save: bool,

    /// Clean whitespace just before a file is saved (default: false)
    #[serde(default)]
    pub clean_on_save: bool,

    /// Re-lint after the buffer has been idle following an edit (default: false)
    #[serde(default)]
    pub auto_lint: bool,

    /// Idle delay before an auto-lint fires, in milliseconds (default: 10000)
    ///
    /// The debounce itself is the host's job; this is the value it should use.
    #[serde(default = "default_auto_lint_delay")]
    pub auto_lint_delay_ms: u64,
}

/// Partial configuration for TOML parsing
///
/// All fields are `Option<T>` so we can distinguish between
/// "explicitly set" and "not specified" when merging configs.
#[derive(Debug, Clone, Default, Deserialize)]
struct PartialConfig {
    pub tab_size: Option<usize>,
    pub use_tabs: Option<bool>,
    pub impose_indent: Option<bool>,
    pub impose_alignment: Option<bool>,
    #[serde(default)]
    pub check_dict: HashMap<String, bool>,
    pub lint_on_load: Option<bool>,
    pub lint_on_save: Option<bool>,
    pub clean_on_save: Option<bool>,
    pub auto_lint: Option<bool>,
    pub auto_lint_delay_ms: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            tab_size: 4,
            use_tabs: false,
            impose_indent: true,
            impose_alignment: true,
            check_dict: HashMap::new(),
            lint_on_load: false,
            lint_on_save: false,
            clean_on_save: false,
            auto_lint: false,
            auto_lint_delay_ms: 10000,
        }
    }
}

impl Config {
    /// Maximum reasonable indent size
    const MAX_TAB_SIZE: usize = 20;

    /// Check whether a naming category is enabled
    ///
    /// Categories default to enabled; only an explicit `false` in
    /// `check_dict` disables one.
    #[must_use]
    pub fn check_enabled(&self, category: Category) -> bool {
        self.check_dict.get(category.key()).copied().unwrap_or(true)
    }

    /// Validate configuration values are within reasonable bounds
    ///
    /// Returns an error message if validation fails, None if valid.
    #[must_use]
    pub fn validate(&self) -> Option<String> {
        if self.tab_size == 0 {
            return Some("tab_size must be at least 1".to_string());
        }
        if self.tab_size > Self::MAX_TAB_SIZE {
            return Some(format!(
                "tab_size {} exceeds maximum of {}",
                self.tab_size,
                Self::MAX_TAB_SIZE
            ));
        }
        for key in self.check_dict.keys() {
            if !Category::ALL.iter().any(|c| c.key() == key) {
                return Some(format!("unknown naming category '{key}' in check_dict"));
            }
        }
        None
    }

    /// Load configuration from a TOML file
    pub fn from_toml_file(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let partial: PartialConfig = toml::from_str(&contents)?;
        let mut config = Self::default();
        config.apply_partial(&partial);
        Ok(config)
    }

    /// Apply a partial config, only overriding fields that are explicitly set
    fn apply_partial(&mut self, partial: &PartialConfig) {
        if let Some(v) = partial.tab_size {
            self.tab_size = v;
        }
        if let Some(v) = partial.use_tabs {
            self.use_tabs = v;
        }
        if let Some(v) = partial.impose_indent {
            self.impose_indent = v;
        }
        if let Some(v) = partial.impose_alignment {
            self.impose_alignment = v;
        }
        if let Some(v) = partial.lint_on_load {
            self.lint_on_load = v;
        }
        if let Some(v) = partial.lint_on_save {
            self.lint_on_save = v;
        }
        if let Some(v) = partial.clean_on_save {
            self.clean_on_save = v;
        }
        if let Some(v) = partial.auto_lint {
            self.auto_lint = v;
        }
        if let Some(v) = partial.auto_lint_delay_ms {
            self.auto_lint_delay_ms = v;
        }
        // Merge dictionaries (partial values override)
        for (k, v) in &partial.check_dict {
            self.check_dict.insert(k.clone(), *v);
        }
    }

    /// Discover config files from parent directories of a given path
    ///
    /// Searches from the file's directory up to the root, then adds home
    /// directory config. Returns list of config file paths in order of
    /// priority (least specific first).
    #[must_use]
    pub fn discover_config_files(start_path: &Path) -> Vec<PathBuf> {
        let mut config_files = Vec::new();

        // Add home directory config first (lowest priority)
        if let Some(home) = dirs_home() {
            for config_name in CONFIG_FILE_NAMES {
                let home_config = home.join(config_name);
                if home_config.is_file() {
                    config_files.push(home_config);
                }
            }
        }

        // Start from the file's parent directory (or the path itself if it's a directory)
        let start_dir = if start_path.is_file() {
            start_path.parent().map(Path::to_path_buf)
        } else if start_path.is_dir() {
            Some(start_path.to_path_buf())
        } else {
            // Path doesn't exist, use current directory
            std::env::current_dir().ok()
        };

        // Collect config files from parent directories (from root to current)
        if let Some(dir) = start_dir {
            let mut ancestors: Vec<PathBuf> = dir.ancestors().map(Path::to_path_buf).collect();
            // Reverse so we go from root to current (less specific to more specific)
            ancestors.reverse();

            for ancestor in ancestors {
                for config_name in CONFIG_FILE_NAMES {
                    let config_path = ancestor.join(config_name);
                    if config_path.is_file() && !config_files.contains(&config_path) {
                        config_files.push(config_path);
                    }
                }
            }
        }

        config_files
    }

    /// Load and merge configuration from discovered config files
    ///
    /// Later files override earlier ones (only explicitly set values).
    /// Returns default config if no files found.
    #[must_use]
    pub fn from_discovered_files(start_path: &Path) -> Self {
        let config_files = Self::discover_config_files(start_path);

        if config_files.is_empty() {
            return Self::default();
        }

        let mut config = Self::default();
        for path in &config_files {
            match std::fs::read_to_string(path) {
                Ok(contents) => match toml::from_str::<PartialConfig>(&contents) {
                    Ok(partial) => config.apply_partial(&partial),
                    Err(e) => eprintln!("Warning: failed to parse {}: {e}", path.display()),
                },
                Err(e) => eprintln!("Warning: failed to read {}: {e}", path.display()),
            }
        }
        config
    }
}
