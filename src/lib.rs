//! vprettier - Formatter and style linter for VHDL source code
//!
//! Reformats VHDL to a fixed house style (operator padding, vertical
//! alignment, keyword-driven indentation) and checks naming conventions
//! on declarations and structural labels.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::struct_excessive_bools)]

pub mod cli;
pub mod config;
pub mod error;
pub mod format;
pub mod host;
pub mod lint;
pub mod parser;
pub mod process;
pub mod scope;

// Re-export commonly used types
pub use cli::{build_cli, parse_args, parse_args_from, CliArgs};
pub use config::Config;
pub use error::Result;
pub use host::{commands_for, Command, CursorPos, TriggerEvent};
pub use lint::{Category, LintReport, Offense};
pub use scope::{BufferScopes, ScopeProvider, ScopeTag};
