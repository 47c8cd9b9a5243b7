//! Host-facing surface.
//!
//! An editor embeds the engine by forwarding lifecycle events and dispatching
//! the commands this module maps them to. The engine stays stateless; any
//! debouncing of `Modified` events happens on the host side using
//! [`crate::Config::auto_lint_delay_ms`].

use crate::config::Config;

/// Commands the engine can execute on a buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Full formatting pipeline: normalize, align, indent
    Format,
    /// Naming-convention checks only
    Lint,
    /// Whitespace cleanup without operator padding or alignment
    CleanWhitespace,
}

/// Editor lifecycle events a host may forward
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerEvent {
    /// File was opened
    Load,
    /// Buffer became the active view
    Activated,
    /// File is about to be written to disk
    PreSave,
    /// Buffer content changed (host debounces before forwarding)
    Modified,
}

/// Cursor position as (row, column), zero-based
///
/// Returned alongside a formatted buffer so the host can restore the cursor;
/// the host clamps it if the new buffer is shorter at that position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CursorPos {
    pub row: usize,
    pub col: usize,
}

impl CursorPos {
    #[must_use]
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Map a lifecycle event to the commands configuration asks for
///
/// The order matters for `PreSave`: whitespace is cleaned before the lint
/// runs so offenses are reported against the saved text.
#[must_use]
pub fn commands_for(event: TriggerEvent, config: &Config) -> Vec<Command> {
    let mut commands = Vec::new();
    match event {
        TriggerEvent::Load | TriggerEvent::Activated => {
            if config.lint_on_load {
                commands.push(Command::Lint);
            }
        }
        TriggerEvent::PreSave => {
            if config.clean_on_save {
                commands.push(Command::CleanWhitespace);
            }
            if config.lint_on_save {
                commands.push(Command::Lint);
            }
        }
        TriggerEvent::Modified => {
            if config.auto_lint {
                commands.push(Command::Lint);
            }
        }
    }
    commands
}
