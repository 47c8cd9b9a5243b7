//! Formatting pipeline
//!
//! Sequences the passes over a whole buffer:
//! - Normalize every line
//! - Alignment passes: declaration colon, port direction, assignment,
//!   association arrow
//! - Indentation
//! - Post-indent alignment of `when` choices
//! - Blank-line collapse
//!
//! Scope tags are rescanned between passes because each pass shifts columns;
//! an embedding host that supplies its own tags does the same around its
//! replace-buffer call.

use std::io::{BufRead, Write};

use crate::config::Config;
use crate::format::{
    align, clean_line, collapse_blank_lines, normalize_lines, PadSide, VhdlIndenter,
};
use crate::host::{Command, CursorPos};
use crate::lint::{lint_buffer, LintReport};
use crate::parser::patterns::{ARROW_RE, DECL_COLON_RE, PORT_DIR_RE, SIG_ASSIGN_RE, WHEN_RE};
use crate::scope::scan_buffer;
use crate::Result;

/// What a dispatched command produced
#[derive(Debug)]
pub enum CommandResult {
    /// A replacement buffer and the restored cursor
    Formatted { text: String, cursor: CursorPos },
    /// Offense spans per category
    Linted(LintReport),
}

fn split_lines(text: &str) -> Vec<String> {
    text.split('\n').map(ToString::to_string).collect()
}

/// One alignment pass with freshly scanned scope tags
fn align_pass(lines: Vec<String>, pattern: &regex::Regex, side: PadSide) -> Vec<String> {
    let scopes = scan_buffer(&lines.join("\n"));
    align(&lines, pattern, side, &scopes)
}

/// Run the full formatting pipeline over a buffer
///
/// The cursor is carried through unchanged as a (row, column) pair; the
/// caller re-applies it to the new buffer and clamps if needed.
#[must_use]
pub fn beautify(text: &str, cursor: CursorPos, config: &Config) -> (String, CursorPos) {
    let mut lines = split_lines(text);
    lines = normalize_lines(&lines, config.tab_size);

    if config.impose_alignment {
        lines = align_pass(lines, &DECL_COLON_RE, PadSide::Pre);
        lines = align_pass(lines, &PORT_DIR_RE, PadSide::Post);
        lines = align_pass(lines, &SIG_ASSIGN_RE, PadSide::Pre);
        lines = align_pass(lines, &ARROW_RE, PadSide::Pre);
    }

    if config.impose_indent {
        let mut indenter = VhdlIndenter::new(config.tab_size, config.use_tabs);
        lines = indenter.indent_lines(&lines);
    }

    if config.impose_alignment {
        lines = align_pass(lines, &WHEN_RE, PadSide::Pre);
    }

    let text = collapse_blank_lines(&lines.join("\n"));
    (text, cursor)
}

/// Whitespace cleanup without operator padding or alignment
#[must_use]
pub fn clean_whitespace(text: &str, config: &Config) -> String {
    let lines: Vec<String> = split_lines(text)
        .iter()
        .map(|line| clean_line(line, config.tab_size))
        .collect();
    collapse_blank_lines(&lines.join("\n"))
}

/// Dispatch one host command against a buffer snapshot
#[must_use]
pub fn run_command(
    command: Command,
    text: &str,
    cursor: CursorPos,
    config: &Config,
) -> CommandResult {
    match command {
        Command::Format => {
            let (text, cursor) = beautify(text, cursor, config);
            CommandResult::Formatted { text, cursor }
        }
        Command::CleanWhitespace => CommandResult::Formatted {
            text: clean_whitespace(text, config),
            cursor,
        },
        Command::Lint => CommandResult::Linted(lint_buffer(text, config)),
    }
}

/// Format a whole stream, reading it fully before writing
///
/// Used for both file and stdin processing; the buffer model requires the
/// complete text up front.
pub fn format_stream<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    config: &Config,
) -> Result<()> {
    let mut text = String::new();
    input.read_to_string(&mut text)?;
    let (formatted, _) = beautify(&text, CursorPos::default(), config);
    output.write_all(formatted.as_bytes())?;
    Ok(())
}
