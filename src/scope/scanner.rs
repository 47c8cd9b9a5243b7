//! Buffer scanner producing [`BufferScopes`].
//!
//! A small host-side lexer: walks each line once and records where string
//! literals and `--` comments begin and end. VHDL string literals do not
//! span lines and `--` comments run to end of line, so the scan carries no
//! state between lines.

use crate::scope::types::{BufferScopes, LineScopes, ScopeTag};

/// Scan a buffer into per-position scope tags
#[must_use]
pub fn scan_buffer(text: &str) -> BufferScopes {
    let lines = text.split('\n').map(scan_line).collect();
    BufferScopes::new(lines)
}

fn scan_line(line: &str) -> LineScopes {
    let mut segments = Vec::new();
    let mut chars = line.char_indices().peekable();
    let mut string_open: Option<usize> = None;

    while let Some((pos, c)) = chars.next() {
        if let Some(start) = string_open {
            if c == '"' {
                if chars.peek().map(|&(_, n)| n) == Some('"') {
                    chars.next();
                } else {
                    segments.push((start..pos + 1, ScopeTag::StringLiteral));
                    string_open = None;
                }
            }
            continue;
        }
        match c {
            '"' => string_open = Some(pos),
            '-' if chars.peek().map(|&(_, n)| n) == Some('-') => {
                segments.push((pos..line.len(), ScopeTag::Comment));
                return LineScopes::new(segments);
            }
            '\'' => {
                // Character literal: tag it so '"', '-' or ':' inside cannot
                // be taken for a string opener, comment or operator
                let mut rest = line[pos..].chars();
                rest.next();
                if let (Some(inner), Some('\'')) = (rest.next(), rest.next()) {
                    let end = pos + 2 + inner.len_utf8();
                    segments.push((pos..end, ScopeTag::StringLiteral));
                    chars.next();
                    chars.next();
                }
            }
            _ => {}
        }
    }

    // Unterminated string runs to end of line
    if let Some(start) = string_open {
        segments.push((start..line.len(), ScopeTag::StringLiteral));
    }
    LineScopes::new(segments)
}
