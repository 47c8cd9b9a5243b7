//! Vertical alignment engine.
//!
//! Pads a matched token to a common column across a block of consecutive
//! lines. A block is a maximal run of lines that each contain a live match
//! for the pattern; any non-matching line (blank lines included) ends the
//! block. Matches inside comments or string literals are treated as absent.
//! Only whitespace adjacent to the match is inserted, never removed, so the
//! pass is idempotent on already-aligned text.

use regex::Regex;

use crate::scope::ScopeProvider;

/// Which side of the match receives padding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PadSide {
    /// Pad before the match, pushing the match to a common start column
    Pre,
    /// Pad after the match, pushing what follows to a common column
    Post,
}

/// First live match on a line, as (start, end) byte columns
fn first_live_match(
    pattern: &Regex,
    row: usize,
    line: &str,
    scopes: &dyn ScopeProvider,
) -> Option<(usize, usize)> {
    pattern
        .find_iter(line)
        .find(|m| scopes.is_live(row, &(m.start()..m.end())))
        .map(|m| (m.start(), m.end()))
}

/// Align the first live match of `pattern` to a common column per block
#[must_use]
pub fn align(
    lines: &[String],
    pattern: &Regex,
    side: PadSide,
    scopes: &dyn ScopeProvider,
) -> Vec<String> {
    // Classify every line up front; a block is a run of consecutive Some
    let matches: Vec<Option<(usize, usize)>> = lines
        .iter()
        .enumerate()
        .map(|(row, line)| first_live_match(pattern, row, line, scopes))
        .collect();

    let mut out = Vec::with_capacity(lines.len());
    let mut row = 0;
    while row < lines.len() {
        if matches[row].is_none() {
            out.push(lines[row].clone());
            row += 1;
            continue;
        }

        let block_start = row;
        while row < lines.len() && matches[row].is_some() {
            row += 1;
        }
        let block = block_start..row;

        let target = block
            .clone()
            .filter_map(|i| matches[i])
            .map(|(start, end)| match side {
                PadSide::Pre => start,
                PadSide::Post => end,
            })
            .max()
            .unwrap_or(0);

        for i in block {
            let line = &lines[i];
            let Some((start, end)) = matches[i] else {
                out.push(line.clone());
                continue;
            };
            let col = match side {
                PadSide::Pre => start,
                PadSide::Post => end,
            };
            let pad = target - col;
            if pad == 0 {
                out.push(line.clone());
                continue;
            }
            let insert_at = match side {
                PadSide::Pre => start,
                PadSide::Post => end,
            };
            let mut padded = String::with_capacity(line.len() + pad);
            padded.push_str(&line[..insert_at]);
            padded.extend(std::iter::repeat(' ').take(pad));
            padded.push_str(&line[insert_at..]);
            out.push(padded);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::patterns::{ARROW_RE, DECL_COLON_RE, PORT_DIR_RE};
    use crate::scope::scan_buffer;

    fn lines(src: &[&str]) -> Vec<String> {
        src.iter().map(ToString::to_string).collect()
    }

    fn align_src(src: &[&str], pattern: &Regex, side: PadSide) -> Vec<String> {
        let lines = lines(src);
        let scopes = scan_buffer(&lines.join("\n"));
        align(&lines, pattern, side, &scopes)
    }

    #[test]
    fn test_pre_alignment_on_colon() {
        let out = align_src(
            &[
                "a : std_logic;",
                "longname : std_logic_vector(7 downto 0);",
            ],
            &DECL_COLON_RE,
            PadSide::Pre,
        );
        assert_eq!(out[0], "a        : std_logic;");
        assert_eq!(out[1], "longname : std_logic_vector(7 downto 0);");
        assert_eq!(out[0].find(':'), out[1].find(':'));
    }

    #[test]
    fn test_block_broken_by_non_matching_line() {
        let out = align_src(
            &[
                "a : std_logic;",
                "bb : std_logic;",
                "",
                "ccc : std_logic;",
                "d : std_logic;",
            ],
            &DECL_COLON_RE,
            PadSide::Pre,
        );
        // First block aligns to "bb", second to "ccc"; they are independent
        assert_eq!(out[0], "a  : std_logic;");
        assert_eq!(out[1], "bb : std_logic;");
        assert_eq!(out[2], "");
        assert_eq!(out[3], "ccc : std_logic;");
        assert_eq!(out[4], "d   : std_logic;");
    }

    #[test]
    fn test_post_alignment_on_port_direction() {
        let out = align_src(
            &[
                "clk : in std_logic;",
                "data_out : out std_logic_vector(7 downto 0);",
            ],
            &PORT_DIR_RE,
            PadSide::Post,
        );
        // Padding lands after the direction keyword, so the types align
        assert_eq!(out[0].find("std_logic;"), out[1].find("std_logic_vector"));
    }

    #[test]
    fn test_comment_match_does_not_join_block() {
        let out = align_src(
            &[
                "a : std_logic;",
                "-- x : comment only",
                "bbb : std_logic;",
            ],
            &DECL_COLON_RE,
            PadSide::Pre,
        );
        // The comment line breaks the block, so the two code lines stay put
        assert_eq!(out[0], "a : std_logic;");
        assert_eq!(out[1], "-- x : comment only");
        assert_eq!(out[2], "bbb : std_logic;");
    }

    #[test]
    fn test_first_match_only() {
        let out = align_src(
            &["a => b, c => d,", "longer_name => e,"],
            &ARROW_RE,
            PadSide::Pre,
        );
        assert_eq!(out[0], "a           => b, c => d,");
        assert_eq!(out[1], "longer_name => e,");
    }

    #[test]
    fn test_single_line_block_is_noop() {
        let out = align_src(&["a : std_logic;"], &DECL_COLON_RE, PadSide::Pre);
        assert_eq!(out[0], "a : std_logic;");
    }

    #[test]
    fn test_idempotent() {
        let src = lines(&[
            "a : std_logic;",
            "longname : std_logic_vector(7 downto 0);",
        ]);
        let scopes = scan_buffer(&src.join("\n"));
        let once = align(&src, &DECL_COLON_RE, PadSide::Pre, &scopes);
        let scopes2 = scan_buffer(&once.join("\n"));
        let twice = align(&once, &DECL_COLON_RE, PadSide::Pre, &scopes2);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_line_count_preserved() {
        let src = &["a : b;", "", "c : d;", "-- e : f"];
        let out = align_src(src, &DECL_COLON_RE, PadSide::Pre);
        assert_eq!(out.len(), src.len());
    }
}
