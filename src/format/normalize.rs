//! Line normalizer.
//!
//! Per-line cleanup rules that give every pass after them a canonical
//! baseline: tabs expanded, trailing whitespace stripped, separators
//! tightened, structural operators padded to exactly one space per side.
//! Matches inside comments or string literals are left alone.

use crate::parser::patterns::{BLANK_RUN_RE, KEYWORD_PAREN_RE, PAD_OP_RE, PUNCT_SPACE_RE};
use crate::scope::{scan_buffer, ScopeProvider};

/// Expand every tab to a fixed-width run of spaces
#[must_use]
pub fn expand_tabs(line: &str, tab_size: usize) -> String {
    if !line.contains('\t') {
        return line.to_string();
    }
    line.replace('\t', &" ".repeat(tab_size))
}

/// Remove whitespace before a `;` or `,` separator
#[must_use]
pub fn tighten_separators(line: &str) -> String {
    let scopes = scan_buffer(line);
    let mut out = String::with_capacity(line.len());
    let mut last = 0;
    for m in PUNCT_SPACE_RE.find_iter(line) {
        let punct = m.end() - 1;
        if !scopes.is_live(0, &(punct..m.end())) {
            continue;
        }
        out.push_str(&line[last..m.start()]);
        out.push_str(&line[punct..m.end()]);
        last = m.end();
    }
    out.push_str(&line[last..]);
    out
}

/// Collapse whitespace between `map`/`process` and its opening parenthesis
#[must_use]
pub fn tighten_keyword_paren(line: &str) -> String {
    let scopes = scan_buffer(line);
    let mut out = String::with_capacity(line.len());
    let mut last = 0;
    for caps in KEYWORD_PAREN_RE.captures_iter(line) {
        // Capture group 0 always exists for a match
        let Some(whole) = caps.get(0) else { continue };
        let Some(keyword) = caps.get(1) else { continue };
        if !scopes.is_live(0, &(whole.start()..whole.end())) {
            continue;
        }
        out.push_str(&line[last..keyword.end()]);
        out.push('(');
        last = whole.end();
    }
    out.push_str(&line[last..]);
    out
}

/// Pad `:=`, `<=`, `=>` and the declaration colon with exactly one space on
/// each side
///
/// Adjacent runs of spaces are collapsed to the single canonical space, so
/// alignment always starts from the same baseline. An operator that ends the
/// line gets no trailing space.
#[must_use]
pub fn pad_operators(line: &str) -> String {
    let scopes = scan_buffer(line);
    let ops: Vec<(usize, usize)> = PAD_OP_RE
        .find_iter(line)
        .filter(|m| scopes.is_live(0, &(m.start()..m.end())))
        .map(|m| (m.start(), m.end()))
        .collect();
    if ops.is_empty() {
        return line.to_string();
    }

    let mut out = String::with_capacity(line.len() + ops.len() * 2);
    let mut pos = 0;
    for (i, &(start, end)) in ops.iter().enumerate() {
        let mut seg = &line[pos..start];
        if i > 0 {
            seg = seg.trim_start_matches(' ');
        }
        let seg = seg.trim_end_matches(' ');
        if i > 0 && !seg.is_empty() {
            out.push(' ');
        }
        out.push_str(seg);
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(&line[start..end]);
        pos = end;
    }
    let tail = line[pos..].trim_start_matches(' ');
    if !tail.is_empty() {
        out.push(' ');
        out.push_str(tail);
    }
    out
}

/// Apply the full normalizer rule set to one line
#[must_use]
pub fn normalize_line(line: &str, tab_size: usize) -> String {
    let line = expand_tabs(line, tab_size);
    let line = line.trim_end().to_string();
    let line = tighten_separators(&line);
    let line = tighten_keyword_paren(&line);
    pad_operators(&line)
}

/// Apply the cleanup rules only (no operator padding)
///
/// The whitespace-clean command uses this variant; it fixes tabs, trailing
/// whitespace and separator spacing without touching operator layout.
#[must_use]
pub fn clean_line(line: &str, tab_size: usize) -> String {
    let line = expand_tabs(line, tab_size);
    let line = line.trim_end().to_string();
    let line = tighten_separators(&line);
    tighten_keyword_paren(&line)
}

/// Normalize every line of a buffer, preserving line count
#[must_use]
pub fn normalize_lines(lines: &[String], tab_size: usize) -> Vec<String> {
    lines
        .iter()
        .map(|line| normalize_line(line, tab_size))
        .collect()
}

/// Collapse any run of three or more newlines to a single blank line
///
/// Buffer-wide substitution, the one pass that changes line count.
#[must_use]
pub fn collapse_blank_lines(text: &str) -> String {
    BLANK_RUN_RE.replace_all(text, "\n\n").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_tabs() {
        assert_eq!(expand_tabs("\tx <= y;", 4), "    x <= y;");
        assert_eq!(expand_tabs("\t\ta", 2), "    a");
        assert_eq!(expand_tabs("no tabs", 4), "no tabs");
    }

    #[test]
    fn test_tighten_separators() {
        assert_eq!(tighten_separators("x <= y ;"), "x <= y;");
        assert_eq!(tighten_separators("f(a , b  , c)"), "f(a, b, c)");
        assert_eq!(tighten_separators("x <= y;"), "x <= y;");
    }

    #[test]
    fn test_tighten_separators_leaves_comments() {
        assert_eq!(
            tighten_separators("x <= y; -- note ; here"),
            "x <= y; -- note ; here"
        );
    }

    #[test]
    fn test_tighten_keyword_paren() {
        assert_eq!(tighten_keyword_paren("port map  ("), "port map(");
        assert_eq!(tighten_keyword_paren("process (clk)"), "process(clk)");
        assert_eq!(tighten_keyword_paren("port map("), "port map(");
    }

    #[test]
    fn test_pad_operators_inserts_spaces() {
        assert_eq!(pad_operators("a<=b;"), "a <= b;");
        assert_eq!(pad_operators("v:=5;"), "v := 5;");
        assert_eq!(pad_operators("when others=>null;"), "when others => null;");
        assert_eq!(pad_operators("signal s:std_logic;"), "signal s : std_logic;");
    }

    #[test]
    fn test_pad_operators_collapses_runs() {
        assert_eq!(pad_operators("a   <=    b;"), "a <= b;");
        assert_eq!(
            pad_operators("signal s  :  std_logic  :=  '0';"),
            "signal s : std_logic := '0';"
        );
    }

    #[test]
    fn test_pad_operators_idempotent() {
        let once = pad_operators("sum<=a+b;");
        assert_eq!(pad_operators(&once), once);
    }

    #[test]
    fn test_pad_operators_keeps_indentation() {
        assert_eq!(pad_operators("    q<=d;"), "    q <= d;");
    }

    #[test]
    fn test_pad_operators_skips_comments_and_strings() {
        assert_eq!(pad_operators("x <= y; -- a<=b"), "x <= y; -- a<=b");
        assert_eq!(
            pad_operators(r#"msg <= "a:=b";"#),
            r#"msg <= "a:=b";"#
        );
        assert_eq!(pad_operators("c <= ':';"), "c <= ':';");
    }

    #[test]
    fn test_pad_operator_at_end_of_line() {
        // No trailing space, so a rerun after trailing-strip is stable
        assert_eq!(pad_operators("when IDLE =>"), "when IDLE =>");
        assert_eq!(pad_operators("when IDLE=>"), "when IDLE =>");
    }

    #[test]
    fn test_normalize_line_rule_order() {
        assert_eq!(
            normalize_line("\tsignal s:std_logic ;  ", 4),
            "    signal s : std_logic;"
        );
    }

    #[test]
    fn test_clean_line_no_padding() {
        assert_eq!(clean_line("a<=b ;\t", 4), "a<=b;");
    }

    #[test]
    fn test_normalize_preserves_line_count() {
        let lines: Vec<String> = ["a;", "", "\tb ,c"].iter().map(ToString::to_string).collect();
        assert_eq!(normalize_lines(&lines, 4).len(), lines.len());
    }

    #[test]
    fn test_collapse_blank_lines() {
        assert_eq!(collapse_blank_lines("a\n\n\n\n\n\nb"), "a\n\nb");
        assert_eq!(collapse_blank_lines("a\n\nb"), "a\n\nb");
        assert_eq!(collapse_blank_lines("a\nb"), "a\nb");
    }
}
