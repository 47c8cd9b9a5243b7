/// Regex patterns for VHDL syntax
///
/// All patterns are compiled once at startup using `LazyLock`.
///
/// All regexes use case-insensitive + unicode flags (VHDL identifiers and
/// keywords are case-insensitive). The `regex` crate has no lookaround, so
/// the colon patterns are written as alternations that simply fail to match
/// the `:=` operator instead of using a negative lookahead.
use std::sync::LazyLock;

use regex::{Regex, RegexBuilder};

/// Build a case-insensitive regex from a compile-time constant pattern.
///
/// # Panics
///
/// Panics if the pattern is invalid. This is acceptable because all patterns
/// in this module are compile-time constants that are verified by tests.
/// The panic occurs at first access of the `LazyLock` static.
fn build_re(pattern: &str) -> Regex {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .unicode(true)
        .build()
        .unwrap_or_else(|_| panic!("Invalid regex pattern: {pattern}"))
}

// Anchor patterns
const EOL_STR: &str = r"\s*$"; // End of line
const SOL_STR: &str = r"^\s*"; // Start of line
const LABEL_STR: &str = r"(?:\w+\s*:\s*)?"; // Optional statement label

// ===== STRUCTURE KEYWORDS (indentation openers) =====

// ENTITY declaration
pub static ENTITY_RE: LazyLock<Regex> =
    LazyLock::new(|| build_re(&format!(r"{SOL_STR}ENTITY\s+\w+\s+IS{EOL_STR}")));

// ARCHITECTURE body
pub static ARCH_RE: LazyLock<Regex> =
    LazyLock::new(|| build_re(&format!(r"{SOL_STR}ARCHITECTURE\s+\w+\s+OF\s+\w+\s+IS{EOL_STR}")));

// COMPONENT declaration
pub static COMPONENT_RE: LazyLock<Regex> =
    LazyLock::new(|| build_re(&format!(r"{SOL_STR}COMPONENT\s+\w+(\s+IS)?{EOL_STR}")));

// PROCESS (with optional label and sensitivity list)
pub static PROCESS_RE: LazyLock<Regex> =
    LazyLock::new(|| build_re(&format!(r"{SOL_STR}{LABEL_STR}PROCESS\b")));

// IF ... THEN
pub static IF_RE: LazyLock<Regex> =
    LazyLock::new(|| build_re(&format!(r"{SOL_STR}{LABEL_STR}IF\b.*\bTHEN{EOL_STR}")));

// ELSIF / ELSE (dedent-then-reindent)
pub static ELSIF_RE: LazyLock<Regex> =
    LazyLock::new(|| build_re(&format!(r"{SOL_STR}ELSIF\b")));
pub static ELSE_RE: LazyLock<Regex> = LazyLock::new(|| build_re(&format!(r"{SOL_STR}ELSE{EOL_STR}")));

// CASE ... IS
pub static CASE_RE: LazyLock<Regex> =
    LazyLock::new(|| build_re(&format!(r"{SOL_STR}{LABEL_STR}CASE\b.*\bIS{EOL_STR}")));

// WHEN choice (inside case; dedent-then-reindent)
pub static WHEN_LINE_RE: LazyLock<Regex> =
    LazyLock::new(|| build_re(&format!(r"{SOL_STR}WHEN\b")));

// FOR/IF/WHILE ... GENERATE (checked before IF and LOOP)
pub static GENERATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    build_re(&format!(
        r"{SOL_STR}{LABEL_STR}(FOR|IF|WHILE)\b.*\bGENERATE{EOL_STR}"
    ))
});

// BLOCK statement
pub static BLOCK_RE: LazyLock<Regex> =
    LazyLock::new(|| build_re(&format!(r"{SOL_STR}{LABEL_STR}BLOCK\b")));

// FUNCTION / PROCEDURE bodies (declarations end in ';' and carry no IS)
pub static FUNCTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    build_re(&format!(
        r"{SOL_STR}(PURE\s+|IMPURE\s+)?FUNCTION\b.*\bIS{EOL_STR}"
    ))
});
pub static PROCEDURE_RE: LazyLock<Regex> =
    LazyLock::new(|| build_re(&format!(r"{SOL_STR}PROCEDURE\b.*\bIS{EOL_STR}")));

// TYPE ... IS RECORD
pub static RECORD_RE: LazyLock<Regex> =
    LazyLock::new(|| build_re(&format!(r"{SOL_STR}TYPE\s+\w+\s+IS\s+RECORD{EOL_STR}")));

// FOR/WHILE ... LOOP and bare LOOP
pub static LOOP_RE: LazyLock<Regex> = LazyLock::new(|| {
    build_re(&format!(
        r"{SOL_STR}{LABEL_STR}((FOR|WHILE)\b.*\bLOOP{EOL_STR}|LOOP{EOL_STR})"
    ))
});

// Generic END (end if; end process foo; end architecture; plain end;)
pub static END_RE: LazyLock<Regex> = LazyLock::new(|| build_re(&format!(r"{SOL_STR}END\b")));

// ===== ALIGNMENT TARGETS =====

// Declaration colon, excluding the := operator
pub static DECL_COLON_RE: LazyLock<Regex> = LazyLock::new(|| build_re(r":($|[^=])"));

// Colon plus optional port direction keyword; aligned on the match end so
// that whatever follows the direction keyword lands in a common column.
// Fails to match the colon of := (no lookahead needed: every alternative
// requires something other than '=' after the colon).
pub static PORT_DIR_RE: LazyLock<Regex> =
    LazyLock::new(|| build_re(r":(\s*(in|out|inout|buffer)\b\s*|\s+|$)"));

// Signal assignment (<=) and variable assignment (:=); `<` also covers the
// opening of a relational, which the original aligned identically.
pub static SIG_ASSIGN_RE: LazyLock<Regex> = LazyLock::new(|| build_re(r"<|:="));

// Association arrow
pub static ARROW_RE: LazyLock<Regex> = LazyLock::new(|| build_re(r"=>"));

// WHEN keyword (post-indent alignment pass)
pub static WHEN_RE: LazyLock<Regex> = LazyLock::new(|| build_re(r"\bWHEN\b"));

// ===== NORMALIZER SUBSTITUTIONS =====

// Whitespace preceding a statement terminator or list separator
pub static PUNCT_SPACE_RE: LazyLock<Regex> = LazyLock::new(|| build_re(r"\s+([;,])"));

// Spurious space between a keyword and its opening parenthesis
pub static KEYWORD_PAREN_RE: LazyLock<Regex> =
    LazyLock::new(|| build_re(r"\b(MAP|PROCESS)\s+\("));

// Operators that receive exactly one space on each side. Multi-character
// forms come first so `:=` is consumed whole and the lone-colon branch
// never fires inside it.
pub static PAD_OP_RE: LazyLock<Regex> = LazyLock::new(|| build_re(r"=>|:=|<=|:"));

// Run of three or more newlines, collapsed buffer-wide to a single blank line
pub static BLANK_RUN_RE: LazyLock<Regex> = LazyLock::new(|| build_re(r"\n{3,}"));

// ===== NAMING LINTER =====

// Declared identifier after a declaration keyword
pub static CONSTANT_DECL_RE: LazyLock<Regex> = LazyLock::new(|| build_re(r"\bCONSTANT\s+(\w+)"));
pub static VARIABLE_DECL_RE: LazyLock<Regex> = LazyLock::new(|| build_re(r"\bVARIABLE\s+(\w+)"));
pub static SIGNAL_DECL_RE: LazyLock<Regex> = LazyLock::new(|| build_re(r"\bSIGNAL\s+(\w+)"));
pub static TYPE_DECL_RE: LazyLock<Regex> = LazyLock::new(|| build_re(r"\bTYPE\s+(\w+)"));

// Structural-label trigger lines
pub static MAP_LINE_RE: LazyLock<Regex> = LazyLock::new(|| build_re(r"\b(GENERIC|PORT)\s*MAP\b"));
pub static PROCESS_WORD_RE: LazyLock<Regex> = LazyLock::new(|| build_re(r"\bPROCESS\b"));
pub static BLOCK_LABEL_RE: LazyLock<Regex> = LazyLock::new(|| build_re(r":\s*BLOCK\b"));
pub static GENERATE_WORD_RE: LazyLock<Regex> = LazyLock::new(|| build_re(r"\bGENERATE\b"));

// Statement label at the start of a line
pub static LABEL_RE: LazyLock<Regex> = LazyLock::new(|| build_re(r"^\s*(\w+)\s*:"));
