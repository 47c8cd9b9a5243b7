//! Indentation engine.
//!
//! A depth automaton over the line sequence: opening keywords increment the
//! depth after their line is emitted, `end` decrements before, and
//! `elsif`/`else`/`when`-in-case lines are emitted one level out without
//! changing the depth. Keyword detection runs on a comment- and
//! string-filtered view of each line. The automaton is rebuilt from scratch
//! every run; nothing persists between invocations.

use crate::parser::char_filter::CharFilter;
use crate::parser::patterns::{
    ARCH_RE, BLOCK_RE, CASE_RE, COMPONENT_RE, ELSE_RE, ELSIF_RE, END_RE, ENTITY_RE, FUNCTION_RE,
    GENERATE_RE, IF_RE, LOOP_RE, PROCEDURE_RE, PROCESS_RE, RECORD_RE, WHEN_LINE_RE,
};

/// Construct kinds tracked on the open-construct stack
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Construct {
    Entity,
    Architecture,
    Component,
    Process,
    If,
    Case,
    Generate,
    Block,
    Function,
    Procedure,
    Record,
    Loop,
}

/// Line-by-line indentation automaton
pub struct VhdlIndenter {
    depth: usize,
    stack: Vec<Construct>,
    tab_size: usize,
    use_tabs: bool,
}

impl VhdlIndenter {
    #[must_use]
    pub fn new(tab_size: usize, use_tabs: bool) -> Self {
        Self {
            depth: 0,
            stack: Vec::new(),
            tab_size,
            use_tabs,
        }
    }

    /// Re-derive the indentation of every line
    ///
    /// State is reset first, so the same indenter can be reused across
    /// buffers.
    pub fn indent_lines(&mut self, lines: &[String]) -> Vec<String> {
        self.depth = 0;
        self.stack.clear();
        lines.iter().map(|line| self.process_line(line)).collect()
    }

    /// Render the leading whitespace for a given depth
    fn indent_string(&self, depth: usize) -> String {
        if self.use_tabs {
            "\t".repeat(depth)
        } else {
            " ".repeat(depth * self.tab_size)
        }
    }

    fn emit(&self, depth: usize, content: &str) -> String {
        let mut line = self.indent_string(depth);
        line.push_str(content);
        line
    }

    /// Identify an opening construct on a filtered line
    ///
    /// Order matters where patterns overlap: `if .. generate` and
    /// `for .. generate` must resolve to a generate, not an if or a loop.
    fn opening_construct(code: &str) -> Option<Construct> {
        if GENERATE_RE.is_match(code) {
            Some(Construct::Generate)
        } else if ENTITY_RE.is_match(code) {
            Some(Construct::Entity)
        } else if ARCH_RE.is_match(code) {
            Some(Construct::Architecture)
        } else if COMPONENT_RE.is_match(code) {
            Some(Construct::Component)
        } else if CASE_RE.is_match(code) {
            Some(Construct::Case)
        } else if IF_RE.is_match(code) {
            Some(Construct::If)
        } else if RECORD_RE.is_match(code) {
            Some(Construct::Record)
        } else if FUNCTION_RE.is_match(code) {
            Some(Construct::Function)
        } else if PROCEDURE_RE.is_match(code) {
            Some(Construct::Procedure)
        } else if PROCESS_RE.is_match(code) {
            Some(Construct::Process)
        } else if BLOCK_RE.is_match(code) {
            Some(Construct::Block)
        } else if LOOP_RE.is_match(code) {
            Some(Construct::Loop)
        } else {
            None
        }
    }

    fn process_line(&mut self, line: &str) -> String {
        let content = line.trim();
        if content.is_empty() {
            return String::new();
        }

        let code = CharFilter::new(line, true, true).filter_all();
        let code = code.trim();

        // Comment-only line stays at the current depth
        if code.is_empty() {
            return self.emit(self.depth, content);
        }

        if END_RE.is_match(code) {
            self.depth = self.depth.saturating_sub(1);
            self.stack.pop();
            return self.emit(self.depth, content);
        }

        // Dedent-then-reindent: emitted one level out, depth unchanged
        if ELSIF_RE.is_match(code) || ELSE_RE.is_match(code) {
            return self.emit(self.depth.saturating_sub(1), content);
        }
        if WHEN_LINE_RE.is_match(code) && self.stack.last() == Some(&Construct::Case) {
            return self.emit(self.depth.saturating_sub(1), content);
        }

        if let Some(construct) = Self::opening_construct(code) {
            let emitted = self.emit(self.depth, content);
            self.depth += 1;
            self.stack.push(construct);
            return emitted;
        }

        self.emit(self.depth, content)
    }
}
