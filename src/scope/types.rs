/// Scope classification for buffer positions
use std::fmt;
use std::ops::Range;

/// Syntax classification of a single buffer position
///
/// Supplied by the host (or by [`crate::scope::scan_buffer`] when running
/// standalone); the formatting passes only ever read these tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeTag {
    Code,
    Comment,
    StringLiteral,
}

impl ScopeTag {
    /// Check if a regex match in this scope participates in alignment
    #[must_use]
    pub fn is_live(self) -> bool {
        matches!(self, ScopeTag::Code)
    }
}

impl fmt::Display for ScopeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ScopeTag::Code => "code",
            ScopeTag::Comment => "comment",
            ScopeTag::StringLiteral => "string",
        };
        write!(f, "{name}")
    }
}

/// Source of per-position scope tags for a buffer
///
/// Positions are (row, byte column) pairs. Rows or columns past the end of
/// the buffer classify as code, so padding inserted by earlier passes never
/// invalidates a provider built from the original text.
pub trait ScopeProvider {
    /// Classify a single buffer position
    fn scope_at(&self, row: usize, col: usize) -> ScopeTag;

    /// Check whether a match span on `row` lies entirely in live code
    fn is_live(&self, row: usize, span: &Range<usize>) -> bool {
        if span.is_empty() {
            return self.scope_at(row, span.start).is_live();
        }
        (span.start..span.end).all(|col| self.scope_at(row, col).is_live())
    }
}

/// Per-line scope segments
///
/// Segments are contiguous, in order, and cover the line exactly; anything
/// past the last segment is code.
#[derive(Debug, Clone, Default)]
pub struct LineScopes {
    segments: Vec<(Range<usize>, ScopeTag)>,
}

impl LineScopes {
    #[must_use]
    pub fn new(segments: Vec<(Range<usize>, ScopeTag)>) -> Self {
        Self { segments }
    }

    /// Classify a byte column on this line
    #[must_use]
    pub fn tag_at(&self, col: usize) -> ScopeTag {
        for (range, tag) in &self.segments {
            if range.contains(&col) {
                return *tag;
            }
        }
        ScopeTag::Code
    }
}

/// Scope tags for a whole buffer, one [`LineScopes`] per line
#[derive(Debug, Clone, Default)]
pub struct BufferScopes {
    lines: Vec<LineScopes>,
}

impl BufferScopes {
    #[must_use]
    pub fn new(lines: Vec<LineScopes>) -> Self {
        Self { lines }
    }

    #[must_use]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }
}

impl ScopeProvider for BufferScopes {
    fn scope_at(&self, row: usize, col: usize) -> ScopeTag {
        match self.lines.get(row) {
            Some(line) => line.tag_at(col),
            None => ScopeTag::Code,
        }
    }
}

/// Provider that classifies every position as code
///
/// For hosts that have no syntax classification of their own; passes then
/// treat every match as live.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllCode;

impl ScopeProvider for AllCode {
    fn scope_at(&self, _row: usize, _col: usize) -> ScopeTag {
        ScopeTag::Code
    }
}
