/// `CharFilter` - Iterator that filters out strings and comments
///
/// Wraps a string iterator and maintains state about whether we're inside a
/// string literal or a `--` comment, so callers only ever parse actual VHDL
/// code. Character literals (`'0'`) and attribute ticks (`clk'event`) are
/// disambiguated by looking one character ahead: a tick only opens a literal
/// in the exact `'x'` form.

/// Iterator adapter that filters out strings and comments
///
/// Yields (position, character) pairs for only the actual VHDL code,
/// skipping over string contents and comments.
pub struct CharFilter<'a> {
    content: &'a str,
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
    in_string: bool,
    in_comment: bool,
    filter_comments: bool,
    filter_strings: bool,
}

impl<'a> CharFilter<'a> {
    /// Create a new `CharFilter`
    ///
    /// # Arguments
    /// * `content` - The string to iterate over (a single line)
    /// * `filter_comments` - Whether to filter out `--` comments
    /// * `filter_strings` - Whether to filter out string/character literals
    #[must_use]
    pub fn new(content: &'a str, filter_comments: bool, filter_strings: bool) -> Self {
        Self {
            content,
            chars: content.char_indices().peekable(),
            in_string: false,
            in_comment: false,
            filter_comments,
            filter_strings,
        }
    }

    /// Check if we're currently inside a string literal
    #[must_use]
    pub fn in_string(&self) -> bool {
        self.in_string
    }

    /// Get the filtered content as a string
    ///
    /// Pre-allocates the result string based on the input size.
    pub fn filter_all(&mut self) -> String {
        let size_hint = self.chars.size_hint().0;
        let mut result = String::with_capacity(size_hint);
        for (_, c) in self.by_ref() {
            result.push(c);
        }
        result
    }

    /// Peek at the next character without consuming
    fn peek_next_char(&mut self) -> Option<char> {
        self.chars.peek().map(|&(_, c)| c)
    }

    /// True when the tick at `pos` opens a character literal (`'x'`)
    fn is_char_literal(&self, pos: usize) -> bool {
        let mut rest = self.content[pos..].chars();
        rest.next(); // the tick itself
        matches!((rest.next(), rest.next()), (Some(_), Some('\'')))
    }
}

impl Iterator for CharFilter<'_> {
    type Item = (usize, char);

    fn next(&mut self) -> Option<Self::Item> {
        let (pos, c) = self.chars.next()?;

        // If we're in a comment, the rest of the line is comment text
        if self.in_comment {
            if self.filter_comments {
                return self.next();
            }
            return Some((pos, c));
        }

        if self.in_string {
            if c == '"' {
                // Doubled quote is an escaped quote, stay inside
                if self.peek_next_char() == Some('"') {
                    self.chars.next();
                    if self.filter_strings {
                        return self.next();
                    }
                    return Some((pos, c));
                }
                self.in_string = false;
            }
            if self.filter_strings {
                return self.next();
            }
            return Some((pos, c));
        }

        // Comment start (two-character delimiter, only outside strings)
        if c == '-' && self.peek_next_char() == Some('-') {
            self.in_comment = true;
            if self.filter_comments {
                return self.next();
            }
            return Some((pos, c));
        }

        // String open
        if c == '"' {
            self.in_string = true;
            if self.filter_strings {
                return self.next();
            }
            return Some((pos, c));
        }

        // Character literal: consume the enclosed character and closing tick
        if c == '\'' && self.filter_strings && self.is_char_literal(pos) {
            self.chars.next();
            self.chars.next();
            return self.next();
        }

        Some((pos, c))
    }
}

/// Find the byte offset of the first comment delimiter outside a string
/// literal, or `None` if the line has no comment.
#[must_use]
pub fn comment_start(line: &str) -> Option<usize> {
    let mut chars = line.char_indices().peekable();
    let mut in_string = false;
    while let Some((pos, c)) = chars.next() {
        if in_string {
            if c == '"' {
                if chars.peek().map(|&(_, n)| n) == Some('"') {
                    chars.next();
                } else {
                    in_string = false;
                }
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '-' if chars.peek().map(|&(_, n)| n) == Some('-') => return Some(pos),
            '\'' => {
                // Skip a character literal so '-' content can't fake a comment
                let mut rest = line[pos..].chars();
                rest.next();
                if matches!((rest.next(), rest.next()), (Some(_), Some('\''))) {
                    chars.next();
                    chars.next();
                }
            }
            _ => {}
        }
    }
    None
}
