//! Lexical-level parsing support.
//!
//! Provides the regex table used by the formatting and linting passes and
//! the [`CharFilter`] iterator that hides string literals and comments from
//! keyword scanning.

pub mod char_filter;
pub mod patterns;

pub use char_filter::{comment_start, CharFilter};
