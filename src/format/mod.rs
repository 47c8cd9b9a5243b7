//! Formatting passes.
//!
//! Three independent, line-count-preserving passes over the buffer:
//! - [`normalize`]: per-line cleanup and operator padding
//! - [`align`]: vertical alignment of matched tokens per block
//! - [`indent`]: keyword-driven indentation automaton
//!
//! The pipeline in [`crate::process`] sequences them; each pass is a pure
//! function of its input lines.

pub mod align;
pub mod indent;
pub mod normalize;

pub use align::{align, PadSide};
pub use indent::VhdlIndenter;
pub use normalize::{clean_line, collapse_blank_lines, normalize_line, normalize_lines};
