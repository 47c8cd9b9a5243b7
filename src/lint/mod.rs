//! Naming-convention checks.
//!
//! Four declaration rules (constant, variable, signal, type) and four
//! structural-label rules (instantiation, process, block, generate), each
//! independently enabled through configuration. Output is a set of
//! identifier spans per category for the host to highlight.

pub mod category;
pub mod naming;

pub use category::{Category, SIGNAL_PREFIXES};
pub use naming::{lint_buffer, LintReport, Offense};
