//! Buffer processing and command dispatch.
//!
//! Sequences the formatting passes into the full pipeline, exposes the
//! whitespace-clean variant, and dispatches host commands to the matching
//! pure function. The main entry points are [`beautify`] for in-memory
//! buffers and [`format_stream`] for file or stdin processing.

pub mod pipeline;

pub use pipeline::{beautify, clean_whitespace, format_stream, run_command, CommandResult};
