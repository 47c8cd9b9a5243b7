//! Per-position scope classification.
//!
//! The alignment pass treats regex matches inside comments or string
//! literals as absent. The tags come from a [`ScopeProvider`]; an editor
//! host derives them from its own syntax highlighting, while the CLI builds
//! them with [`scan_buffer`].

pub mod scanner;
pub mod types;

pub use scanner::scan_buffer;
pub use types::{AllCode, BufferScopes, LineScopes, ScopeProvider, ScopeTag};
