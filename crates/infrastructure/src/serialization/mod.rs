//! Deterministic JSON output of resolved configurations.
//!
//! The same configuration always renders to the same bytes:
//! - Keys in declaration order (ordered maps in domain types)
//! - 2-space indentation
//! - Trailing newline

mod json;

pub use json::*;
