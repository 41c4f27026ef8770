//! Group resolution
//!
//! Flattens named groups into the tests that reference them.

mod draft;
mod group_resolver;

pub use draft::{FunctionalDraft, LoadDraft};
pub use group_resolver::{GroupResolver, Resolvable, UnknownGroups};
