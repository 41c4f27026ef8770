//! Apitesto Application - Configuration loading and resolution
//!
//! This crate turns a YAML test document into a validated [`Config`]:
//! - Port traits (where the document comes from)
//! - The two-pass loader with error aggregation
//! - Group resolution
//!
//! [`Config`]: apitesto_domain::Config

pub mod error;
pub mod loader;
pub mod ports;
pub mod resolver;

pub use error::{
    LoadError, LoadResult, Location, Section, ValidationError, ValidationErrorKind,
    ValidationErrors,
};
pub use loader::ConfigLoader;
pub use ports::{ConfigSource, SourceError};
pub use resolver::{FunctionalDraft, GroupResolver, LoadDraft, Resolvable, UnknownGroups};
