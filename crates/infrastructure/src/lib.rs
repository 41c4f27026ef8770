//! Apitesto Infrastructure - Adapters and implementations
//!
//! This crate provides concrete implementations of the ports
//! defined in the application layer.

pub mod serialization;
pub mod source;

pub use serialization::{SerializationError, config_to_json, to_json_stable};
pub use source::FileConfigSource;
