//! Configuration source port
//!
//! Defines where the configuration document comes from.

use std::io;

/// Errors that can occur while reading a configuration document.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// The document does not exist.
    #[error("configuration not found: {0}")]
    NotFound(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// A place a configuration document is read from.
///
/// The document is read once and parsed as a whole.
pub trait ConfigSource {
    /// Returns a human readable name for the source, used in logs.
    fn describe(&self) -> String;

    /// Reads the whole document.
    ///
    /// # Errors
    /// Returns an error if the document cannot be read.
    fn read(&self) -> Result<String, SourceError>;
}
