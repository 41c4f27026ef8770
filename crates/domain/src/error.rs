//! Domain error types

use thiserror::Error;

/// Format errors raised while interpreting a single declaration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A header directive is neither a string nor a single-entry mapping.
    #[error("unexpected header format: {0}")]
    InvalidHeaderFormat(String),

    /// A header directive names no header once the negation marker is removed.
    #[error("empty header name in directive: {0}")]
    EmptyHeaderName(String),

    /// A mapping directive declares more than one header.
    #[error("header directive must contain exactly one entry: {0}")]
    MultipleHeaderEntries(String),

    /// The key of a mapping directive is not a string.
    #[error("header name must be a string: {0}")]
    NonStringHeaderKey(String),

    /// The value of a mapping directive is not a string.
    #[error("header value must be a string: {0}")]
    NonStringHeaderValue(String),

    /// A mapping directive carries the negation marker on its key.
    #[error("negation is only allowed on the header value: {0}")]
    NegatedHeaderKey(String),

    /// An outgoing header entry has no `:` separator.
    #[error("invalid header format: {0}")]
    MissingHeaderSeparator(String),

    /// The HTTP method is not supported.
    #[error("unsupported HTTP method: {0}")]
    UnsupportedMethod(String),

    /// A phase duration expression could not be parsed.
    #[error("invalid duration: {0}")]
    InvalidDuration(String),
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
