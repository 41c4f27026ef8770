//! Application error types

use std::fmt;

use apitesto_domain::DomainError;
use thiserror::Error;

use crate::ports::SourceError;

/// The part of the document an error was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    /// An entry of `base-urls`.
    BaseUrl,
    /// An entry of `groups`.
    Group,
    /// An entry of `functional-tests`.
    FunctionalTest,
    /// An entry of `load-tests`.
    LoadTest,
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::BaseUrl => "base URL",
            Self::Group => "group",
            Self::FunctionalTest => "functional test",
            Self::LoadTest => "load test",
        })
    }
}

/// Where a validation error was found.
///
/// The index disambiguates tests sharing a name or having none.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    /// Document section.
    pub section: Section,
    /// Position within the section.
    pub index: usize,
    /// Name of the entry, possibly empty.
    pub name: String,
    /// Offending field path, e.g. `expected.headers[1]`.
    pub field: Option<String>,
}

impl Location {
    /// Creates a location for a whole entry.
    #[must_use]
    pub fn new(section: Section, index: usize, name: impl Into<String>) -> Self {
        Self {
            section,
            index,
            name: name.into(),
            field: None,
        }
    }

    /// Returns a copy of this location pointing at `field`.
    #[must_use]
    pub fn field(&self, field: impl Into<String>) -> Self {
        Self {
            field: Some(field.into()),
            ..self.clone()
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} #{}", self.section, self.index)?;
        if !self.name.is_empty() {
            write!(f, " '{}'", self.name)?;
        }
        if let Some(field) = &self.field {
            write!(f, ", field `{field}`")?;
        }
        Ok(())
    }
}

/// What is wrong at a location.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationErrorKind {
    /// A declaration is malformed.
    #[error(transparent)]
    Format(#[from] DomainError),

    /// A mandatory field is absent or empty.
    #[error("missing required field")]
    MissingField,

    /// A test names a group that is not defined.
    #[error("unknown group '{0}'")]
    UnknownGroupReference(String),

    /// A value is outside its enumeration.
    #[error("unknown value '{value}', expected one of: {allowed}")]
    UnknownEnumValue {
        /// The rejected token.
        value: String,
        /// Accepted tokens, comma separated.
        allowed: String,
    },

    /// A value is well-formed but not acceptable.
    #[error("{0}")]
    InvalidValue(String),
}

/// A single structural problem in the document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{location}: {kind}")]
pub struct ValidationError {
    /// Where the problem is.
    pub location: Location,
    /// What the problem is.
    pub kind: ValidationErrorKind,
}

impl ValidationError {
    /// Creates a validation error.
    #[must_use]
    pub fn new(location: Location, kind: impl Into<ValidationErrorKind>) -> Self {
        Self {
            location,
            kind: kind.into(),
        }
    }
}

/// Every validation error found in a document, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<ValidationError>,
}

impl ValidationErrors {
    /// Creates an empty collection.
    #[must_use]
    pub const fn new() -> Self {
        Self { errors: Vec::new() }
    }

    /// Records an error.
    pub fn push(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// Records an error at `location`.
    pub fn report(&mut self, location: Location, kind: impl Into<ValidationErrorKind>) {
        self.push(ValidationError::new(location, kind));
    }

    /// Returns the recorded errors.
    #[must_use]
    pub fn as_slice(&self) -> &[ValidationError] {
        &self.errors
    }

    /// Returns an iterator over the recorded errors.
    pub fn iter(&self) -> std::slice::Iter<'_, ValidationError> {
        self.errors.iter()
    }

    /// Returns the number of errors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Returns true if no error was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns `Ok(value)` when empty, the collection otherwise.
    ///
    /// # Errors
    /// Returns `self` if any error was recorded.
    pub fn into_result<T>(self, value: T) -> Result<T, Self> {
        if self.is_empty() { Ok(value) } else { Err(self) }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} validation error(s)", self.errors.len())?;
        for error in &self.errors {
            write!(f, "\n  - {error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

impl IntoIterator for ValidationErrors {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a ValidationError;
    type IntoIter = std::slice::Iter<'a, ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

/// Errors returned when loading a configuration.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The document could not be read.
    #[error("cannot read configuration: {0}")]
    Source(#[from] SourceError),

    /// The document is not well-formed or has fields of the wrong type.
    #[error("cannot parse configuration: {0}")]
    DocumentParse(String),

    /// The document parsed but its content is invalid.
    #[error("invalid configuration: {0}")]
    Validation(#[from] ValidationErrors),
}

impl LoadError {
    /// Returns the validation errors, if that is what this error carries.
    #[must_use]
    pub const fn validation_errors(&self) -> Option<&ValidationErrors> {
        match self {
            Self::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}

/// Result type alias for loading operations.
pub type LoadResult<T> = Result<T, LoadError>;
