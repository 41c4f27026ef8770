//! Expected header directives.
//!
//! A directive is written either as a bare string or as a single-entry
//! mapping, with `!` as the negation marker:
//!
//! | directive            | kind              |
//! |----------------------|-------------------|
//! | `X-Request-Id`       | `Required`        |
//! | `!X-Debug`           | `Forbidden`       |
//! | `Content-Type: json` | `ValueRequired`   |
//! | `Server: "!nginx"`   | `ValueForbidden`  |
//!
//! In the mapping form the marker is only accepted on the value.

use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};
use std::fmt;

use crate::error::{DomainError, DomainResult};

const NEGATION: char = '!';

/// The assertion a directive makes about a response header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeaderKind {
    /// The header must be present.
    Required,
    /// The header must be absent.
    Forbidden,
    /// The header must be present with the given value.
    ValueRequired,
    /// The header must not carry the given value.
    ValueForbidden,
}

impl HeaderKind {
    /// Returns whether this kind compares header values.
    #[must_use]
    pub const fn has_value(self) -> bool {
        matches!(self, Self::ValueRequired | Self::ValueForbidden)
    }

    /// Returns whether this kind is a negative assertion.
    #[must_use]
    pub const fn is_negated(self) -> bool {
        matches!(self, Self::Forbidden | Self::ValueForbidden)
    }
}

/// A resolved header assertion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpectedHeader {
    /// Header name with the negation marker removed.
    pub key: String,
    /// The assertion kind.
    pub kind: HeaderKind,
    /// Header value, set only for the value kinds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl ExpectedHeader {
    /// Creates a presence assertion.
    #[must_use]
    pub fn required(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            kind: HeaderKind::Required,
            value: None,
        }
    }

    /// Creates an absence assertion.
    #[must_use]
    pub fn forbidden(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            kind: HeaderKind::Forbidden,
            value: None,
        }
    }

    /// Creates a value equality assertion.
    #[must_use]
    pub fn value_required(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            kind: HeaderKind::ValueRequired,
            value: Some(value.into()),
        }
    }

    /// Creates a value inequality assertion.
    #[must_use]
    pub fn value_forbidden(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            kind: HeaderKind::ValueForbidden,
            value: Some(value.into()),
        }
    }

    /// Parses one directive from its YAML representation.
    ///
    /// # Errors
    /// Returns a format error when the directive is neither a non-empty
    /// string nor a single-entry string-to-string mapping, or when the
    /// negation marker appears on the key of a mapping.
    pub fn from_directive(directive: &Value) -> DomainResult<Self> {
        match directive {
            Value::Mapping(entries) => Self::from_entry(entries, directive),
            other => match directive_text(other) {
                Some(raw) => Self::from_presence(&raw),
                None => Err(DomainError::InvalidHeaderFormat(render_value(other))),
            },
        }
    }

    /// Parses the bare string form.
    ///
    /// # Errors
    /// Returns [`DomainError::EmptyHeaderName`] when nothing remains after the marker.
    pub fn from_presence(raw: &str) -> DomainResult<Self> {
        let (key, negated) = strip_negation(raw);
        if key.is_empty() {
            return Err(DomainError::EmptyHeaderName(raw.to_string()));
        }
        Ok(if negated {
            Self::forbidden(key)
        } else {
            Self::required(key)
        })
    }

    fn from_entry(entries: &Mapping, directive: &Value) -> DomainResult<Self> {
        let mut iter = entries.iter();
        let Some((key, value)) = iter.next() else {
            return Err(DomainError::InvalidHeaderFormat(render_value(directive)));
        };
        if iter.next().is_some() {
            return Err(DomainError::MultipleHeaderEntries(render_value(directive)));
        }

        let Some(key) = directive_text(key) else {
            return Err(DomainError::NonStringHeaderKey(render_value(directive)));
        };
        let Some(value) = directive_text(value) else {
            return Err(DomainError::NonStringHeaderValue(render_value(directive)));
        };
        if key.starts_with(NEGATION) {
            return Err(DomainError::NegatedHeaderKey(render_value(directive)));
        }
        if key.is_empty() {
            return Err(DomainError::EmptyHeaderName(render_value(directive)));
        }

        let (value, negated) = strip_negation(&value);
        Ok(if negated {
            Self::value_forbidden(key, value)
        } else {
            Self::value_required(key, value)
        })
    }
}

impl fmt::Display for ExpectedHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = self.value.as_deref().unwrap_or_default();
        match self.kind {
            HeaderKind::Required => write!(f, "header '{}' is present", self.key),
            HeaderKind::Forbidden => write!(f, "header '{}' is absent", self.key),
            HeaderKind::ValueRequired => write!(f, "header '{}' equals '{value}'", self.key),
            HeaderKind::ValueForbidden => {
                write!(f, "header '{}' does not equal '{value}'", self.key)
            }
        }
    }
}

/// Returns the text of a string scalar.
///
/// An unquoted `!X-Debug` is read by YAML as a tag with an empty value;
/// it is taken back as the literal text `!X-Debug`.
fn directive_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Tagged(tagged) if tagged.value.is_null() || tagged.value.as_str() == Some("") => {
            Some(tagged.tag.to_string())
        }
        _ => None,
    }
}

fn strip_negation(raw: &str) -> (&str, bool) {
    raw.strip_prefix(NEGATION)
        .map_or((raw, false), |stripped| (stripped, true))
}

/// Renders a YAML value on one line for error messages.
#[must_use]
pub fn render_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => format!("{s:?}"),
        Value::Sequence(items) => {
            let items: Vec<_> = items.iter().map(render_value).collect();
            format!("[{}]", items.join(", "))
        }
        Value::Mapping(entries) => {
            let entries: Vec<_> = entries
                .iter()
                .map(|(k, v)| format!("{}: {}", render_value(k), render_value(v)))
                .collect();
            format!("{{{}}}", entries.join(", "))
        }
        Value::Tagged(tagged) => format!("{} {}", tagged.tag, render_value(&tagged.value)),
    }
}
