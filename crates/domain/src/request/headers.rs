//! Outgoing request headers

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// Literal header names mapped to literal values, in declaration order.
///
/// Built from `"Key: Value"` entries. Header names are kept verbatim;
/// no case folding is applied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HeadersMap {
    items: IndexMap<String, String>,
}

impl HeadersMap {
    /// Creates an empty header map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a single `"Key: Value"` entry.
    ///
    /// The entry is split at the first colon and both sides are trimmed,
    /// so `"  X : Y  "` yields `("X", "Y")`.
    ///
    /// # Errors
    /// Returns [`DomainError::MissingHeaderSeparator`] when the entry has no colon.
    pub fn parse_entry(entry: &str) -> DomainResult<(String, String)> {
        let (key, value) = entry
            .split_once(':')
            .ok_or_else(|| DomainError::MissingHeaderSeparator(entry.to_string()))?;
        Ok((key.trim().to_string(), value.trim().to_string()))
    }

    /// Builds a map from `"Key: Value"` entries.
    ///
    /// A repeated name keeps the last value.
    ///
    /// # Errors
    /// Returns the error of the first malformed entry.
    pub fn from_entries<I, S>(entries: I) -> DomainResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut headers = Self::new();
        for entry in entries {
            let (key, value) = Self::parse_entry(entry.as_ref())?;
            headers.insert(key, value);
        }
        Ok(headers)
    }

    /// Inserts a header, replacing any previous value for the same name.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.items.insert(name.into(), value.into());
    }

    /// Returns the value of a header.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.items.get(name).map(String::as_str)
    }

    /// Adds every header of `other` whose name is not already present.
    pub fn inherit(&mut self, other: &Self) {
        for (name, value) in &other.items {
            self.items
                .entry(name.clone())
                .or_insert_with(|| value.clone());
        }
    }

    /// Returns an iterator over `(name, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.items.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Returns the number of headers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if there are no headers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for HeadersMap {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            items: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
