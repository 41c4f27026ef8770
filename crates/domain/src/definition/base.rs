//! Fields shared by every kind of test

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::request::{HeadersMap, HttpMethod};

/// Connection and request timeouts, in milliseconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Timeout {
    /// Time allowed to establish the connection.
    #[serde(default)]
    pub connect_ms: u64,
    /// Time allowed for the whole request.
    #[serde(default)]
    pub request_ms: u64,
}

/// The request half of a test definition.
///
/// Fields left unset (`None` or empty) may be filled from groups, see
/// [`BaseTest::inherit`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct BaseTest {
    /// Display name of the test.
    pub name: String,
    /// Target URL or path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// HTTP method; GET when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<HttpMethod>,
    /// Outgoing request headers.
    #[serde(default, skip_serializing_if = "HeadersMap::is_empty")]
    pub headers: HeadersMap,
    /// Request body.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    /// Query string parameters.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub query_params: IndexMap<String, String>,
    /// Values substituted into the URL path.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub path_params: IndexMap<String, String>,
    /// Names of the groups this test inherits from, in precedence order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub groups: Vec<String>,
    /// Timeouts for the request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<Timeout>,
}

impl BaseTest {
    /// Creates a test with only a name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Returns the method to issue, defaulting to GET.
    #[must_use]
    pub fn effective_method(&self) -> HttpMethod {
        self.method.unwrap_or_default()
    }

    /// Fills every field still unset from `defaults`.
    ///
    /// Scalars already set are kept. Map entries are added only for keys
    /// not present yet. `name` and `groups` are never inherited.
    pub fn inherit(&mut self, defaults: &Self) {
        if self.url.is_none() {
            self.url.clone_from(&defaults.url);
        }
        if self.method.is_none() {
            self.method = defaults.method;
        }
        if self.body.is_none() {
            self.body.clone_from(&defaults.body);
        }
        if self.timeout.is_none() {
            self.timeout = defaults.timeout;
        }
        self.headers.inherit(&defaults.headers);
        inherit_entries(&mut self.query_params, &defaults.query_params);
        inherit_entries(&mut self.path_params, &defaults.path_params);
    }
}

fn inherit_entries(own: &mut IndexMap<String, String>, defaults: &IndexMap<String, String>) {
    for (key, value) in defaults {
        own.entry(key.clone()).or_insert_with(|| value.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_effective_method_defaults_to_get() {
        let mut test = BaseTest::new("health");
        assert_eq!(test.effective_method(), HttpMethod::Get);

        test.method = Some(HttpMethod::Delete);
        assert_eq!(test.effective_method(), HttpMethod::Delete);
    }

    #[test]
    fn test_inherit_fills_only_unset_fields() {
        let mut test = BaseTest {
            url: Some("/users".to_string()),
            query_params: IndexMap::from([("page".to_string(), "2".to_string())]),
            ..BaseTest::new("users")
        };
        let defaults = BaseTest {
            url: Some("/ignored".to_string()),
            method: Some(HttpMethod::Post),
            body: Some("{}".to_string()),
            timeout: Some(Timeout {
                connect_ms: 500,
                request_ms: 2_000,
            }),
            query_params: IndexMap::from([
                ("page".to_string(), "1".to_string()),
                ("size".to_string(), "50".to_string()),
            ]),
            groups: vec!["nested".to_string()],
            ..BaseTest::new("defaults")
        };

        test.inherit(&defaults);

        assert_eq!(test.name, "users");
        assert_eq!(test.url.as_deref(), Some("/users"));
        assert_eq!(test.method, Some(HttpMethod::Post));
        assert_eq!(test.body.as_deref(), Some("{}"));
        assert_eq!(test.timeout.map(|t| t.request_ms), Some(2_000));
        assert_eq!(test.query_params["page"], "2");
        assert_eq!(test.query_params["size"], "50");
        assert!(test.groups.is_empty());
    }

    #[test]
    fn test_explicit_get_is_not_overridden() {
        let mut test = BaseTest {
            method: Some(HttpMethod::Get),
            ..BaseTest::new("explicit")
        };
        let defaults = BaseTest {
            method: Some(HttpMethod::Put),
            ..BaseTest::default()
        };

        test.inherit(&defaults);

        assert_eq!(test.method, Some(HttpMethod::Get));
    }
}
