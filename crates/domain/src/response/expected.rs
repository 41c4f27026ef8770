//! Expected response of a functional test

use serde::{Deserialize, Serialize};

use super::ExpectedHeader;

/// What a functional test expects back from the endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ExpectedResponse {
    /// Expected HTTP status code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    /// Header assertions, in declaration order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub headers: Vec<ExpectedHeader>,
    /// Schema document handed to the executor's schema validator untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_schema: Option<serde_json::Map<String, serde_json::Value>>,
    /// Assertion expressions, interpreted by the executor.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub assertions: Vec<String>,
}

impl ExpectedResponse {
    /// Creates an expectation on the status code only.
    #[must_use]
    pub fn status(code: u16) -> Self {
        Self {
            status: Some(code),
            ..Self::default()
        }
    }

    /// Adds a header assertion.
    #[must_use]
    pub fn with_header(mut self, header: ExpectedHeader) -> Self {
        self.headers.push(header);
        self
    }

    /// Adds an assertion expression.
    #[must_use]
    pub fn with_assertion(mut self, assertion: impl Into<String>) -> Self {
        self.assertions.push(assertion.into());
        self
    }
}
