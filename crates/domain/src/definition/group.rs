//! Reusable group of test fields

use serde::{Deserialize, Serialize};

use super::{BaseTest, Phase, ThinkTime};
use crate::response::ExpectedResponse;

/// Defaults shared by every test that names the group.
///
/// A group carries one set of request fields plus the fields specific to
/// functional and load tests, so the same group serves both kinds. Groups
/// do not reference other groups: `base.groups` is always empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct GroupDefinition {
    /// Request field defaults; `base.name` is the group name.
    #[serde(flatten)]
    pub base: BaseTest,
    /// Default expectation for functional tests.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected: Option<ExpectedResponse>,
    /// Default phases for load tests.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub phases: Vec<Phase>,
    /// Default think time for load tests.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub think_time: Option<ThinkTime>,
    /// Default success criteria for load tests.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub success_criteria: Vec<String>,
}

impl GroupDefinition {
    /// Creates an empty group.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            base: BaseTest::new(name),
            ..Self::default()
        }
    }

    /// Returns the group name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.base.name
    }
}
