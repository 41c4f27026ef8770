//! The whole test configuration

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::{FunctionalTest, GroupDefinition, LoadTest};

/// A loaded, fully resolved test configuration.
///
/// Tests have had their groups merged in, so their `groups` lists are empty
/// and the executor never has to look at [`Config::groups`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    /// Logical name to URL prefix.
    #[serde(default)]
    pub base_urls: IndexMap<String, String>,
    /// Group definitions, kept for reference only.
    #[serde(default, skip_serializing)]
    pub groups: IndexMap<String, GroupDefinition>,
    /// Functional tests in declaration order.
    #[serde(default)]
    pub functional_tests: Vec<FunctionalTest>,
    /// Load tests in declaration order.
    #[serde(default)]
    pub load_tests: Vec<LoadTest>,
}

impl Config {
    /// Returns the URL prefix registered under `name`.
    #[must_use]
    pub fn base_url(&self, name: &str) -> Option<&str> {
        self.base_urls.get(name).map(String::as_str)
    }

    /// Returns the first functional test with the given name.
    #[must_use]
    pub fn functional_test(&self, name: &str) -> Option<&FunctionalTest> {
        self.functional_tests.iter().find(|t| t.name() == name)
    }

    /// Returns the first load test with the given name.
    #[must_use]
    pub fn load_test(&self, name: &str) -> Option<&LoadTest> {
        self.load_tests.iter().find(|t| t.name() == name)
    }

    /// Returns the number of tests of both kinds.
    #[must_use]
    pub fn test_count(&self) -> usize {
        self.functional_tests.len() + self.load_tests.len()
    }

    /// Returns true if the configuration declares no test.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.test_count() == 0
    }
}
