//! Loosely-typed view of the document
//!
//! The first parsing pass only checks the document shape and field types.
//! Everything that can be reported together (header directives, methods,
//! durations, mandatory fields) is left as plain values for the second pass.

use indexmap::IndexMap;
use serde::Deserialize;
use serde_yaml::Value;

use apitesto_domain::ThinkTime;

/// Top-level sections.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub(crate) struct RawDocument {
    #[serde(default)]
    pub base_urls: IndexMap<String, String>,
    #[serde(default)]
    pub groups: IndexMap<String, RawTest>,
    #[serde(default)]
    pub functional_tests: Vec<RawTest>,
    #[serde(default)]
    pub load_tests: Vec<RawTest>,
}

/// Fields of any test or group.
///
/// Tests and groups share one shape; each kind reads the fields it uses.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub(crate) struct RawTest {
    #[serde(default)]
    pub name: String,
    pub url: Option<String>,
    pub method: Option<String>,
    #[serde(default)]
    pub request_headers: Vec<String>,
    pub body: Option<String>,
    #[serde(default)]
    pub query_parameters: IndexMap<String, String>,
    #[serde(default)]
    pub path_parameters: IndexMap<String, String>,
    #[serde(default)]
    pub groups: Vec<String>,
    pub timeout: Option<RawTimeout>,
    pub expected: Option<RawExpected>,
    pub phases: Option<Vec<RawPhase>>,
    pub think_time: Option<ThinkTime>,
    #[serde(default)]
    pub success_criteria: Vec<String>,
}

impl RawTest {
    /// Returns the names of load-test fields present on this entry.
    pub fn load_fields(&self) -> Vec<&'static str> {
        let mut fields = Vec::new();
        if self.phases.is_some() {
            fields.push("phases");
        }
        if self.think_time.is_some() {
            fields.push("think-time");
        }
        if !self.success_criteria.is_empty() {
            fields.push("success-criteria");
        }
        fields
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct RawTimeout {
    #[serde(default)]
    pub connect: u64,
    #[serde(default)]
    pub request: u64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub(crate) struct RawExpected {
    pub status: Option<u16>,
    #[serde(default)]
    pub headers: Vec<Value>,
    pub response_schema: Option<serde_json::Map<String, serde_json::Value>>,
    #[serde(default)]
    pub assertions: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct RawPhase {
    #[serde(default)]
    pub name: String,
    pub duration: Option<Value>,
    #[serde(default)]
    pub rps: u32,
    #[serde(default)]
    pub ccs: u32,
}
