//! JSON rendering of a resolved configuration.

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use apitesto_domain::Config;

/// Error type for serialization operations.
#[derive(Debug, thiserror::Error)]
pub enum SerializationError {
    /// JSON serialization failed.
    #[error("JSON serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    /// UTF-8 encoding error.
    #[error("UTF-8 encoding error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Serializes a value to deterministic JSON.
///
/// Output format:
/// - 2-space indentation
/// - Trailing newline
/// - Map keys in declaration order
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_json_stable<T: Serialize>(value: &T) -> Result<String, SerializationError> {
    let mut buffer = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"  ");
    let mut serializer = Serializer::with_formatter(&mut buffer, formatter);
    value.serialize(&mut serializer)?;

    let mut json = String::from_utf8(buffer)?;
    json.push('\n');
    Ok(json)
}

/// Renders a resolved configuration for the executor.
///
/// Group definitions are left out: every test already carries the fields
/// it inherited.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn config_to_json(config: &Config) -> Result<String, SerializationError> {
    to_json_stable(config)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use apitesto_domain::{
        BaseTest, ExpectedHeader, ExpectedResponse, FunctionalTest, GroupDefinition, HttpMethod,
        LoadTest, Phase,
    };
    use pretty_assertions::assert_eq;

    fn sample() -> Config {
        let mut config = Config::default();
        config
            .base_urls
            .insert("api".to_string(), "https://api.test".to_string());
        config
            .groups
            .insert("auth".to_string(), GroupDefinition::new("auth"));
        config.functional_tests.push(FunctionalTest::new(
            BaseTest {
                url: Some("/health".to_string()),
                method: Some(HttpMethod::Get),
                ..BaseTest::new("health")
            },
            ExpectedResponse::status(200).with_header(ExpectedHeader::forbidden("X-Debug")),
        ));
        config.load_tests.push(LoadTest {
            base: BaseTest::new("soak"),
            phases: vec![Phase {
                name: "steady".to_string(),
                duration: "1m30s".parse().expect("valid duration"),
                requests_per_second: 50,
                concurrent_users: 5,
            }],
            think_time: None,
            success_criteria: Vec::new(),
        });
        config
    }

    #[test]
    fn test_stable_serialization_has_trailing_newline() {
        let json = config_to_json(&Config::default()).expect("serialization should work");
        assert!(json.ends_with('\n'));
    }

    #[test]
    fn test_stable_serialization_uses_two_space_indent() {
        let json = config_to_json(&sample()).expect("serialization should work");
        assert!(json.contains("\n  \"base-urls\""));
    }

    #[test]
    fn test_groups_are_not_rendered() {
        let json = config_to_json(&sample()).expect("serialization should work");
        assert!(!json.contains("\"groups\""));
        assert!(!json.contains("auth"));
    }

    #[test]
    fn test_resolved_tests_are_rendered() {
        let json = config_to_json(&sample()).expect("serialization should work");
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        let health = &value["functional-tests"][0];
        assert_eq!(health["name"], "health");
        assert_eq!(health["method"], "GET");
        assert_eq!(health["expected"]["status"], 200);
        assert_eq!(
            health["expected"]["headers"][0],
            serde_json::json!({"key": "X-Debug", "kind": "forbidden"})
        );

        let phase = &value["load-tests"][0]["phases"][0];
        assert_eq!(phase["duration"], "1m30s");
        assert_eq!(phase["rps"], 50);
        assert_eq!(phase["ccs"], 5);
    }

    #[test]
    fn test_output_is_deterministic() {
        let first = config_to_json(&sample()).unwrap();
        let second = config_to_json(&sample()).unwrap();
        assert_eq!(first, second);
    }
}
