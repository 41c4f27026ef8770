//! Second parsing pass: raw values to typed definitions
//!
//! Every function here reports problems into the shared error list and
//! keeps going, so one pass over the document finds all of them.

use indexmap::IndexMap;
use serde_yaml::Value;

use apitesto_domain::{
    BaseTest, DomainError, ExpectedHeader, ExpectedResponse, GroupDefinition, HeadersMap,
    HttpMethod, Phase, PhaseDuration, ThinkTime, Timeout, render_value,
};

use super::raw::{RawExpected, RawPhase, RawTest};
use crate::error::{Location, Section, ValidationErrorKind, ValidationErrors};
use crate::resolver::{FunctionalDraft, LoadDraft};

/// Checks that every base URL is absolute.
pub(crate) fn base_urls(
    raw: IndexMap<String, String>,
    errors: &mut ValidationErrors,
) -> IndexMap<String, String> {
    for (index, (name, prefix)) in raw.iter().enumerate() {
        if let Err(e) = url::Url::parse(prefix) {
            errors.report(
                Location::new(Section::BaseUrl, index, name.as_str()),
                ValidationErrorKind::InvalidValue(format!("'{prefix}' is not an absolute URL: {e}")),
            );
        }
    }
    raw
}

/// Converts every group definition, keyed by group name.
pub(crate) fn groups(
    raw: IndexMap<String, RawTest>,
    errors: &mut ValidationErrors,
) -> IndexMap<String, GroupDefinition> {
    raw.into_iter()
        .enumerate()
        .map(|(index, (name, raw))| {
            let at = Location::new(Section::Group, index, name.as_str());
            let group = group(name.clone(), raw, &at, errors);
            (name, group)
        })
        .collect()
}

fn group(
    name: String,
    mut raw: RawTest,
    at: &Location,
    errors: &mut ValidationErrors,
) -> GroupDefinition {
    if !raw.groups.is_empty() {
        errors.report(
            at.field("groups"),
            ValidationErrorKind::InvalidValue("groups cannot reference other groups".to_string()),
        );
        raw.groups.clear();
    }
    raw.name = name;

    let expected = raw.expected.take().map(|e| expected(e, at, errors));
    let phases = phases(raw.phases.take().unwrap_or_default(), at, errors);
    let think_time = think_time(raw.think_time.take(), at, errors);
    let success_criteria = std::mem::take(&mut raw.success_criteria);

    GroupDefinition {
        base: base(raw, at, errors),
        expected,
        phases,
        think_time,
        success_criteria,
    }
}

/// Converts a functional test entry; `expected` stays optional until resolution.
pub(crate) fn functional_draft(
    mut raw: RawTest,
    at: &Location,
    errors: &mut ValidationErrors,
) -> FunctionalDraft {
    let expected = raw.expected.take().map(|e| expected(e, at, errors));
    FunctionalDraft {
        base: base(raw, at, errors),
        expected,
    }
}

/// Converts a load test entry; `phases` may still be empty until resolution.
pub(crate) fn load_draft(
    mut raw: RawTest,
    at: &Location,
    errors: &mut ValidationErrors,
) -> LoadDraft {
    let phases = phases(raw.phases.take().unwrap_or_default(), at, errors);
    let think_time = think_time(raw.think_time.take(), at, errors);
    let success_criteria = std::mem::take(&mut raw.success_criteria);
    LoadDraft {
        base: base(raw, at, errors),
        phases,
        think_time,
        success_criteria,
    }
}

fn base(raw: RawTest, at: &Location, errors: &mut ValidationErrors) -> BaseTest {
    let method = raw.method.as_deref().and_then(|token| {
        token
            .parse::<HttpMethod>()
            .map_err(|_| {
                errors.report(
                    at.field("method"),
                    ValidationErrorKind::UnknownEnumValue {
                        value: token.to_string(),
                        allowed: allowed_methods(),
                    },
                );
            })
            .ok()
    });

    let mut headers = HeadersMap::new();
    for (index, entry) in raw.request_headers.iter().enumerate() {
        match HeadersMap::parse_entry(entry) {
            Ok((name, value)) => headers.insert(name, value),
            Err(e) => errors.report(at.field(format!("request-headers[{index}]")), e),
        }
    }

    BaseTest {
        name: raw.name,
        url: raw.url,
        method,
        headers,
        body: raw.body,
        query_params: raw.query_parameters,
        path_params: raw.path_parameters,
        groups: raw.groups,
        timeout: raw.timeout.map(|t| Timeout {
            connect_ms: t.connect,
            request_ms: t.request,
        }),
    }
}

fn allowed_methods() -> String {
    HttpMethod::all()
        .iter()
        .map(|m| m.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

fn expected(raw: RawExpected, at: &Location, errors: &mut ValidationErrors) -> ExpectedResponse {
    let mut headers = Vec::with_capacity(raw.headers.len());
    for (index, directive) in raw.headers.iter().enumerate() {
        match ExpectedHeader::from_directive(directive) {
            Ok(header) => headers.push(header),
            Err(e) => errors.report(at.field(format!("expected.headers[{index}]")), e),
        }
    }

    ExpectedResponse {
        status: raw.status,
        headers,
        response_schema: raw.response_schema,
        assertions: raw.assertions,
    }
}

fn phases(raw: Vec<RawPhase>, at: &Location, errors: &mut ValidationErrors) -> Vec<Phase> {
    raw.into_iter()
        .enumerate()
        .filter_map(|(index, raw)| {
            let field = format!("phases[{index}].duration");
            let duration = match raw.duration.as_ref().map(parse_duration) {
                Some(Ok(duration)) => duration,
                Some(Err(e)) => {
                    errors.report(at.field(field), e);
                    return None;
                }
                None => {
                    errors.report(at.field(field), ValidationErrorKind::MissingField);
                    return None;
                }
            };

            let phase = Phase {
                name: raw.name,
                duration,
                requests_per_second: raw.rps,
                concurrent_users: raw.ccs,
            };
            if phase.is_inert() {
                tracing::warn!(
                    location = %at,
                    phase = %phase.name,
                    "phase sets neither rps nor ccs and will not generate load"
                );
            }
            Some(phase)
        })
        .collect()
}

/// Reads a duration written as text, or as a bare number of seconds.
fn parse_duration(value: &Value) -> Result<PhaseDuration, DomainError> {
    match value {
        Value::String(text) => text.parse(),
        Value::Number(n) if n.is_u64() => n.to_string().parse(),
        other => Err(DomainError::InvalidDuration(render_value(other))),
    }
}

fn think_time(
    raw: Option<ThinkTime>,
    at: &Location,
    errors: &mut ValidationErrors,
) -> Option<ThinkTime> {
    if let Some(bounds) = raw.filter(|t| !t.is_valid()) {
        errors.report(
            at.field("think-time"),
            ValidationErrorKind::InvalidValue(format!(
                "min ({}) must not exceed max ({})",
                bounds.min, bounds.max
            )),
        );
    }
    raw
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::time::Duration;

    fn at() -> Location {
        Location::new(Section::FunctionalTest, 0, "t")
    }

    #[test]
    fn test_base_collects_every_bad_field() {
        let raw = RawTest {
            name: "t".to_string(),
            method: Some("FETCH".to_string()),
            request_headers: vec![
                "Accept: */*".to_string(),
                "no colon".to_string(),
                "also bad".to_string(),
            ],
            ..RawTest::default()
        };
        let mut errors = ValidationErrors::new();

        let base = base(raw, &at(), &mut errors);

        assert_eq!(base.method, None);
        assert_eq!(base.headers.get("Accept"), Some("*/*"));
        let fields: Vec<_> = errors
            .iter()
            .map(|e| e.location.field.clone().unwrap())
            .collect();
        assert_eq!(
            fields,
            vec!["method", "request-headers[1]", "request-headers[2]"]
        );
        assert_eq!(
            errors.as_slice()[0].kind,
            ValidationErrorKind::UnknownEnumValue {
                value: "FETCH".to_string(),
                allowed: "GET, POST, PUT, DELETE, PATCH, OPTIONS, HEAD".to_string(),
            }
        );
    }

    #[test]
    fn test_phase_durations() {
        let raw = vec![
            RawPhase {
                name: "text".to_string(),
                duration: Some(Value::String("1m".to_string())),
                rps: 10,
                ccs: 0,
            },
            RawPhase {
                name: "number".to_string(),
                duration: Some(Value::Number(15_u64.into())),
                rps: 0,
                ccs: 3,
            },
            RawPhase {
                name: "missing".to_string(),
                ..RawPhase::default()
            },
            RawPhase {
                name: "bad".to_string(),
                duration: Some(Value::String("soon".to_string())),
                rps: 1,
                ccs: 1,
            },
        ];
        let mut errors = ValidationErrors::new();

        let phases = phases(raw, &at(), &mut errors);

        assert_eq!(phases.len(), 2);
        assert_eq!(phases[0].duration.value(), Duration::from_secs(60));
        assert_eq!(phases[1].duration.value(), Duration::from_secs(15));
        assert_eq!(errors.len(), 2);
        assert_eq!(errors.as_slice()[0].kind, ValidationErrorKind::MissingField);
        assert_eq!(
            errors.as_slice()[1].kind,
            ValidationErrorKind::Format(DomainError::InvalidDuration("soon".to_string()))
        );
    }

    #[test]
    fn test_think_time_bounds_are_checked() {
        let mut errors = ValidationErrors::new();
        think_time(Some(ThinkTime { min: 5, max: 1 }), &at(), &mut errors);
        think_time(Some(ThinkTime { min: 1, max: 5 }), &at(), &mut errors);
        think_time(None, &at(), &mut errors);

        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors.as_slice()[0].to_string(),
            "functional test #0 't', field `think-time`: min (5) must not exceed max (1)"
        );
    }

    #[test]
    fn test_relative_base_url_is_rejected() {
        let mut errors = ValidationErrors::new();
        let urls = base_urls(
            IndexMap::from([
                ("api".to_string(), "https://api.example.com/v1".to_string()),
                ("local".to_string(), "/v1".to_string()),
            ]),
            &mut errors,
        );

        assert_eq!(urls.len(), 2);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.as_slice()[0].location.name, "local");
        assert_eq!(errors.as_slice()[0].location.index, 1);
    }

    #[test]
    fn test_group_cannot_nest() {
        let raw = RawTest {
            groups: vec!["other".to_string()],
            url: Some("/x".to_string()),
            ..RawTest::default()
        };
        let at = Location::new(Section::Group, 0, "g");
        let mut errors = ValidationErrors::new();

        let group = group("g".to_string(), raw, &at, &mut errors);

        assert_eq!(group.name(), "g");
        assert!(group.base.groups.is_empty());
        assert_eq!(group.base.url.as_deref(), Some("/x"));
        assert_eq!(errors.len(), 1);
    }
}
