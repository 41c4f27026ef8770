//! Group inheritance
//!
//! A test lists group names in precedence order. Each field the test
//! leaves unset is taken from the first listed group that sets it:
//!
//! - scalars (`url`, `method`, `body`, `timeout`, `expected`, `think-time`)
//!   are copied whole;
//! - maps (`request-headers`, `query-parameters`, `path-parameters`) are
//!   merged key by key, earlier sources winning on collisions;
//! - sequences (`phases`, `success-criteria`) are replaced whole, never
//!   merged element-wise.

use indexmap::IndexMap;
use thiserror::Error;

use apitesto_domain::{BaseTest, FunctionalTest, GroupDefinition, LoadTest, Phase, ThinkTime};

use super::draft::{FunctionalDraft, LoadDraft};

/// A test that can inherit fields from groups.
pub trait Resolvable {
    /// Returns the request fields, including the group references.
    fn base_mut(&mut self) -> &mut BaseTest;

    /// Fills every field still unset from `group`.
    fn inherit(&mut self, group: &GroupDefinition);
}

impl Resolvable for FunctionalDraft {
    fn base_mut(&mut self) -> &mut BaseTest {
        &mut self.base
    }

    fn inherit(&mut self, group: &GroupDefinition) {
        self.base.inherit(&group.base);
        if self.expected.is_none() {
            self.expected.clone_from(&group.expected);
        }
    }
}

impl Resolvable for FunctionalTest {
    fn base_mut(&mut self) -> &mut BaseTest {
        &mut self.base
    }

    fn inherit(&mut self, group: &GroupDefinition) {
        self.base.inherit(&group.base);
    }
}

fn inherit_load_fields(
    phases: &mut Vec<Phase>,
    think_time: &mut Option<ThinkTime>,
    success_criteria: &mut Vec<String>,
    group: &GroupDefinition,
) {
    if phases.is_empty() {
        phases.clone_from(&group.phases);
    }
    if think_time.is_none() {
        *think_time = group.think_time;
    }
    if success_criteria.is_empty() {
        success_criteria.clone_from(&group.success_criteria);
    }
}

impl Resolvable for LoadDraft {
    fn base_mut(&mut self) -> &mut BaseTest {
        &mut self.base
    }

    fn inherit(&mut self, group: &GroupDefinition) {
        self.base.inherit(&group.base);
        inherit_load_fields(
            &mut self.phases,
            &mut self.think_time,
            &mut self.success_criteria,
            group,
        );
    }
}

impl Resolvable for LoadTest {
    fn base_mut(&mut self) -> &mut BaseTest {
        &mut self.base
    }

    fn inherit(&mut self, group: &GroupDefinition) {
        self.base.inherit(&group.base);
        inherit_load_fields(
            &mut self.phases,
            &mut self.think_time,
            &mut self.success_criteria,
            group,
        );
    }
}

/// Group names referenced by a test but not defined.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown groups: {}", .0.join(", "))]
pub struct UnknownGroups(pub Vec<String>);

/// Merges group definitions into the tests that reference them.
#[derive(Debug, Clone, Copy)]
pub struct GroupResolver<'a> {
    groups: &'a IndexMap<String, GroupDefinition>,
}

impl<'a> GroupResolver<'a> {
    /// Creates a resolver over the given group definitions.
    #[must_use]
    pub const fn new(groups: &'a IndexMap<String, GroupDefinition>) -> Self {
        Self { groups }
    }

    /// Returns whether a group with this name exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.groups.contains_key(name)
    }

    /// Applies the test's groups in declared order and clears its references.
    ///
    /// A test without group references is returned unchanged.
    ///
    /// # Errors
    /// Returns every referenced name missing from the definitions; nothing
    /// is skipped silently.
    pub fn resolve<T: Resolvable>(&self, mut test: T) -> Result<T, UnknownGroups> {
        let names = std::mem::take(&mut test.base_mut().groups);
        let mut missing = Vec::new();

        for name in names {
            match self.groups.get(&name) {
                Some(group) => test.inherit(group),
                None => missing.push(name),
            }
        }

        if missing.is_empty() {
            Ok(test)
        } else {
            Err(UnknownGroups(missing))
        }
    }

    /// Resolves a complete functional test.
    ///
    /// # Errors
    /// See [`GroupResolver::resolve`].
    pub fn resolve_functional(&self, test: FunctionalTest) -> Result<FunctionalTest, UnknownGroups> {
        self.resolve(test)
    }

    /// Resolves a complete load test.
    ///
    /// # Errors
    /// See [`GroupResolver::resolve`].
    pub fn resolve_load(&self, test: LoadTest) -> Result<LoadTest, UnknownGroups> {
        self.resolve(test)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use apitesto_domain::{ExpectedResponse, HttpMethod, Timeout};
    use pretty_assertions::assert_eq;

    fn group(name: &str, configure: impl FnOnce(&mut GroupDefinition)) -> GroupDefinition {
        let mut group = GroupDefinition::new(name);
        configure(&mut group);
        group
    }

    fn groups(defs: Vec<GroupDefinition>) -> IndexMap<String, GroupDefinition> {
        defs.into_iter()
            .map(|g| (g.name().to_string(), g))
            .collect()
    }

    fn referencing(names: &[&str]) -> FunctionalDraft {
        FunctionalDraft {
            base: BaseTest {
                groups: names.iter().map(ToString::to_string).collect(),
                ..BaseTest::new("test")
            },
            expected: None,
        }
    }

    fn phase(name: &str) -> Phase {
        Phase {
            name: name.to_string(),
            duration: "10s".parse().unwrap(),
            requests_per_second: 5,
            concurrent_users: 1,
        }
    }

    #[test]
    fn test_first_group_wins_for_scalars() {
        let defs = groups(vec![
            group("a", |g| g.base.url = Some("u1".to_string())),
            group("b", |g| {
                g.base.url = Some("u2".to_string());
                g.base.method = Some(HttpMethod::Post);
            }),
        ]);

        let resolved = GroupResolver::new(&defs)
            .resolve(referencing(&["a", "b"]))
            .unwrap();

        assert_eq!(resolved.base.url.as_deref(), Some("u1"));
        assert_eq!(resolved.base.method, Some(HttpMethod::Post));
        assert!(resolved.base.groups.is_empty());
    }

    #[test]
    fn test_own_fields_win_over_groups() {
        let defs = groups(vec![group("a", |g| {
            g.base.body = Some("group".to_string());
            g.base.timeout = Some(Timeout {
                connect_ms: 1,
                request_ms: 2,
            });
            g.expected = Some(ExpectedResponse::status(500));
        })]);
        let mut draft = referencing(&["a"]);
        draft.base.body = Some("own".to_string());
        draft.expected = Some(ExpectedResponse::status(200));

        let resolved = GroupResolver::new(&defs).resolve(draft).unwrap();

        assert_eq!(resolved.base.body.as_deref(), Some("own"));
        assert_eq!(resolved.base.timeout.map(|t| t.connect_ms), Some(1));
        assert_eq!(resolved.expected.unwrap().status, Some(200));
    }

    #[test]
    fn test_maps_merge_by_key_with_precedence() {
        let defs = groups(vec![
            group("a", |g| {
                g.base.headers.insert("Accept", "application/json");
                g.base.headers.insert("X-Tenant", "a");
            }),
            group("b", |g| {
                g.base.headers.insert("X-Tenant", "b");
                g.base.headers.insert("X-Trace", "on");
                g.base
                    .query_params
                    .insert("limit".to_string(), "10".to_string());
            }),
        ]);
        let mut draft = referencing(&["a", "b"]);
        draft.base.headers.insert("Accept", "text/csv");

        let resolved = GroupResolver::new(&defs).resolve(draft).unwrap();
        let headers = &resolved.base.headers;

        assert_eq!(headers.get("Accept"), Some("text/csv"));
        assert_eq!(headers.get("X-Tenant"), Some("a"));
        assert_eq!(headers.get("X-Trace"), Some("on"));
        assert_eq!(resolved.base.query_params["limit"], "10");
    }

    #[test]
    fn test_expected_comes_from_group_when_missing() {
        let defs = groups(vec![group("ok", |g| {
            g.expected = Some(ExpectedResponse::status(200));
        })]);

        let test = GroupResolver::new(&defs)
            .resolve(referencing(&["ok"]))
            .unwrap()
            .finish()
            .unwrap();

        assert_eq!(test.expected.status, Some(200));
    }

    #[test]
    fn test_sequences_are_replaced_whole() {
        let defs = groups(vec![
            group("empty", |_| {}),
            group("ramp", |g| {
                g.phases = vec![phase("warmup"), phase("steady")];
                g.success_criteria = vec!["p95 < 200ms".to_string()];
                g.think_time = Some(ThinkTime { min: 10, max: 20 });
            }),
        ]);
        let draft = LoadDraft {
            base: BaseTest {
                groups: vec!["empty".to_string(), "ramp".to_string()],
                ..BaseTest::new("load")
            },
            phases: vec![phase("own")],
            ..LoadDraft::default()
        };

        let resolved = GroupResolver::new(&defs).resolve(draft).unwrap();

        assert_eq!(resolved.phases, vec![phase("own")]);
        assert_eq!(resolved.success_criteria, vec!["p95 < 200ms".to_string()]);
        assert_eq!(resolved.think_time, Some(ThinkTime { min: 10, max: 20 }));
    }

    #[test]
    fn test_unknown_groups_are_all_reported() {
        let defs = groups(vec![group("known", |_| {})]);

        let err = GroupResolver::new(&defs)
            .resolve(referencing(&["missing", "known", "gone"]))
            .unwrap_err();

        assert_eq!(
            err,
            UnknownGroups(vec!["missing".to_string(), "gone".to_string()])
        );
        assert_eq!(err.to_string(), "unknown groups: missing, gone");
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let defs = groups(vec![group("a", |g| {
            g.base.url = Some("/a".to_string());
            g.base.headers.insert("X-A", "1");
        })]);
        let resolver = GroupResolver::new(&defs);
        let test = FunctionalTest::new(
            BaseTest {
                groups: vec!["a".to_string()],
                ..BaseTest::new("once")
            },
            ExpectedResponse::status(204),
        );

        let once = resolver.resolve_functional(test).unwrap();
        let twice = resolver.resolve_functional(once.clone()).unwrap();

        assert_eq!(twice, once);
        assert_eq!(once.base.url.as_deref(), Some("/a"));
    }

    #[test]
    fn test_resolved_load_test_keeps_its_phases() {
        let defs = groups(vec![group("ramp", |g| g.phases = vec![phase("group")])]);
        let test = LoadTest {
            base: BaseTest {
                groups: vec!["ramp".to_string()],
                ..BaseTest::new("load")
            },
            phases: vec![phase("own")],
            think_time: None,
            success_criteria: Vec::new(),
        };

        let resolved = GroupResolver::new(&defs).resolve_load(test).unwrap();

        assert_eq!(resolved.phases, vec![phase("own")]);
    }
}
