//! Configuration loading
//!
//! Loading runs in two passes. The document is first deserialized into a
//! loosely-typed tree; a malformed document or a field of the wrong type
//! stops loading right there. The tree is then converted test by test,
//! groups are merged in, and every problem found on the way is collected so
//! the caller sees all of them at once.

mod convert;
mod raw;

use std::collections::HashSet;

use apitesto_domain::{Config, FunctionalTest, LoadTest};

use self::raw::{RawDocument, RawTest};
use crate::error::{LoadError, LoadResult, Location, Section, ValidationErrorKind, ValidationErrors};
use crate::ports::ConfigSource;
use crate::resolver::{GroupResolver, Resolvable, UnknownGroups};

/// Loads, resolves and validates test configurations.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfigLoader;

impl ConfigLoader {
    /// Creates a loader.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Reads the document from `source` and loads it.
    ///
    /// # Errors
    /// See [`ConfigLoader::load_str`]; also fails when the source cannot be read.
    pub fn load<S: ConfigSource + ?Sized>(&self, source: &S) -> LoadResult<Config> {
        tracing::debug!(source = %source.describe(), "reading configuration");
        let text = source.read()?;
        self.load_str(&text)
    }

    /// Loads a configuration from YAML text.
    ///
    /// # Errors
    /// - [`LoadError::DocumentParse`] if the text is not valid YAML or a
    ///   field has the wrong type
    /// - [`LoadError::Validation`] with every structural problem found
    pub fn load_str(&self, text: &str) -> LoadResult<Config> {
        let raw = parse_document(text)?;
        let mut errors = ValidationErrors::new();

        let base_urls = convert::base_urls(raw.base_urls, &mut errors);
        let groups = convert::groups(raw.groups, &mut errors);
        let resolver = GroupResolver::new(&groups);

        let functional_tests: Vec<_> = raw
            .functional_tests
            .into_iter()
            .enumerate()
            .filter_map(|(index, raw)| functional_test(index, raw, resolver, &mut errors))
            .collect();
        let load_tests: Vec<_> = raw
            .load_tests
            .into_iter()
            .enumerate()
            .filter_map(|(index, raw)| load_test(index, raw, resolver, &mut errors))
            .collect();

        warn_duplicate_names(
            Section::FunctionalTest,
            functional_tests.iter().map(FunctionalTest::name),
        );
        warn_duplicate_names(Section::LoadTest, load_tests.iter().map(LoadTest::name));

        if !errors.is_empty() {
            tracing::debug!(count = errors.len(), "configuration rejected");
            return Err(LoadError::Validation(errors));
        }

        tracing::debug!(
            functional = functional_tests.len(),
            load = load_tests.len(),
            groups = groups.len(),
            "configuration loaded"
        );
        Ok(Config {
            base_urls,
            groups,
            functional_tests,
            load_tests,
        })
    }
}

fn parse_document(text: &str) -> LoadResult<RawDocument> {
    if is_blank(text) {
        return Ok(RawDocument::default());
    }
    let tree: serde_yaml::Value =
        serde_yaml::from_str(text).map_err(|e| LoadError::DocumentParse(e.to_string()))?;
    if tree.is_null() {
        return Ok(RawDocument::default());
    }
    // Parsed again from the text so type errors keep their line and column.
    serde_yaml::from_str(text).map_err(|e| LoadError::DocumentParse(e.to_string()))
}

fn is_blank(text: &str) -> bool {
    text.lines()
        .map(str::trim)
        .all(|line| line.is_empty() || line.starts_with('#'))
}

fn functional_test(
    index: usize,
    raw: RawTest,
    resolver: GroupResolver<'_>,
    errors: &mut ValidationErrors,
) -> Option<FunctionalTest> {
    let at = Location::new(Section::FunctionalTest, index, raw.name.as_str());
    for field in raw.load_fields() {
        tracing::warn!(location = %at, field, "load test field ignored on a functional test");
    }

    let draft = convert::functional_draft(raw, &at, errors);
    let draft = resolve(resolver, draft, &at, errors)?;
    let test = draft.finish();
    if test.is_none() {
        errors.report(at.field("expected"), ValidationErrorKind::MissingField);
    }
    test
}

fn load_test(
    index: usize,
    raw: RawTest,
    resolver: GroupResolver<'_>,
    errors: &mut ValidationErrors,
) -> Option<LoadTest> {
    let at = Location::new(Section::LoadTest, index, raw.name.as_str());
    if raw.expected.is_some() {
        tracing::warn!(location = %at, "field `expected` ignored on a load test");
    }
    // Phases that failed to convert were already reported.
    let declared_phases = raw.phases.as_ref().is_some_and(|p| !p.is_empty());

    let draft = convert::load_draft(raw, &at, errors);
    let draft = resolve(resolver, draft, &at, errors)?;
    let test = draft.finish();
    if test.is_none() && !declared_phases {
        errors.report(at.field("phases"), ValidationErrorKind::MissingField);
    }
    test
}

fn resolve<T: Resolvable>(
    resolver: GroupResolver<'_>,
    draft: T,
    at: &Location,
    errors: &mut ValidationErrors,
) -> Option<T> {
    match resolver.resolve(draft) {
        Ok(resolved) => {
            tracing::debug!(location = %at, "test resolved");
            Some(resolved)
        }
        Err(UnknownGroups(missing)) => {
            for group in missing {
                errors.report(
                    at.field("groups"),
                    ValidationErrorKind::UnknownGroupReference(group),
                );
            }
            None
        }
    }
}

fn warn_duplicate_names<'a>(section: Section, names: impl Iterator<Item = &'a str>) {
    let mut seen = HashSet::new();
    for name in names.filter(|name| !name.is_empty()) {
        if !seen.insert(name) {
            tracing::warn!(%section, name, "duplicate test name");
        }
    }
}
