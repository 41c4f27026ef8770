//! Tests whose mandatory fields may still come from groups

use apitesto_domain::{BaseTest, ExpectedResponse, FunctionalTest, LoadTest, Phase, ThinkTime};

/// A functional test before its expectation is known to be present.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FunctionalDraft {
    /// Request fields.
    pub base: BaseTest,
    /// Expected response, if declared.
    pub expected: Option<ExpectedResponse>,
}

impl FunctionalDraft {
    /// Completes the draft.
    ///
    /// Returns `None` when no expectation was declared by the test or its groups.
    #[must_use]
    pub fn finish(self) -> Option<FunctionalTest> {
        let expected = self.expected?;
        Some(FunctionalTest::new(self.base, expected))
    }
}

impl From<FunctionalTest> for FunctionalDraft {
    fn from(test: FunctionalTest) -> Self {
        Self {
            base: test.base,
            expected: Some(test.expected),
        }
    }
}

/// A load test before its phases are known to be present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadDraft {
    /// Request fields.
    pub base: BaseTest,
    /// Phases declared so far.
    pub phases: Vec<Phase>,
    /// Think time, if declared.
    pub think_time: Option<ThinkTime>,
    /// Success criteria declared so far.
    pub success_criteria: Vec<String>,
}

impl LoadDraft {
    /// Completes the draft.
    ///
    /// Returns `None` when neither the test nor its groups declare a phase.
    #[must_use]
    pub fn finish(self) -> Option<LoadTest> {
        if self.phases.is_empty() {
            return None;
        }
        Some(LoadTest {
            base: self.base,
            phases: self.phases,
            think_time: self.think_time,
            success_criteria: self.success_criteria,
        })
    }
}

impl From<LoadTest> for LoadDraft {
    fn from(test: LoadTest) -> Self {
        Self {
            base: test.base,
            phases: test.phases,
            think_time: test.think_time,
            success_criteria: test.success_criteria,
        }
    }
}
