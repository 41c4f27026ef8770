//! Functional test definition

use serde::{Deserialize, Serialize};

use super::BaseTest;
use crate::response::ExpectedResponse;

/// A single request checked against an expected response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionalTest {
    /// Request fields.
    #[serde(flatten)]
    pub base: BaseTest,
    /// Expected response.
    pub expected: ExpectedResponse,
}

impl FunctionalTest {
    /// Creates a functional test.
    #[must_use]
    pub const fn new(base: BaseTest, expected: ExpectedResponse) -> Self {
        Self { base, expected }
    }

    /// Returns the test name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.base.name
    }
}
