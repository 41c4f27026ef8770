//! Load test definition

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use super::BaseTest;
use crate::error::{DomainError, DomainResult};

/// Length of a load phase, kept with the expression it was written as.
///
/// Accepts a sequence of `<integer><unit>` parts where the unit is one of
/// `ms`, `s`, `m` or `h` (for example `30s`, `1m30s`, `250ms`). A bare
/// integer is read as seconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PhaseDuration {
    text: String,
    value: Duration,
}

impl PhaseDuration {
    /// Returns the expression as written.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Returns the parsed duration.
    #[must_use]
    pub const fn value(&self) -> Duration {
        self.value
    }
}

impl FromStr for PhaseDuration {
    type Err = DomainError;

    fn from_str(s: &str) -> DomainResult<Self> {
        let invalid = || DomainError::InvalidDuration(s.to_string());
        let text = s.trim();
        if text.is_empty() {
            return Err(invalid());
        }
        if let Ok(secs) = text.parse::<u64>() {
            return Ok(Self {
                text: s.to_string(),
                value: Duration::from_secs(secs),
            });
        }

        let mut value = Duration::ZERO;
        let mut rest = text;
        while !rest.is_empty() {
            let digits = rest
                .find(|c: char| !c.is_ascii_digit())
                .ok_or_else(invalid)?;
            if digits == 0 {
                return Err(invalid());
            }
            let amount: u64 = rest[..digits].parse().map_err(|_| invalid())?;
            rest = &rest[digits..];
            let unit_len = rest
                .find(|c: char| c.is_ascii_digit())
                .unwrap_or(rest.len());
            let part = match &rest[..unit_len] {
                "ms" => Duration::from_millis(amount),
                "s" => Duration::from_secs(amount),
                "m" => Duration::from_secs(amount.saturating_mul(60)),
                "h" => Duration::from_secs(amount.saturating_mul(3_600)),
                _ => return Err(invalid()),
            };
            value = value.saturating_add(part);
            rest = &rest[unit_len..];
        }

        Ok(Self {
            text: s.to_string(),
            value,
        })
    }
}

impl TryFrom<String> for PhaseDuration {
    type Error = DomainError;

    fn try_from(value: String) -> DomainResult<Self> {
        value.parse()
    }
}

impl From<PhaseDuration> for String {
    fn from(duration: PhaseDuration) -> Self {
        duration.text
    }
}

impl fmt::Display for PhaseDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// A time-boxed segment of a load test.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Phase {
    /// Phase name.
    pub name: String,
    /// How long the phase lasts.
    pub duration: PhaseDuration,
    /// Target request rate.
    #[serde(rename = "rps")]
    pub requests_per_second: u32,
    /// Target number of concurrent users.
    #[serde(rename = "ccs")]
    pub concurrent_users: u32,
}

impl Phase {
    /// Returns whether the phase has no rate and no concurrency to drive load.
    #[must_use]
    pub const fn is_inert(&self) -> bool {
        self.requests_per_second == 0 && self.concurrent_users == 0
    }
}

/// Pause between two requests of a virtual user, in milliseconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThinkTime {
    /// Lower bound.
    pub min: u64,
    /// Upper bound, never below `min`.
    pub max: u64,
}

impl ThinkTime {
    /// Returns whether `min <= max`.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.min <= self.max
    }
}

/// A request replayed at the rates described by its phases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct LoadTest {
    /// Request fields.
    #[serde(flatten)]
    pub base: BaseTest,
    /// Phases run in order; never empty once loaded.
    pub phases: Vec<Phase>,
    /// Optional pause between requests.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub think_time: Option<ThinkTime>,
    /// Expressions deciding whether the run succeeded.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub success_criteria: Vec<String>,
}

impl LoadTest {
    /// Returns the test name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.base.name
    }

    /// Returns the summed duration of all phases.
    #[must_use]
    pub fn total_duration(&self) -> Duration {
        self.phases
            .iter()
            .map(|phase| phase.duration.value())
            .fold(Duration::ZERO, Duration::saturating_add)
    }
}
