//! Check and suite reports.

use std::fmt::Write as _;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use super::assertion::Assertion;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssertionStatus {
    Passed,
    Failed,
    /// Skipped because an earlier assertion in the same check failed.
    NotEvaluated,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssertionResult {
    pub assertion: Assertion,
    pub status: AssertionStatus,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Overall result of one check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CheckOutcome {
    Passed,
    /// An assertion did not hold.
    Failed,
    /// The request never produced a response.
    Transport { message: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckReport {
    pub name: String,
    pub method: String,
    pub path: String,

    pub outcome: CheckOutcome,

    /// Response status, absent on transport failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,

    pub assertions: Vec<AssertionResult>,
    pub duration_ms: u64,
}

impl CheckReport {
    pub fn passed(&self) -> bool {
        self.outcome == CheckOutcome::Passed
    }

    /// First failed assertion, if any.
    pub fn failure(&self) -> Option<&AssertionResult> {
        self.assertions
            .iter()
            .find(|a| a.status == AssertionStatus::Failed)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuiteReport {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub base_url: String,
    pub checks: Vec<CheckReport>,
    pub passed: usize,
    pub failed: usize,
}

impl SuiteReport {
    pub(crate) fn new(base_url: &str, started_at: DateTime<Utc>, checks: Vec<CheckReport>) -> Self {
        let passed = checks.iter().filter(|c| c.passed()).count();
        let failed = checks.len() - passed;
        Self {
            run_id: Uuid::new_v4(),
            started_at,
            base_url: base_url.to_string(),
            checks,
            passed,
            failed,
        }
    }

    pub fn is_success(&self) -> bool {
        self.failed == 0
    }

    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "run {} against {}", self.run_id, self.base_url);

        for check in &self.checks {
            let label = if check.passed() { "PASS" } else { "FAIL" };
            let _ = writeln!(
                out,
                "  {}  {} ({} {}, {} ms)",
                label, check.name, check.method, check.path, check.duration_ms
            );

            if let CheckOutcome::Transport { message } = &check.outcome {
                let _ = writeln!(out, "        request failed: {}", message);
            }
            if let Some(failure) = check.failure() {
                let _ = writeln!(
                    out,
                    "        {}: {}",
                    failure.assertion.describe(),
                    failure.reason.as_deref().unwrap_or("failed")
                );
            }
        }

        let _ = write!(
            out,
            "{} checks: {} passed, {} failed",
            self.checks.len(),
            self.passed,
            self.failed
        );
        out
    }
}
