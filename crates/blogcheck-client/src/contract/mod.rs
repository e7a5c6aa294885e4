//! Declarative request/response checks against the service.
//!
//! A [`ContractCheck`] is one request plus an ordered list of
//! [`Assertion`]s. Assertions run fail-fast: the first failure ends the
//! check and the rest are reported as not evaluated. Checks never retry.
//!
//! A [`ContractSuite`] runs its checks one at a time in declared order.
//! Checks may depend on state left by earlier ones (the built-in post check
//! expects user 1 to exist); the suite does not enforce that.

use std::time::Instant;

use chrono::Utc;
use reqwest::Method;
use serde_json::Value;
use tracing::{info, warn};

use crate::client::{ApiClient, RawResponse};
use crate::error::{ApiError, ApiResult};

mod assertion;
pub mod builtin;
mod report;

pub use assertion::Assertion;
pub use report::{AssertionResult, AssertionStatus, CheckOutcome, CheckReport, SuiteReport};

/// One request and what its response must satisfy.
#[derive(Debug, Clone)]
pub struct ContractCheck {
    pub name: String,
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
    pub assertions: Vec<Assertion>,
}

impl ContractCheck {
    pub fn new(
        name: impl Into<String>,
        method: Method,
        path: impl Into<String>,
        body: Option<Value>,
    ) -> Self {
        Self {
            name: name.into(),
            method,
            path: path.into(),
            body,
            assertions: Vec::new(),
        }
    }

    /// Append an assertion.
    pub fn expect(mut self, assertion: Assertion) -> Self {
        self.assertions.push(assertion);
        self
    }

    /// Issue the request and evaluate the response.
    pub async fn run(&self, client: &ApiClient) -> CheckReport {
        let start = Instant::now();
        let result = client
            .send(self.method.clone(), &self.path, self.body.as_ref())
            .await;
        let duration_ms = start.elapsed().as_millis() as u64;

        let report = match result {
            Ok(response) => self.evaluate(&response, duration_ms),
            Err(e) => CheckReport {
                name: self.name.clone(),
                method: self.method.to_string(),
                path: self.path.clone(),
                outcome: CheckOutcome::Transport {
                    message: e.to_string(),
                },
                status: None,
                assertions: self.unevaluated(0),
                duration_ms,
            },
        };

        match &report.outcome {
            CheckOutcome::Passed => info!(check = %self.name, duration_ms, "check passed"),
            CheckOutcome::Failed => warn!(
                check = %self.name,
                status = ?report.status,
                failure = ?report.failure().and_then(|f| f.reason.as_deref()),
                "check failed"
            ),
            CheckOutcome::Transport { message } => {
                warn!(check = %self.name, error = %message, "check request failed")
            }
        }

        report
    }

    /// Evaluate assertions in order against an already-received response.
    pub fn evaluate(&self, response: &RawResponse, duration_ms: u64) -> CheckReport {
        let mut results = Vec::with_capacity(self.assertions.len());
        let mut outcome = CheckOutcome::Passed;

        for (idx, assertion) in self.assertions.iter().enumerate() {
            match assertion.evaluate(response) {
                Ok(()) => results.push(AssertionResult {
                    assertion: assertion.clone(),
                    status: AssertionStatus::Passed,
                    actual: None,
                    reason: None,
                }),
                Err(mismatch) => {
                    results.push(AssertionResult {
                        assertion: assertion.clone(),
                        status: AssertionStatus::Failed,
                        actual: mismatch.actual,
                        reason: Some(mismatch.reason),
                    });
                    results.extend(self.unevaluated(idx + 1));
                    outcome = CheckOutcome::Failed;
                    break;
                }
            }
        }

        CheckReport {
            name: self.name.clone(),
            method: self.method.to_string(),
            path: self.path.clone(),
            outcome,
            status: Some(response.status),
            assertions: results,
            duration_ms,
        }
    }

    fn unevaluated(&self, from: usize) -> Vec<AssertionResult> {
        self.assertions
            .iter()
            .skip(from)
            .map(|assertion| AssertionResult {
                assertion: assertion.clone(),
                status: AssertionStatus::NotEvaluated,
                actual: None,
                reason: None,
            })
            .collect()
    }
}

/// Ordered set of checks.
#[derive(Debug, Clone, Default)]
pub struct ContractSuite {
    checks: Vec<ContractCheck>,
}

impl ContractSuite {
    pub fn new(checks: Vec<ContractCheck>) -> Self {
        Self { checks }
    }

    /// Create user, then create post.
    pub fn builtin() -> Self {
        Self::new(vec![
            builtin::create_user_check(),
            builtin::create_post_check(),
        ])
    }

    pub fn checks(&self) -> &[ContractCheck] {
        &self.checks
    }

    /// Keep only the named checks, preserving suite order.
    ///
    /// An empty selection keeps everything. Unknown names are a config error.
    pub fn select(self, names: &[String]) -> ApiResult<Self> {
        if names.is_empty() {
            return Ok(self);
        }

        if let Some(unknown) = names
            .iter()
            .find(|n| !self.checks.iter().any(|c| &c.name == *n))
        {
            let known: Vec<&str> = self.checks.iter().map(|c| c.name.as_str()).collect();
            return Err(ApiError::Config {
                message: format!(
                    "unknown check '{}' (available: {})",
                    unknown,
                    known.join(", ")
                ),
            });
        }

        let checks = self
            .checks
            .into_iter()
            .filter(|c| names.contains(&c.name))
            .collect();
        Ok(Self { checks })
    }

    /// Run every check sequentially.
    pub async fn run(&self, client: &ApiClient) -> SuiteReport {
        let started_at = Utc::now();
        info!(
            base_url = %client.base_url(),
            checks = self.checks.len(),
            "running contract suite"
        );

        let mut reports = Vec::with_capacity(self.checks.len());
        for check in &self.checks {
            reports.push(check.run(client).await);
        }

        SuiteReport::new(client.base_url(), started_at, reports)
    }
}
