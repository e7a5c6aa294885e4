//! Response assertions.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::client::RawResponse;

/// One expectation about a response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Assertion {
    /// Response status equals `code`.
    Status { code: u16 },

    /// Field exists and equals `expected`. Numbers compare by value.
    Equals { field: String, expected: Value },

    /// Field key exists. Any value passes, `null` included.
    Present { field: String },
}

impl Assertion {
    pub fn status(code: u16) -> Self {
        Self::Status { code }
    }

    pub fn equals(field: impl Into<String>, expected: impl Into<Value>) -> Self {
        Self::Equals {
            field: field.into(),
            expected: expected.into(),
        }
    }

    pub fn present(field: impl Into<String>) -> Self {
        Self::Present {
            field: field.into(),
        }
    }

    pub fn describe(&self) -> String {
        match self {
            Self::Status { code } => format!("status == {}", code),
            Self::Equals { field, expected } => format!("body.{} == {}", field, expected),
            Self::Present { field } => format!("body has `{}`", field),
        }
    }

    /// Evaluate against a response. `Err` carries the actual value (if any)
    /// and a reason.
    pub(crate) fn evaluate(&self, response: &RawResponse) -> Result<(), Mismatch> {
        match self {
            Self::Status { code } => {
                if response.status == *code {
                    Ok(())
                } else {
                    Err(Mismatch {
                        actual: Some(Value::from(response.status)),
                        reason: format!("expected status {}, got {}", code, response.status),
                    })
                }
            }
            Self::Equals { field, expected } => {
                let actual = lookup(response, field)?.ok_or_else(|| Mismatch::missing(field))?;
                if json_eq(actual, expected) {
                    Ok(())
                } else {
                    Err(Mismatch {
                        actual: Some(actual.clone()),
                        reason: format!("expected `{}` to equal {}, got {}", field, expected, actual),
                    })
                }
            }
            Self::Present { field } => {
                lookup(response, field)?.ok_or_else(|| Mismatch::missing(field))?;
                Ok(())
            }
        }
    }
}

/// Why an assertion failed.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Mismatch {
    pub actual: Option<Value>,
    pub reason: String,
}

impl Mismatch {
    fn missing(field: &str) -> Self {
        Self {
            actual: None,
            reason: format!("missing field `{}`", field),
        }
    }

    fn reason(reason: String) -> Self {
        Self {
            actual: None,
            reason,
        }
    }
}

/// Resolve a dot-separated path in the response body.
///
/// Every segment before the last must land on a JSON object.
fn lookup<'a>(response: &'a RawResponse, field: &str) -> Result<Option<&'a Value>, Mismatch> {
    let body = response.body.as_ref().ok_or_else(|| {
        Mismatch::reason(format!(
            "response body is not JSON: {}",
            response.text.chars().take(80).collect::<String>()
        ))
    })?;

    let mut current = body;
    let mut walked = String::from("body");
    let mut segments = field.split('.').peekable();

    while let Some(segment) = segments.next() {
        let object = current
            .as_object()
            .ok_or_else(|| Mismatch::reason(format!("`{}` is not an object", walked)))?;

        match object.get(segment) {
            Some(value) if segments.peek().is_some() => {
                current = value;
                walked.push('.');
                walked.push_str(segment);
            }
            found => return Ok(found),
        }
    }

    Ok(None)
}

fn json_eq(actual: &Value, expected: &Value) -> bool {
    match (actual, expected) {
        (Value::Number(a), Value::Number(b)) => match (a.as_i64(), b.as_i64()) {
            (Some(a), Some(b)) => a == b,
            _ => a.as_f64() == b.as_f64(),
        },
        _ => actual == expected,
    }
}
