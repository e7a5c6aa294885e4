//! HTTP layer: status mapping, retry, raw exchange.
//!
//! This is the ONLY place for status code handling. client/mod.rs never
//! interprets status codes.

use std::time::Duration;

use reqwest::header::AUTHORIZATION;
use reqwest::{Method, StatusCode};
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::ApiConfig;
use crate::error::{ApiError, ApiResult};

use super::helpers::{parse_error_detail, resource_from_url};

/// Status and body of a response, uninterpreted.
#[derive(Debug, Clone)]
pub struct RawResponse {
    /// HTTP status code.
    pub status: u16,

    /// Parsed JSON body, `None` when the body is empty or not JSON.
    pub body: Option<Value>,

    /// Raw body text.
    pub text: String,
}

/// HTTP backend for making requests (holds reqwest client and config).
#[derive(Debug, Clone)]
pub(crate) struct HttpBackend {
    pub(crate) client: reqwest::Client,
    pub(crate) base_url: String,
    pub(crate) config: ApiConfig,
}

impl HttpBackend {
    /// Single request with no status interpretation and no retry.
    pub(crate) async fn exchange(
        &self,
        method: Method,
        url: &str,
        body: Option<&Value>,
    ) -> ApiResult<RawResponse> {
        let response = self.send(method, url, body).await?;
        let status = response.status().as_u16();
        let text = response.text().await.map_err(|e| ApiError::Network {
            message: format!("failed to read response body: {}", e),
        })?;
        let body = serde_json::from_str(&text).ok();

        Ok(RawResponse { status, body, text })
    }

    /// Make a request and map non-success statuses to errors.
    ///
    /// Transient failures are retried only for idempotent methods.
    pub(crate) async fn request(
        &self,
        method: Method,
        url: &str,
        body: Option<&Value>,
    ) -> ApiResult<reqwest::Response> {
        let mut retries = 0;
        let max_retries = if is_idempotent(&method) {
            self.config.max_retries
        } else {
            0
        };

        loop {
            let result = self.request_once(method.clone(), url, body).await;

            match result {
                Ok(response) => return Ok(response),
                Err(e) if e.is_retryable() && retries < max_retries => {
                    retries += 1;

                    let backoff = backoff_for(&e, retries);

                    warn!(
                        error = %e,
                        retry = retries,
                        max_retries = max_retries,
                        backoff_ms = backoff.as_millis(),
                        "retrying request"
                    );

                    tokio::time::sleep(backoff).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn request_once(
        &self,
        method: Method,
        url: &str,
        body: Option<&Value>,
    ) -> ApiResult<reqwest::Response> {
        let response = self.send(method, url, body).await?;
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<u64>().ok())
                .map(Duration::from_secs);

            return Err(ApiError::RateLimited { retry_after });
        }

        let body = response.text().await.unwrap_or_default();
        let detail = parse_error_detail(&body, &status.to_string());

        Err(match status.as_u16() {
            400 => ApiError::Rejected { detail },
            404 => ApiError::NotFound {
                resource: resource_from_url(url),
                detail,
            },
            422 => ApiError::Validation { detail },
            500..=599 => ApiError::Server {
                status: status.as_u16(),
                detail,
            },
            code => ApiError::UnexpectedStatus {
                status: code,
                detail,
            },
        })
    }

    async fn send(
        &self,
        method: Method,
        url: &str,
        body: Option<&Value>,
    ) -> ApiResult<reqwest::Response> {
        debug!(method = %method, url = %url, "sending request");

        let mut request = self.client.request(method, url);

        if let Some(token) = &self.config.token {
            request = request.header(AUTHORIZATION, format!("Bearer {}", token));
        }

        if let Some(body) = body {
            request = request.json(body);
        }

        Ok(request.send().await?)
    }
}

/// Longest wait between attempts.
const MAX_BACKOFF: Duration = Duration::from_secs(30);

/// Wait before retry number `retry` (1-based).
///
/// Rate limits honour `Retry-After` (capped, +/-10% jitter, at least 100ms).
/// Everything else uses full-jitter exponential backoff over `2^retry`
/// seconds, capped at `MAX_BACKOFF`.
fn backoff_for(err: &ApiError, retry: u32) -> Duration {
    use rand::Rng;

    let mut rng = rand::thread_rng();
    match err {
        ApiError::RateLimited {
            retry_after: Some(retry_after),
        } => {
            let base_ms = (*retry_after).min(MAX_BACKOFF).as_millis() as u64;
            let jitter_factor: f64 = rng.gen_range(0.9_f64..=1.1_f64);
            let jittered_ms = ((base_ms as f64) * jitter_factor).round() as u64;
            Duration::from_millis(jittered_ms.max(100))
        }
        _ => {
            // 2^5 already exceeds the cap; clamping keeps the shift in range.
            let base = Duration::from_secs(1u64 << retry.min(5)).min(MAX_BACKOFF);
            let jittered_ms = rng.gen_range(0..=base.as_millis() as u64);
            Duration::from_millis(jittered_ms.max(10))
        }
    }
}

fn is_idempotent(method: &Method) -> bool {
    *method == Method::GET || *method == Method::HEAD || *method == Method::DELETE
}

#[cfg(test)]
mod tests {
    use super::*;

    fn network() -> ApiError {
        ApiError::Network {
            message: "connection refused".to_string(),
        }
    }

    #[test]
    fn test_backoff_exponential_is_capped() {
        for retry in [1, 5, 6, 63, 64, 65, u32::MAX] {
            let backoff = backoff_for(&network(), retry);
            assert!(backoff >= Duration::from_millis(10));
            assert!(backoff <= MAX_BACKOFF, "retry {}: {:?}", retry, backoff);
        }
        assert!(backoff_for(&network(), 1) <= Duration::from_secs(2));
    }

    #[test]
    fn test_backoff_honours_retry_after() {
        let limited = ApiError::RateLimited {
            retry_after: Some(Duration::from_secs(2)),
        };
        let backoff = backoff_for(&limited, 1);
        assert!(backoff >= Duration::from_millis(1800));
        assert!(backoff <= Duration::from_millis(2200));

        let long = ApiError::RateLimited {
            retry_after: Some(Duration::from_secs(3600)),
        };
        assert!(backoff_for(&long, 1) <= Duration::from_millis(33_000));
    }

    #[test]
    fn test_post_is_not_idempotent() {
        assert!(!is_idempotent(&Method::POST));
        assert!(is_idempotent(&Method::GET));
        assert!(is_idempotent(&Method::DELETE));
    }
}
