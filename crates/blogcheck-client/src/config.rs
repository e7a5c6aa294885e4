//! Client configuration.

use serde::{Deserialize, Serialize};

/// Connection settings for the service under test.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the service.
    #[serde(default = "default_api_url")]
    pub url: String,

    /// Optional bearer token.
    #[serde(default)]
    pub token: Option<String>,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Maximum retries for transient failures of idempotent requests.
    #[serde(default)]
    pub max_retries: u32,
}

fn default_api_url() -> String {
    "http://127.0.0.1:8000".to_string()
}

fn default_timeout() -> u64 {
    30
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            url: default_api_url(),
            token: None,
            timeout_secs: default_timeout(),
            max_retries: 0,
        }
    }
}

impl ApiConfig {
    /// Create config from environment variables.
    ///
    /// | Variable | Description |
    /// |----------|-------------|
    /// | `BLOGCHECK_API_URL` | Service base URL |
    /// | `BLOGCHECK_API_TOKEN` | Bearer token |
    /// | `BLOGCHECK_TIMEOUT` | Request timeout in seconds |
    /// | `BLOGCHECK_MAX_RETRIES` | Retries for idempotent requests |
    pub fn from_env() -> Self {
        Self {
            url: std::env::var("BLOGCHECK_API_URL").unwrap_or_else(|_| default_api_url()),
            token: std::env::var("BLOGCHECK_API_TOKEN")
                .ok()
                .filter(|t| !t.is_empty()),
            timeout_secs: std::env::var("BLOGCHECK_TIMEOUT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_else(default_timeout),
            max_retries: std::env::var("BLOGCHECK_MAX_RETRIES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(0),
        }
    }

    /// Set the base URL.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Set the token.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    pub fn with_max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }
}
