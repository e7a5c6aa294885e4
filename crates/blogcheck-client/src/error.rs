//! Error types for the blog API client.

use std::time::Duration;

/// API errors.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Resource not found (404).
    #[error("not found: {resource} - {detail}")]
    NotFound { resource: String, detail: String },

    /// Request rejected by the service (400).
    #[error("rejected: {detail}")]
    Rejected { detail: String },

    /// Request body failed validation (422).
    #[error("validation failed: {detail}")]
    Validation { detail: String },

    /// Rate limit exceeded.
    #[error("rate limited: retry after {retry_after:?}")]
    RateLimited { retry_after: Option<Duration> },

    /// Server-side failure (5xx).
    #[error("server error: HTTP {status}: {detail}")]
    Server { status: u16, detail: String },

    /// Any other non-success status.
    #[error("unexpected status: HTTP {status}: {detail}")]
    UnexpectedStatus { status: u16, detail: String },

    /// Network error.
    #[error("network error: {message}")]
    Network { message: String },

    /// Response could not be decoded.
    #[error("invalid response: {message}")]
    InvalidResponse { message: String },

    /// Configuration error.
    #[error("configuration error: {message}")]
    Config { message: String },
}

impl ApiError {
    /// Exit code for CLI.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config { .. } => 2,

            // Client-side contract issues
            Self::NotFound { .. } => 3,
            Self::Rejected { .. } => 3,
            Self::Validation { .. } => 3,
            Self::UnexpectedStatus { .. } => 3,

            // Network/transient
            Self::RateLimited { .. } => 4,
            Self::Network { .. } => 4,
            Self::Server { .. } => 4,

            Self::InvalidResponse { .. } => 5,
        }
    }

    /// Whether the error is retryable.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::RateLimited { .. } | Self::Network { .. } | Self::Server { .. }
        )
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network {
            message: err.to_string(),
        }
    }
}

/// Result type for API operations.
pub type ApiResult<T> = Result<T, ApiError>;
