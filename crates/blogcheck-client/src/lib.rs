//! Typed client and contract checks for the blog API.
//!
//! This crate consumes the HTTP contract of a small users/posts service,
//! providing:
//!
//! - Typed models for users and posts
//! - HTTP client for every endpoint the service exposes
//! - Declarative contract checks (request + ordered assertions)
//! - The built-in create-user / create-post suite
//!
//! # Quick Start
//!
//! ```no_run
//! use blogcheck_client::{ApiClient, ContractSuite};
//!
//! # async fn example() -> anyhow::Result<()> {
//! // Create client from environment
//! let client = ApiClient::from_env()?;
//!
//! let report = ContractSuite::builtin().run(&client).await;
//! println!("{}", report.render_text());
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration
//!
//! | Environment Variable | Description |
//! |---------------------|-------------|
//! | `BLOGCHECK_API_URL` | Service base URL (default: `http://127.0.0.1:8000`) |
//! | `BLOGCHECK_API_TOKEN` | Optional bearer token |
//! | `BLOGCHECK_TIMEOUT` | Request timeout in seconds (default: 30) |
//! | `BLOGCHECK_MAX_RETRIES` | Max retries for idempotent requests (default: 0) |

pub mod client;
pub mod config;
pub mod contract;
pub mod error;
pub mod types;

pub use client::{ApiClient, RawResponse, BLOGCHECK_USER_AGENT};
pub use config::ApiConfig;
pub use contract::{
    Assertion, AssertionResult, AssertionStatus, CheckOutcome, CheckReport, ContractCheck,
    ContractSuite, SuiteReport,
};
pub use error::{ApiError, ApiResult};
pub use types::{DeleteReceipt, ErrorDetail, NewPost, NewUser, Post, User};
