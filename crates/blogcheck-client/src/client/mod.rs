//! Client for the blog API.
//!
//! Public API: no status code knowledge. All HTTP/status mapping in http.rs.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::config::ApiConfig;
use crate::error::{ApiError, ApiResult};
use crate::types::{DeleteReceipt, NewPost, NewUser, Post, User};

mod helpers;
mod http;

pub use http::RawResponse;

use http::HttpBackend;

/// User-Agent sent with every request.
pub const BLOGCHECK_USER_AGENT: &str = concat!("blogcheck/", env!("CARGO_PKG_VERSION"));

/// Client for the users/posts service.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: HttpBackend,
    base: Url,
}

impl ApiClient {
    pub fn new(config: ApiConfig) -> ApiResult<Self> {
        let base_url = config.url.trim_end_matches('/').to_string();
        let base = Url::parse(&base_url).map_err(|e| ApiError::Config {
            message: format!("invalid API url '{}': {}", config.url, e),
        })?;
        if base.cannot_be_a_base() || !matches!(base.scheme(), "http" | "https") {
            return Err(ApiError::Config {
                message: format!("API url must be http(s): {}", config.url),
            });
        }

        let mut default_headers = HeaderMap::new();
        default_headers.insert(USER_AGENT, HeaderValue::from_static(BLOGCHECK_USER_AGENT));

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers(default_headers)
            .build()
            .map_err(|e| ApiError::Config {
                message: format!("failed to create HTTP client: {}", e),
            })?;

        Ok(Self {
            http: HttpBackend {
                client,
                base_url,
                config,
            },
            base,
        })
    }

    pub fn from_env() -> ApiResult<Self> {
        Self::new(ApiConfig::from_env())
    }

    /// `POST /users/`
    pub async fn create_user(&self, user: &NewUser) -> ApiResult<User> {
        let url = self.endpoint(&["users", ""]);
        debug!(url = %url, name = %user.name, "creating user");
        self.call_json(Method::POST, &url, Some(to_value(user)?))
            .await
    }

    /// `GET /users/{name}`
    pub async fn get_user(&self, name: &str) -> ApiResult<User> {
        let url = self.endpoint(&["users", name]);
        debug!(url = %url, "fetching user");
        self.call_json(Method::GET, &url, None).await
    }

    /// `DELETE /users/{id}`. Rejected while the user still has posts.
    pub async fn delete_user(&self, id: i64) -> ApiResult<DeleteReceipt> {
        let url = self.endpoint(&["users", &id.to_string()]);
        debug!(url = %url, "deleting user");
        self.call_json(Method::DELETE, &url, None).await
    }

    /// `POST /posts/`
    pub async fn create_post(&self, post: &NewPost) -> ApiResult<Post> {
        let url = self.endpoint(&["posts", ""]);
        debug!(url = %url, author_id = post.author_id, "creating post");
        self.call_json(Method::POST, &url, Some(to_value(post)?))
            .await
    }

    /// `GET /post/`
    pub async fn list_posts(&self) -> ApiResult<Vec<Post>> {
        let url = self.endpoint(&["post", ""]);
        debug!(url = %url, "listing posts");
        self.call_json(Method::GET, &url, None).await
    }

    /// `DELETE /posts/{id}`
    pub async fn delete_post(&self, id: i64) -> ApiResult<DeleteReceipt> {
        let url = self.endpoint(&["posts", &id.to_string()]);
        debug!(url = %url, "deleting post");
        self.call_json(Method::DELETE, &url, None).await
    }

    /// Send a request to `path` (relative to the base URL) and return the
    /// status and body as-is. Never retried.
    pub async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> ApiResult<RawResponse> {
        let url = format!(
            "{}/{}",
            self.http.base_url,
            path.trim_start_matches('/')
        );
        self.http.exchange(method, &url, body).await
    }

    pub fn base_url(&self) -> &str {
        &self.http.base_url
    }

    async fn call_json<T: DeserializeOwned>(
        &self,
        method: Method,
        url: &str,
        body: Option<Value>,
    ) -> ApiResult<T> {
        let response = self.http.request(method, url, body.as_ref()).await?;

        response
            .json()
            .await
            .map_err(|e| ApiError::InvalidResponse {
                message: format!("failed to decode response from {}: {}", url, e),
            })
    }

    fn endpoint(&self, segments: &[&str]) -> String {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url.to_string()
    }
}

fn to_value<T: serde::Serialize>(value: &T) -> ApiResult<Value> {
    serde_json::to_value(value).map_err(|e| ApiError::InvalidResponse {
        message: format!("failed to encode request body: {}", e),
    })
}
