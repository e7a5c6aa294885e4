//! Request and response types for the blog API.

use serde::{Deserialize, Serialize};

/// Body of `POST /users/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub age: i64,
}

impl NewUser {
    pub fn new(name: impl Into<String>, age: i64) -> Self {
        Self {
            name: name.into(),
            age,
        }
    }
}

/// A stored user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Server-assigned id.
    pub id: i64,
    pub name: String,
    pub age: i64,
}

/// Body of `POST /posts/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPost {
    pub title: String,
    pub body: String,

    /// Id of an existing user.
    pub author_id: i64,
}

impl NewPost {
    pub fn new(title: impl Into<String>, body: impl Into<String>, author_id: i64) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            author_id,
        }
    }
}

/// A stored post with its author resolved inline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    /// Server-assigned id.
    pub id: i64,
    pub title: String,
    pub body: String,
    pub author_id: i64,

    /// Full user record for `author_id`.
    pub author: User,
}

/// Response from the delete endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteReceipt {
    pub message: String,
}

/// Error body returned by the service on non-2xx responses.
///
/// `detail` is a plain string for 400/404 and a list of field errors for 422.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub detail: serde_json::Value,
}

impl ErrorDetail {
    /// Human-readable form of `detail`.
    pub fn message(&self) -> String {
        match &self.detail {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}
