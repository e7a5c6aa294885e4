//! The built-in create-user and create-post checks.

use reqwest::Method;
use serde_json::json;

use super::{Assertion, ContractCheck};

pub const CREATE_USER: &str = "create user";
pub const CREATE_POST: &str = "create post";

/// `POST /users/` with a literal user; expects the fields echoed and an id.
pub fn create_user_check() -> ContractCheck {
    ContractCheck::new(
        CREATE_USER,
        Method::POST,
        "/users/",
        Some(json!({"name": "test2", "age": 15})),
    )
    .expect(Assertion::status(200))
    .expect(Assertion::equals("name", "test2"))
    .expect(Assertion::equals("age", 15))
    .expect(Assertion::present("id"))
}

/// `POST /posts/` for author 1; expects the fields echoed, an id, and the
/// author resolved inline.
///
/// Relies on a user with id 1 already existing.
pub fn create_post_check() -> ContractCheck {
    ContractCheck::new(
        CREATE_POST,
        Method::POST,
        "/posts/",
        Some(json!({"title": "post1", "body": "some body1", "author_id": 1})),
    )
    .expect(Assertion::status(200))
    .expect(Assertion::equals("title", "post1"))
    .expect(Assertion::equals("body", "some body1"))
    .expect(Assertion::equals("author_id", 1))
    .expect(Assertion::present("id"))
    .expect(Assertion::present("author"))
    .expect(Assertion::present("author.name"))
    .expect(Assertion::present("author.age"))
    .expect(Assertion::present("author.id"))
}
