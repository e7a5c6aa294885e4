//! Integration tests for ApiClient.
//!
//! Uses wiremock for HTTP mocking. Tests cover every endpoint, status
//! mapping (400/404/422/429/5xx), and retry behavior.

use std::time::Duration;

use blogcheck_client::{
    ApiClient, ApiConfig, ApiError, NewPost, NewUser, BLOGCHECK_USER_AGENT,
};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn create_test_client(mock_server: &MockServer) -> ApiClient {
    let config = ApiConfig::default().with_url(mock_server.uri());
    ApiClient::new(config).expect("failed to create client")
}

fn author() -> serde_json::Value {
    json!({"id": 1, "name": "test2", "age": 15})
}

#[tokio::test]
async fn test_create_user_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/users/"))
        .and(body_json(json!({"name": "test2", "age": 15})))
        .respond_with(ResponseTemplate::new(200).set_body_json(author()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let user = client
        .create_user(&NewUser::new("test2", 15))
        .await
        .expect("create user failed");

    assert_eq!(user.id, 1);
    assert_eq!(user.name, "test2");
    assert_eq!(user.age, 15);
}

#[tokio::test]
async fn test_create_post_embeds_author() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/posts/"))
        .and(body_json(
            json!({"title": "post1", "body": "some body1", "author_id": 1}),
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 5,
            "title": "post1",
            "body": "some body1",
            "author_id": 1,
            "author": author()
        })))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let post = client
        .create_post(&NewPost::new("post1", "some body1", 1))
        .await
        .expect("create post failed");

    assert_eq!(post.id, 5);
    assert_eq!(post.author.id, 1);
    assert_eq!(post.author.name, "test2");
}

#[tokio::test]
async fn test_create_post_unknown_author() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/posts/"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({"detail": "User not found"})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let result = client
        .create_post(&NewPost::new("post1", "some body1", 99))
        .await;

    match result {
        Err(ApiError::NotFound { resource, detail }) => {
            assert_eq!(resource, "post");
            assert_eq!(detail, "User not found");
        }
        other => panic!("expected NotFound, got {:?}", other),
    }
}

#[tokio::test]
async fn test_create_user_validation_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/users/"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "detail": [{"loc": ["body", "age"], "msg": "value is not a valid integer"}]
        })))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let result = client.create_user(&NewUser::new("x", -1)).await;

    match result {
        Err(ApiError::Validation { detail }) => {
            assert!(detail.contains("value is not a valid integer"));
        }
        other => panic!("expected Validation, got {:?}", other),
    }
}

#[tokio::test]
async fn test_list_posts() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/post/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "title": "a", "body": "b", "author_id": 1, "author": author()},
            {"id": 2, "title": "c", "body": "d", "author_id": 1, "author": author()}
        ])))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let posts = client.list_posts().await.expect("list posts failed");

    assert_eq!(posts.len(), 2);
    assert_eq!(posts[1].title, "c");
}

#[tokio::test]
async fn test_get_user_by_name() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/test2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(author()))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let user = client.get_user("test2").await.expect("get user failed");
    assert_eq!(user.id, 1);
}

#[tokio::test]
async fn test_get_user_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/ghost"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({"detail": "User not found"})),
        )
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let result = client.get_user("ghost").await;

    match result {
        Err(ApiError::NotFound { resource, .. }) => assert_eq!(resource, "user ghost"),
        other => panic!("expected NotFound, got {:?}", other),
    }
}

#[tokio::test]
async fn test_delete_post() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/posts/3"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"message": "Post with id 3 has been deleted."})),
        )
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let receipt = client.delete_post(3).await.expect("delete failed");
    assert_eq!(receipt.message, "Post with id 3 has been deleted.");
}

#[tokio::test]
async fn test_delete_user_with_posts_rejected() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/users/1"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "detail": "Cannot delete user with id 1 because they have associated posts."
        })))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let result = client.delete_user(1).await;

    match result {
        Err(ApiError::Rejected { detail }) => assert!(detail.contains("associated posts")),
        other => panic!("expected Rejected, got {:?}", other),
    }
}

#[tokio::test]
async fn test_invalid_json_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/post/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let result = client.list_posts().await;
    assert!(matches!(result, Err(ApiError::InvalidResponse { .. })));
}

#[tokio::test]
async fn test_user_agent_and_token_headers() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/test2"))
        .and(header("user-agent", BLOGCHECK_USER_AGENT))
        .and(header("authorization", "Bearer secret-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(author()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = ApiConfig::default()
        .with_url(mock_server.uri())
        .with_token("secret-token");
    let client = ApiClient::new(config).expect("failed to create client");

    let result = client.get_user("test2").await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_server_error_retried_for_get() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/post/"))
        .respond_with(ResponseTemplate::new(503))
        .expect(2)
        .mount(&mock_server)
        .await;

    // One retry keeps real-time backoff under 2s; backoff bounds are unit
    // tested in client/http.rs.
    let config = ApiConfig::default()
        .with_url(mock_server.uri())
        .with_max_retries(1);
    let client = ApiClient::new(config).unwrap();

    let result = client.list_posts().await;
    assert!(matches!(result, Err(ApiError::Server { status: 503, .. })));
}

#[tokio::test]
async fn test_post_never_retried() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/users/"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = ApiConfig::default()
        .with_url(mock_server.uri())
        .with_max_retries(3);
    let client = ApiClient::new(config).unwrap();

    let result = client.create_user(&NewUser::new("test2", 15)).await;
    assert!(matches!(result, Err(ApiError::Server { .. })));
}

#[tokio::test]
async fn test_rate_limited_with_retry_after() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/post/"))
        .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "1"))
        .expect(2)
        .mount(&mock_server)
        .await;

    let config = ApiConfig::default()
        .with_url(mock_server.uri())
        .with_max_retries(1);
    let client = ApiClient::new(config).unwrap();

    let start = std::time::Instant::now();
    let result = client.list_posts().await;
    let elapsed = start.elapsed();

    match result {
        Err(ApiError::RateLimited { retry_after }) => {
            assert_eq!(retry_after, Some(Duration::from_secs(1)));
        }
        other => panic!("expected RateLimited, got {:?}", other),
    }
    assert!(
        elapsed.as_millis() >= 850,
        "should have waited for retry-after (with jitter), elapsed: {:?}",
        elapsed
    );
}

#[tokio::test]
async fn test_connection_refused_is_network_error() {
    let config = ApiConfig::default()
        .with_url("http://127.0.0.1:1")
        .with_timeout_secs(2);
    let client = ApiClient::new(config).unwrap();

    let result = client.list_posts().await;
    assert!(matches!(result, Err(ApiError::Network { .. })));
}

// Paused clock: backoff sleeps auto-advance, so many retries finish instantly.
#[tokio::test(start_paused = true)]
async fn test_large_max_retries_does_not_overflow_backoff() {
    let config = ApiConfig::default()
        .with_url("http://127.0.0.1:1")
        .with_timeout_secs(2)
        .with_max_retries(70);
    let client = ApiClient::new(config).unwrap();

    let result = client.list_posts().await;
    assert!(matches!(result, Err(ApiError::Network { .. })));
}
