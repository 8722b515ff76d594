//! Data API calls against a mock server.
//!
//! Verifies the query parameters, headers and error mapping of the blog's
//! table operations over real HTTP.

mod common;

use common::*;
use quire::error::{QuireError, StoreError};
use quire::models::PostType;
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_fetch_posts_requests_visible_newest_first() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/posts"))
        .and(query_param("is_hidden", "eq.false"))
        .and(query_param("order", "created_at.desc"))
        .and(query_param("select", "*,users(name,email,avatar_url)"))
        .and(header("apikey", ANON_KEY))
        .and(header("Authorization", format!("Bearer {}", ANON_KEY).as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            post_json("p2", "Second Post"),
            post_json("p1", "First Post"),
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let (backend, _) = backend_for(&server.uri());
    let posts = backend.store.fetch_posts().await.unwrap();

    assert_eq!(posts.len(), 2);
    assert_eq!(posts[0].title, "Second Post");
    assert_eq!(posts[0].post_type, PostType::Article);
    assert!(posts[0].images.is_empty());
    assert_eq!(posts[0].publisher_name(), "Ada");
}

#[tokio::test]
async fn test_missing_slug_is_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/posts"))
        .and(query_param("slug", "eq.nope"))
        .respond_with(ResponseTemplate::new(406).set_body_json(json!({
            "code": "PGRST116",
            "message": "JSON object requested, multiple (or no) rows returned",
            "details": "The result contains 0 rows"
        })))
        .mount(&server)
        .await;

    let (backend, _) = backend_for(&server.uri());
    let err = backend.store.fetch_post_by_slug("nope").await.unwrap_err();

    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_signed_in_requests_carry_access_token() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/v1/token"))
        .and(query_param("grant_type", "password"))
        .respond_with(ResponseTemplate::new(200).set_body_json(session_json("u1", "tok-u1")))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/posts"))
        .and(query_param("author_id", "eq.u1"))
        .and(header("Authorization", "Bearer tok-u1"))
        .and(header("apikey", ANON_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([post_json("p1", "Mine")])))
        .expect(1)
        .mount(&server)
        .await;

    let (backend, _) = backend_for(&server.uri());
    backend
        .auth
        .sign_in_with_password("u1@example.com", "secret")
        .await
        .unwrap();

    let posts = backend.store.fetch_posts_by_author("u1").await.unwrap();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].title, "Mine");
}

#[tokio::test]
async fn test_submitted_comment_awaits_approval() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/comments"))
        .and(header("Prefer", "return=representation"))
        .and(body_partial_json(json!({
            "post_id": "p1",
            "author_name": "Bea",
            "author_email": "bea@example.com",
            "is_approved": false
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(comment_json("c1", "p1", false)))
        .expect(1)
        .mount(&server)
        .await;

    let (backend, _) = backend_for(&server.uri());
    let comment = backend
        .store
        .submit_comment("p1", "Bea", "bea@example.com", "Lovely post")
        .await
        .unwrap();

    assert_eq!(comment.id, "c1");
    assert!(!comment.is_approved);
}

#[tokio::test]
async fn test_create_user_reuses_profile_on_email_conflict() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/users"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({
            "code": "23505",
            "message": "duplicate key value violates unique constraint \"users_email_key\"",
            "details": "Key (email)=(ada@example.com) already exists."
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/users"))
        .and(query_param("email", "eq.ada@example.com"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(profile_json("old-id", "ada@example.com")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let (backend, _) = backend_for(&server.uri());
    let profile = backend
        .store
        .create_user("new-id", "ada@example.com", None)
        .await
        .unwrap();

    assert_eq!(profile.id, "old-id");
    assert_eq!(profile.email, "ada@example.com");
}

#[tokio::test]
async fn test_server_error_keeps_store_message() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/rest/v1/posts"))
        .and(query_param("id", "eq.p1"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "message": "permission denied for table posts"
        })))
        .mount(&server)
        .await;

    let (backend, _) = backend_for(&server.uri());
    let err = backend.store.delete_post("p1").await.unwrap_err();

    assert!(matches!(
        err.inner(),
        QuireError::Store(StoreError::Api { status: 500, .. })
    ));
    assert!(err.user_message().contains("permission denied"));
    assert!(err.is_retryable());
}
