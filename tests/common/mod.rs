#![allow(dead_code)]

//! Common test utilities for integration tests.
//!
//! Builds backends pointed at a [`wiremock::MockServer`] and canned JSON rows
//! in the shape the hosted API returns them.

use std::sync::Arc;

use quire::adapters::{InMemorySessionStore, ReqwestHttpClient};
use quire::auth::{AuthUser, Session};
use quire::backend::Backend;
use quire::config::BackendConfig;
use serde_json::{json, Value};

pub const ANON_KEY: &str = "test-anon-key";

/// Backend talking to `server_uri` over real HTTP, with sessions kept in memory.
pub fn backend_for(server_uri: &str) -> (Backend, Arc<InMemorySessionStore>) {
    backend_with_store(server_uri, InMemorySessionStore::new())
}

pub fn backend_with_store(
    server_uri: &str,
    store: InMemorySessionStore,
) -> (Backend, Arc<InMemorySessionStore>) {
    let store = Arc::new(store);
    let backend = Backend::new(
        BackendConfig::new(server_uri, ANON_KEY),
        Arc::new(ReqwestHttpClient::new()),
        store.clone(),
    );
    (backend, store)
}

/// A session that stays valid for an hour.
pub fn test_session(user_id: &str) -> Session {
    Session {
        access_token: format!("access-{}", user_id),
        refresh_token: format!("refresh-{}", user_id),
        expires_at: Some(chrono::Utc::now().timestamp() + 3600),
        expires_in: Some(3600),
        user: AuthUser {
            id: user_id.to_string(),
            email: Some(format!("{}@example.com", user_id)),
            ..AuthUser::default()
        },
    }
}

/// A session whose access token is already past expiry.
pub fn expired_session(user_id: &str) -> Session {
    Session {
        expires_at: Some(chrono::Utc::now().timestamp() - 600),
        ..test_session(user_id)
    }
}

/// Token endpoint body for `user_id`.
pub fn session_json(user_id: &str, access_token: &str) -> Value {
    json!({
        "access_token": access_token,
        "refresh_token": format!("refresh-{}", access_token),
        "expires_in": 3600,
        "token_type": "bearer",
        "user": {
            "id": user_id,
            "email": format!("{}@example.com", user_id),
            "user_metadata": {}
        }
    })
}

/// A `posts` row with the author projection.
pub fn post_json(id: &str, title: &str) -> Value {
    json!({
        "id": id,
        "created_at": "2024-03-01T08:00:00+00:00",
        "updated_at": null,
        "title": title,
        "content": "Some words about things.",
        "news_link": null,
        "type": "article",
        "images": null,
        "is_hidden": false,
        "author_id": "u1",
        "users": { "name": "Ada", "email": "ada@example.com", "avatar_url": null },
        "slug": title.to_lowercase().replace(' ', "-"),
        "reading_time": 1,
        "excerpt": null
    })
}

pub fn profile_json(id: &str, email: &str) -> Value {
    json!({
        "id": id,
        "email": email,
        "name": "Ada",
        "birthday": null,
        "is_admin": false,
        "avatar_url": null,
        "created_at": "2024-01-01T00:00:00+00:00"
    })
}

pub fn comment_json(id: &str, post_id: &str, approved: bool) -> Value {
    json!({
        "id": id,
        "post_id": post_id,
        "author_name": "Bea",
        "author_email": "bea@example.com",
        "content": "Lovely post",
        "is_approved": approved,
        "created_at": "2024-03-02T10:00:00+00:00"
    })
}
