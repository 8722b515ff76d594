//! Background tasks following the signed-in session.
//!
//! [`spawn_session_watcher`] mirrors session changes into the app as
//! [`AppMessage`]s and makes sure every signed-in identity has a profile row.
//! [`spawn_refresh_loop`] refreshes the access token shortly before it expires.

use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use super::session::{Session, EXPIRY_MARGIN_SECS};
use crate::app::AppMessage;
use crate::backend::{AuthClient, BlogStore};
use crate::models::Profile;

/// Delay before retrying a refresh that failed for a transient reason.
pub const REFRESH_RETRY_SECS: u64 = 30;

/// Profile for `session`, created on first sight.
///
/// Any lookup failure falls through to creation; any creation failure
/// yields `None`. A session without an email has no profile.
pub async fn ensure_profile(store: &BlogStore, session: &Session) -> Option<Profile> {
    let email = session.email()?;
    let user_id = session.user_id();

    match store.fetch_user(user_id).await {
        Ok(profile) => return Some(profile),
        Err(err) if err.is_not_found() => {
            tracing::debug!(user_id, "No profile yet, creating one");
        }
        Err(err) => {
            tracing::warn!(user_id, "Profile lookup failed, trying to create: {}", err);
        }
    }

    let name = session.user.metadata_name();
    match store.create_user(user_id, email, name.as_deref()).await {
        Ok(profile) => Some(profile),
        Err(err) => {
            tracing::error!(user_id, "Could not create profile: {}", err);
            None
        }
    }
}

/// Spawn the session watcher.
///
/// Resolves the stored session once, then sends
/// [`AppMessage::SessionChanged`] for every change and
/// [`AppMessage::ProfileLoaded`] whenever the signed-in identity changes.
pub fn spawn_session_watcher(
    auth: AuthClient,
    store: BlogStore,
    message_tx: mpsc::UnboundedSender<AppMessage>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut rx = auth.subscribe();

        if let Err(e) = auth.current_session().await {
            tracing::warn!("Could not restore session: {}", e);
        }

        let mut last_user: Option<String> = None;
        loop {
            let session = rx.borrow_and_update().clone();
            let user_id = session.as_ref().map(|s| s.user_id().to_string());

            if message_tx
                .send(AppMessage::SessionChanged(session.clone()))
                .is_err()
            {
                break;
            }

            if user_id != last_user {
                last_user = user_id.clone();
                let profile = match &session {
                    Some(session) => ensure_profile(&store, session).await,
                    None => None,
                };
                if message_tx
                    .send(AppMessage::ProfileLoaded { user_id, profile })
                    .is_err()
                {
                    break;
                }
            }

            if rx.changed().await.is_err() {
                break;
            }
        }

        tracing::debug!("Session watcher stopped");
    })
}

/// Time to wait before refreshing a token expiring at `expires_at`.
pub fn refresh_delay(expires_at: i64, now: i64) -> Duration {
    let secs = expires_at - EXPIRY_MARGIN_SECS - now + 1;
    Duration::from_secs(secs.max(0) as u64)
}

/// Spawn the token refresh loop.
pub fn spawn_refresh_loop(auth: AuthClient) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut rx = auth.subscribe();

        loop {
            let expires_at = rx.borrow_and_update().as_ref().and_then(|s| s.expires_at);

            let Some(expires_at) = expires_at else {
                if rx.changed().await.is_err() {
                    break;
                }
                continue;
            };

            let wait = refresh_delay(expires_at, chrono::Utc::now().timestamp());
            tracing::debug!("Next token refresh in {}s", wait.as_secs());

            tokio::select! {
                changed = rx.changed() => {
                    if changed.is_err() {
                        break;
                    }
                }
                _ = tokio::time::sleep(wait) => {
                    if let Err(e) = auth.current_session().await {
                        tracing::warn!("Token refresh failed, retrying in {}s: {}", REFRESH_RETRY_SECS, e);
                        tokio::time::sleep(Duration::from_secs(REFRESH_RETRY_SECS)).await;
                    }
                }
            }
        }

        tracing::debug!("Refresh loop stopped");
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::{InMemorySessionStore, MockHttpClient, MockResponse};
    use crate::auth::AuthUser;
    use crate::backend::Backend;
    use crate::config::BackendConfig;
    use crate::traits::Response;
    use serde_json::json;
    use std::sync::Arc;

    const BASE: &str = "https://x.supabase.co";

    fn backend(http: &MockHttpClient, store: &InMemorySessionStore) -> Backend {
        Backend::new(
            BackendConfig::new(BASE, "anon"),
            Arc::new(http.clone()),
            Arc::new(store.clone()),
        )
    }

    fn session(email: Option<&str>) -> Session {
        Session {
            access_token: "jwt".to_string(),
            refresh_token: "r".to_string(),
            expires_at: Some(chrono::Utc::now().timestamp() + 3600),
            expires_in: None,
            user: AuthUser {
                id: "u1".to_string(),
                email: email.map(str::to_string),
                user_metadata: json!({"name": "Ada"}),
                created_at: None,
            },
        }
    }

    #[test]
    fn test_refresh_delay() {
        assert_eq!(refresh_delay(1_000, 1_000), Duration::ZERO);
        assert_eq!(refresh_delay(1_000 + EXPIRY_MARGIN_SECS + 99, 1_000), Duration::from_secs(100));
    }

    #[tokio::test]
    async fn test_ensure_profile_returns_existing() {
        let http = MockHttpClient::new();
        http.set_response(
            &format!("{}/rest/v1/users", BASE),
            MockResponse::Success(Response::json_body(200, &json!({"id": "u1", "email": "ada@example.com"}))),
        );
        let backend = backend(&http, &InMemorySessionStore::new());

        let profile = ensure_profile(&backend.store, &session(Some("ada@example.com"))).await;
        assert_eq!(profile.map(|p| p.id), Some("u1".to_string()));
        assert_eq!(http.get_requests().len(), 1);
    }

    #[tokio::test]
    async fn test_ensure_profile_creates_missing() {
        let http = MockHttpClient::new();
        http.set_method_response(
            "GET",
            &format!("{}/rest/v1/users", BASE),
            MockResponse::Success(Response::json_body(406, &json!({"code": "PGRST116", "message": "no rows"}))),
        );
        http.set_method_response(
            "POST",
            &format!("{}/rest/v1/users", BASE),
            MockResponse::Success(Response::json_body(
                201,
                &json!({"id": "u1", "email": "ada@example.com", "name": "Ada"}),
            )),
        );
        let backend = backend(&http, &InMemorySessionStore::new());

        let profile = ensure_profile(&backend.store, &session(Some("ada@example.com")))
            .await
            .unwrap();
        assert_eq!(profile.name.as_deref(), Some("Ada"));

        let insert = &http.get_requests()[1];
        assert_eq!(insert.method, "POST");
        assert_eq!(insert.json_body().unwrap()[0]["name"], "Ada");
    }

    #[tokio::test]
    async fn test_ensure_profile_gives_up_quietly() {
        let http = MockHttpClient::new();
        http.set_default_response(MockResponse::Success(Response::json_body(
            500,
            &json!({"message": "boom"}),
        )));
        let backend = backend(&http, &InMemorySessionStore::new());

        assert!(ensure_profile(&backend.store, &session(Some("a@b.c"))).await.is_none());
    }

    #[tokio::test]
    async fn test_ensure_profile_without_email() {
        let http = MockHttpClient::new();
        let backend = backend(&http, &InMemorySessionStore::new());

        assert!(ensure_profile(&backend.store, &session(None)).await.is_none());
        assert!(http.get_requests().is_empty());
    }

    #[tokio::test]
    async fn test_watcher_restores_stored_session() {
        let http = MockHttpClient::new();
        http.set_response(
            &format!("{}/rest/v1/users", BASE),
            MockResponse::Success(Response::json_body(200, &json!({"id": "u1", "email": "ada@example.com"}))),
        );
        let store = InMemorySessionStore::with_session(session(Some("ada@example.com")));
        let backend = backend(&http, &store);
        let (tx, mut rx) = mpsc::unbounded_channel();

        let handle = spawn_session_watcher(backend.auth.clone(), backend.store.clone(), tx);

        let mut saw_session = false;
        let mut saw_profile = false;
        while !(saw_session && saw_profile) {
            match rx.recv().await {
                Some(AppMessage::SessionChanged(Some(s))) => {
                    assert_eq!(s.user_id(), "u1");
                    saw_session = true;
                }
                Some(AppMessage::ProfileLoaded { user_id, profile }) if user_id.is_some() => {
                    assert_eq!(profile.map(|p| p.id), Some("u1".to_string()));
                    saw_profile = true;
                }
                Some(_) => {}
                None => panic!("watcher stopped early"),
            }
        }

        handle.abort();
    }
}
