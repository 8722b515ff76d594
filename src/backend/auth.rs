//! Auth API client.
//!
//! Owns the session channel: every sign-in, refresh and sign-out is
//! published to subscribers and written through the [`SessionStore`].

use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tokio::sync::watch;

use super::{transport_error, ApiContext};
use crate::auth::Session;
use crate::error::{AuthError, QuireError, QuireResult};
use crate::traits::{Headers, Response, SessionStore};

/// Error payload of the auth API. Older and newer deployments use
/// different field names.
#[derive(Debug, Default, Deserialize)]
struct AuthErrorBody {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    error_code: Option<String>,
    #[serde(default)]
    error_description: Option<String>,
    #[serde(default)]
    msg: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

fn auth_error(response: &Response) -> AuthError {
    let body: AuthErrorBody = response.json().unwrap_or_default();
    let invalid = body.error.as_deref() == Some("invalid_grant")
        || body.error_code.as_deref() == Some("invalid_credentials");
    let message = body
        .error_description
        .or(body.msg)
        .or(body.message)
        .or(body.error)
        .unwrap_or_else(|| format!("Authentication failed (HTTP {})", response.status));

    if invalid {
        AuthError::InvalidCredentials { message }
    } else {
        AuthError::Rejected {
            status: response.status,
            message,
        }
    }
}

/// Client for the hosted auth API.
#[derive(Clone)]
pub struct AuthClient {
    ctx: ApiContext,
    session_tx: Arc<watch::Sender<Option<Session>>>,
    sessions: Arc<dyn SessionStore>,
}

impl AuthClient {
    pub fn new(
        ctx: ApiContext,
        session_tx: watch::Sender<Option<Session>>,
        sessions: Arc<dyn SessionStore>,
    ) -> Self {
        Self {
            ctx,
            session_tx: Arc::new(session_tx),
            sessions,
        }
    }

    /// Session changes, starting with the current value.
    pub fn subscribe(&self) -> watch::Receiver<Option<Session>> {
        self.session_tx.subscribe()
    }

    /// The in-memory session, without touching storage or the network.
    pub fn session(&self) -> Option<Session> {
        self.session_tx.borrow().clone()
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.ctx.config().auth_url(), path)
    }

    /// Headers authorized with the anon key only.
    fn anon_headers(&self) -> Headers {
        let mut headers = Headers::new();
        headers.insert("apikey".to_string(), self.ctx.config().anon_key.clone());
        headers.insert(
            "Authorization".to_string(),
            format!("Bearer {}", self.ctx.config().anon_key),
        );
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        headers
    }

    async fn post(&self, path: &str, body: serde_json::Value, headers: &Headers) -> QuireResult<Response> {
        let url = self.url(path);
        let response = self
            .ctx
            .http()
            .post(&url, &body.to_string(), headers)
            .await
            .map_err(|e| transport_error(e, &url))?;
        if response.is_success() {
            Ok(response)
        } else {
            let err = auth_error(&response);
            tracing::warn!(path, status = response.status, "Auth request rejected: {}", err);
            Err(err.into())
        }
    }

    /// Persist and publish a new session.
    async fn adopt(&self, session: Session) -> Session {
        let session = session.normalized();
        if let Err(e) = self.sessions.save(&session).await {
            tracing::warn!("Could not persist session: {}", e);
        }
        self.session_tx.send_replace(Some(session.clone()));
        session
    }

    /// Forget the session locally.
    async fn drop_session(&self) {
        self.session_tx.send_replace(None);
        if let Err(e) = self.sessions.clear().await {
            tracing::warn!("Could not clear stored session: {}", e);
        }
    }

    pub async fn sign_in_with_password(&self, email: &str, password: &str) -> QuireResult<Session> {
        let response = self
            .post(
                "token?grant_type=password",
                json!({ "email": email, "password": password }),
                &self.anon_headers(),
            )
            .await?;
        let session: Session = response.json()?;
        tracing::info!(user_id = %session.user.id, "Signed in");
        Ok(self.adopt(session).await)
    }

    /// Register a new account.
    ///
    /// Deployments that confirm accounts immediately answer with a session,
    /// which is adopted; otherwise `None` is returned.
    pub async fn sign_up(&self, email: &str, password: &str) -> QuireResult<Option<Session>> {
        let response = self
            .post(
                "signup",
                json!({ "email": email, "password": password }),
                &self.anon_headers(),
            )
            .await?;
        tracing::info!("Account created");
        match response.json::<Session>() {
            Ok(session) if !session.access_token.is_empty() => Ok(Some(self.adopt(session).await)),
            _ => Ok(None),
        }
    }

    /// Email a one-time sign-in link.
    pub async fn sign_in_with_otp(&self, email: &str) -> QuireResult<()> {
        self.post(
            "otp",
            json!({ "email": email, "create_user": true }),
            &self.anon_headers(),
        )
        .await?;
        tracing::info!("Magic link requested");
        Ok(())
    }

    /// Exchange a refresh token for a new session.
    pub async fn refresh_session(&self, refresh_token: &str) -> QuireResult<Session> {
        let response = self
            .post(
                "token?grant_type=refresh_token",
                json!({ "refresh_token": refresh_token }),
                &self.anon_headers(),
            )
            .await
            .map_err(|err| {
                if matches!(err.inner(), QuireError::Auth(_)) {
                    AuthError::SessionExpired.into()
                } else {
                    err
                }
            })?;
        let session: Session = response.json()?;
        tracing::debug!(user_id = %session.user.id, "Session refreshed");
        Ok(self.adopt(session).await)
    }

    /// The usable session, if any.
    ///
    /// Loads the stored session when nothing is in memory and refreshes it
    /// when expired. A session that cannot be refreshed is discarded.
    pub async fn current_session(&self) -> QuireResult<Option<Session>> {
        let session = match self.session() {
            Some(session) => Some(session),
            None => self.sessions.load().await.unwrap_or_else(|e| {
                tracing::warn!("Could not load stored session: {}", e);
                None
            }),
        };

        let Some(session) = session else {
            return Ok(None);
        };

        if !session.is_expired() {
            if self.session().as_ref() != Some(&session) {
                self.session_tx.send_replace(Some(session.clone()));
            }
            return Ok(Some(session));
        }

        match self.refresh_session(&session.refresh_token).await {
            Ok(fresh) => Ok(Some(fresh)),
            Err(err) if err.requires_reauth() => {
                tracing::info!("Stored session expired, signing out locally");
                self.drop_session().await;
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    /// Sign out locally, then at the provider.
    ///
    /// The stored session is gone before the provider is contacted, so a
    /// hung or abandoned logout still signs the user out. The provider
    /// error is returned for logging.
    pub async fn sign_out(&self) -> QuireResult<()> {
        let token = self.ctx.access_token();
        self.drop_session().await;
        tracing::info!("Signed out");

        let Some(token) = token else {
            return Ok(());
        };
        let mut headers = self.anon_headers();
        headers.insert("Authorization".to_string(), format!("Bearer {}", token));
        self.post("logout", json!({}), &headers).await.map(|_| ())
    }
}
