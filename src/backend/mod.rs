//! Typed access to the hosted backend.
//!
//! - [`rest`]: query builder and request plumbing for the data API
//! - [`store`]: the blog's tables (`posts`, `users`, `comments`)
//! - [`auth`]: password, sign-up and magic-link sign-in, sessions
//! - [`functions`]: the privileged remote function
//!
//! All three clients share one [`ApiContext`], so a sign-in through the auth
//! client is seen by the data clients on their next request.

pub mod auth;
pub mod functions;
pub mod rest;
pub mod store;

use std::sync::Arc;

use tokio::sync::watch;

pub use auth::AuthClient;
pub use functions::FunctionsClient;
pub use rest::{Query, RestClient};
pub use store::BlogStore;

use crate::auth::Session;
use crate::config::BackendConfig;
use crate::error::{classify_http_error, QuireError};
use crate::traits::{Headers, HttpClient, HttpError, SessionStore};

/// Connection state shared by every backend client.
#[derive(Clone)]
pub struct ApiContext {
    http: Arc<dyn HttpClient>,
    config: BackendConfig,
    session: watch::Receiver<Option<Session>>,
}

impl ApiContext {
    pub fn new(
        http: Arc<dyn HttpClient>,
        config: BackendConfig,
        session: watch::Receiver<Option<Session>>,
    ) -> Self {
        Self {
            http,
            config,
            session,
        }
    }

    pub fn http(&self) -> &dyn HttpClient {
        self.http.as_ref()
    }

    pub fn config(&self) -> &BackendConfig {
        &self.config
    }

    /// Access token of the signed-in user, if any.
    pub fn access_token(&self) -> Option<String> {
        self.session
            .borrow()
            .as_ref()
            .map(|s| s.access_token.clone())
    }

    /// `apikey`, `Authorization` and JSON content type.
    ///
    /// Anonymous requests authorize with the anon key itself.
    pub fn headers(&self) -> Headers {
        let bearer = self
            .access_token()
            .unwrap_or_else(|| self.config.anon_key.clone());
        let mut headers = Headers::new();
        headers.insert("apikey".to_string(), self.config.anon_key.clone());
        headers.insert("Authorization".to_string(), format!("Bearer {}", bearer));
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        headers
    }
}

/// Map a transport failure for `url` into the crate error.
pub(crate) fn transport_error(err: HttpError, url: &str) -> QuireError {
    tracing::warn!(url, "Request failed: {}", err);
    classify_http_error(err, url).into()
}

/// The three backend clients wired to one session.
#[derive(Clone)]
pub struct Backend {
    pub auth: AuthClient,
    pub store: BlogStore,
    pub functions: FunctionsClient,
}

impl Backend {
    pub fn new(
        config: BackendConfig,
        http: Arc<dyn HttpClient>,
        sessions: Arc<dyn SessionStore>,
    ) -> Self {
        let (session_tx, session_rx) = watch::channel(None);
        let ctx = ApiContext::new(http, config, session_rx);
        Self {
            auth: AuthClient::new(ctx.clone(), session_tx, sessions),
            store: BlogStore::new(RestClient::new(ctx.clone())),
            functions: FunctionsClient::new(ctx),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MockHttpClient;
    use crate::auth::AuthUser;

    #[test]
    fn test_headers_use_anon_key_without_session() {
        let (_tx, rx) = watch::channel(None);
        let ctx = ApiContext::new(
            Arc::new(MockHttpClient::new()),
            BackendConfig::new("https://x.supabase.co", "anon"),
            rx,
        );
        let headers = ctx.headers();
        assert_eq!(headers.get("apikey").map(String::as_str), Some("anon"));
        assert_eq!(
            headers.get("Authorization").map(String::as_str),
            Some("Bearer anon")
        );
    }

    #[test]
    fn test_headers_follow_session_changes() {
        let (tx, rx) = watch::channel(None);
        let ctx = ApiContext::new(
            Arc::new(MockHttpClient::new()),
            BackendConfig::new("https://x.supabase.co", "anon"),
            rx,
        );

        tx.send_replace(Some(Session {
            access_token: "user-jwt".to_string(),
            refresh_token: "r".to_string(),
            expires_at: None,
            expires_in: None,
            user: AuthUser::default(),
        }));

        assert_eq!(
            ctx.headers().get("Authorization").map(String::as_str),
            Some("Bearer user-jwt")
        );
        assert_eq!(ctx.headers().get("apikey").map(String::as_str), Some("anon"));
    }
}
