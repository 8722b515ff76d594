//! Session persistence trait abstraction.

use async_trait::async_trait;

use crate::auth::Session;

/// Session storage errors.
#[derive(Debug, Clone)]
pub enum SessionStoreError {
    /// Failed to save the session
    SaveFailed(String),
    /// Failed to clear the session
    ClearFailed(String),
    /// Stored data could not be read back
    Serialization(String),
}

impl std::fmt::Display for SessionStoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionStoreError::SaveFailed(msg) => write!(f, "Failed to save session: {}", msg),
            SessionStoreError::ClearFailed(msg) => write!(f, "Failed to clear session: {}", msg),
            SessionStoreError::Serialization(msg) => {
                write!(f, "Session serialization error: {}", msg)
            }
        }
    }
}

impl std::error::Error for SessionStoreError {}

/// Where the signed-in session survives between runs.
///
/// `load` returns `Ok(None)` when nothing is stored; a corrupt file is
/// treated the same way by the file implementation.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn load(&self) -> Result<Option<Session>, SessionStoreError>;

    async fn save(&self, session: &Session) -> Result<(), SessionStoreError>;

    /// Remove any stored session. Succeeds when nothing was stored.
    async fn clear(&self) -> Result<(), SessionStoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_store_error_display() {
        assert_eq!(
            SessionStoreError::SaveFailed("disk full".to_string()).to_string(),
            "Failed to save session: disk full"
        );
        assert!(SessionStoreError::ClearFailed("busy".to_string())
            .to_string()
            .contains("busy"));
    }
}
