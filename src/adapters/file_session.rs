//! File-based session store adapter.

use async_trait::async_trait;

use crate::auth::{Session, SessionManager};
use crate::traits::{SessionStore, SessionStoreError};

/// Session store backed by [`SessionManager`].
///
/// Sessions are stored in `~/.quire/session.json` unless another path is
/// configured.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    manager: SessionManager,
}

impl FileSessionStore {
    pub fn new(manager: SessionManager) -> Self {
        Self { manager }
    }

    pub fn session_path(&self) -> &std::path::Path {
        self.manager.session_path()
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn load(&self) -> Result<Option<Session>, SessionStoreError> {
        let manager = self.manager.clone();
        tokio::task::spawn_blocking(move || manager.load())
            .await
            .map_err(|e| SessionStoreError::Serialization(e.to_string()))
    }

    async fn save(&self, session: &Session) -> Result<(), SessionStoreError> {
        let manager = self.manager.clone();
        let session = session.clone();
        tokio::task::spawn_blocking(move || manager.save(&session))
            .await
            .map_err(|e| SessionStoreError::SaveFailed(e.to_string()))?
            .map_err(|e| SessionStoreError::SaveFailed(e.to_string()))
    }

    async fn clear(&self) -> Result<(), SessionStoreError> {
        let manager = self.manager.clone();
        tokio::task::spawn_blocking(move || manager.clear())
            .await
            .map_err(|e| SessionStoreError::ClearFailed(e.to_string()))?
            .map_err(|e| SessionStoreError::ClearFailed(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::AuthUser;
    use tempfile::TempDir;

    fn session() -> Session {
        Session {
            access_token: "a".to_string(),
            refresh_token: "r".to_string(),
            expires_at: Some(1),
            expires_in: None,
            user: AuthUser {
                id: "u1".to_string(),
                ..AuthUser::default()
            },
        }
    }

    #[tokio::test]
    async fn test_round_trip_through_file() {
        let dir = TempDir::new().unwrap();
        let store = FileSessionStore::new(SessionManager::with_path(dir.path().join("s.json")));

        assert!(store.load().await.unwrap().is_none());
        store.save(&session()).await.unwrap();
        assert_eq!(store.load().await.unwrap(), Some(session()));

        store.clear().await.unwrap();
        assert!(!store.session_path().exists());
    }
}
