//! In-memory session store for testing.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::auth::Session;
use crate::traits::{SessionStore, SessionStoreError};

/// Session store that keeps the session in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemorySessionStore {
    session: Arc<Mutex<Option<Session>>>,
    save_should_fail: Arc<Mutex<bool>>,
    clear_count: Arc<Mutex<usize>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds `session`.
    pub fn with_session(session: Session) -> Self {
        let store = Self::default();
        *store.session.lock().unwrap() = Some(session);
        store
    }

    pub fn set_save_should_fail(&self, should_fail: bool) {
        *self.save_should_fail.lock().unwrap() = should_fail;
    }

    /// Current contents, without going through the trait.
    pub fn stored(&self) -> Option<Session> {
        self.session.lock().unwrap().clone()
    }

    /// How many times `clear` has been called.
    pub fn clear_count(&self) -> usize {
        *self.clear_count.lock().unwrap()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn load(&self) -> Result<Option<Session>, SessionStoreError> {
        Ok(self.session.lock().unwrap().clone())
    }

    async fn save(&self, session: &Session) -> Result<(), SessionStoreError> {
        if *self.save_should_fail.lock().unwrap() {
            return Err(SessionStoreError::SaveFailed("mock save failure".to_string()));
        }
        *self.session.lock().unwrap() = Some(session.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<(), SessionStoreError> {
        *self.clear_count.lock().unwrap() += 1;
        *self.session.lock().unwrap() = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_save_failure_leaves_store_empty() {
        let store = InMemorySessionStore::new();
        store.set_save_should_fail(true);
        assert!(store.save(&Session::default()).await.is_err());
        assert!(store.stored().is_none());
    }

    #[tokio::test]
    async fn test_clear_counts() {
        let store = InMemorySessionStore::with_session(Session::default());
        store.clear().await.unwrap();
        assert!(store.load().await.unwrap().is_none());
        assert_eq!(store.clear_count(), 1);
    }
}
