//! Session persistence on disk.

mod common;

use common::test_session;
use quire::adapters::FileSessionStore;
use quire::auth::SessionManager;
use quire::traits::SessionStore;
use std::fs;
use tempfile::TempDir;

fn manager_in(dir: &TempDir) -> SessionManager {
    SessionManager::with_path(dir.path().join("nested").join("session.json"))
}

#[test]
fn test_save_creates_parent_and_round_trips() {
    let dir = TempDir::new().unwrap();
    let manager = manager_in(&dir);
    let session = test_session("u1");

    manager.save(&session).unwrap();

    assert!(manager.session_path().exists());
    assert_eq!(manager.load(), Some(session));
}

#[test]
fn test_corrupt_file_loads_as_signed_out() {
    let dir = TempDir::new().unwrap();
    let manager = manager_in(&dir);
    fs::create_dir_all(manager.session_path().parent().unwrap()).unwrap();
    fs::write(manager.session_path(), "{ definitely not a session").unwrap();

    assert!(manager.load().is_none());
}

#[test]
fn test_clear_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let manager = manager_in(&dir);
    manager.save(&test_session("u1")).unwrap();

    manager.clear().unwrap();
    manager.clear().unwrap();

    assert!(!manager.session_path().exists());
    assert!(manager.load().is_none());
}

#[tokio::test]
async fn test_file_store_through_trait() {
    let dir = TempDir::new().unwrap();
    let store = FileSessionStore::new(manager_in(&dir));

    assert!(store.load().await.unwrap().is_none());

    store.save(&test_session("u2")).await.unwrap();
    let loaded = store.load().await.unwrap().unwrap();
    assert_eq!(loaded.user_id(), "u2");

    store.clear().await.unwrap();
    assert!(store.load().await.unwrap().is_none());
    assert!(!store.session_path().exists());
}
