use std::fs;

use super::fixtures::user;
use crate::session::{Session, SessionStore};

#[test]
fn test_missing_session_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let store = SessionStore::new(dir.path().join("session.json"));
    assert_eq!(store.load(), Session::default());
}

#[test]
fn test_session_round_trips_through_file() {
    let dir = tempfile::tempdir().unwrap();
    let store = SessionStore::new(dir.path().join("session.json"));
    let session = Session {
        cookie: Some("session=abc123".to_string()),
        current_user: Some(user(3, "alice", "admin")),
    };

    store.save(&session).unwrap();
    let loaded = store.load();
    assert_eq!(loaded, session);
    assert!(loaded.is_admin());
}

#[test]
fn test_corrupt_session_is_ignored() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");
    fs::write(&path, "{ not json").unwrap();

    let store = SessionStore::new(&path);
    assert_eq!(store.load(), Session::default());
}

#[test]
fn test_update_user_keeps_cookie() {
    let dir = tempfile::tempdir().unwrap();
    let store = SessionStore::new(dir.path().join("session.json"));
    store
        .save(&Session {
            cookie: Some("session=abc".to_string()),
            current_user: None,
        })
        .unwrap();

    store.update_user(Some(user(1, "bob", "user"))).unwrap();
    let loaded = store.load();
    assert_eq!(loaded.cookie.as_deref(), Some("session=abc"));
    assert!(!loaded.is_admin());
    assert_eq!(loaded.current_user.map(|u| u.username), Some("bob".to_string()));
}

#[test]
fn test_clear_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let store = SessionStore::new(dir.path().join("session.json"));
    store.save(&Session::default()).unwrap();

    store.clear().unwrap();
    assert!(!store.path().exists());
    store.clear().unwrap();
}
