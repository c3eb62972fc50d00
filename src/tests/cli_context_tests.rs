use tempfile::TempDir;

use super::fixtures::user;
use crate::cli_context::{CliContext, CliContextBuilder};
use crate::config::Config;
use crate::error::TalkError;
use crate::session::{Session, SessionStore};

fn context_with(dir: &TempDir, config: Config, session: Option<Session>) -> CliContext {
    let store = SessionStore::new(dir.path().join("session.json"));
    if let Some(session) = session {
        store.save(&session).unwrap();
    }
    CliContextBuilder::new()
        .with_config(config)
        .with_server_url("http://127.0.0.1:9")
        .with_session_store(store)
        .build()
        .unwrap()
}

#[test]
fn test_builder_uses_overrides() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config {
        debounce_ms: Some(100),
        ..Default::default()
    };
    let context = context_with(&dir, config, None);

    assert_eq!(context.server_url(), "http://127.0.0.1:9");
    assert_eq!(context.config().debounce().as_millis(), 100);
    assert_eq!(context.session(), &Session::default());
}

#[test]
fn test_default_reporter_prefers_config() {
    let dir = tempfile::tempdir().unwrap();
    let session = Session {
        cookie: Some("session=abc".to_string()),
        current_user: Some(user(1, "alice", "user")),
    };

    let context = context_with(&dir, Config::default(), Some(session.clone()));
    assert_eq!(context.default_reporter().as_deref(), Some("alice"));

    let config = Config {
        reporter_name: Some("QA Bot".to_string()),
        ..Default::default()
    };
    let context = context_with(&dir, config, Some(session));
    assert_eq!(context.default_reporter().as_deref(), Some("QA Bot"));
}

#[test]
fn test_remember_keeps_stored_cookie() {
    let dir = tempfile::tempdir().unwrap();
    let session = Session {
        cookie: Some("session=abc".to_string()),
        current_user: None,
    };
    let mut context = context_with(&dir, Config::default(), Some(session));

    context.remember(Some(user(2, "bob", "admin"))).unwrap();

    let stored = context.session_store().load();
    assert_eq!(stored.cookie.as_deref(), Some("session=abc"));
    assert!(stored.is_admin());
}

#[test]
fn test_forget_removes_session_file() {
    let dir = tempfile::tempdir().unwrap();
    let session = Session {
        cookie: Some("session=abc".to_string()),
        current_user: Some(user(1, "alice", "user")),
    };
    let mut context = context_with(&dir, Config::default(), Some(session));

    context.forget().unwrap();
    assert_eq!(context.session(), &Session::default());
    assert!(!context.session_store().path().exists());
}

#[test]
fn test_client_is_shared() {
    let dir = tempfile::tempdir().unwrap();
    let mut context = context_with(&dir, Config::default(), None);
    let first = context.client().unwrap();
    let second = context.client().unwrap();
    assert!(std::sync::Arc::ptr_eq(&first, &second));
}

#[tokio::test]
async fn test_require_user_without_cookie() {
    let dir = tempfile::tempdir().unwrap();
    let mut context = context_with(&dir, Config::default(), None);

    assert!(matches!(context.require_user().await, Err(TalkError::AuthRequired)));
    assert!(matches!(context.require_admin().await, Err(TalkError::AuthRequired)));
}
