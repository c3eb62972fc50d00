use crate::error::{ErrorContext, TalkError};
use crate::talk_error;

#[test]
fn test_error_context_on_result() {
    let result: Result<i32, std::io::Error> = Err(std::io::Error::new(
        std::io::ErrorKind::NotFound,
        "file not found",
    ));

    match result.context("Failed to read session file") {
        Err(TalkError::Unknown(msg)) => {
            assert!(msg.contains("Failed to read session file"));
            assert!(msg.contains("file not found"));
        }
        _ => panic!("Expected TalkError::Unknown"),
    }
}

#[test]
fn test_error_context_on_option() {
    let option: Option<String> = None;
    match option.context("Server URL not set") {
        Err(TalkError::Unknown(msg)) => assert_eq!(msg, "Server URL not set"),
        _ => panic!("Expected TalkError::Unknown"),
    }
}

#[test]
fn test_error_context_with_closure() {
    let result: Result<i32, std::io::Error> = Err(std::io::Error::new(
        std::io::ErrorKind::PermissionDenied,
        "access denied",
    ));

    let talk_result = result.with_context(|| format!("Failed to open {}", "/tmp/upload.log"));
    match talk_result {
        Err(TalkError::Unknown(msg)) => {
            assert!(msg.contains("/tmp/upload.log"));
            assert!(msg.contains("access denied"));
        }
        _ => panic!("Expected TalkError::Unknown"),
    }
}

#[test]
fn test_talk_error_macro() {
    let error = talk_error!(InvalidInput, "Invalid status: {}", "pending");
    match error {
        TalkError::InvalidInput(msg) => assert_eq!(msg, "Invalid status: pending"),
        _ => panic!("Expected TalkError::InvalidInput"),
    }
}

#[test]
fn test_validation_message_lists_fields() {
    let error = TalkError::Validation(vec!["description".to_string(), "reporter name".to_string()]);
    assert_eq!(
        error.to_string(),
        "Please fill in all required fields: description, reporter name"
    );
}

#[test]
fn test_status_classification() {
    let unauthorized = TalkError::request_failed(Some(401), "Authentication required");
    assert!(unauthorized.is_unauthorized());
    assert!(!unauthorized.is_forbidden());

    let forbidden = TalkError::request_failed(Some(403), "Admin access required");
    assert!(forbidden.is_forbidden());

    let missing = TalkError::request_failed(Some(404), "Issue not found");
    assert!(missing.is_not_found());
    assert_eq!(missing.status(), Some(404));

    // Transport failures carry no status
    let offline = TalkError::request_failed(None, "connection refused");
    assert_eq!(offline.status(), None);
    assert!(!offline.is_unauthorized());

    assert!(TalkError::AuthRequired.is_unauthorized());
}
