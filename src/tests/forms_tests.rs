use std::sync::atomic::{AtomicUsize, Ordering};

use reqwest::multipart::Form;

use super::fixtures::issue;
use crate::error::{TalkError, TalkResult};
use crate::forms::{
    extract_path_info, submit_new_issue, CcrForm, CommentForm, IssueSubmitter, LoginForm,
    NewIssueForm, RegisterForm,
};
use crate::models::Issue;

#[derive(Default)]
struct CountingSubmitter {
    calls: AtomicUsize,
}

impl IssueSubmitter for CountingSubmitter {
    async fn create_issue(&self, _form: Form) -> TalkResult<Issue> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(issue(77, "created"))
    }
}

fn complete_form() -> NewIssueForm {
    NewIssueForm {
        testcase_title: "Smoke test hangs".to_string(),
        testcase_path: "/lan/fed/etpv5/release/261/lnx86/etautotest/smoke".to_string(),
        severity: "High".to_string(),
        description: "Never returns after setup".to_string(),
        reporter_name: "alice".to_string(),
        ..Default::default()
    }
}

#[test]
fn test_extract_path_info() {
    let info = extract_path_info("/lan/fed/etpv5/release/261/lnx86/etautotest/regress/case_1").unwrap();
    assert_eq!(info.area, "etpv5");
    assert_eq!(info.release, "261");
    assert_eq!(info.platform_code, "lnx86");
    assert_eq!(info.platform, "Linux");
    assert_eq!(info.summary(), "Release: 261   Platform: Linux (lnx86)");
}

#[test]
fn test_extract_path_info_unknown_platform_keeps_code() {
    let info = extract_path_info("/lan/fed/etpv/release/231/sparc/etautotest/x").unwrap();
    assert_eq!(info.platform, "sparc");
    assert_eq!(info.platform_code, "sparc");
}

#[test]
fn test_extract_path_info_rejects_other_paths() {
    assert!(extract_path_info("/home/alice/tests/smoke").is_none());
    // Unsupported release
    assert!(extract_path_info("/lan/fed/etpv/release/999/lnx86/etautotest/").is_none());
    // Missing trailing etautotest segment
    assert!(extract_path_info("/lan/fed/etpv/release/251/lnx86/").is_none());
}

#[test]
fn test_missing_fields_are_named() {
    let form = NewIssueForm {
        description: "   ".to_string(),
        ..complete_form()
    };
    assert_eq!(form.missing_fields(), vec!["description".to_string()]);

    let empty = NewIssueForm::default();
    assert_eq!(
        empty.missing_fields(),
        vec![
            "testcase title".to_string(),
            "testcase path".to_string(),
            "severity".to_string(),
            "description".to_string(),
            "reporter name".to_string(),
        ]
    );
}

#[test]
fn test_validation_message() {
    let form = NewIssueForm {
        severity: String::new(),
        reporter_name: String::new(),
        ..complete_form()
    };
    let err = form.validate().unwrap_err();
    assert_eq!(
        err.to_string(),
        "Please fill in all required fields: severity, reporter name"
    );
}

#[tokio::test]
async fn test_invalid_form_is_never_submitted() {
    let submitter = CountingSubmitter::default();
    let form = NewIssueForm {
        description: String::new(),
        ..complete_form()
    };

    let result = submit_new_issue(&submitter, &form).await;
    match result {
        Err(TalkError::Validation(fields)) => assert_eq!(fields, vec!["description".to_string()]),
        other => panic!("Expected validation error, got {:?}", other),
    }
    assert_eq!(submitter.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_valid_form_is_submitted_once() {
    let submitter = CountingSubmitter::default();
    let created = submit_new_issue(&submitter, &complete_form()).await.unwrap();
    assert_eq!(created.id, 77);
    assert_eq!(submitter.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_missing_attachment_is_reported() {
    let submitter = CountingSubmitter::default();
    let dir = tempfile::tempdir().unwrap();
    let form = NewIssueForm {
        files: vec![dir.path().join("absent.log")],
        ..complete_form()
    };

    let result = submit_new_issue(&submitter, &form).await;
    assert!(matches!(result, Err(TalkError::InvalidInput(_))));
    assert_eq!(submitter.calls.load(Ordering::SeqCst), 0);
}

#[test]
fn test_apply_path_info_resets_stale_target() {
    let mut form = NewIssueForm {
        release: "231".to_string(),
        target: "old-target".to_string(),
        ..complete_form()
    };
    let info = form.apply_path_info().unwrap();
    assert_eq!(info.release, "261");
    assert_eq!(form.release, "261");
    assert_eq!(form.platform, "lnx86");
    assert!(form.target.is_empty());

    let mut same_release = NewIssueForm {
        release: "261".to_string(),
        target: "kept".to_string(),
        ..complete_form()
    };
    same_release.apply_path_info();
    assert_eq!(same_release.target, "kept");
}

#[test]
fn test_text_fields_skip_blanks_and_normalize_tags() {
    let form = NewIssueForm {
        tags: " smoke, ,nightly ".to_string(),
        ..complete_form()
    };
    assert_eq!(form.tag_list(), vec!["smoke".to_string(), "nightly".to_string()]);

    let fields = form.text_fields();
    let keys: Vec<&str> = fields.iter().map(|(k, _)| *k).collect();
    assert!(!keys.contains(&"build"));
    assert!(!keys.contains(&"target"));
    assert!(fields.contains(&("tags", "smoke,nightly".to_string())));
    assert!(fields.contains(&("severity", "High".to_string())));
}

#[test]
fn test_comment_form_validation_order() {
    let err = CommentForm::new("", "").validate().unwrap_err();
    assert_eq!(err.to_string(), "Invalid input: Please enter your name");

    let err = CommentForm::new("bob", "  ").validate().unwrap_err();
    assert_eq!(err.to_string(), "Invalid input: Please enter a comment");

    assert!(CommentForm::new("bob", "Fixed by rebasing").validate().is_ok());
}

#[test]
fn test_ccr_form_requires_number() {
    assert!(CcrForm::default().validate().is_err());
    let form = CcrForm {
        ccr_number: "CCR-1234".to_string(),
    };
    assert!(form.validate().is_ok());
}

#[test]
fn test_register_form_validation() {
    let mut form = RegisterForm {
        username: "carol".to_string(),
        email: "carol@example.com".to_string(),
        password: "secret1".to_string(),
        confirm_password: "secret2".to_string(),
    };
    assert!(form.validate().unwrap_err().to_string().contains("Passwords do not match"));

    form.password = "abc".to_string();
    form.confirm_password = "abc".to_string();
    assert!(form
        .validate()
        .unwrap_err()
        .to_string()
        .contains("at least 6 characters"));

    form.password = "abcdef".to_string();
    form.confirm_password = "abcdef".to_string();
    assert!(form.validate().is_ok());

    form.email.clear();
    assert!(form
        .validate()
        .unwrap_err()
        .to_string()
        .contains("Username, email, and password required"));
}

#[test]
fn test_login_form_requires_both_fields() {
    let form = LoginForm {
        username: "alice".to_string(),
        password: String::new(),
    };
    assert!(form.validate().is_err());
}
