use serde_json::json;

use crate::models::{Comment, Issue, User};

pub fn issue(id: u64, title: &str) -> Issue {
    serde_json::from_value(json!({
        "id": id,
        "testcase_title": title,
        "testcase_path": "/lan/fed/etpv/release/251/lnx86/etautotest/smoke",
        "severity": "Medium",
        "status": "open",
        "reporter_name": "alice",
        "description": "Crashes on start",
    }))
    .unwrap()
}

pub fn issue_with(id: u64, overrides: serde_json::Value) -> Issue {
    let mut base = serde_json::to_value(issue(id, "Fixture")).unwrap();
    if let (Some(base), Some(extra)) = (base.as_object_mut(), overrides.as_object()) {
        for (key, value) in extra {
            base.insert(key.clone(), value.clone());
        }
    }
    serde_json::from_value(base).unwrap()
}

pub fn user(id: u64, username: &str, role: &str) -> User {
    serde_json::from_value(json!({
        "id": id,
        "username": username,
        "email": format!("{}@example.com", username),
        "role": role,
    }))
    .unwrap()
}

pub fn comment(id: u64, content: &str) -> Comment {
    serde_json::from_value(json!({
        "id": id,
        "issue_id": 1,
        "commenter_name": "bob",
        "content": content,
    }))
    .unwrap()
}
