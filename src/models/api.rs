use serde::{Deserialize, Serialize};

use super::{Issue, IssueStatus, Role};

// Response envelopes

#[derive(Debug, Deserialize)]
pub struct IssueList {
    #[serde(default)]
    pub issues: Vec<Issue>,
    #[serde(default)]
    pub total: u64,
    pub pages: Option<u32>,
    pub current_page: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct IssueIds {
    #[serde(default)]
    pub issue_ids: Vec<u64>,
    #[serde(default)]
    pub total: u64,
}

#[derive(Debug, Deserialize)]
pub struct BulkDeleteResult {
    pub message: Option<String>,
    pub deleted_count: u64,
}

#[derive(Debug, Deserialize)]
pub struct MessageResponse {
    pub message: Option<String>,
}

// Request bodies

#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Serialize)]
pub struct RegisterRequest<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Default, Serialize)]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct StatusUpdate {
    pub status: IssueStatus,
}

#[derive(Debug, Serialize)]
pub struct NewComment<'a> {
    pub commenter_name: &'a str,
    pub content: &'a str,
}

#[derive(Debug, Serialize)]
pub struct CcrRequest<'a> {
    pub ccr_number: &'a str,
}

#[derive(Debug, Serialize)]
pub struct BulkDeleteRequest<'a> {
    pub issue_ids: &'a [u64],
}

/// Query string of `GET /api/issues` and `GET /api/admin/issues/ids`.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct IssueQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<IssueStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<super::Severity>,
}
