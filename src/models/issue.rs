use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::Comment;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Issue {
    pub id: u64,
    pub testcase_title: String,
    #[serde(default)]
    pub testcase_path: String,
    pub severity: Severity,
    pub test_case_ids: Option<String>,
    pub release: Option<String>,
    pub platform: Option<String>,
    pub platform_display: Option<String>,
    pub build: Option<String>,
    pub target: Option<String>,
    #[serde(default)]
    pub description: String,
    pub additional_comments: Option<String>,
    #[serde(default)]
    pub reporter_name: String,
    pub status: IssueStatus,
    pub ccr_number: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub comment_count: u32,
    #[serde(default)]
    pub has_verified_solution: bool,
    #[serde(default)]
    pub upvotes: i64,
    #[serde(default)]
    pub downvotes: i64,
    #[serde(default)]
    pub score: i64,
    /// Only present on `GET /api/issues/{id}`.
    #[serde(default)]
    pub comments: Vec<Comment>,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
}

impl Issue {
    /// Display name with the raw platform code as fallback.
    pub fn platform_label(&self) -> Option<&str> {
        self.platform_display
            .as_deref()
            .or(self.platform.as_deref())
            .filter(|p| !p.is_empty())
    }

    pub fn is_ccr(&self) -> bool {
        self.status == IssueStatus::Ccr
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Attachment {
    pub id: u64,
    pub filename: String,
    pub file_size: Option<u64>,
    pub mime_type: Option<String>,
    pub uploaded_by: Option<String>,
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueStatus {
    Open,
    InProgress,
    Resolved,
    Closed,
    Ccr,
}

impl IssueStatus {
    pub const ALL: [IssueStatus; 5] = [
        IssueStatus::Open,
        IssueStatus::InProgress,
        IssueStatus::Resolved,
        IssueStatus::Closed,
        IssueStatus::Ccr,
    ];

    /// Wire value used in query strings and JSON bodies.
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueStatus::Open => "open",
            IssueStatus::InProgress => "in_progress",
            IssueStatus::Resolved => "resolved",
            IssueStatus::Closed => "closed",
            IssueStatus::Ccr => "ccr",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            IssueStatus::Open => "Open",
            IssueStatus::InProgress => "In Progress",
            IssueStatus::Resolved => "Resolved",
            IssueStatus::Closed => "Closed",
            IssueStatus::Ccr => "CCR",
        }
    }
}

impl fmt::Display for IssueStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IssueStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['-', ' '], "_").as_str() {
            "open" => Ok(IssueStatus::Open),
            "in_progress" => Ok(IssueStatus::InProgress),
            "resolved" => Ok(IssueStatus::Resolved),
            "closed" => Ok(IssueStatus::Closed),
            "ccr" => Ok(IssueStatus::Ccr),
            other => Err(format!(
                "Unknown status '{}'. Expected one of: open, in_progress, resolved, closed, ccr",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub const ALL: [Severity; 4] = [
        Severity::Low,
        Severity::Medium,
        Severity::High,
        Severity::Critical,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "Low",
            Severity::Medium => "Medium",
            Severity::High => "High",
            Severity::Critical => "Critical",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Severity::Low),
            "medium" => Ok(Severity::Medium),
            "high" => Ok(Severity::High),
            "critical" => Ok(Severity::Critical),
            other => Err(format!(
                "Unknown severity '{}'. Expected one of: Low, Medium, High, Critical",
                other
            )),
        }
    }
}
