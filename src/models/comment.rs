use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Comment {
    pub id: u64,
    pub issue_id: Option<u64>,
    pub commenter_name: String,
    pub content: String,
    #[serde(default)]
    pub is_verified_solution: bool,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    #[serde(default)]
    pub upvotes: i64,
    #[serde(default)]
    pub downvotes: i64,
    #[serde(default)]
    pub score: i64,
    /// How the current viewer voted, when the backend reports it.
    #[serde(default)]
    pub user_vote: Option<VoteKind>,
}

impl Comment {
    pub fn net_score(&self) -> i64 {
        self.upvotes - self.downvotes
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteKind {
    Upvote,
    Downvote,
}

impl VoteKind {
    /// Path segment of the vote endpoints.
    pub fn endpoint(&self) -> &'static str {
        match self {
            VoteKind::Upvote => "upvote",
            VoteKind::Downvote => "downvote",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "up" | "upvote" | "+" => Some(VoteKind::Upvote),
            "down" | "downvote" | "-" => Some(VoteKind::Downvote),
            _ => None,
        }
    }
}
