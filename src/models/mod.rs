pub mod api;
pub mod comment;
pub mod issue;
pub mod user;

// Re-export commonly used types
pub use api::{BulkDeleteResult, IssueIds, IssueList, IssueQuery};
pub use comment::{Comment, VoteKind};
pub use issue::{Attachment, Issue, IssueStatus, Severity};
pub use user::{Role, User};
