pub mod auth;
pub mod comment;
pub mod create;

pub use auth::{LoginForm, RegisterForm};
pub use comment::{CcrForm, CommentForm};
pub use create::{extract_path_info, submit_new_issue, IssueSubmitter, NewIssueForm, PathInfo};
