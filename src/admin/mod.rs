//! Administrator workflows: user management and issue lifecycle.
//!
//! Every mutation reloads the table it affects instead of patching rows
//! locally.

use std::future::Future;

use crate::constants::ADMIN_ISSUES_PER_PAGE;
use crate::error::{TalkError, TalkResult};
use crate::logging::{log_error, log_info};
use crate::models::api::UserUpdate;
use crate::models::{BulkDeleteResult, Issue, IssueQuery, IssueStatus, Severity, User};

pub trait AdminBackend {
    fn admin_issues(&self, query: IssueQuery) -> impl Future<Output = TalkResult<Vec<Issue>>> + Send;
    fn issue_ids(&self, query: IssueQuery) -> impl Future<Output = TalkResult<Vec<u64>>> + Send;
    fn bulk_delete(&self, ids: Vec<u64>) -> impl Future<Output = TalkResult<BulkDeleteResult>> + Send;
    fn delete_issue(&self, id: u64) -> impl Future<Output = TalkResult<()>> + Send;
    fn set_issue_status(&self, id: u64, status: IssueStatus) -> impl Future<Output = TalkResult<Issue>> + Send;
    fn users(&self) -> impl Future<Output = TalkResult<Vec<User>>> + Send;
    fn update_user(&self, id: u64, update: UserUpdate) -> impl Future<Output = TalkResult<User>> + Send;
}

/// The admin issue table and the filters it was loaded with.
#[derive(Debug, Clone, Default)]
pub struct AdminIssuesView {
    pub status: Option<IssueStatus>,
    pub severity: Option<Severity>,
    pub issues: Vec<Issue>,
}

impl AdminIssuesView {
    pub fn new(status: Option<IssueStatus>, severity: Option<Severity>) -> Self {
        Self {
            status,
            severity,
            issues: Vec::new(),
        }
    }

    pub fn query(&self) -> IssueQuery {
        IssueQuery {
            per_page: Some(ADMIN_ISSUES_PER_PAGE),
            status: self.status,
            severity: self.severity,
        }
    }

    /// Replaces the rows; on failure the previous rows stay.
    pub async fn reload<B: AdminBackend>(&mut self, backend: &B) -> TalkResult<()> {
        let issues = backend.admin_issues(self.query()).await?;
        self.issues = issues;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BulkDeleteOutcome {
    /// Confirmation declined; nothing was requested.
    Cancelled,
    NothingToDelete,
    Deleted(u64),
}

impl BulkDeleteOutcome {
    pub fn message(&self) -> String {
        match self {
            BulkDeleteOutcome::Cancelled => "Bulk delete cancelled".to_string(),
            BulkDeleteOutcome::NothingToDelete => {
                "No issues found matching the selected filters".to_string()
            }
            BulkDeleteOutcome::Deleted(count) => format!("Successfully deleted {} issues", count),
        }
    }
}

/// Deletes every issue matching `status`/`severity`.
///
/// Issue ids are resolved first, then removed in one request. The table is
/// reloaded exactly once after a successful delete and left untouched when
/// anything fails.
pub async fn bulk_delete<B: AdminBackend>(
    backend: &B,
    view: &mut AdminIssuesView,
    status: Option<IssueStatus>,
    severity: Option<Severity>,
    confirmed: bool,
) -> TalkResult<BulkDeleteOutcome> {
    if !confirmed {
        return Ok(BulkDeleteOutcome::Cancelled);
    }

    let query = IssueQuery {
        per_page: None,
        status,
        severity,
    };
    let ids = backend.issue_ids(query).await.map_err(|e| {
        log_error(&format!("Failed to get issue IDs: {}", e));
        e
    })?;

    if ids.is_empty() {
        return Ok(BulkDeleteOutcome::NothingToDelete);
    }

    let result = backend.bulk_delete(ids).await.map_err(|e| {
        log_error(&format!("Bulk delete failed: {}", e));
        e
    })?;
    log_info(&format!("Bulk deleted {} issues", result.deleted_count));

    if let Err(e) = view.reload(backend).await {
        log_error(&format!("Reload after bulk delete failed: {}", e));
    }

    Ok(BulkDeleteOutcome::Deleted(result.deleted_count))
}

/// Deletes one issue. Returns `false` without a request when not confirmed.
pub async fn delete_issue<B: AdminBackend>(
    backend: &B,
    view: &mut AdminIssuesView,
    id: u64,
    confirmed: bool,
) -> TalkResult<bool> {
    if !confirmed {
        return Ok(false);
    }
    backend.delete_issue(id).await?;
    log_info(&format!("Deleted issue #{}", id));
    view.reload(backend).await?;
    Ok(true)
}

pub async fn change_issue_status<B: AdminBackend>(
    backend: &B,
    view: &mut AdminIssuesView,
    id: u64,
    status: IssueStatus,
) -> TalkResult<()> {
    backend.set_issue_status(id, status).await?;
    view.reload(backend).await
}

/// Administrator accounts are read-only in the user table.
pub fn ensure_user_editable(user: &User) -> TalkResult<()> {
    if user.is_admin() {
        return Err(TalkError::AccessDenied(format!(
            "User '{}' is an administrator and cannot be modified",
            user.username
        )));
    }
    Ok(())
}

/// Applies `update` to user `id` after checking the account is editable.
pub async fn update_user<B: AdminBackend>(backend: &B, id: u64, update: UserUpdate) -> TalkResult<User> {
    let users = backend.users().await?;
    let user = users
        .iter()
        .find(|u| u.id == id)
        .ok_or_else(|| TalkError::InvalidInput(format!("User {} not found", id)))?;
    ensure_user_editable(user)?;

    let updated = backend.update_user(id, update).await?;
    log_info(&format!("Updated user {}", updated.username));
    Ok(updated)
}
