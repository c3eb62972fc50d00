use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use super::fixtures::{issue, user};
use crate::admin::{
    self, bulk_delete, ensure_user_editable, AdminBackend, AdminIssuesView, BulkDeleteOutcome,
};
use crate::constants::ADMIN_ISSUES_PER_PAGE;
use crate::error::{TalkError, TalkResult};
use crate::models::api::UserUpdate;
use crate::models::{BulkDeleteResult, Issue, IssueQuery, IssueStatus, Role, Severity, User};

/// Admin backend with canned answers that counts every request.
#[derive(Default)]
struct FakeAdmin {
    ids: Vec<u64>,
    fail_bulk_delete: bool,
    deleted_count: u64,
    rows: Vec<Issue>,
    users: Vec<User>,
    id_queries: Mutex<Vec<IssueQuery>>,
    list_queries: Mutex<Vec<IssueQuery>>,
    bulk_calls: AtomicUsize,
    update_calls: AtomicUsize,
}

impl FakeAdmin {
    fn list_calls(&self) -> usize {
        self.list_queries.lock().unwrap().len()
    }
}

impl AdminBackend for FakeAdmin {
    async fn admin_issues(&self, query: IssueQuery) -> TalkResult<Vec<Issue>> {
        self.list_queries.lock().unwrap().push(query);
        Ok(self.rows.clone())
    }

    async fn issue_ids(&self, query: IssueQuery) -> TalkResult<Vec<u64>> {
        self.id_queries.lock().unwrap().push(query);
        Ok(self.ids.clone())
    }

    async fn bulk_delete(&self, ids: Vec<u64>) -> TalkResult<BulkDeleteResult> {
        self.bulk_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_bulk_delete {
            return Err(TalkError::request_failed(Some(500), "database is locked"));
        }
        Ok(BulkDeleteResult {
            message: Some(format!("Successfully deleted {} issues", ids.len())),
            deleted_count: self.deleted_count,
        })
    }

    async fn delete_issue(&self, _id: u64) -> TalkResult<()> {
        Ok(())
    }

    async fn set_issue_status(&self, id: u64, _status: IssueStatus) -> TalkResult<Issue> {
        Ok(issue(id, "updated"))
    }

    async fn users(&self) -> TalkResult<Vec<User>> {
        Ok(self.users.clone())
    }

    async fn update_user(&self, id: u64, update: UserUpdate) -> TalkResult<User> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);
        let mut user = self
            .users
            .iter()
            .find(|u| u.id == id)
            .cloned()
            .ok_or_else(|| TalkError::request_failed(Some(404), "User not found"))?;
        if let Some(role) = update.role {
            user.role = role;
        }
        if let Some(active) = update.is_active {
            user.is_active = active;
        }
        Ok(user)
    }
}

#[test]
fn test_admin_query_uses_page_size() {
    let view = AdminIssuesView::new(Some(IssueStatus::Open), None);
    let query = view.query();
    assert_eq!(query.per_page, Some(ADMIN_ISSUES_PER_PAGE));
    assert_eq!(query.status, Some(IssueStatus::Open));
    assert_eq!(query.severity, None);
}

#[tokio::test]
async fn test_bulk_delete_reloads_once() {
    let backend = FakeAdmin {
        ids: vec![4, 5, 6],
        deleted_count: 3,
        rows: vec![issue(1, "survivor")],
        ..Default::default()
    };
    let mut view = AdminIssuesView::new(Some(IssueStatus::Closed), Some(Severity::Low));

    let outcome = bulk_delete(&backend, &mut view, Some(IssueStatus::Closed), Some(Severity::Low), true)
        .await
        .unwrap();

    assert_eq!(outcome, BulkDeleteOutcome::Deleted(3));
    assert_eq!(outcome.message(), "Successfully deleted 3 issues");
    assert_eq!(backend.bulk_calls.load(Ordering::SeqCst), 1);
    assert_eq!(backend.list_calls(), 1);
    assert_eq!(view.issues.len(), 1);

    // Ids are resolved with the same filters and no page limit
    let id_queries = backend.id_queries.lock().unwrap();
    assert_eq!(id_queries[0].status, Some(IssueStatus::Closed));
    assert_eq!(id_queries[0].severity, Some(Severity::Low));
    assert_eq!(id_queries[0].per_page, None);
}

#[tokio::test]
async fn test_failed_bulk_delete_leaves_view_unchanged() {
    let backend = FakeAdmin {
        ids: vec![1, 2],
        fail_bulk_delete: true,
        ..Default::default()
    };
    let mut view = AdminIssuesView::default();
    view.issues = vec![issue(1, "one"), issue(2, "two")];

    let result = bulk_delete(&backend, &mut view, None, None, true).await;

    match result {
        Err(TalkError::RequestFailed { status, message }) => {
            assert_eq!(status, Some(500));
            assert_eq!(message, "database is locked");
        }
        other => panic!("Expected request failure, got {:?}", other),
    }
    assert_eq!(view.issues.len(), 2);
    assert_eq!(backend.list_calls(), 0);
}

#[tokio::test]
async fn test_unconfirmed_bulk_delete_sends_nothing() {
    let backend = FakeAdmin {
        ids: vec![1],
        ..Default::default()
    };
    let mut view = AdminIssuesView::default();

    let outcome = bulk_delete(&backend, &mut view, None, None, false).await.unwrap();
    assert_eq!(outcome, BulkDeleteOutcome::Cancelled);
    assert!(backend.id_queries.lock().unwrap().is_empty());
    assert_eq!(backend.bulk_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_bulk_delete_with_no_matches() {
    let backend = FakeAdmin::default();
    let mut view = AdminIssuesView::default();

    let outcome = bulk_delete(&backend, &mut view, Some(IssueStatus::Ccr), None, true)
        .await
        .unwrap();
    assert_eq!(outcome, BulkDeleteOutcome::NothingToDelete);
    assert_eq!(backend.bulk_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_delete_issue_requires_confirmation() {
    let backend = FakeAdmin::default();
    let mut view = AdminIssuesView::default();

    assert!(!admin::delete_issue(&backend, &mut view, 9, false).await.unwrap());
    assert_eq!(backend.list_calls(), 0);

    assert!(admin::delete_issue(&backend, &mut view, 9, true).await.unwrap());
    assert_eq!(backend.list_calls(), 1);
}

#[test]
fn test_admin_accounts_are_not_editable() {
    assert!(matches!(
        ensure_user_editable(&user(1, "root", "admin")),
        Err(TalkError::AccessDenied(_))
    ));
    assert!(ensure_user_editable(&user(2, "tester", "user")).is_ok());
}

#[tokio::test]
async fn test_update_user_skips_admins() {
    let backend = FakeAdmin {
        users: vec![user(1, "root", "admin"), user(2, "tester", "user")],
        ..Default::default()
    };

    let promote = || UserUpdate {
        role: Some(Role::Admin),
        ..Default::default()
    };
    let updated = admin::update_user(&backend, 2, promote()).await.unwrap();
    assert_eq!(updated.role, Role::Admin);

    let result = admin::update_user(&backend, 1, promote()).await;
    assert!(result.unwrap_err().is_forbidden());
    assert_eq!(backend.update_calls.load(Ordering::SeqCst), 1);
}
