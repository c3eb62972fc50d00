use reqwest::multipart::Form;
use serde_json::Value;

use crate::admin::AdminBackend;
use crate::error::TalkResult;
use crate::filtering::{ActiveFilters, OptionSource};
use crate::forms::IssueSubmitter;
use crate::models::api::{
    BulkDeleteRequest, CcrRequest, LoginRequest, MessageResponse, NewComment, RegisterRequest,
    StatusUpdate, UserUpdate,
};
use crate::models::*;
use crate::search::SearchBackend;

use super::gateway::ApiGateway;

/// Typed calls for every backend endpoint the client uses.
pub struct TalkClient {
    gateway: ApiGateway,
}

impl TalkClient {
    pub fn new(base_url: &str, cookie: Option<&str>) -> TalkResult<Self> {
        Ok(Self {
            gateway: ApiGateway::new(base_url, cookie)?,
        })
    }

    pub fn base_url(&self) -> &str {
        self.gateway.base_url().as_str()
    }

    pub fn session_cookie(&self) -> Option<String> {
        self.gateway.session_cookie()
    }

    // Auth

    pub async fn current_user(&self) -> TalkResult<User> {
        self.gateway.get("/api/auth/me").await
    }

    pub async fn login(&self, username: &str, password: &str) -> TalkResult<User> {
        self.gateway
            .post_json("/api/auth/login", &LoginRequest { username, password })
            .await
    }

    pub async fn logout(&self) -> TalkResult<()> {
        let _: MessageResponse = self.gateway.post_empty("/api/auth/logout").await?;
        Ok(())
    }

    pub async fn register(&self, username: &str, email: &str, password: &str) -> TalkResult<User> {
        self.gateway
            .post_json(
                "/api/auth/register",
                &RegisterRequest {
                    username,
                    email,
                    password,
                },
            )
            .await
    }

    // Issues

    pub async fn list_issues(&self, query: &IssueQuery) -> TalkResult<IssueList> {
        self.gateway.get_query("/api/issues", query).await
    }

    /// `POST /api/search`. The response has no paging fields.
    pub async fn search_issues(&self, filters: &ActiveFilters) -> TalkResult<IssueList> {
        self.gateway.post_json("/api/search", filters).await
    }

    /// Includes comments and attachments.
    pub async fn get_issue(&self, id: u64) -> TalkResult<Issue> {
        self.gateway.get(&format!("/api/issues/{}", id)).await
    }

    pub async fn update_issue_status(&self, id: u64, status: IssueStatus) -> TalkResult<Issue> {
        self.gateway
            .put_json(&format!("/api/issues/{}", id), &StatusUpdate { status })
            .await
    }

    pub async fn create_issue(&self, form: Form) -> TalkResult<Issue> {
        self.gateway.post_multipart("/api/issues", form).await
    }

    pub async fn vote_issue(&self, id: u64, vote: VoteKind) -> TalkResult<Issue> {
        self.gateway
            .post_empty(&format!("/api/issues/{}/{}", id, vote.endpoint()))
            .await
    }

    pub async fn move_to_ccr(&self, id: u64, ccr_number: &str) -> TalkResult<Issue> {
        self.gateway
            .post_json(
                &format!("/api/issues/{}/move-to-ccr", id),
                &CcrRequest { ccr_number },
            )
            .await
    }

    // Comments

    pub async fn get_comments(&self, issue_id: u64) -> TalkResult<Vec<Comment>> {
        self.gateway
            .get(&format!("/api/issues/{}/comments", issue_id))
            .await
    }

    pub async fn add_comment(&self, issue_id: u64, commenter_name: &str, content: &str) -> TalkResult<Comment> {
        self.gateway
            .post_json(
                &format!("/api/issues/{}/comments", issue_id),
                &NewComment {
                    commenter_name,
                    content,
                },
            )
            .await
    }

    pub async fn verify_comment(&self, comment_id: u64) -> TalkResult<Comment> {
        self.gateway
            .post_empty(&format!("/api/comments/{}/verify", comment_id))
            .await
    }

    pub async fn vote_comment(&self, comment_id: u64, vote: VoteKind) -> TalkResult<Comment> {
        self.gateway
            .post_empty(&format!("/api/comments/{}/{}", comment_id, vote.endpoint()))
            .await
    }

    // Options

    pub async fn get_builds(&self) -> TalkResult<Vec<String>> {
        self.gateway.get("/api/builds").await
    }

    pub async fn get_targets(&self, release: &str) -> TalkResult<Vec<String>> {
        self.gateway.get(&format!("/api/targets/{}", release)).await
    }

    // Admin

    pub async fn list_users(&self) -> TalkResult<Vec<User>> {
        self.gateway.get("/api/admin/users").await
    }

    pub async fn update_user(&self, id: u64, update: &UserUpdate) -> TalkResult<User> {
        self.gateway
            .put_json(&format!("/api/admin/users/{}", id), update)
            .await
    }

    pub async fn delete_issue(&self, id: u64) -> TalkResult<()> {
        let _: Value = self
            .gateway
            .delete(&format!("/api/admin/issues/{}", id))
            .await?;
        Ok(())
    }

    pub async fn admin_issue_ids(&self, query: &IssueQuery) -> TalkResult<IssueIds> {
        self.gateway.get_query("/api/admin/issues/ids", query).await
    }

    pub async fn bulk_delete_issues(&self, issue_ids: &[u64]) -> TalkResult<BulkDeleteResult> {
        self.gateway
            .post_json(
                "/api/admin/issues/bulk-delete",
                &BulkDeleteRequest { issue_ids },
            )
            .await
    }
}

impl SearchBackend for TalkClient {
    async fn search(&self, filters: ActiveFilters) -> TalkResult<Vec<Issue>> {
        Ok(self.search_issues(&filters).await?.issues)
    }
}

impl OptionSource for TalkClient {
    async fn builds(&self) -> TalkResult<Vec<String>> {
        self.get_builds().await
    }

    async fn targets(&self, release: &str) -> TalkResult<Vec<String>> {
        self.get_targets(release).await
    }
}

impl IssueSubmitter for TalkClient {
    async fn create_issue(&self, form: Form) -> TalkResult<Issue> {
        TalkClient::create_issue(self, form).await
    }
}

impl AdminBackend for TalkClient {
    async fn admin_issues(&self, query: IssueQuery) -> TalkResult<Vec<Issue>> {
        Ok(self.list_issues(&query).await?.issues)
    }

    async fn issue_ids(&self, query: IssueQuery) -> TalkResult<Vec<u64>> {
        Ok(self.admin_issue_ids(&query).await?.issue_ids)
    }

    async fn bulk_delete(&self, ids: Vec<u64>) -> TalkResult<BulkDeleteResult> {
        self.bulk_delete_issues(&ids).await
    }

    async fn delete_issue(&self, id: u64) -> TalkResult<()> {
        TalkClient::delete_issue(self, id).await
    }

    async fn set_issue_status(&self, id: u64, status: IssueStatus) -> TalkResult<Issue> {
        self.update_issue_status(id, status).await
    }

    async fn users(&self) -> TalkResult<Vec<User>> {
        self.list_users().await
    }

    async fn update_user(&self, id: u64, update: UserUpdate) -> TalkResult<User> {
        TalkClient::update_user(self, id, &update).await
    }
}
