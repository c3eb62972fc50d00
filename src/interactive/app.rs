use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::client::TalkClient;
use crate::error::{TalkError, TalkResult};
use crate::filtering::{load_builds, load_targets, FilterField, QuickFilter};
use crate::forms::{extract_path_info, submit_new_issue, CcrForm, CommentForm, NewIssueForm};
use crate::logging::{log_debug, log_error, log_info};
use crate::models::{Comment, Issue, User, VoteKind};
use crate::routing::Route;
use crate::search::{SearchDispatcher, SearchOutcome};
use crate::view::{RouteEffect, ViewState};

pub const NOTIFICATION_TTL: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NotificationKind {
    Success,
    Error,
    Loading,
    Info,
}

#[derive(Debug, Clone)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
    pub created_at: Instant,
    pub dismissed: bool,
}

impl Notification {
    pub fn is_expired(&self) -> bool {
        matches!(self.kind, NotificationKind::Success | NotificationKind::Info)
            && self.created_at.elapsed() >= NOTIFICATION_TTL
    }
}

/// Which part of the list screen receives keys.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Focus {
    List,
    Filters,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfirmAction {
    DeleteIssue(u64),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FormKind {
    Comment(u64),
    Ccr(u64),
    CreateIssue,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormField {
    pub key: &'static str,
    pub label: &'static str,
    pub value: String,
    pub required: bool,
}

impl FormField {
    fn new(key: &'static str, label: &'static str, required: bool) -> Self {
        Self {
            key,
            label,
            value: String::new(),
            required,
        }
    }

    fn with_value(mut self, value: Option<String>) -> Self {
        self.value = value.unwrap_or_default();
        self
    }
}

/// Text fields of an open form popup.
#[derive(Debug, Clone, PartialEq)]
pub struct FormState {
    pub kind: FormKind,
    pub fields: Vec<FormField>,
    pub active: usize,
    pub error: Option<String>,
}

impl FormState {
    pub fn comment(issue_id: u64, name: Option<String>) -> Self {
        let fields = vec![
            FormField::new("commenter_name", "Your name", true).with_value(name),
            FormField::new("content", "Comment", true),
        ];
        // Start on the comment when the name is already known
        let active = if fields[0].value.is_empty() { 0 } else { 1 };
        Self {
            kind: FormKind::Comment(issue_id),
            fields,
            active,
            error: None,
        }
    }

    pub fn ccr(issue_id: u64) -> Self {
        Self {
            kind: FormKind::Ccr(issue_id),
            fields: vec![FormField::new("ccr_number", "CCR number", true)],
            active: 0,
            error: None,
        }
    }

    pub fn create_issue(reporter: Option<String>) -> Self {
        Self {
            kind: FormKind::CreateIssue,
            fields: vec![
                FormField::new("testcase_title", "Test case title", true),
                FormField::new("testcase_path", "Test case path", true),
                FormField::new("severity", "Severity", true).with_value(Some("Medium".to_string())),
                FormField::new("description", "Description", true),
                FormField::new("reporter_name", "Reporter", true).with_value(reporter),
                FormField::new("build", "Build", false),
                FormField::new("release", "Release", false),
                FormField::new("target", "Target", false),
                FormField::new("additional_comments", "Additional comments", false),
                FormField::new("tags", "Tags (comma separated)", false),
            ],
            active: 0,
            error: None,
        }
    }

    pub fn title(&self) -> &'static str {
        match self.kind {
            FormKind::Comment(_) => "Add Comment",
            FormKind::Ccr(_) => "Move to CCR",
            FormKind::CreateIssue => "Report Issue",
        }
    }

    pub fn value(&self, key: &str) -> String {
        self.fields
            .iter()
            .find(|f| f.key == key)
            .map(|f| f.value.clone())
            .unwrap_or_default()
    }

    pub fn next_field(&mut self) {
        self.active = (self.active + 1) % self.fields.len();
    }

    pub fn previous_field(&mut self) {
        self.active = (self.active + self.fields.len() - 1) % self.fields.len();
    }

    pub fn type_char(&mut self, c: char) {
        if let Some(field) = self.fields.get_mut(self.active) {
            field.value.push(c);
        }
        self.error = None;
    }

    pub fn backspace(&mut self) {
        if let Some(field) = self.fields.get_mut(self.active) {
            field.value.pop();
        }
    }

    /// Release and platform read from the path field, for the info line.
    pub fn path_summary(&self) -> Option<String> {
        if self.kind != FormKind::CreateIssue {
            return None;
        }
        let path = self.value("testcase_path");
        if path.trim().is_empty() {
            return None;
        }
        Some(match extract_path_info(&path) {
            Some(info) => info.summary(),
            None => "Could not extract release/platform from path.".to_string(),
        })
    }

    pub fn to_comment_form(&self) -> CommentForm {
        CommentForm::new(self.value("commenter_name"), self.value("content"))
    }

    pub fn to_ccr_form(&self) -> CcrForm {
        CcrForm {
            ccr_number: self.value("ccr_number"),
        }
    }

    pub fn to_new_issue_form(&self) -> NewIssueForm {
        let mut form = NewIssueForm {
            testcase_title: self.value("testcase_title"),
            testcase_path: self.value("testcase_path"),
            severity: self.value("severity"),
            description: self.value("description"),
            reporter_name: self.value("reporter_name"),
            build: self.value("build"),
            release: self.value("release"),
            target: self.value("target"),
            additional_comments: self.value("additional_comments"),
            tags: self.value("tags"),
            ..Default::default()
        };
        if form.release.trim().is_empty() {
            form.apply_path_info();
        }
        form
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Popup {
    Confirm(ConfirmAction),
    Form(FormState),
    Help,
}

/// The interactive client. Owns the view state and is driven by the event
/// loop in `handlers`.
pub struct InteractiveApp {
    pub view: ViewState,
    pub client: Arc<TalkClient>,
    pub dispatcher: SearchDispatcher<TalkClient>,
    pub user: Option<User>,
    pub reporter_name: Option<String>,
    pub focus: Focus,
    pub filter_field: FilterField,
    pub search_editing: bool,
    pub popup: Option<Popup>,
    pub notifications: Vec<Notification>,
    pub selected_comment: usize,
    pub detail_scroll: u16,
    pub should_quit: bool,
}

impl InteractiveApp {
    pub fn new(
        client: Arc<TalkClient>,
        dispatcher: SearchDispatcher<TalkClient>,
        initial_path: &str,
        user: Option<User>,
        reporter_name: Option<String>,
    ) -> Self {
        Self {
            view: ViewState::new(initial_path),
            client,
            dispatcher,
            user,
            reporter_name,
            focus: Focus::List,
            filter_field: FilterField::Search,
            search_editing: false,
            popup: None,
            notifications: Vec::new(),
            selected_comment: 0,
            detail_scroll: 0,
            should_quit: false,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.user.as_ref().is_some_and(User::is_admin)
    }

    /// Loads the option lists and shows the starting route.
    pub async fn start(&mut self) {
        let client = self.client.clone();
        load_builds(client.as_ref(), &mut self.view.options).await;
        let effect = self.view.start();
        self.apply_route_effect(effect).await;
    }

    // Notifications

    pub fn notify(&mut self, kind: NotificationKind, message: impl Into<String>) {
        // A new message replaces a pending loading indicator
        self.notifications
            .retain(|n| n.kind != NotificationKind::Loading);
        self.notifications.push(Notification {
            kind,
            message: message.into(),
            created_at: Instant::now(),
            dismissed: false,
        });
    }

    pub fn report_error(&mut self, action: &str, error: &TalkError) {
        log_error(&format!("{}: {}", action, error));
        let message = if error.is_unauthorized() {
            "Authentication required. Run 'testertalk login' first.".to_string()
        } else if error.is_forbidden() {
            format!("{}: access denied", action)
        } else {
            match error {
                TalkError::RequestFailed { message, .. } => format!("{}: {}", action, message),
                TalkError::InvalidInput(message) => message.clone(),
                other => format!("{}: {}", action, other),
            }
        };
        self.notify(NotificationKind::Error, message);
    }

    pub fn dismiss_notification(&mut self) {
        if let Some(n) = self.notifications.iter_mut().rev().find(|n| !n.dismissed) {
            n.dismissed = true;
        }
    }

    pub fn expire_notifications(&mut self) {
        self.notifications.retain(|n| !n.dismissed && !n.is_expired());
    }

    // Routing and search

    pub async fn apply_route_effect(&mut self, effect: RouteEffect) {
        match effect {
            RouteEffect::Search => self.search_now(),
            RouteEffect::FetchIssue(id) => {
                self.selected_comment = 0;
                self.detail_scroll = 0;
                self.load_issue(id).await;
            }
            RouteEffect::Nothing => {
                self.selected_comment = 0;
                self.detail_scroll = 0;
            }
        }
    }

    async fn load_issue(&mut self, id: u64) {
        let result = self.client.get_issue(id).await;
        if let Err(e) = &result {
            log_error(&format!("Failed to load issue #{}: {}", id, e));
        }
        self.view.apply_issue(id, result);
    }

    pub fn search_now(&mut self) {
        self.view.begin_search();
        let seq = self.dispatcher.search_now(self.view.filters.active_filters());
        log_debug(&format!("Immediate search #{}", seq));
    }

    pub fn request_search(&mut self) {
        self.view.begin_search();
        self.dispatcher
            .request_search(self.view.filters.active_filters());
    }

    pub fn handle_search_outcome(&mut self, outcome: SearchOutcome) {
        let failed = outcome.result.as_ref().err().map(|e| e.to_string());
        if self.view.apply_search_outcome(outcome, self.dispatcher.latest()) {
            if let Some(message) = failed {
                self.notify(NotificationKind::Error, format!("Search failed: {}", message));
            }
        }
    }

    pub async fn open_selected(&mut self) {
        if let Some(id) = self.view.selected_issue().map(|i| i.id) {
            let effect = self.view.open_issue(id);
            self.apply_route_effect(effect).await;
        }
    }

    pub async fn go_back(&mut self) {
        if let Some(effect) = self.view.back() {
            self.apply_route_effect(effect).await;
        }
    }

    pub async fn go_forward(&mut self) {
        if let Some(effect) = self.view.forward() {
            self.apply_route_effect(effect).await;
        }
    }

    /// Re-runs whatever the current route shows.
    pub async fn refresh(&mut self) {
        let effect = self.view.enter_route(self.view.route.clone());
        self.apply_route_effect(effect).await;
    }

    // Filters

    pub fn apply_quick_filter(&mut self, quick: QuickFilter) {
        self.view.filters.apply_quick_filter(quick);
        self.search_now();
    }

    /// Sets a filter value, reloads dependent targets and schedules a search.
    pub async fn set_filter(&mut self, field: FilterField, value: &str) {
        let effect = self.view.filters.set_filter(field, value);
        if let Some(release) = self.view.options.apply_effect(&effect) {
            let client = self.client.clone();
            if !load_targets(
                client.as_ref(),
                &mut self.view.filters,
                &mut self.view.options,
                &release,
            )
            .await
            {
                log_debug(&format!("Target options for {} were not applied", release));
            }
        }
        self.request_search();
    }

    pub async fn cycle_filter(&mut self, step: isize) {
        let field = self.filter_field;
        if field == FilterField::Search {
            self.search_editing = true;
            return;
        }
        match self.view.options.cycle(&self.view.filters, field, step) {
            Some(value) => self.set_filter(field, &value).await,
            None if field == FilterField::Target => self.notify(
                NotificationKind::Info,
                self.view.options.targets.placeholder(),
            ),
            None => {}
        }
    }

    pub async fn clear_filter(&mut self) {
        self.set_filter(self.filter_field, "").await;
    }

    pub fn type_search_char(&mut self, c: char) {
        let mut text = self.view.filters.search_text.clone();
        text.push(c);
        self.view.filters.set_filter(FilterField::Search, &text);
        self.request_search();
    }

    pub fn search_backspace(&mut self) {
        let mut text = self.view.filters.search_text.clone();
        text.pop();
        self.view.filters.set_filter(FilterField::Search, &text);
        self.request_search();
    }

    /// Enter in the search box submits right away.
    pub fn submit_search(&mut self) {
        self.search_editing = false;
        self.search_now();
    }

    // Detail actions

    pub fn current_issue(&self) -> Option<&Issue> {
        self.view.current_issue()
    }

    pub fn selected_comment(&self) -> Option<&Comment> {
        self.current_issue()
            .and_then(|issue| issue.comments.get(self.selected_comment))
    }

    pub fn select_next_comment(&mut self) {
        let count = self.current_issue().map(|i| i.comments.len()).unwrap_or(0);
        if count > 0 {
            self.selected_comment = (self.selected_comment + 1).min(count - 1);
        }
    }

    pub fn select_previous_comment(&mut self) {
        self.selected_comment = self.selected_comment.saturating_sub(1);
    }

    /// Target issue of an action: the open issue, else the list selection.
    fn target_issue_id(&self) -> Option<u64> {
        match self.view.route {
            Route::Detail(id) => Some(id),
            Route::List => self.view.selected_issue().map(|i| i.id),
            Route::UnknownIssue(_) => None,
        }
    }

    async fn reload_after_mutation(&mut self) {
        self.refresh().await;
    }

    pub async fn vote_issue(&mut self, vote: VoteKind) {
        let Some(id) = self.target_issue_id() else { return };
        match self.client.vote_issue(id, vote).await {
            Ok(issue) => {
                self.notify(NotificationKind::Success, format!("Vote recorded (score {})", issue.score));
                self.reload_after_mutation().await;
            }
            Err(e) => self.report_error("Error voting", &e),
        }
    }

    pub async fn vote_comment(&mut self, vote: VoteKind) {
        let Some(comment_id) = self.selected_comment().map(|c| c.id) else { return };
        match self.client.vote_comment(comment_id, vote).await {
            Ok(_) => {
                self.notify(NotificationKind::Success, "Vote recorded");
                self.reload_after_mutation().await;
            }
            Err(e) => self.report_error("Error voting", &e),
        }
    }

    pub async fn verify_comment(&mut self) {
        let Some((comment_id, verified)) = self
            .selected_comment()
            .map(|c| (c.id, c.is_verified_solution))
        else {
            return;
        };
        if verified {
            self.notify(NotificationKind::Info, "Already the verified solution");
            return;
        }
        match self.client.verify_comment(comment_id).await {
            Ok(_) => {
                self.notify(NotificationKind::Success, "Solution verified!");
                self.reload_after_mutation().await;
            }
            Err(e) => self.report_error("Error verifying solution", &e),
        }
    }

    pub fn open_comment_form(&mut self) {
        if let Route::Detail(id) = self.view.route {
            let name = self
                .reporter_name
                .clone()
                .or_else(|| self.user.as_ref().map(|u| u.username.clone()));
            self.popup = Some(Popup::Form(FormState::comment(id, name)));
        }
    }

    pub fn open_ccr_form(&mut self) {
        let Some(issue) = self.current_issue() else { return };
        let id = issue.id;
        match issue.ccr_number.clone().filter(|c| !c.is_empty()) {
            Some(ccr) => self.notify(NotificationKind::Info, format!("Already in CCR {}", ccr)),
            None => self.popup = Some(Popup::Form(FormState::ccr(id))),
        }
    }

    pub fn open_create_form(&mut self) {
        let reporter = self
            .reporter_name
            .clone()
            .or_else(|| self.user.as_ref().map(|u| u.username.clone()));
        self.popup = Some(Popup::Form(FormState::create_issue(reporter)));
    }

    pub fn request_delete(&mut self) {
        if !self.is_admin() {
            self.notify(NotificationKind::Error, "Access denied. Admin privileges required.");
            return;
        }
        if let Some(id) = self.target_issue_id() {
            self.popup = Some(Popup::Confirm(ConfirmAction::DeleteIssue(id)));
        }
    }

    pub async fn confirm(&mut self, action: ConfirmAction) {
        self.popup = None;
        match action {
            ConfirmAction::DeleteIssue(id) => match self.client.delete_issue(id).await {
                Ok(()) => {
                    log_info(&format!("Deleted issue #{}", id));
                    self.notify(NotificationKind::Success, format!("Issue #{} deleted", id));
                    if self.view.route == Route::Detail(id) {
                        let effect = self.view.navigate(&Route::List.path());
                        self.apply_route_effect(effect).await;
                    } else {
                        self.search_now();
                    }
                }
                Err(e) => self.report_error("Error deleting issue", &e),
            },
        }
    }

    /// Validates and sends the open form. Validation errors keep the popup
    /// open with the message; nothing is sent.
    pub async fn submit_form(&mut self) {
        let Some(Popup::Form(form)) = self.popup.clone() else { return };

        let result = match form.kind {
            FormKind::Comment(issue_id) => self.submit_comment(issue_id, &form).await,
            FormKind::Ccr(issue_id) => self.submit_ccr(issue_id, &form).await,
            FormKind::CreateIssue => self.submit_issue(&form).await,
        };

        match result {
            Ok(()) => self.popup = None,
            Err(TalkError::InvalidInput(message)) => self.set_form_error(message),
            Err(e @ TalkError::Validation(_)) => self.set_form_error(e.to_string()),
            Err(e) => {
                self.set_form_error(e.to_string());
                self.report_error(form.title(), &e);
            }
        }
    }

    fn set_form_error(&mut self, message: String) {
        if let Some(Popup::Form(form)) = &mut self.popup {
            form.error = Some(message);
        }
    }

    async fn submit_comment(&mut self, issue_id: u64, form: &FormState) -> TalkResult<()> {
        let comment = form.to_comment_form();
        comment.validate()?;
        self.client
            .add_comment(issue_id, comment.commenter_name.trim(), comment.content.trim())
            .await?;
        self.notify(NotificationKind::Success, "Comment added successfully!");
        self.reload_after_mutation().await;
        Ok(())
    }

    async fn submit_ccr(&mut self, issue_id: u64, form: &FormState) -> TalkResult<()> {
        let ccr = form.to_ccr_form();
        ccr.validate()?;
        self.client.move_to_ccr(issue_id, ccr.ccr_number.trim()).await?;
        self.notify(NotificationKind::Success, "Issue moved to CCR successfully!");
        self.reload_after_mutation().await;
        Ok(())
    }

    async fn submit_issue(&mut self, form: &FormState) -> TalkResult<()> {
        let new_issue = form.to_new_issue_form();
        let client = self.client.clone();
        let issue = submit_new_issue(client.as_ref(), &new_issue).await?;
        self.notify(NotificationKind::Success, "Issue created successfully!");
        let effect = self.view.open_issue(issue.id);
        self.apply_route_effect(effect).await;
        Ok(())
    }
}
