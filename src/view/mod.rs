use crate::error::TalkResult;
use crate::filtering::{FilterOptions, FilterState};
use crate::logging::log_debug;
use crate::models::Issue;
use crate::routing::{Route, Router};
use crate::search::SearchOutcome;

pub const LIST_ERROR: &str = "Error loading issues. Please try again.";
pub const DETAIL_ERROR: &str = "Error loading issue details.";

/// What the caller has to do after the route changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteEffect {
    FetchIssue(u64),
    Search,
    /// Nothing to load; the view already shows its final state.
    Nothing,
}

#[derive(Debug, Clone)]
pub enum ListStatus {
    Idle,
    Loading,
    Loaded(Vec<Issue>),
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct ListView {
    pub status: ListStatus,
    pub selected: usize,
    /// Sequence number of the search whose results are on screen.
    pub shown_seq: u64,
}

impl ListView {
    pub fn issues(&self) -> &[Issue] {
        match &self.status {
            ListStatus::Loaded(issues) => issues,
            _ => &[],
        }
    }
}

#[derive(Debug, Clone)]
pub enum DetailView {
    Hidden,
    Loading(u64),
    Loaded(Box<Issue>),
    /// `id` is the issue id as it appeared in the path.
    Failed { id: String, message: String },
}

/// Everything the list and detail panels render from. The event loop is the
/// only writer.
pub struct ViewState {
    pub router: Router,
    pub route: Route,
    pub filters: FilterState,
    pub options: FilterOptions,
    pub list: ListView,
    pub detail: DetailView,
}

impl ViewState {
    pub fn new(initial_path: &str) -> Self {
        let router = Router::new(initial_path);
        let route = router.current();
        Self {
            router,
            route,
            filters: FilterState::new(),
            options: FilterOptions::new(),
            list: ListView {
                status: ListStatus::Idle,
                selected: 0,
                shown_seq: 0,
            },
            detail: DetailView::Hidden,
        }
    }

    /// Effect of showing the starting location.
    pub fn start(&mut self) -> RouteEffect {
        self.enter_route(self.router.current())
    }

    pub fn enter_route(&mut self, route: Route) -> RouteEffect {
        self.route = route.clone();
        match route {
            Route::Detail(id) => {
                self.detail = DetailView::Loading(id);
                RouteEffect::FetchIssue(id)
            }
            Route::UnknownIssue(raw) => {
                self.detail = DetailView::Failed {
                    id: raw,
                    message: format!("{} (Issue not found)", DETAIL_ERROR),
                };
                RouteEffect::Nothing
            }
            Route::List => {
                self.detail = DetailView::Hidden;
                RouteEffect::Search
            }
        }
    }

    pub fn navigate(&mut self, path: &str) -> RouteEffect {
        let route = self.router.navigate(path);
        self.enter_route(route)
    }

    pub fn open_issue(&mut self, id: u64) -> RouteEffect {
        self.navigate(&Route::Detail(id).path())
    }

    pub fn back(&mut self) -> Option<RouteEffect> {
        let route = self.router.back()?;
        Some(self.enter_route(route))
    }

    pub fn forward(&mut self) -> Option<RouteEffect> {
        let route = self.router.forward()?;
        Some(self.enter_route(route))
    }

    pub fn list_visible(&self) -> bool {
        self.route == Route::List
    }

    pub fn detail_visible(&self) -> bool {
        self.route.is_detail()
    }

    pub fn begin_search(&mut self) {
        self.list.status = ListStatus::Loading;
    }

    /// Shows the outcome if it belongs to the latest search intent.
    /// Returns whether it was applied.
    pub fn apply_search_outcome(&mut self, outcome: SearchOutcome, latest: u64) -> bool {
        if outcome.seq != latest {
            log_debug(&format!(
                "Dropping stale search result #{} (latest #{})",
                outcome.seq, latest
            ));
            return false;
        }

        self.list.shown_seq = outcome.seq;
        self.list.status = match outcome.result {
            Ok(issues) => {
                if self.list.selected >= issues.len() {
                    self.list.selected = issues.len().saturating_sub(1);
                }
                ListStatus::Loaded(issues)
            }
            Err(e) => ListStatus::Failed(format!("{} ({})", LIST_ERROR, e)),
        };
        true
    }

    /// Shows a fetched issue unless the user has moved on to another route.
    pub fn apply_issue(&mut self, id: u64, result: TalkResult<Issue>) -> bool {
        if self.route != Route::Detail(id) {
            return false;
        }
        self.detail = match result {
            Ok(issue) => DetailView::Loaded(Box::new(issue)),
            Err(e) => DetailView::Failed {
                id: id.to_string(),
                message: format!("{} ({})", DETAIL_ERROR, e),
            },
        };
        true
    }

    pub fn current_issue(&self) -> Option<&Issue> {
        match &self.detail {
            DetailView::Loaded(issue) => Some(issue),
            _ => None,
        }
    }

    pub fn selected_issue(&self) -> Option<&Issue> {
        self.list.issues().get(self.list.selected)
    }

    pub fn select_next(&mut self) {
        let len = self.list.issues().len();
        if len > 0 {
            self.list.selected = (self.list.selected + 1).min(len - 1);
        }
    }

    pub fn select_previous(&mut self) {
        self.list.selected = self.list.selected.saturating_sub(1);
    }
}
