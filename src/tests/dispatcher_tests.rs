use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::time::sleep;

use super::fixtures::issue;
use crate::error::TalkResult;
use crate::filtering::{ActiveFilters, FilterField, FilterState};
use crate::models::Issue;
use crate::search::{SearchBackend, SearchDispatcher};
use crate::view::{ListStatus, ViewState};

/// Records every search that reaches it. Searches for text listed in
/// `delays` take that long to answer.
#[derive(Default)]
struct RecordingBackend {
    calls: Mutex<Vec<ActiveFilters>>,
    delays: HashMap<String, Duration>,
}

impl RecordingBackend {
    fn with_delays(delays: &[(&str, u64)]) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            delays: delays
                .iter()
                .map(|(text, ms)| (text.to_string(), Duration::from_millis(*ms)))
                .collect(),
        }
    }

    fn calls(&self) -> Vec<ActiveFilters> {
        self.calls.lock().unwrap().clone()
    }
}

impl SearchBackend for RecordingBackend {
    async fn search(&self, filters: ActiveFilters) -> TalkResult<Vec<Issue>> {
        self.calls.lock().unwrap().push(filters.clone());
        let text = filters.search.clone().unwrap_or_default();
        if let Some(delay) = self.delays.get(&text) {
            sleep(*delay).await;
        }
        Ok(vec![issue(1, &text)])
    }
}

fn search_for(text: &str) -> ActiveFilters {
    let mut filters = FilterState::new();
    filters.set_filter(FilterField::Search, text);
    filters.active_filters()
}

#[tokio::test(start_paused = true)]
async fn test_burst_of_requests_sends_one_search() {
    let backend = Arc::new(RecordingBackend::default());
    let (dispatcher, mut outcomes) = SearchDispatcher::new(backend.clone(), Duration::from_millis(300));

    dispatcher.request_search(search_for("c"));
    sleep(Duration::from_millis(50)).await;
    dispatcher.request_search(search_for("cr"));
    sleep(Duration::from_millis(50)).await;
    let last = dispatcher.request_search(search_for("crash"));

    let outcome = outcomes.recv().await.unwrap();
    assert_eq!(outcome.seq, last);
    assert_eq!(outcome.filters.search.as_deref(), Some("crash"));

    // Let every superseded timer fire
    sleep(Duration::from_secs(1)).await;
    let calls = backend.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0], search_for("crash"));
}

#[tokio::test(start_paused = true)]
async fn test_requests_further_apart_than_delay_each_search() {
    let backend = Arc::new(RecordingBackend::default());
    let (dispatcher, mut outcomes) = SearchDispatcher::new(backend.clone(), Duration::from_millis(300));

    dispatcher.request_search(search_for("a"));
    sleep(Duration::from_millis(400)).await;
    dispatcher.request_search(search_for("b"));

    let first = outcomes.recv().await.unwrap();
    let second = outcomes.recv().await.unwrap();
    assert_eq!(first.filters.search.as_deref(), Some("a"));
    assert_eq!(second.filters.search.as_deref(), Some("b"));
    assert_eq!(backend.calls().len(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_search_now_supersedes_pending_request() {
    let backend = Arc::new(RecordingBackend::default());
    let (dispatcher, mut outcomes) = SearchDispatcher::new(backend.clone(), Duration::from_millis(300));

    dispatcher.request_search(search_for("typed"));
    let now = dispatcher.search_now(search_for("quick"));

    let outcome = outcomes.recv().await.unwrap();
    assert_eq!(outcome.seq, now);
    assert!(dispatcher.is_current(now));

    sleep(Duration::from_secs(1)).await;
    assert_eq!(backend.calls(), vec![search_for("quick")]);
}

#[tokio::test(start_paused = true)]
async fn test_slow_stale_result_does_not_replace_newer_one() {
    let backend = Arc::new(RecordingBackend::with_delays(&[("slow", 500), ("fast", 10)]));
    let (dispatcher, mut outcomes) = SearchDispatcher::new(backend.clone(), Duration::from_millis(300));
    let mut view = ViewState::new("/");

    dispatcher.search_now(search_for("slow"));
    let fast = dispatcher.search_now(search_for("fast"));

    let first = outcomes.recv().await.unwrap();
    assert_eq!(first.seq, fast);
    assert!(view.apply_search_outcome(first, dispatcher.latest()));

    let late = outcomes.recv().await.unwrap();
    assert_eq!(late.filters.search.as_deref(), Some("slow"));
    assert!(!view.apply_search_outcome(late, dispatcher.latest()));

    match &view.list.status {
        ListStatus::Loaded(issues) => assert_eq!(issues[0].testcase_title, "fast"),
        other => panic!("Expected loaded list, got {:?}", other),
    }
    assert_eq!(view.list.shown_seq, fast);
}
