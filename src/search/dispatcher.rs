use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::time::Instant;

use crate::error::TalkResult;
use crate::filtering::ActiveFilters;
use crate::logging::log_debug;
use crate::models::Issue;

/// Anything that can run a filtered issue search.
pub trait SearchBackend: Send + Sync + 'static {
    fn search(&self, filters: ActiveFilters) -> impl Future<Output = TalkResult<Vec<Issue>>> + Send;
}

/// Result of one search intent, tagged with its sequence number.
#[derive(Debug)]
pub struct SearchOutcome {
    pub seq: u64,
    pub filters: ActiveFilters,
    pub result: TalkResult<Vec<Issue>>,
}

/// Collapses bursts of search requests into one backend call.
///
/// Every request takes the next sequence number. A debounced request sleeps
/// for the quiet interval and gives up if a newer request was made in the
/// meantime. Requests that do reach the backend are not cancelled; their
/// outcomes carry the sequence number so the consumer can drop stale ones.
pub struct SearchDispatcher<B: SearchBackend> {
    backend: Arc<B>,
    delay: Duration,
    latest: Arc<AtomicU64>,
    tx: UnboundedSender<SearchOutcome>,
}

impl<B: SearchBackend> SearchDispatcher<B> {
    pub fn new(backend: Arc<B>, delay: Duration) -> (Self, UnboundedReceiver<SearchOutcome>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let dispatcher = Self {
            backend,
            delay,
            latest: Arc::new(AtomicU64::new(0)),
            tx,
        };
        (dispatcher, rx)
    }

    /// Sequence number of the most recent intent.
    pub fn latest(&self) -> u64 {
        self.latest.load(Ordering::SeqCst)
    }

    pub fn is_current(&self, seq: u64) -> bool {
        seq == self.latest()
    }

    /// Schedules a search after the quiet interval. Returns its sequence number.
    pub fn request_search(&self, filters: ActiveFilters) -> u64 {
        let seq = self.next_seq();
        let deadline = Instant::now() + self.delay;
        self.spawn(seq, filters, Some(deadline));
        seq
    }

    /// Searches right away, superseding anything still waiting.
    pub fn search_now(&self, filters: ActiveFilters) -> u64 {
        let seq = self.next_seq();
        self.spawn(seq, filters, None);
        seq
    }

    fn next_seq(&self) -> u64 {
        self.latest.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn spawn(&self, seq: u64, filters: ActiveFilters, deadline: Option<Instant>) {
        let backend = self.backend.clone();
        let latest = self.latest.clone();
        let tx = self.tx.clone();

        tokio::spawn(async move {
            if let Some(deadline) = deadline {
                tokio::time::sleep_until(deadline).await;
                if latest.load(Ordering::SeqCst) != seq {
                    log_debug(&format!("Search #{} superseded before dispatch", seq));
                    return;
                }
            }

            log_debug(&format!("Dispatching search #{}", seq));
            let result = backend.search(filters.clone()).await;
            // The receiver is gone once the UI has shut down
            let _ = tx.send(SearchOutcome { seq, filters, result });
        });
    }
}
