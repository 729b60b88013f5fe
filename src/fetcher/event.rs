use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use super::SplitStrategy;

/// Lifecycle state of a [`Fetcher`](super::Fetcher)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchState {
    /// Nothing requested yet
    #[default]
    Idle,
    /// Initial request in flight
    Requesting,
    /// Parsing a reply
    Parsing,
    /// Fetching a referenced origin that was not in the reply
    FetchMissing,
    /// Fetching the next queued event
    FetchNextId,
    /// All references resolved
    Finished,
    /// A request or parse failed
    Failed,
    /// Cancelled by the caller
    Cancelled,
}

impl FetchState {
    /// Whether no further transitions happen
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            FetchState::Finished | FetchState::Failed | FetchState::Cancelled
        )
    }
}

/// Severity of a user-facing message
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Progress and summaries
    Info,
    /// Degraded but usable results
    Warning,
    /// The fetch failed
    Critical,
}

impl Severity {
    /// Log level the message is mirrored at
    pub fn log_level(&self) -> log::Level {
        match self {
            Severity::Info => log::Level::Info,
            Severity::Warning => log::Level::Warn,
            Severity::Critical => log::Level::Error,
        }
    }
}

/// The reply reached the service's result limit and is likely truncated
#[derive(Debug, Clone, PartialEq)]
pub struct LimitExceeded {
    /// Records in the reply
    pub count: usize,
    /// Advertised `querylimitmaxentries`
    pub limit: u64,
    /// Strategies applicable to the current filter
    pub strategies: Vec<SplitStrategy>,
}

/// Signals sent on a fetcher's channel
#[derive(Debug, Clone, PartialEq)]
pub enum FetcherEvent {
    /// The fetcher entered a new state
    State(FetchState),
    /// Bytes received by the active request
    Progress {
        /// Body bytes received so far
        received: u64,
        /// Content length, when announced
        total: Option<u64>,
        /// Estimated completion of the whole fetch in `[0, 1]`
        overall: f64,
    },
    /// Human-readable message
    Message {
        /// Severity
        severity: Severity,
        /// Text
        text: String,
    },
    /// The result hit the service limit
    LimitExceeded(LimitExceeded),
    /// Terminal: the document is complete
    Finished {
        /// Records in the document
        records: usize,
    },
    /// Terminal: the fetch failed
    Failed(String),
    /// Terminal: the fetch was cancelled
    Cancelled,
}

/// Cancels a running fetch from anywhere.
///
/// Cancellation is observed at the next request or reply boundary.
#[derive(Debug, Clone, Default)]
pub struct CancelHandle(Arc<AtomicBool>);

impl CancelHandle {
    /// A handle that is not cancelled yet
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Whether cancellation was requested
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Overall progress from completed requests, queued requests and the
/// fraction of the active one
pub fn overall_progress(completed: usize, queued: usize, fraction: Option<f64>) -> f64 {
    let fraction = fraction.unwrap_or(0.0).clamp(0.0, 1.0);
    let total = (completed + queued + 1) as f64;
    (completed as f64 + fraction) / total
}
