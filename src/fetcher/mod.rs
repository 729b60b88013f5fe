//! # Fetcher
//!
//! Drives one service query to completion:
//!
//! ```text
//! Idle ──fetch_data()──▶ Requesting ──reply──▶ Parsing
//! Parsing ──missing origins──▶ FetchMissing ──reply──▶ Parsing
//! Parsing ──pending event ids──▶ FetchNextId ──reply──▶ Parsing
//! Parsing ──quiescent──▶ Finished
//! any ──error──▶ Failed          any ──cancel()──▶ Cancelled
//! ```
//!
//! The fetch is quiescent when no loaded event references an origin that is
//! still absent (or was already requested) and no queued event remains. At
//! most one request is in flight at a time, so replies are processed in the
//! order they were issued.
//!
//! Progress, messages and terminal signals are sent on an optional
//! crossbeam channel as [`FetcherEvent`]s and mirrored to the log.
//!
//! The document is only handed out once the fetch has finished.

mod error;
mod event;
mod split;

#[cfg(test)]
mod tests;

use std::collections::{HashSet, VecDeque};
use std::sync::Arc;

use crossbeam_channel::Sender;
use log::{debug, log};

pub use error::FetchError;
pub use event::{overall_progress, CancelHandle, FetchState, FetcherEvent, LimitExceeded, Severity};
pub use split::SplitStrategy;

use crate::document::{Document, DocumentKind, QuakeMlDocument, StationXmlDocument, TextTable};
use crate::query::{build_url, Filter, OutputKind, ServiceDescriptor, ServiceKind};
use crate::transport::Transport;

/// Result of a finished fetch
#[derive(Debug, Clone, PartialEq)]
pub struct FetchOutcome {
    /// Everything loaded, follow-ups merged
    pub document: Document,
    /// Requests issued, follow-ups included
    pub requests: usize,
    /// Set when the reply reached the service's result limit
    pub limit_exceeded: Option<LimitExceeded>,
}

/// Rewrite an origin reference into the URL that serves it
pub fn origin_url(public_id: &str) -> String {
    match public_id.strip_prefix("smi:") {
        Some(rest) => format!("http://{}", rest),
        None => public_id.to_string(),
    }
}

/// Orchestrates the requests of one service query
pub struct Fetcher {
    transport: Arc<dyn Transport>,
    service: ServiceDescriptor,
    filter: Filter,
    state: FetchState,
    events: Option<Sender<FetcherEvent>>,
    cancel: CancelHandle,
    missing_origins: VecDeque<String>,
    requested_origins: HashSet<String>,
    pending_event_ids: VecDeque<String>,
    requests: usize,
    // split children leave terminal signals to their parent
    nested: bool,
}

impl Fetcher {
    /// Create a fetcher for `filter` against `service`
    pub fn new(transport: Arc<dyn Transport>, service: ServiceDescriptor, filter: Filter) -> Self {
        Self {
            transport,
            service,
            filter,
            state: FetchState::Idle,
            events: None,
            cancel: CancelHandle::new(),
            missing_origins: VecDeque::new(),
            requested_origins: HashSet::new(),
            pending_event_ids: VecDeque::new(),
            requests: 0,
            nested: false,
        }
    }

    /// Send [`FetcherEvent`]s to `sender`
    pub fn with_events(mut self, sender: Sender<FetcherEvent>) -> Self {
        self.events = Some(sender);
        self
    }

    /// Share an existing cancellation handle
    pub fn with_cancel_handle(mut self, cancel: CancelHandle) -> Self {
        self.cancel = cancel;
        self
    }

    /// Handle that cancels this fetcher
    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    /// Cancel at the next request or reply boundary
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Current state
    pub fn state(&self) -> FetchState {
        self.state
    }

    /// Filter of the initial request
    pub fn filter(&self) -> &Filter {
        &self.filter
    }

    /// Service this fetcher queries
    pub fn service(&self) -> &ServiceDescriptor {
        &self.service
    }

    /// URL of the initial request
    pub fn url(&self) -> String {
        build_url(&self.filter, &self.service)
    }

    /// Run the query and every follow-up until quiescent
    pub async fn fetch_data(&mut self) -> Result<FetchOutcome, FetchError> {
        self.missing_origins.clear();
        self.requested_origins.clear();
        self.pending_event_ids.clear();
        self.requests = 0;

        let result = self.run().await;
        self.conclude(result)
    }

    /// Settle the terminal state and signal it, unless this is a split child
    fn conclude(
        &mut self,
        result: Result<FetchOutcome, FetchError>,
    ) -> Result<FetchOutcome, FetchError> {
        if self.nested {
            self.state = match &result {
                Ok(_) => FetchState::Finished,
                Err(FetchError::Cancelled) => FetchState::Cancelled,
                Err(_) => FetchState::Failed,
            };
            return result;
        }

        match result {
            Ok(outcome) => {
                self.set_state(FetchState::Finished);
                let records = outcome.document.record_count();
                if records == 0 {
                    self.message(Severity::Warning, "Query returned no records".to_string());
                } else {
                    self.message(Severity::Info, format!("Query returned {} records", records));
                }
                self.emit(FetcherEvent::Finished { records });
                Ok(outcome)
            }
            Err(FetchError::Cancelled) => {
                // no signal but the terminal one
                self.state = FetchState::Cancelled;
                debug!("Fetch cancelled");
                self.emit(FetcherEvent::Cancelled);
                Err(FetchError::Cancelled)
            }
            Err(e) => {
                self.set_state(FetchState::Failed);
                self.message(Severity::Critical, e.to_string());
                self.emit(FetcherEvent::Failed(e.to_string()));
                Err(e)
            }
        }
    }

    async fn run(&mut self) -> Result<FetchOutcome, FetchError> {
        if self.cancel.is_cancelled() {
            return Err(FetchError::Cancelled);
        }
        self.set_state(FetchState::Requesting);
        let url = self.url();
        let Some(body) = self.request(&url).await? else {
            return Ok(self.outcome(Document::empty(self.expected_kind())));
        };

        self.set_state(FetchState::Parsing);
        let kind = match self.filter.output {
            OutputKind::Basic => Some(DocumentKind::Text),
            OutputKind::Extended => DocumentKind::detect(&body),
        };
        let mut doc = match kind {
            // text replies carry everything inline
            Some(DocumentKind::Text) => {
                return Ok(self.outcome(Document::Text(TextTable::from_bytes(&body)?)))
            }
            Some(DocumentKind::StationXml) => {
                return Ok(self.outcome(Document::StationXml(StationXmlDocument::from_bytes(
                    &body,
                )?)))
            }
            Some(DocumentKind::QuakeMl) => {
                let mut doc = QuakeMlDocument::default();
                doc.parse_initial(&body)?;
                doc
            }
            None => return Err(crate::document::DocumentError::Unrecognized.into()),
        };

        if self.expands_events(&doc) {
            self.pending_event_ids.extend(doc.event_ids());
            debug!("Queued {} events for detail queries", self.pending_event_ids.len());
        }

        loop {
            self.queue_missing_origins(&doc);

            if let Some(id) = self.missing_origins.pop_front() {
                self.set_state(FetchState::FetchMissing);
                self.message(
                    Severity::Info,
                    format!("{} missing origins left to fetch", self.missing_origins.len() + 1),
                );
                self.requested_origins.insert(id.clone());
                // an unreachable origin only costs the rows that reference it
                match self.request(&origin_url(&id)).await {
                    Ok(Some(body)) => {
                        self.set_state(FetchState::Parsing);
                        doc.parse_missing_origin(&body)?;
                    }
                    Ok(None) => self.message(Severity::Warning, format!("No data for origin {}", id)),
                    Err(FetchError::Cancelled) => return Err(FetchError::Cancelled),
                    Err(e) => self.message(
                        Severity::Warning,
                        format!("Could not fetch origin {}: {}", id, e),
                    ),
                }
                continue;
            }

            if let Some(id) = self.pending_event_ids.pop_front() {
                self.set_state(FetchState::FetchNextId);
                let mut filter = self.filter.for_event(&id);
                filter.include_mdps = true;
                match self.request(&build_url(&filter, &self.service)).await? {
                    Some(body) => {
                        self.set_state(FetchState::Parsing);
                        doc.add_events(&body)?;
                    }
                    None => self.message(Severity::Warning, format!("No data for event {}", id)),
                }
                continue;
            }

            break;
        }

        Ok(self.outcome(Document::QuakeMl(doc)))
    }

    /// Macroseismic parameter searches list events only; each needs its own
    /// query to bring in the data points
    fn expands_events(&self, doc: &QuakeMlDocument) -> bool {
        self.service.kind == ServiceKind::Macroseismic
            && self.service.settings.queryeventid
            && self.filter.event_id.is_none()
            && doc.mdps.is_empty()
            && !doc.events.is_empty()
    }

    fn queue_missing_origins(&mut self, doc: &QuakeMlDocument) {
        for id in doc.scan_for_missing_origins() {
            if !self.requested_origins.contains(&id) && !self.missing_origins.contains(&id) {
                self.missing_origins.push_back(id);
            }
        }
    }

    /// Issue one GET. `None` is a "no data" reply.
    async fn request(&mut self, url: &str) -> Result<Option<Vec<u8>>, FetchError> {
        if self.cancel.is_cancelled() {
            return Err(FetchError::Cancelled);
        }
        let sender = self.events.clone();
        let completed = self.requests;
        let queued = self.missing_origins.len() + self.pending_event_ids.len();
        let progress = move |received: u64, total: Option<u64>| {
            if let Some(sender) = &sender {
                let fraction = total.filter(|t| *t > 0).map(|t| received as f64 / t as f64);
                let _ = sender.send(FetcherEvent::Progress {
                    received,
                    total,
                    overall: overall_progress(completed, queued, fraction),
                });
            }
        };

        let reply = self.transport.get(url, &progress).await?;
        self.requests += 1;
        if self.cancel.is_cancelled() {
            return Err(FetchError::Cancelled);
        }

        if self.service.is_no_data(reply.status) {
            debug!("{} returned no data ({})", url, reply.status);
            return Ok(None);
        }
        if !reply.is_success() {
            return Err(FetchError::Network {
                url: url.to_string(),
                status: reply.status,
            });
        }
        Ok(Some(reply.body))
    }

    fn outcome(&mut self, document: Document) -> FetchOutcome {
        let limit_exceeded = self.service.limit().and_then(|limit| {
            let count = document.record_count();
            (count as u64 >= limit).then(|| LimitExceeded {
                count,
                limit,
                strategies: SplitStrategy::applicable(&self.filter, self.service.kind),
            })
        });
        if let Some(exceeded) = &limit_exceeded {
            self.message(
                Severity::Warning,
                format!(
                    "Query returned {} records, the service limit is {}; the result is likely incomplete",
                    exceeded.count, exceeded.limit
                ),
            );
            self.emit(FetcherEvent::LimitExceeded(exceeded.clone()));
        }
        FetchOutcome {
            document,
            requests: self.requests,
            limit_exceeded,
        }
    }

    /// Document kind a reply of this query is expected to have
    fn expected_kind(&self) -> DocumentKind {
        match (self.filter.output, self.service.kind) {
            (OutputKind::Basic, _) => DocumentKind::Text,
            (_, ServiceKind::Station) => DocumentKind::StationXml,
            _ => DocumentKind::QuakeMl,
        }
    }

    /// A fetcher for `filter` sharing transport, channel and cancellation
    fn child(&self, filter: Filter) -> Fetcher {
        let mut child = Fetcher::new(Arc::clone(&self.transport), self.service.clone(), filter)
            .with_cancel_handle(self.cancel.clone());
        child.events = self.events.clone();
        child.nested = true;
        child
    }

    fn set_state(&mut self, state: FetchState) {
        if self.state != state {
            debug!("Fetcher state {:?} -> {:?}", self.state, state);
            self.state = state;
            self.emit(FetcherEvent::State(state));
        }
    }

    fn message(&self, severity: Severity, text: String) {
        log!(severity.log_level(), "{}", text);
        self.emit(FetcherEvent::Message { severity, text });
    }

    fn emit(&self, event: FetcherEvent) {
        if let Some(sender) = &self.events {
            // a dropped receiver only means nobody listens
            let _ = sender.send(event);
        }
    }
}
