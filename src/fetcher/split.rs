use std::collections::VecDeque;

use log::info;
use serde::{Deserialize, Serialize};

use super::{FetchError, FetchOutcome, FetchState, Fetcher, Severity};
use crate::document::Document;
use crate::query::{Filter, ServiceKind};

/// How an over-limit query is divided into smaller ones
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SplitStrategy {
    /// Halve the time window
    BisectTime,
    /// Halve the magnitude window
    BisectMagnitude,
}

impl SplitStrategy {
    /// Both halves of `filter`, when it has the bounds this strategy splits
    pub fn split(&self, filter: &Filter) -> Option<(Filter, Filter)> {
        match self {
            SplitStrategy::BisectTime => filter.bisect_time(),
            SplitStrategy::BisectMagnitude => filter.bisect_magnitude(),
        }
    }

    /// Strategies that can split `filter` for a service of `kind`
    pub fn applicable(filter: &Filter, kind: ServiceKind) -> Vec<SplitStrategy> {
        [SplitStrategy::BisectTime, SplitStrategy::BisectMagnitude]
            .into_iter()
            .filter(|s| !(kind == ServiceKind::Station && *s == SplitStrategy::BisectMagnitude))
            .filter(|s| s.split(filter).is_some())
            .collect()
    }
}

impl Fetcher {
    /// Run the query as bisected child fetches and concatenate the results.
    ///
    /// Children that still hit the limit are split again until `max_depth`.
    /// Records already collected (by public ID, `NET.STA` or first text
    /// column) are dropped from later children. The outcome reports a limit
    /// only if some child at `max_depth` still hit it.
    ///
    /// Children share the channel for state and progress. Only this fetcher
    /// sends the terminal signal.
    pub async fn fetch_split(
        &mut self,
        strategy: SplitStrategy,
        max_depth: usize,
    ) -> Result<FetchOutcome, FetchError> {
        let (first, second) = strategy
            .split(&self.filter)
            .ok_or(FetchError::Unsplittable(strategy))?;
        let result = self.run_split(strategy, max_depth, first, second).await;
        self.conclude(result)
    }

    async fn run_split(
        &mut self,
        strategy: SplitStrategy,
        max_depth: usize,
        first: Filter,
        second: Filter,
    ) -> Result<FetchOutcome, FetchError> {
        if self.cancel.is_cancelled() {
            return Err(FetchError::Cancelled);
        }
        self.set_state(FetchState::Requesting);
        let mut queue: VecDeque<(Filter, usize)> = VecDeque::from([(first, 1), (second, 1)]);

        let mut document: Option<Document> = None;
        let mut requests = 0;
        let mut duplicates = 0;
        let mut limit_exceeded = None;

        while let Some((filter, depth)) = queue.pop_front() {
            let mut child = self.child(filter.clone());
            let outcome = child.fetch_data().await?;
            requests += outcome.requests;

            if let Some(limit) = outcome.limit_exceeded {
                if depth < max_depth {
                    if let Some((a, b)) = strategy.split(&filter) {
                        info!("Splitting over-limit child query again (depth {})", depth + 1);
                        queue.push_front((b, depth + 1));
                        queue.push_front((a, depth + 1));
                        continue;
                    }
                }
                limit_exceeded = Some(limit);
            }

            match document.as_mut() {
                Some(document) => duplicates += document.merge(outcome.document),
                None => document = Some(outcome.document),
            }
        }

        let document = document.unwrap_or_else(|| Document::empty(self.expected_kind()));
        self.message(
            Severity::Info,
            format!(
                "Split query returned {} records ({} duplicates dropped)",
                document.record_count(),
                duplicates
            ),
        );
        Ok(FetchOutcome {
            document,
            requests,
            limit_exceeded,
        })
    }
}
