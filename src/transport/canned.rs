use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use super::{Progress, Reply, Transport, TransportError};

/// Replays stored replies keyed on the exact URL.
///
/// Every requested URL is recorded, in order, whether a reply exists or not.
#[derive(Debug, Default)]
pub struct CannedTransport {
    replies: HashMap<String, (u16, Vec<u8>)>,
    requests: Mutex<Vec<String>>,
}

impl CannedTransport {
    /// A transport with no replies
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `url` with status 200 and `body`
    pub fn with_body(self, url: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        self.with_reply(url, 200, body)
    }

    /// Answer `url` with `status` and `body`
    pub fn with_reply(
        mut self,
        url: impl Into<String>,
        status: u16,
        body: impl Into<Vec<u8>>,
    ) -> Self {
        self.replies.insert(url.into(), (status, body.into()));
        self
    }

    /// URLs requested so far
    pub fn requests(&self) -> Vec<String> {
        match self.requests.lock() {
            Ok(requests) => requests.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

#[async_trait]
impl Transport for CannedTransport {
    async fn get(&self, url: &str, progress: Progress<'_>) -> Result<Reply, TransportError> {
        match self.requests.lock() {
            Ok(mut requests) => requests.push(url.to_string()),
            Err(poisoned) => poisoned.into_inner().push(url.to_string()),
        }
        let (status, body) = self
            .replies
            .get(url)
            .ok_or_else(|| TransportError::Unavailable(url.to_string()))?;
        let size = body.len() as u64;
        progress(size, Some(size));
        Ok(Reply::new(url, *status, body.clone()))
    }
}
