//! # Network Adapter
//!
//! A minimal async GET abstraction. [`HttpTransport`] talks to real services
//! through `reqwest`; [`CannedTransport`] replays stored replies for tests and
//! offline conversion.
//!
//! Transports never interpret status codes: every reply, successful or not,
//! is handed back to the fetcher, which decides what "no data" and failure
//! mean for its service.

mod canned;
mod error;
mod http;

#[cfg(test)]
mod tests;

use async_trait::async_trait;

pub use canned::CannedTransport;
pub use error::TransportError;
pub use http::HttpTransport;

/// Byte progress callback: `(received, total if known)`
pub type Progress<'a> = &'a (dyn Fn(u64, Option<u64>) + Send + Sync);

/// A completed HTTP exchange
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    /// Requested URL
    pub url: String,
    /// HTTP status code
    pub status: u16,
    /// Response body
    pub body: Vec<u8>,
}

impl Reply {
    /// A reply with the given status and body
    pub fn new(url: impl Into<String>, status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            url: url.into(),
            status,
            body: body.into(),
        }
    }

    /// Whether the status is 2xx
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Async HTTP GET
#[async_trait]
pub trait Transport: Send + Sync {
    /// Fetch `url`, reporting body bytes as they arrive
    async fn get(&self, url: &str, progress: Progress<'_>) -> Result<Reply, TransportError>;
}
