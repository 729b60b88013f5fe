use async_trait::async_trait;
use log::debug;

use super::{Progress, Reply, Transport, TransportError};

/// `User-Agent` sent with every request
const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Upper bound on the buffer reserved from a reply's `Content-Length`
const MAX_PREALLOCATION: u64 = 1 << 24;

/// Buffer size to reserve for a body of announced length `total`
pub(super) fn initial_capacity(total: Option<u64>) -> usize {
    total.unwrap_or(0).min(MAX_PREALLOCATION) as usize
}

/// GET over HTTP(S) with `reqwest`.
///
/// No request timeout is set; the client's defaults apply to every request.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Create a transport with a fresh client
    pub fn new() -> Result<Self, TransportError> {
        let client = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self { client })
    }

    /// Use an existing client
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &str, progress: Progress<'_>) -> Result<Reply, TransportError> {
        debug!("GET {}", url);
        let mut response = self.client.get(url).send().await?;
        let status = response.status().as_u16();
        let total = response.content_length();

        let mut body = Vec::with_capacity(initial_capacity(total));
        while let Some(chunk) = response.chunk().await? {
            body.extend_from_slice(&chunk);
            progress(body.len() as u64, total);
        }
        debug!("{} answered {} with {} bytes", url, status, body.len());

        Ok(Reply {
            url: url.to_string(),
            status,
            body,
        })
    }
}
