/// Errors raised below the HTTP status level
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// Connection, TLS or body transfer failure
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// No reply is available for the URL
    #[error("No reply available for {0}")]
    Unavailable(String),
}
