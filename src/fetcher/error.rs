use crate::document::DocumentError;
use crate::transport::TransportError;

use super::SplitStrategy;

/// Terminal failures of a fetch
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The service answered with an error status
    #[error("Service returned HTTP {status} for {url}")]
    Network {
        /// Requested URL
        url: String,
        /// HTTP status code
        status: u16,
    },

    /// The request did not complete
    #[error("Network error: {0}")]
    Transport(#[from] TransportError),

    /// The reply could not be parsed
    #[error("Parse error: {0}")]
    Parse(#[from] DocumentError),

    /// The filter lacks the bounds the strategy splits
    #[error("Cannot apply {0:?} to this filter")]
    Unsplittable(SplitStrategy),

    /// The fetch was cancelled
    #[error("Fetch cancelled")]
    Cancelled,
}
