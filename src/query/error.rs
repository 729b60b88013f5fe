use std::io;

/// Errors raised while loading a service catalog
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// The catalog file could not be read
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The catalog is not valid service JSON
    #[error("Invalid service catalog: {0}")]
    Json(#[from] serde_json::Error),

    /// No entry with the requested name
    #[error("Unknown service: {0}")]
    UnknownService(String),
}
