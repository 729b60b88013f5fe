/// Errors that can occur while writing a feature table
#[derive(Debug, thiserror::Error)]
pub enum WriterError {
    /// I/O error during file operations
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error from the Arrow library during array operations
    #[error("Arrow error: {0}")]
    ArrowError(#[from] arrow::error::ArrowError),

    /// Error from the Parquet library during file writing
    #[error("Parquet error: {0}")]
    ParquetError(#[from] parquet::errors::ParquetError),

    /// GeoJSON serialization failed
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// CSV serialization failed
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    /// The finished temporary file could not be moved into place
    #[error("Failed to persist output: {0}")]
    PersistError(#[from] tempfile::PersistError),

    /// The output path names no known format
    #[error("Cannot infer output format from {0}")]
    UnknownFormat(String),
}
