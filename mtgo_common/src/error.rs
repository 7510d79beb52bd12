//! Error type for reference-data acquisition and decoding.

use thiserror::Error;

/// Unified error for fetching and decoding reference data.
#[derive(Debug, Error)]
pub enum FetchError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    /// Failed to parse a JSON document
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    /// HTTP error status code
    #[error("HTTP error: {0}")]
    HttpStatus(reqwest::StatusCode),
    /// Filesystem read failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for reference-data operations
pub type Result<T> = std::result::Result<T, FetchError>;
