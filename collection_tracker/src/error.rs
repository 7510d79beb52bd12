//! Error types for collection_tracker

use thiserror::Error;

/// Unified error type for tracker operations
#[derive(Debug, Error)]
pub enum TrackerError {
    /// Reference-data download or decode failed
    #[error(transparent)]
    Fetch(#[from] mtgo_common::FetchError),
    /// Filesystem operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Malformed collection JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// A history table row that does not follow the table schema
    #[error("Malformed history row: {0}")]
    HistoryFormat(String),
}

/// Result alias for tracker operations
pub type Result<T> = std::result::Result<T, TrackerError>;
