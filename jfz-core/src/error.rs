//! Error types for JFZ conversions

use thiserror::Error;

/// JFZ error types
#[derive(Debug, Error)]
pub enum ConvertError {
    /// The conversion was aborted through its cancellation flag.
    #[error("Conversion cancelled")]
    Cancelled,
    /// A configured resource limit was exceeded.
    #[error("Limit exceeded: {0}")]
    LimitExceeded(String),
    /// Archive serialization or compression failed.
    #[error("Archive error: {0}")]
    Archive(String),
    /// I/O operation failed while writing archive data.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// Internal invariant was violated.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, ConvertError>;
