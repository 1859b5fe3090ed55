//! Error types for history persistence

use thiserror::Error;

/// Errors raised by history backends
///
/// These never escape `HistoryStore`; they are logged instead.
#[derive(Debug, Error)]
pub enum HistoryError {
    /// Filesystem error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored history could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Backend-specific failure
    #[error("Backend error: {0}")]
    Backend(String),
}
