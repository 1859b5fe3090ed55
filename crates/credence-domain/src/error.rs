//! Transport-level errors reported by scorer and knowledge backends

use thiserror::Error;

/// A request to the scorer or knowledge base failed as a whole
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScorerError {
    /// Backend unreachable (network, DNS, refused connection)
    #[error("Connection error: {0}")]
    Connection(String),

    /// Backend answered with a non-success HTTP status
    #[error("HTTP {status}: {message}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Error text from the backend
        message: String,
    },

    /// Backend answered but reported failure
    #[error("Request rejected: {0}")]
    Rejected(String),

    /// Backend answered with a payload that could not be decoded
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}
