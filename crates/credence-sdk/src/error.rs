//! Error types for the Credence SDK.

use credence_domain::ScorerError;
use thiserror::Error;

/// SDK operation errors
#[derive(Debug, Error)]
pub enum SdkError {
    /// Connection error (network, DNS, refused, timeout)
    #[error("Connection error: {0}")]
    Connection(String),

    /// Server answered with a non-success status
    #[error("HTTP {status}: {message}")]
    Http {
        /// HTTP status code
        status: u16,
        /// Error text from the server
        message: String,
    },

    /// Server reported failure inside a successful response
    #[error("API error: {0}")]
    Api(String),

    /// Response body could not be decoded
    #[error("Decode error: {0}")]
    Decode(String),

    /// Any other request failure
    #[error("Request error: {0}")]
    Request(String),
}

impl From<reqwest::Error> for SdkError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_connect() || e.is_timeout() {
            SdkError::Connection(e.to_string())
        } else if e.is_decode() {
            SdkError::Decode(e.to_string())
        } else if e.is_status() {
            match e.status() {
                Some(status) => SdkError::Http {
                    status: status.as_u16(),
                    message: e.to_string(),
                },
                None => SdkError::Request(e.to_string()),
            }
        } else {
            SdkError::Request(e.to_string())
        }
    }
}

impl From<serde_json::Error> for SdkError {
    fn from(e: serde_json::Error) -> Self {
        SdkError::Decode(format!("JSON parsing error: {}", e))
    }
}

impl From<SdkError> for ScorerError {
    fn from(e: SdkError) -> Self {
        match e {
            SdkError::Connection(msg) | SdkError::Request(msg) => ScorerError::Connection(msg),
            SdkError::Http { status, message } => ScorerError::Status { status, message },
            SdkError::Api(msg) => ScorerError::Rejected(msg),
            SdkError::Decode(msg) => ScorerError::InvalidResponse(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scorer_error_mapping() {
        let err: ScorerError = SdkError::Http {
            status: 500,
            message: "boom".to_string(),
        }
        .into();
        assert_eq!(
            err,
            ScorerError::Status {
                status: 500,
                message: "boom".to_string()
            }
        );

        let err: ScorerError = SdkError::Api("nope".to_string()).into();
        assert_eq!(err, ScorerError::Rejected("nope".to_string()));
    }
}
