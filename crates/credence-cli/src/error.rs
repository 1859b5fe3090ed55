//! Error types for the CLI application.

use credence_evaluator::EvaluationError;
use credence_knowledge::KnowledgeError;
use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Scorer unreachable or unhealthy
    #[error("Connection error: {0}")]
    Connection(String),

    /// Evaluation error
    #[error("{0}")]
    Evaluation(#[from] EvaluationError),

    /// Knowledge base error
    #[error("Knowledge base error: {0}")]
    Knowledge(#[from] KnowledgeError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Operation not permitted
    #[error("Operation not permitted: {0}")]
    NotPermitted(String),
}
