//! Error types for the knowledge layer

use credence_domain::ScorerError;
use thiserror::Error;

/// Errors that can occur while reading or extending the knowledge base
#[derive(Error, Debug)]
pub enum KnowledgeError {
    /// The knowledge base could not be reached or refused the request
    #[error("Knowledge base error: {0}")]
    Transport(#[from] ScorerError),

    /// A fact to add is malformed; nothing was sent
    #[error("Invalid fact: {0}")]
    InvalidFact(String),
}
