//! Errors surfaced by the evaluator

use crate::guard::Action;
use credence_domain::{ScorerError, ValidationReport};
use thiserror::Error;

/// Evaluation errors
#[derive(Debug, Error)]
pub enum EvaluationError {
    /// The submission failed local validation and was not sent
    #[error("Validation failed: {0}")]
    Validation(ValidationReport),

    /// One or more batch items failed local validation; nothing was sent
    #[error("Batch validation failed for {} item(s)", .items.len())]
    BatchValidation {
        /// Position and report of every invalid item
        items: Vec<(usize, ValidationReport)>,
    },

    /// Batch size outside the accepted range; nothing was sent
    #[error("Batch must contain between {min} and {max} items, got {count}")]
    BatchSize {
        /// Number of items supplied
        count: usize,
        /// Smallest accepted batch
        min: usize,
        /// Largest accepted batch
        max: usize,
    },

    /// The request failed as a whole
    #[error(transparent)]
    Transport(#[from] ScorerError),

    /// The same action already has a request outstanding
    #[error("A {0} request is already in flight")]
    InFlight(Action),

    /// No history entry has this id
    #[error("History entry not found: {0}")]
    NotFound(String),

    /// The scorer offers no scenario with this name
    #[error("Unknown test scenario: {0}")]
    UnknownScenario(String),
}
