//! Credence Domain Layer
//!
//! Core model for the credibility client. It defines the shape of what is sent
//! to the external scorer, what comes back, and the trait boundaries behind
//! which the network lives.
//!
//! ## Key Concepts
//!
//! - **Submission**: a piece of information plus source, author and metadata
//! - **EvaluationResult**: the scorer's verdict (score, level, breakdown, reasoning)
//! - **BatchReport**: positional per-item outcomes of a multi-item request
//! - **HistoryEntry**: a past submission paired with its (optional) result
//! - **KnowledgeFact**: a predicate/arguments record from the shared knowledge base
//!
//! ## Architecture
//!
//! - Pure data and validation only, no I/O
//! - The models serialize to the scorer's camelCase JSON
//! - `Scorer` and `KnowledgeRepository` are implemented in `credence-sdk`

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod batch;
pub mod error;
pub mod history;
pub mod knowledge;
pub mod result;
pub mod submission;
pub mod traits;
pub mod validation;

// Re-exports for convenience
pub use batch::{BatchOutcome, BatchReport};
pub use error::ScorerError;
pub use history::HistoryEntry;
pub use knowledge::{AddFactsRequest, KnowledgeFact, EVALUATION_PREDICATE};
pub use result::{CredibilityBreakdown, CredibilityLevel, EvaluationResult};
pub use submission::{scenario_title, Author, Metadata, Source, SourceType, Submission};
pub use validation::{validate, ValidationReport};
