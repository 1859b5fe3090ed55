//! Credence Evaluator
//!
//! Orchestrates submissions to the scorer and records outcomes in the
//! history.
//!
//! # Architecture
//!
//! - Every submission is validated locally; invalid input is never sent
//! - Batches are checked as a whole (size and every item) before dispatch
//! - Successful batch items are recorded one by one, paired positionally
//!   with the request items
//! - Each action kind allows one outstanding request at a time
//!
//! # Examples
//!
//! ```
//! use credence_domain::Submission;
//! use credence_evaluator::Evaluator;
//! use credence_history::{HistoryStore, MemoryBackend};
//! use credence_sdk::mock::{sample_result, MockScorer};
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let evaluator = Evaluator::new(MockScorer::new(sample_result(72.0)));
//! let mut history = HistoryStore::open(MemoryBackend::new());
//!
//! let result = evaluator.submit(&Submission::new("Test"), &mut history).await.unwrap();
//! assert_eq!(result.score, 72.0);
//! assert_eq!(history.len(), 1);
//! # });
//! ```

#![warn(missing_docs)]

pub mod error;
pub mod evaluator;
mod guard;

pub use error::EvaluationError;
pub use evaluator::{Evaluator, MAX_BATCH_ITEMS, MIN_BATCH_ITEMS};
pub use guard::Action;
