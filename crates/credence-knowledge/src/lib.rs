//! Credence Knowledge Layer
//!
//! Browsing and extending the shared knowledge base of prior evaluations.
//!
//! # Architecture
//!
//! - `decoder`: pure functions turning raw `evaluation` facts into
//!   displayable records (dedupe, reasoning rewrite, score extraction)
//! - `store`: `KnowledgeStore`, which fetches facts through a
//!   `KnowledgeRepository` and feeds them to the decoder
//!
//! # Examples
//!
//! ```
//! use credence_domain::KnowledgeFact;
//! use credence_knowledge::decode;
//!
//! let fact = KnowledgeFact::new("evaluation", vec![
//!     "Vaccines cause autism".into(),
//!     "suspect".into(),
//!     "12.4".into(),
//!     "Source type: social (score: 0.2); hasEmotionalLanguage: true".into(),
//! ]);
//!
//! let display = decode(&fact).unwrap();
//! assert_eq!(display.score_percent, Some(12));
//! assert_eq!(display.points[0].text, "Source: Social (20%)");
//! assert_eq!(display.points[1].text, "hasEmotionalLanguage: YES");
//! ```

#![warn(missing_docs)]

pub mod decoder;
pub mod error;
pub mod store;

pub use decoder::{decode, decode_all, dedupe_evaluations, DisplayFact, ReasoningPoint, ScoreBand};
pub use error::KnowledgeError;
pub use store::KnowledgeStore;
