//! Credence History
//!
//! A bounded, persistent log of past evaluations.
//!
//! # Architecture
//!
//! - `HistoryStore` keeps the most recent 50 entries, newest first
//! - Every mutation is written through to a `HistoryBackend` immediately
//! - Backend failures are logged and swallowed; the in-memory sequence stays
//!   authoritative for the running process
//!
//! # Examples
//!
//! ```
//! use credence_domain::Submission;
//! use credence_history::{HistoryStore, MemoryBackend};
//!
//! let mut history = HistoryStore::open(MemoryBackend::new());
//! let entry = history.append(Submission::new("Test"), None);
//! assert_eq!(history.list()[0].id, entry.id);
//! ```

#![warn(missing_docs)]

pub mod backend;
pub mod error;
pub mod store;

pub use backend::{FileBackend, HistoryBackend, MemoryBackend};
pub use error::HistoryError;
pub use store::{HistoryStore, HISTORY_KEY, MAX_ENTRIES};
