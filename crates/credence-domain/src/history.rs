//! History entry - a past submission paired with its optional result

use crate::result::EvaluationResult;
use crate::submission::Submission;
use serde::{Deserialize, Serialize};

/// One record in the evaluation history
///
/// Entries are never edited; re-evaluating creates a new entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Unique identifier
    pub id: String,

    /// The submission as sent
    pub input: Submission,

    /// The scorer's result, absent when evaluation failed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<EvaluationResult>,

    /// ISO-8601 creation time
    pub timestamp: String,
}
