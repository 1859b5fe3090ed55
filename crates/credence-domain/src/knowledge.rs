//! Knowledge base facts

use serde::{Deserialize, Serialize};

/// Predicate used by the scorer when it records an evaluation
///
/// By convention the arguments are `[content, level, score, reasoning]` and
/// the comment may embed a timestamp after `" at "`.
pub const EVALUATION_PREDICATE: &str = "evaluation";

/// A structured fact in the shared knowledge base
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeFact {
    /// Predicate name
    pub predicate: String,

    /// Ordered arguments
    #[serde(default)]
    pub arguments: Vec<String>,

    /// Free-form comment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl KnowledgeFact {
    /// Create a fact without a comment
    pub fn new(predicate: impl Into<String>, arguments: Vec<String>) -> Self {
        Self {
            predicate: predicate.into(),
            arguments,
            comment: None,
        }
    }

    /// Attach a comment
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Whether this fact records an evaluation
    pub fn is_evaluation(&self) -> bool {
        self.predicate == EVALUATION_PREDICATE
    }
}

/// Body of a request adding facts to the knowledge base
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddFactsRequest {
    /// Facts to add
    pub facts: Vec<KnowledgeFact>,

    /// Where the facts came from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    /// When the facts expire
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration: Option<String>,
}
