//! Evaluation results as produced by the external scorer
//!
//! The client never synthesizes a result; these types only carry what the
//! scorer returned.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Categorical credibility verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CredibilityLevel {
    /// Likely false or manipulative
    Suspect,
    /// Uncertain
    Doubtful,
    /// Likely reliable
    Credible,
}

impl CredibilityLevel {
    /// Wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            CredibilityLevel::Suspect => "suspect",
            CredibilityLevel::Doubtful => "doubtful",
            CredibilityLevel::Credible => "credible",
        }
    }

    /// Parse from the wire representation (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "suspect" => Some(CredibilityLevel::Suspect),
            "doubtful" => Some(CredibilityLevel::Doubtful),
            "credible" => Some(CredibilityLevel::Credible),
            _ => None,
        }
    }
}

impl fmt::Display for CredibilityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-category sub-scores contributing to the overall score
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredibilityBreakdown {
    /// Source reliability
    pub source_score: f64,
    /// Citation quality
    pub citation_score: f64,
    /// Language neutrality
    pub language_score: f64,
    /// Absence of contradictions
    pub contradiction_score: f64,
}

impl CredibilityBreakdown {
    /// Categories with their display name and weight, in display order
    pub fn categories(&self) -> [(&'static str, f64, &'static str); 4] {
        [
            ("Source", self.source_score, "40%"),
            ("Citations", self.citation_score, "30%"),
            ("Language", self.language_score, "20%"),
            ("Contradictions", self.contradiction_score, "10%"),
        ]
    }
}

/// The scorer's response for one submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    /// Overall score in [0, 100]
    pub score: f64,

    /// Categorical verdict
    pub level: CredibilityLevel,

    /// Sub-scores
    pub breakdown: CredibilityBreakdown,

    /// Ordered reasoning lines
    #[serde(default)]
    pub reasoning: Vec<String>,

    /// Confidence in [0, 100]
    pub confidence: f64,

    /// ISO-8601 evaluation timestamp
    pub timestamp: String,
}
