//! Batch report - positional outcomes of a multi-item scoring request

use crate::result::EvaluationResult;
use serde::{Deserialize, Serialize};

/// Outcome of one item in a batch
///
/// `index` is the position of the originating submission in the request;
/// the report does not echo submissions back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchOutcome {
    /// Position in the request list
    pub index: usize,

    /// Whether the item was scored
    pub success: bool,

    /// Result for a successful item
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<EvaluationResult>,

    /// Error text for a failed item
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl BatchOutcome {
    /// A successful outcome
    pub fn succeeded(index: usize, data: EvaluationResult) -> Self {
        Self {
            index,
            success: true,
            data: Some(data),
            error: None,
        }
    }

    /// A failed outcome
    pub fn failed(index: usize, error: impl Into<String>) -> Self {
        Self {
            index,
            success: false,
            data: None,
            error: Some(error.into()),
        }
    }
}

/// The scorer's report for a batch request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchReport {
    /// Number of items
    pub total: usize,
    /// Items scored
    pub successful: usize,
    /// Items not scored
    pub failed: usize,
    /// Outcomes in request order
    pub results: Vec<BatchOutcome>,
}

impl BatchReport {
    /// Build a report whose counters are derived from the outcomes
    pub fn from_outcomes(results: Vec<BatchOutcome>) -> Self {
        let successful = results.iter().filter(|r| r.success).count();
        Self {
            total: results.len(),
            successful,
            failed: results.len() - successful,
            results,
        }
    }

    /// Check `total == successful + failed == results.len()`
    pub fn is_consistent(&self) -> bool {
        self.total == self.successful + self.failed && self.total == self.results.len()
    }

    /// Successful outcomes that carry a result, in report order
    pub fn scored(&self) -> impl Iterator<Item = (usize, &EvaluationResult)> {
        self.results
            .iter()
            .filter(|r| r.success)
            .filter_map(|r| r.data.as_ref().map(|data| (r.index, data)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::{CredibilityBreakdown, CredibilityLevel};

    fn result(score: f64) -> EvaluationResult {
        EvaluationResult {
            score,
            level: CredibilityLevel::Doubtful,
            breakdown: CredibilityBreakdown::default(),
            reasoning: vec![],
            confidence: 50.0,
            timestamp: "2024-01-01T00:00:00.000Z".to_string(),
        }
    }

    #[test]
    fn test_from_outcomes_counts() {
        let report = BatchReport::from_outcomes(vec![
            BatchOutcome::succeeded(0, result(40.0)),
            BatchOutcome::failed(1, "rule engine timeout"),
            BatchOutcome::succeeded(2, result(90.0)),
        ]);

        assert_eq!(report.total, 3);
        assert_eq!(report.successful, 2);
        assert_eq!(report.failed, 1);
        assert!(report.is_consistent());
    }

    #[test]
    fn test_scored_skips_failures_and_missing_data() {
        let mut report = BatchReport::from_outcomes(vec![
            BatchOutcome::failed(0, "bad"),
            BatchOutcome::succeeded(1, result(10.0)),
        ]);
        report.results.push(BatchOutcome {
            index: 2,
            success: true,
            data: None,
            error: None,
        });

        let scored: Vec<usize> = report.scored().map(|(i, _)| i).collect();
        assert_eq!(scored, vec![1]);
    }

    #[test]
    fn test_report_parsing() {
        let json = r#"{
            "total": 2, "successful": 1, "failed": 1,
            "results": [
                {"index": 0, "success": false, "error": "Content too short"},
                {"index": 1, "success": true, "data": {
                    "score": 55, "level": "doubtful",
                    "breakdown": {"sourceScore": 50, "citationScore": 40, "languageScore": 70, "contradictionScore": 60},
                    "reasoning": [], "confidence": 65, "timestamp": "2024-01-01T00:00:00Z"
                }}
            ]
        }"#;

        let report: BatchReport = serde_json::from_str(json).unwrap();
        assert!(report.is_consistent());
        assert_eq!(report.results[0].error.as_deref(), Some("Content too short"));
        assert_eq!(report.results[1].data.as_ref().unwrap().score, 55.0);
    }

    #[test]
    fn test_inconsistent_report_detected() {
        let report = BatchReport {
            total: 3,
            successful: 1,
            failed: 1,
            results: vec![],
        };
        assert!(!report.is_consistent());
    }
}
