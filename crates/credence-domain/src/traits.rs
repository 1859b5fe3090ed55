//! Trait definitions for external interactions
//!
//! These traits define the boundaries between the client logic and the
//! network. The HTTP implementations and in-memory fakes live in
//! `credence-sdk`.

use crate::{AddFactsRequest, BatchReport, EvaluationResult, KnowledgeFact, ScorerError, Submission};
use async_trait::async_trait;
use std::collections::BTreeMap;

/// Canned submissions keyed by scenario name
pub type TestScenarios = BTreeMap<String, Submission>;

/// The external credibility scorer
#[async_trait]
pub trait Scorer: Send + Sync {
    /// Score one submission
    async fn evaluate(&self, submission: &Submission) -> Result<EvaluationResult, ScorerError>;

    /// Fetch the canned test scenarios
    async fn test_scenarios(&self) -> Result<TestScenarios, ScorerError>;

    /// Score several submissions in one request
    async fn evaluate_batch(&self, items: &[Submission]) -> Result<BatchReport, ScorerError>;

    /// Liveness flag
    async fn health(&self) -> Result<bool, ScorerError>;
}

/// The shared knowledge base
#[async_trait]
pub trait KnowledgeRepository: Send + Sync {
    /// Add facts
    async fn add_facts(&self, request: &AddFactsRequest) -> Result<(), ScorerError>;

    /// List every stored fact
    async fn list_facts(&self) -> Result<Vec<KnowledgeFact>, ScorerError>;
}
