//! In-memory stand-ins for the scorer and the knowledge base.
//!
//! Both types share their state between clones, so a test can hand one
//! clone to the code under test and inspect the other.
//!
//! ```
//! use credence_domain::traits::Scorer;
//! use credence_domain::Submission;
//! use credence_sdk::mock::{sample_result, MockScorer};
//!
//! # tokio_test_block(async {
//! let scorer = MockScorer::new(sample_result(72.0));
//! let result = scorer.evaluate(&Submission::new("Test")).await.unwrap();
//! assert_eq!(result.score, 72.0);
//! assert_eq!(scorer.evaluate_calls(), 1);
//! # });
//! # fn tokio_test_block<F: std::future::Future>(f: F) -> F::Output {
//! #     tokio::runtime::Runtime::new().unwrap().block_on(f)
//! # }
//! ```

use async_trait::async_trait;
use credence_domain::traits::{KnowledgeRepository, Scorer, TestScenarios};
use credence_domain::{
    AddFactsRequest, BatchOutcome, BatchReport, CredibilityBreakdown, CredibilityLevel,
    EvaluationResult, KnowledgeFact, ScorerError, Submission,
};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

/// A plausible result with the given score
///
/// The level follows the score: below 40 is suspect, below 70 doubtful.
pub fn sample_result(score: f64) -> EvaluationResult {
    let level = if score >= 70.0 {
        CredibilityLevel::Credible
    } else if score >= 40.0 {
        CredibilityLevel::Doubtful
    } else {
        CredibilityLevel::Suspect
    };

    EvaluationResult {
        score,
        level,
        breakdown: CredibilityBreakdown {
            source_score: score,
            citation_score: score,
            language_score: score,
            contradiction_score: score,
        },
        reasoning: vec!["Source type: news (score: 0.6)".to_string()],
        confidence: 80.0,
        timestamp: "2024-05-01T10:00:00.000Z".to_string(),
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[derive(Debug, Default)]
struct ScorerState {
    default_result: Option<EvaluationResult>,
    queued: VecDeque<EvaluationResult>,
    batch_report: Option<BatchReport>,
    failure: Option<ScorerError>,
    scenarios: TestScenarios,
    healthy: bool,
    delay: Option<Duration>,
    submitted: Vec<Submission>,
    evaluate_calls: usize,
    scenario_calls: usize,
    batch_calls: usize,
    health_calls: usize,
}

/// Scripted scorer
///
/// Single evaluations return queued results first, then the default result.
/// Batches return the scripted report when one is set; otherwise every item
/// is scored like a single evaluation.
#[derive(Debug, Clone, Default)]
pub struct MockScorer {
    state: Arc<Mutex<ScorerState>>,
}

impl MockScorer {
    /// Create a healthy scorer returning `result` for every submission
    pub fn new(result: EvaluationResult) -> Self {
        let scorer = Self::default();
        {
            let mut state = lock(&scorer.state);
            state.default_result = Some(result);
            state.healthy = true;
        }
        scorer
    }

    /// Return `result` for the next evaluation only
    pub fn push_result(&self, result: EvaluationResult) {
        lock(&self.state).queued.push_back(result);
    }

    /// Return `report` verbatim for every batch
    pub fn set_batch_report(&self, report: BatchReport) {
        lock(&self.state).batch_report = Some(report);
    }

    /// Script per-item batch outcomes; counters are derived from them
    pub fn set_batch_outcomes(&self, outcomes: Vec<BatchOutcome>) {
        self.set_batch_report(BatchReport::from_outcomes(outcomes));
    }

    /// Fail every request with `error` until [`recover`](Self::recover)
    pub fn fail_with(&self, error: ScorerError) {
        lock(&self.state).failure = Some(error);
    }

    /// Stop failing
    pub fn recover(&self) {
        lock(&self.state).failure = None;
    }

    /// Register a canned scenario
    pub fn add_scenario(&self, name: impl Into<String>, submission: Submission) {
        lock(&self.state).scenarios.insert(name.into(), submission);
    }

    /// Set the liveness flag
    pub fn set_healthy(&self, healthy: bool) {
        lock(&self.state).healthy = healthy;
    }

    /// Suspend every request for `delay` before answering
    pub fn set_delay(&self, delay: Duration) {
        lock(&self.state).delay = Some(delay);
    }

    /// Submissions received by `evaluate`, in order
    pub fn submitted(&self) -> Vec<Submission> {
        lock(&self.state).submitted.clone()
    }

    /// Number of `evaluate` calls
    pub fn evaluate_calls(&self) -> usize {
        lock(&self.state).evaluate_calls
    }

    /// Number of `test_scenarios` calls
    pub fn scenario_calls(&self) -> usize {
        lock(&self.state).scenario_calls
    }

    /// Number of `evaluate_batch` calls
    pub fn batch_calls(&self) -> usize {
        lock(&self.state).batch_calls
    }

    /// Number of `health` calls
    pub fn health_calls(&self) -> usize {
        lock(&self.state).health_calls
    }

    async fn pause(&self) {
        let delay = lock(&self.state).delay;
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
    }

    fn next_result(state: &mut ScorerState) -> Result<EvaluationResult, ScorerError> {
        state
            .queued
            .pop_front()
            .or_else(|| state.default_result.clone())
            .ok_or_else(|| ScorerError::Rejected("No result configured".to_string()))
    }
}

#[async_trait]
impl Scorer for MockScorer {
    async fn evaluate(&self, submission: &Submission) -> Result<EvaluationResult, ScorerError> {
        {
            let mut state = lock(&self.state);
            state.evaluate_calls += 1;
            state.submitted.push(submission.clone());
        }
        self.pause().await;

        let mut state = lock(&self.state);
        if let Some(error) = &state.failure {
            return Err(error.clone());
        }
        Self::next_result(&mut state)
    }

    async fn test_scenarios(&self) -> Result<TestScenarios, ScorerError> {
        lock(&self.state).scenario_calls += 1;
        self.pause().await;

        let state = lock(&self.state);
        if let Some(error) = &state.failure {
            return Err(error.clone());
        }
        Ok(state.scenarios.clone())
    }

    async fn evaluate_batch(&self, items: &[Submission]) -> Result<BatchReport, ScorerError> {
        lock(&self.state).batch_calls += 1;
        self.pause().await;

        let mut state = lock(&self.state);
        if let Some(error) = &state.failure {
            return Err(error.clone());
        }
        if let Some(report) = &state.batch_report {
            return Ok(report.clone());
        }

        let outcomes = (0..items.len())
            .map(|index| match Self::next_result(&mut state) {
                Ok(result) => BatchOutcome::succeeded(index, result),
                Err(e) => BatchOutcome::failed(index, e.to_string()),
            })
            .collect();
        Ok(BatchReport::from_outcomes(outcomes))
    }

    async fn health(&self) -> Result<bool, ScorerError> {
        let mut state = lock(&self.state);
        state.health_calls += 1;
        if let Some(error) = &state.failure {
            return Err(error.clone());
        }
        Ok(state.healthy)
    }
}

#[derive(Debug, Default)]
struct KnowledgeState {
    facts: Vec<KnowledgeFact>,
    requests: Vec<AddFactsRequest>,
    failure: Option<String>,
}

/// Append-only in-memory knowledge base
#[derive(Debug, Clone, Default)]
pub struct MemoryKnowledgeBase {
    state: Arc<Mutex<KnowledgeState>>,
}

impl MemoryKnowledgeBase {
    /// Create a knowledge base holding `facts`
    pub fn with_facts(facts: Vec<KnowledgeFact>) -> Self {
        let base = Self::default();
        lock(&base.state).facts = facts;
        base
    }

    /// Fail every request with `message`
    pub fn fail_with(&self, message: impl Into<String>) {
        lock(&self.state).failure = Some(message.into());
    }

    /// Number of accepted `add_facts` calls
    pub fn add_calls(&self) -> usize {
        lock(&self.state).requests.len()
    }

    /// The most recent accepted `add_facts` request
    pub fn last_request(&self) -> Option<AddFactsRequest> {
        lock(&self.state).requests.last().cloned()
    }

    /// Every stored fact
    pub fn facts(&self) -> Vec<KnowledgeFact> {
        lock(&self.state).facts.clone()
    }
}

#[async_trait]
impl KnowledgeRepository for MemoryKnowledgeBase {
    async fn add_facts(&self, request: &AddFactsRequest) -> Result<(), ScorerError> {
        let mut state = lock(&self.state);
        if let Some(message) = &state.failure {
            return Err(ScorerError::Connection(message.clone()));
        }
        state.facts.extend(request.facts.iter().cloned());
        state.requests.push(request.clone());
        Ok(())
    }

    async fn list_facts(&self) -> Result<Vec<KnowledgeFact>, ScorerError> {
        let state = lock(&self.state);
        if let Some(message) = &state.failure {
            return Err(ScorerError::Connection(message.clone()));
        }
        Ok(state.facts.clone())
    }
}
