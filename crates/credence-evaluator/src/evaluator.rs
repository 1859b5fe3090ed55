//! Submission and batch orchestration

use crate::error::EvaluationError;
use crate::guard::{Action, InFlight};
use credence_domain::traits::{Scorer, TestScenarios};
use credence_domain::{validate, BatchReport, EvaluationResult, Submission};
use credence_history::HistoryStore;
use tracing::{debug, info, warn};

/// Smallest accepted batch
pub const MIN_BATCH_ITEMS: usize = 1;

/// Largest accepted batch
pub const MAX_BATCH_ITEMS: usize = 10;

/// Sends submissions to a scorer and records the outcomes
///
/// The history is passed to each call rather than owned, so one store can
/// be shared by whatever else needs it.
pub struct Evaluator<S> {
    scorer: S,
    in_flight: InFlight,
}

impl<S: Scorer> Evaluator<S> {
    /// Create an evaluator backed by `scorer`
    pub fn new(scorer: S) -> Self {
        Self {
            scorer,
            in_flight: InFlight::default(),
        }
    }

    /// Access the underlying scorer
    pub fn scorer(&self) -> &S {
        &self.scorer
    }

    /// Whether `action` has a request outstanding
    pub fn is_in_flight(&self, action: Action) -> bool {
        self.in_flight.is_set(action)
    }

    /// Validate and score one submission
    ///
    /// Every dispatched submission is recorded, with its result when the
    /// scorer answered and without one when the request failed.
    pub async fn submit(
        &self,
        submission: &Submission,
        history: &mut HistoryStore,
    ) -> Result<EvaluationResult, EvaluationError> {
        let _guard = self.in_flight.acquire(Action::Submit)?;
        self.dispatch(submission, history).await
    }

    /// Fetch the canned test scenarios
    pub async fn scenarios(&self) -> Result<TestScenarios, EvaluationError> {
        Ok(self.scorer.test_scenarios().await?)
    }

    /// Score the named canned scenario
    pub async fn submit_scenario(
        &self,
        name: &str,
        history: &mut HistoryStore,
    ) -> Result<EvaluationResult, EvaluationError> {
        let _guard = self.in_flight.acquire(Action::Scenario)?;

        let mut scenarios = self.scorer.test_scenarios().await?;
        let submission = scenarios
            .remove(name)
            .ok_or_else(|| EvaluationError::UnknownScenario(name.to_string()))?;

        self.dispatch(&submission, history).await
    }

    /// Score several submissions in one request
    ///
    /// The report is returned as the scorer produced it. Each successful
    /// item is recorded with the request item at its index. A failed
    /// request records nothing.
    pub async fn evaluate_batch(
        &self,
        items: &[Submission],
        history: &mut HistoryStore,
    ) -> Result<BatchReport, EvaluationError> {
        let _guard = self.in_flight.acquire(Action::Batch)?;

        if !(MIN_BATCH_ITEMS..=MAX_BATCH_ITEMS).contains(&items.len()) {
            return Err(EvaluationError::BatchSize {
                count: items.len(),
                min: MIN_BATCH_ITEMS,
                max: MAX_BATCH_ITEMS,
            });
        }

        let invalid: Vec<_> = items
            .iter()
            .enumerate()
            .map(|(idx, item)| (idx, validate(item)))
            .filter(|(_, report)| !report.is_valid())
            .collect();
        if !invalid.is_empty() {
            return Err(EvaluationError::BatchValidation { items: invalid });
        }

        let report = match self.scorer.evaluate_batch(items).await {
            Ok(report) => report,
            Err(e) => {
                warn!("Batch evaluation of {} items failed: {}", items.len(), e);
                return Err(e.into());
            }
        };

        if !report.is_consistent() {
            warn!(
                "Batch report counters disagree: total={} successful={} failed={} results={}",
                report.total,
                report.successful,
                report.failed,
                report.results.len()
            );
        }

        for outcome in report.results.iter().filter(|o| o.success) {
            let Some(data) = &outcome.data else {
                warn!("Batch item {} marked successful without a result", outcome.index);
                continue;
            };
            match items.get(outcome.index) {
                Some(item) => {
                    history.append(item.clone(), Some(data.clone()));
                }
                None => warn!(
                    "Batch result index {} is out of range for {} items",
                    outcome.index,
                    items.len()
                ),
            }
        }

        info!(
            "Batch evaluated: {} successful, {} failed",
            report.successful, report.failed
        );
        Ok(report)
    }

    /// Score a past entry's input again as a new entry
    pub async fn reevaluate(
        &self,
        id: &str,
        history: &mut HistoryStore,
    ) -> Result<EvaluationResult, EvaluationError> {
        let _guard = self.in_flight.acquire(Action::Reevaluate)?;

        let input = history
            .get(id)
            .map(|entry| entry.input.clone())
            .ok_or_else(|| EvaluationError::NotFound(id.to_string()))?;

        debug!("Re-evaluating history entry {}", id);
        self.dispatch(&input, history).await
    }

    /// Scorer liveness; a failed check counts as unhealthy
    pub async fn health(&self) -> bool {
        match self.scorer.health().await {
            Ok(healthy) => healthy,
            Err(e) => {
                warn!("API health check failed: {}", e);
                false
            }
        }
    }

    async fn dispatch(
        &self,
        submission: &Submission,
        history: &mut HistoryStore,
    ) -> Result<EvaluationResult, EvaluationError> {
        let report = validate(submission);
        if !report.is_valid() {
            return Err(EvaluationError::Validation(report));
        }

        match self.scorer.evaluate(submission).await {
            Ok(result) => {
                history.append(submission.clone(), Some(result.clone()));
                info!("Evaluated submission: score {} ({})", result.score, result.level);
                Ok(result)
            }
            Err(e) => {
                warn!("Evaluation request failed: {}", e);
                history.append(submission.clone(), None);
                Err(e.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use credence_domain::{BatchOutcome, ScorerError};
    use credence_history::MemoryBackend;
    use credence_sdk::mock::{sample_result, MockScorer};
    use proptest::prelude::*;
    use std::time::Duration;

    fn history() -> HistoryStore {
        HistoryStore::open(MemoryBackend::new())
    }

    fn items(n: usize) -> Vec<Submission> {
        (0..n).map(|i| Submission::new(format!("Item {}", i))).collect()
    }

    #[tokio::test]
    async fn test_submit_records_result() {
        let evaluator = Evaluator::new(MockScorer::new(sample_result(72.0)));
        let mut history = history();

        let result = evaluator
            .submit(&Submission::new("Test"), &mut history)
            .await
            .unwrap();

        assert_eq!(result.score, 72.0);
        assert_eq!(history.len(), 1);
        let entry = &history.list()[0];
        assert_eq!(entry.input.content, "Test");
        assert_eq!(entry.result.as_ref().unwrap().score, 72.0);
    }

    #[tokio::test]
    async fn test_invalid_submission_is_not_sent() {
        let evaluator = Evaluator::new(MockScorer::new(sample_result(72.0)));
        let mut history = history();

        let mut submission = Submission::new("   ");
        submission.metadata.has_references = true;

        match evaluator.submit(&submission, &mut history).await {
            Err(EvaluationError::Validation(report)) => {
                assert!(report.error_for("content").is_some());
                assert!(report.error_for("metadata.referenceUrls").is_some());
            }
            other => panic!("unexpected: {:?}", other),
        }
        assert_eq!(evaluator.scorer().evaluate_calls(), 0);
        assert!(history.is_empty());
    }

    #[tokio::test]
    async fn test_transport_failure_records_input_only() {
        let scorer = MockScorer::new(sample_result(72.0));
        scorer.fail_with(ScorerError::Connection("refused".to_string()));
        let evaluator = Evaluator::new(scorer);
        let mut history = history();

        let err = evaluator
            .submit(&Submission::new("Test"), &mut history)
            .await
            .unwrap_err();

        assert!(matches!(err, EvaluationError::Transport(ScorerError::Connection(_))));
        assert_eq!(history.len(), 1);
        assert!(history.list()[0].result.is_none());
        assert!(!evaluator.is_in_flight(Action::Submit));
    }

    #[tokio::test]
    async fn test_scenario_lookup() {
        let scorer = MockScorer::new(sample_result(35.0));
        scorer.add_scenario("case2_suspicious_social", Submission::new("Miracle cure!"));
        let evaluator = Evaluator::new(scorer);
        let mut history = history();

        let missing = evaluator.submit_scenario("nope", &mut history).await;
        assert!(matches!(missing, Err(EvaluationError::UnknownScenario(_))));

        evaluator
            .submit_scenario("case2_suspicious_social", &mut history)
            .await
            .unwrap();
        assert_eq!(history.list()[0].input.content, "Miracle cure!");
        assert_eq!(evaluator.scorer().evaluate_calls(), 1);
    }

    #[tokio::test]
    async fn test_batch_size_limits() {
        let evaluator = Evaluator::new(MockScorer::new(sample_result(72.0)));
        let mut history = history();

        for n in [0, MAX_BATCH_ITEMS + 1] {
            let result = evaluator.evaluate_batch(&items(n), &mut history).await;
            assert!(matches!(result, Err(EvaluationError::BatchSize { count, .. }) if count == n));
        }
        assert_eq!(evaluator.scorer().batch_calls(), 0);

        let report = evaluator
            .evaluate_batch(&items(MAX_BATCH_ITEMS), &mut history)
            .await
            .unwrap();
        assert_eq!(report.total, MAX_BATCH_ITEMS);
        assert_eq!(evaluator.scorer().batch_calls(), 1);
    }

    #[tokio::test]
    async fn test_batch_rejects_invalid_item() {
        let evaluator = Evaluator::new(MockScorer::new(sample_result(72.0)));
        let mut history = history();

        let mut batch = items(3);
        batch[1].content = String::new();

        match evaluator.evaluate_batch(&batch, &mut history).await {
            Err(EvaluationError::BatchValidation { items }) => {
                assert_eq!(items.len(), 1);
                assert_eq!(items[0].0, 1);
            }
            other => panic!("unexpected: {:?}", other),
        }
        assert_eq!(evaluator.scorer().batch_calls(), 0);
    }

    #[tokio::test]
    async fn test_batch_transport_failure_records_nothing() {
        let scorer = MockScorer::new(sample_result(72.0));
        scorer.fail_with(ScorerError::Status {
            status: 502,
            message: "Bad Gateway".to_string(),
        });
        let evaluator = Evaluator::new(scorer);
        let mut history = history();

        let result = evaluator.evaluate_batch(&items(2), &mut history).await;
        assert!(matches!(result, Err(EvaluationError::Transport(_))));
        assert!(history.is_empty());
    }

    #[tokio::test]
    async fn test_batch_records_successes_by_index() {
        let scorer = MockScorer::new(sample_result(72.0));
        scorer.set_batch_outcomes(vec![
            BatchOutcome::succeeded(2, sample_result(90.0)),
            BatchOutcome::failed(0, "Content too short"),
            BatchOutcome::succeeded(1, sample_result(45.0)),
        ]);
        let evaluator = Evaluator::new(scorer);
        let mut history = history();

        let report = evaluator.evaluate_batch(&items(3), &mut history).await.unwrap();
        assert_eq!(report.successful, 2);
        assert_eq!(report.failed, 1);

        // Appended in report order, so the last success is newest
        assert_eq!(history.len(), 2);
        assert_eq!(history.list()[0].input.content, "Item 1");
        assert_eq!(history.list()[0].result.as_ref().unwrap().score, 45.0);
        assert_eq!(history.list()[1].input.content, "Item 2");
        assert_eq!(history.list()[1].result.as_ref().unwrap().score, 90.0);
    }

    #[tokio::test]
    async fn test_batch_skips_out_of_range_index() {
        let scorer = MockScorer::new(sample_result(72.0));
        scorer.set_batch_outcomes(vec![
            BatchOutcome::succeeded(0, sample_result(80.0)),
            BatchOutcome::succeeded(7, sample_result(80.0)),
        ]);
        let evaluator = Evaluator::new(scorer);
        let mut history = history();

        let report = evaluator.evaluate_batch(&items(2), &mut history).await.unwrap();
        assert_eq!(report.results.len(), 2);
        assert_eq!(history.len(), 1);
    }

    #[tokio::test]
    async fn test_reevaluate_adds_new_entry() {
        let scorer = MockScorer::new(sample_result(50.0));
        scorer.push_result(sample_result(30.0));
        let evaluator = Evaluator::new(scorer);
        let mut history = history();

        evaluator
            .submit(&Submission::new("Claim"), &mut history)
            .await
            .unwrap();
        let original = history.list()[0].clone();

        let result = evaluator.reevaluate(&original.id, &mut history).await.unwrap();
        assert_eq!(result.score, 50.0);
        assert_eq!(history.len(), 2);
        assert_ne!(history.list()[0].id, original.id);
        assert_eq!(history.get(&original.id), Some(&original));

        let missing = evaluator.reevaluate("missing", &mut history).await;
        assert!(matches!(missing, Err(EvaluationError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_second_submit_while_in_flight() {
        let scorer = MockScorer::new(sample_result(72.0));
        scorer.set_delay(Duration::from_millis(50));
        let evaluator = Evaluator::new(scorer);
        let mut first = history();
        let mut second = history();
        let submission = Submission::new("Test");

        let (a, b) = tokio::join!(
            evaluator.submit(&submission, &mut first),
            evaluator.submit(&submission, &mut second),
        );

        assert!(a.is_ok());
        assert!(matches!(b, Err(EvaluationError::InFlight(Action::Submit))));
        assert_eq!(evaluator.scorer().evaluate_calls(), 1);
        assert!(second.is_empty());
        assert!(!evaluator.is_in_flight(Action::Submit));
    }

    #[tokio::test]
    async fn test_different_actions_run_together() {
        let scorer = MockScorer::new(sample_result(72.0));
        scorer.set_delay(Duration::from_millis(20));
        let evaluator = Evaluator::new(scorer);
        let mut first = history();
        let mut second = history();
        let single = Submission::new("Single");
        let batch = items(2);

        let (a, b) = tokio::join!(
            evaluator.submit(&single, &mut first),
            evaluator.evaluate_batch(&batch, &mut second),
        );

        assert!(a.is_ok());
        assert!(b.is_ok());
    }

    #[tokio::test]
    async fn test_health_failure_is_false() {
        let scorer = MockScorer::new(sample_result(72.0));
        let evaluator = Evaluator::new(scorer.clone());
        assert!(evaluator.health().await);

        scorer.fail_with(ScorerError::Connection("refused".to_string()));
        assert!(!evaluator.health().await);
    }

    proptest! {
        #[test]
        fn prop_batch_dispatch_depends_on_size(n in 0usize..16) {
            let runtime = tokio::runtime::Runtime::new().unwrap();
            let evaluator = Evaluator::new(MockScorer::new(sample_result(72.0)));
            let mut history = history();

            let result = runtime.block_on(evaluator.evaluate_batch(&items(n), &mut history));
            let accepted = (MIN_BATCH_ITEMS..=MAX_BATCH_ITEMS).contains(&n);

            prop_assert_eq!(result.is_ok(), accepted);
            prop_assert_eq!(evaluator.scorer().batch_calls(), usize::from(accepted));
            prop_assert_eq!(history.len(), if accepted { n } else { 0 });
        }
    }
}
