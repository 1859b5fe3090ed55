//! Knowledge store - fetch, list and extend the shared knowledge base

use crate::decoder::{decode_all, DisplayFact};
use crate::error::KnowledgeError;
use credence_domain::traits::KnowledgeRepository;
use credence_domain::{AddFactsRequest, KnowledgeFact};
use tracing::{debug, info};

/// Front end to a knowledge repository
///
/// Listing goes through the decoder; facts it cannot render are skipped,
/// never reported as errors.
pub struct KnowledgeStore<R> {
    repository: R,
}

impl<R: KnowledgeRepository> KnowledgeStore<R> {
    /// Create a store backed by `repository`
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    /// Access the underlying repository
    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Every stored fact, as returned by the repository
    pub async fn fetch(&self) -> Result<Vec<KnowledgeFact>, KnowledgeError> {
        let facts = self.repository.list_facts().await?;
        debug!("Fetched {} fact(s) from the knowledge base", facts.len());
        Ok(facts)
    }

    /// Distinct evaluation facts, decoded for display
    pub async fn list(&self) -> Result<Vec<DisplayFact>, KnowledgeError> {
        let facts = self.fetch().await?;
        Ok(decode_all(&facts))
    }

    /// Add facts, then return the refreshed listing
    ///
    /// Facts are checked locally first; a malformed fact rejects the whole
    /// request before anything is sent.
    pub async fn add(
        &self,
        facts: Vec<KnowledgeFact>,
        source: Option<String>,
        expiration: Option<String>,
    ) -> Result<Vec<DisplayFact>, KnowledgeError> {
        check_facts(&facts)?;

        let count = facts.len();
        let request = AddFactsRequest {
            facts,
            source,
            expiration,
        };
        self.repository.add_facts(&request).await?;
        info!("Added {} fact(s) to the knowledge base", count);

        self.list().await
    }
}

fn check_facts(facts: &[KnowledgeFact]) -> Result<(), KnowledgeError> {
    if facts.is_empty() {
        return Err(KnowledgeError::InvalidFact("No facts provided".to_string()));
    }

    for (idx, fact) in facts.iter().enumerate() {
        let number = idx + 1;
        if fact.predicate.trim().is_empty() {
            return Err(KnowledgeError::InvalidFact(format!(
                "Fact #{} has an empty predicate",
                number
            )));
        }
        if fact.arguments.is_empty() {
            return Err(KnowledgeError::InvalidFact(format!(
                "Fact #{} needs at least one argument",
                number
            )));
        }
        if let Some(arg_idx) = fact.arguments.iter().position(|a| a.trim().is_empty()) {
            return Err(KnowledgeError::InvalidFact(format!(
                "Fact #{} argument {} is empty",
                number,
                arg_idx + 1
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use credence_sdk::mock::MemoryKnowledgeBase;

    fn evaluation(content: &str, score: &str) -> KnowledgeFact {
        KnowledgeFact::new(
            "evaluation",
            vec![
                content.to_string(),
                "credible".to_string(),
                score.to_string(),
                "Source type: news (score: 0.6)".to_string(),
            ],
        )
    }

    #[tokio::test]
    async fn test_list_dedupes_and_decodes() {
        let base = MemoryKnowledgeBase::with_facts(vec![
            evaluation("Moon landing happened", "95"),
            KnowledgeFact::new("source_type", vec!["nasa.gov".into(), "official".into()]),
            evaluation("Moon landing happened", "20"),
        ]);
        let store = KnowledgeStore::new(base);

        let listing = store.list().await.unwrap();
        assert_eq!(listing.len(), 1);
        assert_eq!(listing[0].score_percent, Some(95));

        // Raw fetch is untouched
        assert_eq!(store.fetch().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_add_then_refresh() {
        let store = KnowledgeStore::new(MemoryKnowledgeBase::default());

        let listing = store
            .add(
                vec![evaluation("Tap water is safe here", "81.2")],
                Some("manual".to_string()),
                None,
            )
            .await
            .unwrap();

        assert_eq!(listing.len(), 1);
        assert_eq!(listing[0].content, "Tap water is safe here");
        assert_eq!(store.repository().add_calls(), 1);
        assert_eq!(
            store.repository().last_request().unwrap().source.as_deref(),
            Some("manual")
        );
    }

    #[tokio::test]
    async fn test_add_rejects_malformed_facts_without_sending() {
        let store = KnowledgeStore::new(MemoryKnowledgeBase::default());

        let cases = vec![
            vec![],
            vec![KnowledgeFact::new("  ", vec!["x".into()])],
            vec![KnowledgeFact::new("source_type", vec![])],
            vec![KnowledgeFact::new("source_type", vec!["x".into(), " ".into()])],
        ];

        for facts in cases {
            let result = store.add(facts, None, None).await;
            assert!(matches!(result, Err(KnowledgeError::InvalidFact(_))));
        }
        assert_eq!(store.repository().add_calls(), 0);
    }

    #[tokio::test]
    async fn test_transport_failure_surfaces() {
        let base = MemoryKnowledgeBase::default();
        base.fail_with("knowledge base offline");
        let store = KnowledgeStore::new(base);

        let result = store.list().await;
        assert!(matches!(result, Err(KnowledgeError::Transport(_))));
    }
}
