//! Credence client implementation.

use crate::envelope::{acknowledge, error_message, Envelope};
use crate::error::SdkError;
use async_trait::async_trait;
use credence_domain::traits::{KnowledgeRepository, Scorer, TestScenarios};
use credence_domain::{
    AddFactsRequest, BatchReport, EvaluationResult, KnowledgeFact, ScorerError, Submission,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

/// Base URL used when no profile overrides it
pub const DEFAULT_API_URL: &str = "http://localhost:3000/api/v1";

#[derive(Serialize)]
struct BatchRequest<'a> {
    items: &'a [Submission],
}

/// HTTP client for the scoring and knowledge API
///
/// No request timeout is configured; a request runs until the server
/// answers or the connection fails.
#[derive(Debug, Clone)]
pub struct CredenceClient {
    base_url: String,
    http_client: reqwest::Client,
}

impl CredenceClient {
    /// Create a client for the API rooted at `base_url`
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http_client: reqwest::Client::new(),
        }
    }

    /// The API root this client talks to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Score one submission
    pub async fn evaluate(&self, submission: &Submission) -> Result<EvaluationResult, SdkError> {
        self.post::<_, EvaluationResult>("/evaluate", submission)
            .await?
            .into_data()
    }

    /// Fetch the canned test scenarios
    pub async fn test_scenarios(&self) -> Result<TestScenarios, SdkError> {
        self.get::<TestScenarios>("/evaluate/test")
            .await?
            .into_data()
    }

    /// Score several submissions in one request
    pub async fn evaluate_batch(&self, items: &[Submission]) -> Result<BatchReport, SdkError> {
        self.post::<_, BatchReport>("/evaluate/batch", &BatchRequest { items })
            .await?
            .into_data()
    }

    /// Liveness check; any failure counts as unhealthy
    pub async fn health(&self) -> bool {
        match self.check_health().await {
            Ok(healthy) => healthy,
            Err(e) => {
                warn!("API health check failed: {}", e);
                false
            }
        }
    }

    /// Add facts to the knowledge base
    ///
    /// Any 2xx answer counts as stored; the body only matters when it
    /// explicitly reports `success: false`.
    pub async fn add_facts(&self, request: &AddFactsRequest) -> Result<(), SdkError> {
        let url = format!("{}/knowledge/facts", self.base_url);
        debug!("POST {}", url);

        let response = self.http_client.post(&url).json(request).send().await?;
        acknowledge(&read_body(response).await?)
    }

    /// List every fact in the knowledge base
    pub async fn list_facts(&self) -> Result<Vec<KnowledgeFact>, SdkError> {
        self.get::<Vec<KnowledgeFact>>("/knowledge/facts")
            .await?
            .into_data()
    }

    async fn check_health(&self) -> Result<bool, SdkError> {
        let envelope: Envelope<serde_json::Value> = self.get("/health").await?;
        Ok(envelope.success)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<Envelope<T>, SdkError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("GET {}", url);

        let response = self.http_client.get(&url).send().await?;
        read_envelope(response).await
    }

    async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Envelope<T>, SdkError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("POST {}", url);

        let response = self.http_client.post(&url).json(body).send().await?;
        read_envelope(response).await
    }
}

async fn read_envelope<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<Envelope<T>, SdkError> {
    let body = read_body(response).await?;
    Ok(serde_json::from_str(&body)?)
}

/// Body text of a 2xx response; anything else becomes `SdkError::Http`
async fn read_body(response: reqwest::Response) -> Result<String, SdkError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(SdkError::Http {
            status: status.as_u16(),
            message: error_message(&body),
        });
    }

    Ok(response.text().await?)
}

#[async_trait]
impl Scorer for CredenceClient {
    async fn evaluate(&self, submission: &Submission) -> Result<EvaluationResult, ScorerError> {
        CredenceClient::evaluate(self, submission)
            .await
            .map_err(ScorerError::from)
    }

    async fn test_scenarios(&self) -> Result<TestScenarios, ScorerError> {
        CredenceClient::test_scenarios(self)
            .await
            .map_err(ScorerError::from)
    }

    async fn evaluate_batch(&self, items: &[Submission]) -> Result<BatchReport, ScorerError> {
        CredenceClient::evaluate_batch(self, items)
            .await
            .map_err(ScorerError::from)
    }

    async fn health(&self) -> Result<bool, ScorerError> {
        self.check_health().await.map_err(ScorerError::from)
    }
}

#[async_trait]
impl KnowledgeRepository for CredenceClient {
    async fn add_facts(&self, request: &AddFactsRequest) -> Result<(), ScorerError> {
        CredenceClient::add_facts(self, request)
            .await
            .map_err(ScorerError::from)
    }

    async fn list_facts(&self) -> Result<Vec<KnowledgeFact>, ScorerError> {
        CredenceClient::list_facts(self)
            .await
            .map_err(ScorerError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_trimmed() {
        let client = CredenceClient::new("http://localhost:3000/api/v1/");
        assert_eq!(client.base_url(), "http://localhost:3000/api/v1");
    }

    #[test]
    fn test_batch_request_shape() {
        let items = vec![Submission::new("a")];
        let json = serde_json::to_value(BatchRequest { items: &items }).unwrap();
        assert_eq!(json["items"][0]["content"], "a");
    }
}
