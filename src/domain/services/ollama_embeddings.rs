use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::configuration::OllamaSettings;
use crate::domain::entities::blog_post::Embedding;
use crate::ports::{EmbeddingsService, EmbeddingsServiceError};

/// Single fixed deadline per call, no retry
const EMBEDDINGS_TIMEOUT: Duration = Duration::from_secs(30);

/// Service generating embeddings through an Ollama-compatible HTTP endpoint
pub struct OllamaEmbeddingsService {
    client: reqwest::Client,
    base_url: String,
    model: String,
}

impl OllamaEmbeddingsService {
    pub fn new(settings: &OllamaSettings) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: settings.base_url.clone(),
            model: settings.embeddings_model.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
struct EmbeddingsRequest<'a> {
    model: &'a str,
    prompt: &'a str,
}

#[derive(Debug, Deserialize)]
struct EmbeddingsResponse {
    embedding: Embedding,
}

#[async_trait]
impl EmbeddingsService for OllamaEmbeddingsService {
    #[tracing::instrument(name = "Generating an embedding", skip(self, text))]
    async fn embed(&self, text: &str) -> Result<Embedding, EmbeddingsServiceError> {
        let response = self
            .client
            .post(format!("{}/api/embeddings", self.base_url))
            .json(&EmbeddingsRequest {
                model: &self.model,
                prompt: text,
            })
            .timeout(EMBEDDINGS_TIMEOUT)
            .send()
            .await
            .map_err(|e| EmbeddingsServiceError::UpstreamError(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(EmbeddingsServiceError::UpstreamError(format!(
                "status {}: {}",
                status, body
            )));
        }

        // A body without the `embedding` field is a malformed response
        let body: EmbeddingsResponse = response
            .json()
            .await
            .map_err(|e| EmbeddingsServiceError::UpstreamError(e.to_string()))?;

        Ok(body.embedding)
    }
}
