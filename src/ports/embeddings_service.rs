use async_trait::async_trait;

use crate::domain::entities::blog_post::Embedding;
use crate::helper::error_chain_fmt;

/// Contract over the external text-embedding endpoint.
///
/// No caching: identical text re-embeds on every call.
#[async_trait]
pub trait EmbeddingsService: Send + Sync {
    async fn embed(&self, text: &str) -> Result<Embedding, EmbeddingsServiceError>;
}

#[derive(thiserror::Error)]
pub enum EmbeddingsServiceError {
    #[error("Error from the embeddings endpoint: {0}")]
    UpstreamError(String),
}

impl std::fmt::Debug for EmbeddingsServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}
