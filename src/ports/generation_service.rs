use async_trait::async_trait;

use crate::domain::entities::blog_post::DraftPost;
use crate::helper::error_chain_fmt;

/// Contract over the external text-generation endpoint.
///
/// Produces a draft post from a topic; the draft is never persisted.
#[async_trait]
pub trait GenerationService: Send + Sync {
    async fn generate_draft(&self, topic: &str) -> Result<DraftPost, GenerationServiceError>;
}

#[derive(thiserror::Error)]
pub enum GenerationServiceError {
    #[error("Error from the generation endpoint: {0}")]
    UpstreamError(String),
}

impl std::fmt::Debug for GenerationServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}
