use async_trait::async_trait;

use crate::domain::entities::blog_post::{BlogPostPayload, Embedding};
use crate::helper::error_chain_fmt;

/// Contract over the vector store holding blog post points.
///
/// One point per post: the point id is the post id, the vector is the
/// embedding of the post's text, the payload carries title/content/topic.
/// All operations are idempotent at the store level except `list_all`/`query`.
#[async_trait]
pub trait BlogPostRepository: Send + Sync {
    /// True iff a bounded probe (1 point) finds the collection empty
    async fn is_empty(&self) -> Result<bool, BlogPostRepositoryError>;

    /// Insert-or-replace the point stored under `id`
    async fn upsert(
        &self,
        id: &str,
        vector: Embedding,
        payload: BlogPostPayload,
    ) -> Result<(), BlogPostRepositoryError>;

    /// Insert-or-replace several points in a single store call
    async fn upsert_batch(
        &self,
        points: Vec<(String, Embedding, BlogPostPayload)>,
    ) -> Result<(), BlogPostRepositoryError>;

    /// Returns `None` for an unknown id, never an error
    async fn get_by_id(&self, id: &str) -> Result<Option<BlogPostPayload>, BlogPostRepositoryError>;

    /// Deleting an unknown id is not an error
    async fn delete_by_id(&self, id: &str) -> Result<(), BlogPostRepositoryError>;

    /// Bounded scan, ordering implementation-defined
    async fn list_all(
        &self,
        limit: u32,
    ) -> Result<Vec<(String, BlogPostPayload)>, BlogPostRepositoryError>;

    /// Nearest-neighbor search under the collection's distance metric,
    /// ordered by descending similarity score
    async fn query(
        &self,
        vector: Embedding,
        limit: u64,
    ) -> Result<Vec<(String, BlogPostPayload, f32)>, BlogPostRepositoryError>;
}

#[derive(thiserror::Error)]
pub enum BlogPostRepositoryError {
    #[error("Error from the vector store: {0}")]
    StoreUnavailable(String),

    #[error("Invalid vector store configuration: {0}")]
    ConfigurationError(String),
}

impl std::fmt::Debug for BlogPostRepositoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}
