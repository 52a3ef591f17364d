use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::domain::entities::blog_post::{
    BlogPost, BlogPostPayload, BlogPostView, ScoredBlogPostView,
};
use crate::helper::error_chain_fmt;
use crate::ports::{
    BlogPostRepository, BlogPostRepositoryError, EmbeddingsService, EmbeddingsServiceError,
};
use crate::seed::DemoPost;

/// Fixed cap on the number of posts returned by a listing
pub const MAX_LISTED_POSTS: u32 = 100;

/// Default number of hits returned by a similarity search
pub const DEFAULT_SEARCH_LIMIT: u64 = 10;

/// Orchestrates the embeddings endpoint and the vector store to implement
/// CRUD + similarity search over blog posts.
///
/// Stateless per request: every write embeds first and then upserts, so the
/// store call is the sole mutation point and a post is never persisted
/// without its vector.
pub struct BlogPostService {
    repository: Arc<dyn BlogPostRepository>,
    embeddings: Arc<dyn EmbeddingsService>,
}

/// Outcome of an update request
#[derive(Debug, PartialEq, Eq)]
pub enum UpdateOutcome {
    Updated { id: String },
    /// The request carried no id (or an empty one); nothing was mutated
    MissingId,
}

impl BlogPostService {
    pub fn new(
        repository: Arc<dyn BlogPostRepository>,
        embeddings: Arc<dyn EmbeddingsService>,
    ) -> Self {
        Self {
            repository,
            embeddings,
        }
    }

    /// One-time population of demo content when the store is empty.
    ///
    /// Returns the number of seeded posts (0 when the store already has
    /// content). All embeddings are computed before the single batch write,
    /// so a failure leaves the store empty and the next startup retries a
    /// full seed.
    #[tracing::instrument(name = "Seeding demo posts if the store is empty", skip_all)]
    pub async fn seed_if_empty(
        &self,
        demo_posts: &[DemoPost],
    ) -> Result<usize, BlogPostServiceError> {
        if !self.repository.is_empty().await? {
            return Ok(0);
        }

        let mut points = Vec::with_capacity(demo_posts.len());
        for demo_post in demo_posts {
            let vector = self
                .embeddings
                .embed(&format!("{} {}", demo_post.title, demo_post.content))
                .await?;

            points.push((
                Uuid::new_v4().to_string(),
                vector,
                BlogPostPayload {
                    title: demo_post.title.to_string(),
                    content: demo_post.content.to_string(),
                    topic: demo_post.topic.to_string(),
                },
            ));
        }

        let seeded = points.len();
        self.repository.upsert_batch(points).await?;
        info!("Seeded {} demo posts", seeded);

        Ok(seeded)
    }

    #[tracing::instrument(name = "Listing blog posts", skip(self))]
    pub async fn list(&self) -> Result<Vec<BlogPostView>, BlogPostServiceError> {
        let points = self.repository.list_all(MAX_LISTED_POSTS).await?;

        Ok(points
            .into_iter()
            .map(|(id, payload)| BlogPostView::from_payload(id, payload))
            .collect())
    }

    #[tracing::instrument(name = "Getting a blog post", skip(self))]
    pub async fn get(&self, id: &str) -> Result<Option<BlogPostView>, BlogPostServiceError> {
        let payload = self.repository.get_by_id(id).await?;

        Ok(payload.map(|payload| BlogPostView::from_payload(id.to_string(), payload)))
    }

    /// Mints a fresh id, embeds the post text and upserts the point
    #[tracing::instrument(name = "Creating a blog post", skip(self, post), fields(title = %post.title))]
    pub async fn create(&self, post: &BlogPost) -> Result<String, BlogPostServiceError> {
        let id = Uuid::new_v4().to_string();
        let vector = self.embeddings.embed(&post.embedding_input()).await?;

        self.repository
            .upsert(&id, vector, BlogPostPayload::from(post))
            .await?;

        Ok(id)
    }

    /// Full replace at the given id, re-embedding the post text.
    ///
    /// An unknown id is upserted, not rejected. No store call happens when
    /// the id is missing.
    #[tracing::instrument(name = "Updating a blog post", skip(self, post), fields(id = ?post.id))]
    pub async fn update(&self, post: &BlogPost) -> Result<UpdateOutcome, BlogPostServiceError> {
        let id = match post.id.as_deref() {
            Some(id) if !id.is_empty() => id,
            _ => return Ok(UpdateOutcome::MissingId),
        };

        let vector = self.embeddings.embed(&post.embedding_input()).await?;

        self.repository
            .upsert(id, vector, BlogPostPayload::from(post))
            .await?;

        Ok(UpdateOutcome::Updated { id: id.to_string() })
    }

    /// Idempotent: deleting an unknown id succeeds
    #[tracing::instrument(name = "Deleting a blog post", skip(self))]
    pub async fn delete(&self, id: &str) -> Result<(), BlogPostServiceError> {
        self.repository.delete_by_id(id).await?;

        Ok(())
    }

    /// Embeds the raw query string and returns the nearest posts,
    /// in the store's descending-score order
    #[tracing::instrument(name = "Searching blog posts", skip(self))]
    pub async fn search(
        &self,
        query: &str,
        limit: u64,
    ) -> Result<Vec<ScoredBlogPostView>, BlogPostServiceError> {
        let vector = self.embeddings.embed(query).await?;
        let hits = self.repository.query(vector, limit).await?;

        Ok(hits
            .into_iter()
            .map(|(id, payload, score)| ScoredBlogPostView::from_payload(id, payload, score))
            .collect())
    }
}

#[derive(thiserror::Error)]
pub enum BlogPostServiceError {
    #[error(transparent)]
    EmbeddingsError(#[from] EmbeddingsServiceError),
    #[error(transparent)]
    RepositoryError(#[from] BlogPostRepositoryError),
}

impl std::fmt::Debug for BlogPostServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}
