pub mod blog_post_repository;
pub mod embeddings_service;
pub mod generation_service;

pub use blog_post_repository::{BlogPostRepository, BlogPostRepositoryError};
pub use embeddings_service::{EmbeddingsService, EmbeddingsServiceError};
pub use generation_service::{GenerationService, GenerationServiceError};
