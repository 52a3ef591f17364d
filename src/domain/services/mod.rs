pub mod blog_post_service;
pub mod ollama_embeddings;
pub mod ollama_generation;
