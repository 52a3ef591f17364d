pub mod blog_post_qdrant_repository;
