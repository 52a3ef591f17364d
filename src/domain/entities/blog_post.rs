use serde::{Deserialize, Serialize};

pub type Embedding = Vec<f32>;

/// Inbound blog post, as received on the create and update endpoints.
///
/// The id is only meaningful on update: create mints a fresh one.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct BlogPost {
    #[serde(default)]
    pub id: Option<String>,
    pub title: String,
    pub content: String,
    pub topic: String,
}

impl BlogPost {
    /// The text whose embedding represents this post in the vector store
    pub fn embedding_input(&self) -> String {
        format!("{} {}", self.title, self.content)
    }
}

/// Payload stored alongside a post's vector in the vector store
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct BlogPostPayload {
    pub title: String,
    pub content: String,
    pub topic: String,
}

impl From<&BlogPost> for BlogPostPayload {
    fn from(post: &BlogPost) -> Self {
        Self {
            title: post.title.clone(),
            content: post.content.clone(),
            topic: post.topic.clone(),
        }
    }
}

/// A stored post, as returned to API callers
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct BlogPostView {
    pub id: String,
    pub title: String,
    pub content: String,
    pub topic: String,
}

impl BlogPostView {
    pub fn from_payload(id: String, payload: BlogPostPayload) -> Self {
        Self {
            id,
            title: payload.title,
            content: payload.content,
            topic: payload.topic,
        }
    }
}

/// A search hit: a stored post plus its similarity score
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ScoredBlogPostView {
    pub id: String,
    pub title: String,
    pub content: String,
    pub topic: String,
    pub score: f32,
}

impl ScoredBlogPostView {
    pub fn from_payload(id: String, payload: BlogPostPayload, score: f32) -> Self {
        Self {
            id,
            title: payload.title,
            content: payload.content,
            topic: payload.topic,
            score,
        }
    }
}

/// A draft post produced by the generation endpoint, never persisted
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct DraftPost {
    pub title: String,
    pub content: String,
}
