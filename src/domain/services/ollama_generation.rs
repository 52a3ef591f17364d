use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::configuration::OllamaSettings;
use crate::domain::entities::blog_post::DraftPost;
use crate::ports::{GenerationService, GenerationServiceError};

/// Generation is much slower than embedding, hence the longer deadline
const GENERATION_TIMEOUT: Duration = Duration::from_secs(120);

/// Service drafting blog posts through an Ollama-compatible HTTP endpoint
pub struct OllamaGenerationService {
    client: reqwest::Client,
    base_url: String,
    model: String,
}

impl OllamaGenerationService {
    pub fn new(settings: &OllamaSettings) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: settings.base_url.clone(),
            model: settings.generation_model.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    response: String,
}

fn draft_prompt(topic: &str) -> String {
    format!(
        "Write a blog post about {}.\n    \
         The post should have a title and content.\n    \
         Make it engaging and informative.\n    \
         Format: put the title on the first line, then the content after a blank line.",
        topic
    )
}

/// Splits freeform model output into a title and a content body.
///
/// Title: first line, every `#` removed and surrounding whitespace trimmed,
/// `"Untitled"` when the text has no lines. Content: everything from the third
/// line on (the second line is the expected blank separator), falling back to
/// the full raw text when the output is shorter. Malformed model output can
/// mis-split; that is a known limitation of the heuristic.
pub fn parse_draft(raw: &str) -> DraftPost {
    let lines: Vec<&str> = raw.trim().lines().collect();

    let title = match lines.first() {
        Some(line) => line.replace('#', "").trim().to_string(),
        None => "Untitled".to_string(),
    };

    let content = if lines.len() > 2 {
        lines[2..].join("\n")
    } else {
        raw.to_string()
    };

    DraftPost { title, content }
}

#[async_trait]
impl GenerationService for OllamaGenerationService {
    #[tracing::instrument(name = "Drafting a blog post", skip(self))]
    async fn generate_draft(&self, topic: &str) -> Result<DraftPost, GenerationServiceError> {
        let prompt = draft_prompt(topic);

        let response = self
            .client
            .post(format!("{}/api/generate", self.base_url))
            .json(&GenerateRequest {
                model: &self.model,
                prompt: &prompt,
                stream: false,
            })
            .timeout(GENERATION_TIMEOUT)
            .send()
            .await
            .map_err(|e| GenerationServiceError::UpstreamError(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(GenerationServiceError::UpstreamError(format!(
                "status {}: {}",
                status, body
            )));
        }

        let body: GenerateResponse = response
            .json()
            .await
            .map_err(|e| GenerationServiceError::UpstreamError(e.to_string()))?;

        Ok(parse_draft(&body.response))
    }
}
