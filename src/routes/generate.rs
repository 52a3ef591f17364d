use actix_web::http::header::ContentType;
use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse, ResponseError};
use serde_json::json;

use crate::helper::error_chain_fmt;
use crate::ports::{GenerationService, GenerationServiceError};

#[derive(Debug, serde::Deserialize, serde::Serialize)]
pub struct TopicRequest {
    pub topic: String,
}

/// Drafts a post about the requested topic without persisting it
#[tracing::instrument(name = "Generate blog post handler", skip(generation), fields(topic = %body.topic))]
pub async fn generate_post(
    generation: web::Data<dyn GenerationService>,
    body: web::Json<TopicRequest>,
) -> Result<HttpResponse, GenerateError> {
    let draft = generation.generate_draft(&body.topic).await?;

    Ok(HttpResponse::Ok().json(json!({
        "title": draft.title,
        "content": draft.content,
        "topic": body.topic,
    })))
}

#[derive(thiserror::Error)]
pub enum GenerateError {
    #[error(transparent)]
    GenerationError(#[from] GenerationServiceError),
}

impl std::fmt::Debug for GenerateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl ResponseError for GenerateError {
    fn status_code(&self) -> StatusCode {
        match self {
            GenerateError::GenerationError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    #[tracing::instrument(name = "Response error from generate handler", skip(self), fields(error = %self))]
    fn error_response(&self) -> HttpResponse<actix_web::body::BoxBody> {
        HttpResponse::build(self.status_code())
            .insert_header(ContentType::json())
            .json(json!({ "error": self.to_string() }))
    }
}
