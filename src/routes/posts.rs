use actix_web::http::header::ContentType;
use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse, ResponseError};
use serde_json::json;

use crate::domain::entities::blog_post::BlogPost;
use crate::domain::services::blog_post_service::{
    BlogPostService, BlogPostServiceError, UpdateOutcome, DEFAULT_SEARCH_LIMIT,
};
use crate::helper::error_chain_fmt;

// The "not found" and "missing id" cases below answer 200 with an error body,
// and delete is exposed over GET: both are kept for compatibility with the
// existing frontend, which consumes these exact shapes.

#[tracing::instrument(name = "List blog posts handler", skip(service))]
pub async fn list_posts(service: web::Data<BlogPostService>) -> Result<HttpResponse, PostsError> {
    let posts = service.list().await?;

    Ok(HttpResponse::Ok().json(posts))
}

#[tracing::instrument(name = "Get blog post handler", skip(service))]
pub async fn get_post(
    service: web::Data<BlogPostService>,
    path: web::Path<String>,
) -> Result<HttpResponse, PostsError> {
    let id = path.into_inner();

    match service.get(&id).await? {
        Some(post) => Ok(HttpResponse::Ok().json(post)),
        None => Ok(HttpResponse::Ok().json(json!({ "error": "Post not found" }))),
    }
}

#[tracing::instrument(name = "Create blog post handler", skip(service, body))]
pub async fn create_post(
    service: web::Data<BlogPostService>,
    body: web::Json<BlogPost>,
) -> Result<HttpResponse, PostsError> {
    let id = service.create(&body).await?;

    Ok(HttpResponse::Ok().json(json!({ "status": "created", "id": id })))
}

#[tracing::instrument(name = "Update blog post handler", skip(service, body))]
pub async fn update_post(
    service: web::Data<BlogPostService>,
    body: web::Json<BlogPost>,
) -> Result<HttpResponse, PostsError> {
    match service.update(&body).await? {
        UpdateOutcome::Updated { id } => {
            Ok(HttpResponse::Ok().json(json!({ "status": "updated", "id": id })))
        }
        UpdateOutcome::MissingId => {
            Ok(HttpResponse::Ok().json(json!({ "error": "Post ID required" })))
        }
    }
}

#[tracing::instrument(name = "Delete blog post handler", skip(service))]
pub async fn delete_post(
    service: web::Data<BlogPostService>,
    path: web::Path<String>,
) -> Result<HttpResponse, PostsError> {
    let id = path.into_inner();
    service.delete(&id).await?;

    Ok(HttpResponse::Ok().json(json!({ "status": "deleted", "id": id })))
}

#[tracing::instrument(name = "Search blog posts handler", skip(service))]
pub async fn search_posts(
    service: web::Data<BlogPostService>,
    path: web::Path<String>,
) -> Result<HttpResponse, PostsError> {
    let query = path.into_inner();
    let hits = service.search(&query, DEFAULT_SEARCH_LIMIT).await?;

    Ok(HttpResponse::Ok().json(hits))
}

#[derive(thiserror::Error)]
pub enum PostsError {
    #[error(transparent)]
    ServiceError(#[from] BlogPostServiceError),
}

impl std::fmt::Debug for PostsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl ResponseError for PostsError {
    fn status_code(&self) -> StatusCode {
        match self {
            PostsError::ServiceError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    #[tracing::instrument(name = "Response error from posts handlers", skip(self), fields(error = %self))]
    fn error_response(&self) -> HttpResponse<actix_web::body::BoxBody> {
        HttpResponse::build(self.status_code())
            .insert_header(ContentType::json())
            .json(json!({ "error": self.to_string() }))
    }
}
