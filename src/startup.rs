use std::net::TcpListener;
use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{
    dev::Server,
    web::{self, Data},
    App, HttpServer,
};
use qdrant_client::Qdrant;
use tracing::info;
use tracing_actix_web::TracingLogger;

use crate::{
    configuration::{QdrantSettings, Settings},
    domain::services::{
        blog_post_service::{BlogPostService, BlogPostServiceError},
        ollama_embeddings::OllamaEmbeddingsService,
        ollama_generation::OllamaGenerationService,
    },
    ports::{BlogPostRepository, BlogPostRepositoryError, EmbeddingsService, GenerationService},
    repositories::blog_post_qdrant_repository::BlogPostQdrantRepository,
    routes::{
        generate::generate_post,
        health::health_check,
        posts::{create_post, delete_post, get_post, list_posts, search_posts, update_post},
    },
    seed::DEMO_POSTS,
};

/// Holds the newly built server, and some useful properties
pub struct Application {
    server: Server,
    port: u16,
}

#[derive(thiserror::Error, Debug)]
pub enum ApplicationBuildError {
    #[error(transparent)]
    IOError(#[from] std::io::Error),
    #[error("Error from Qdrant: {0}")]
    QdrantError(String),
    #[error(transparent)]
    RepositoryError(#[from] BlogPostRepositoryError),
    #[error(transparent)]
    SeedError(#[from] BlogPostServiceError),
}

impl Application {
    /// Ensures the collection exists and seeds demo content into an empty
    /// store before the server starts listening, so no request ever observes
    /// a half-seeded collection.
    ///
    /// # Parameters
    /// - nb_workers: number of actix-web workers
    ///   if `None`, the number of available physical CPUs is used as the worker count.
    #[tracing::instrument(name = "Building application", skip(settings))]
    pub async fn build(
        settings: Settings,
        nb_workers: Option<usize>,
    ) -> Result<Self, ApplicationBuildError> {
        let qdrant_client = get_qdrant_client(&settings.qdrant)?;

        let repository = BlogPostQdrantRepository::try_new(
            qdrant_client,
            &settings.qdrant.collection_name,
            &settings.qdrant.collection_distance,
            settings.qdrant.collection_vector_size,
        )
        .await?;
        let repository: Arc<dyn BlogPostRepository> = Arc::new(repository);

        let embeddings_service: Arc<dyn EmbeddingsService> =
            Arc::new(OllamaEmbeddingsService::new(&settings.ollama));
        let generation_service: Arc<dyn GenerationService> =
            Arc::new(OllamaGenerationService::new(&settings.ollama));

        let post_service = BlogPostService::new(repository, embeddings_service);

        let seeded = post_service.seed_if_empty(&DEMO_POSTS).await?;
        if seeded > 0 {
            info!("Seeded {} demo posts into an empty collection", seeded);
        }

        let address = format!(
            "{}:{}",
            settings.application.host, settings.application.port
        );
        let listener = TcpListener::bind(address)?;
        let port = listener.local_addr()?.port();

        let server = run(listener, nb_workers, post_service, generation_service)?;

        Ok(Self { server, port })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// This function only returns when the application is stopped
    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> {
        info!("Running server ...");
        self.server.await
    }
}

/// Registers the API routes.
///
/// Shared with the in-process tests so they exercise the exact same routing
/// table as the real server. `/api/posts/update` is registered before
/// `/api/posts/{id}` on purpose.
pub fn api_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/api/health", web::get().to(health_check))
        .route("/api/posts", web::get().to(list_posts))
        .route("/api/posts", web::post().to(create_post))
        .route("/api/posts/update", web::post().to(update_post))
        .route("/api/posts/delete/{id}", web::get().to(delete_post))
        .route("/api/posts/search/{query}", web::get().to(search_posts))
        .route("/api/posts/{id}", web::get().to(get_post))
        .route("/api/generate", web::post().to(generate_post));
}

/// listener: the caller binds their own port
///
/// TracingLogger middleware: generates a unique identifier for each incoming
/// request: `request_id`.
pub fn run(
    listener: TcpListener,
    nb_workers: Option<usize>,
    post_service: BlogPostService,
    generation_service: Arc<dyn GenerationService>,
) -> Result<Server, std::io::Error> {
    // Wraps the shared state in `actix_web::Data` (`Arc`) to register it
    // and access it from handlers. Shared among all workers.
    let post_service = Data::new(post_service);
    let generation_service: Data<dyn GenerationService> = Data::from(generation_service);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            // The frontend is served from another origin
            .wrap(Cors::permissive())
            .configure(api_routes)
            .app_data(post_service.clone())
            .app_data(generation_service.clone())
    })
    .listen(listener)?;

    // If no workers were set, use the actix-web default (number of physical CPUs)
    if let Some(nb_workers) = nb_workers {
        return Ok(server.workers(nb_workers).run());
    }

    Ok(server.run())
}

/// Set up a client to Qdrant
pub fn get_qdrant_client(config: &QdrantSettings) -> Result<Qdrant, ApplicationBuildError> {
    Qdrant::from_url(&config.get_grpc_base_url())
        .build()
        .map_err(|e| ApplicationBuildError::QdrantError(e.to_string()))
}
