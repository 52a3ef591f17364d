use std::sync::Arc;

use actix_web::web::Data;
use actix_web::{test, App};
use serde_json::json;

use blog_post_service::domain::services::blog_post_service::BlogPostService;
use blog_post_service::seed::DEMO_POSTS;
use blog_post_service::startup::api_routes;

use crate::helpers::{
    test_app, FailingEmbeddingsService, FakeEmbeddingsService, InMemoryBlogPostRepository, TestApp,
};

/// Spins up an in-process copy of the app routed exactly like production
macro_rules! init_app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .configure(api_routes)
                .app_data($state.post_service.clone())
                .app_data($state.generation.clone()),
        )
        .await
    };
}

#[actix_web::test]
async fn create_then_get_round_trips_the_post() {
    let state = test_app();
    let app = init_app!(state);

    let request = test::TestRequest::post()
        .uri("/api/posts")
        .set_json(json!({ "title": "A", "content": "B", "topic": "C" }))
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, request).await;

    assert_eq!(body["status"], "created");
    let id = body["id"].as_str().unwrap();
    assert!(!id.is_empty());

    let request = test::TestRequest::get()
        .uri(&format!("/api/posts/{}", id))
        .to_request();
    let post: serde_json::Value = test::call_and_read_body_json(&app, request).await;

    assert_eq!(post["id"], id);
    assert_eq!(post["title"], "A");
    assert_eq!(post["content"], "B");
    assert_eq!(post["topic"], "C");
}

#[actix_web::test]
async fn getting_an_unknown_id_answers_200_with_a_not_found_body() {
    let state = test_app();
    let app = init_app!(state);

    let request = test::TestRequest::get()
        .uri("/api/posts/ffffffff-0000-4000-8000-000000000000")
        .to_request();
    let response = test::call_service(&app, request).await;

    assert!(response.status().is_success());
    let body: serde_json::Value = test::read_body_json(response).await;
    assert_eq!(body, json!({ "error": "Post not found" }));
}

#[actix_web::test]
async fn update_without_an_id_is_rejected_and_never_touches_the_store() {
    let state = test_app();
    let app = init_app!(state);

    let request = test::TestRequest::post()
        .uri("/api/posts/update")
        .set_json(json!({ "title": "T", "content": "C", "topic": "t" }))
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, request).await;

    assert_eq!(body, json!({ "error": "Post ID required" }));
    assert_eq!(state.repository.len(), 0);
    // Validation happens before the embedding call
    assert_eq!(state.embeddings.calls(), 0);
}

#[actix_web::test]
async fn update_with_an_empty_id_is_rejected_too() {
    let state = test_app();
    let app = init_app!(state);

    let request = test::TestRequest::post()
        .uri("/api/posts/update")
        .set_json(json!({ "id": "", "title": "T", "content": "C", "topic": "t" }))
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, request).await;

    assert_eq!(body, json!({ "error": "Post ID required" }));
    assert_eq!(state.repository.len(), 0);
}

#[actix_web::test]
async fn update_with_an_unknown_id_upserts_instead_of_rejecting() {
    let state = test_app();
    let app = init_app!(state);

    let request = test::TestRequest::post()
        .uri("/api/posts/update")
        .set_json(json!({ "id": "x", "title": "T2", "content": "C2", "topic": "t2" }))
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, request).await;

    assert_eq!(body, json!({ "status": "updated", "id": "x" }));

    let request = test::TestRequest::get().uri("/api/posts/x").to_request();
    let post: serde_json::Value = test::call_and_read_body_json(&app, request).await;
    assert_eq!(post["title"], "T2");
    assert_eq!(post["topic"], "t2");
}

#[actix_web::test]
async fn update_replaces_the_whole_post_at_the_same_id() {
    let state = test_app();
    let app = init_app!(state);

    let request = test::TestRequest::post()
        .uri("/api/posts")
        .set_json(json!({ "title": "Before", "content": "Old", "topic": "old" }))
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, request).await;
    let id = body["id"].as_str().unwrap().to_string();

    let request = test::TestRequest::post()
        .uri("/api/posts/update")
        .set_json(json!({ "id": id, "title": "After", "content": "New", "topic": "new" }))
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, request).await;
    assert_eq!(body["status"], "updated");

    assert_eq!(state.repository.len(), 1);

    let request = test::TestRequest::get()
        .uri(&format!("/api/posts/{}", id))
        .to_request();
    let post: serde_json::Value = test::call_and_read_body_json(&app, request).await;
    assert_eq!(post["title"], "After");
    assert_eq!(post["content"], "New");
    assert_eq!(post["topic"], "new");
}

#[actix_web::test]
async fn deleting_the_same_id_twice_reports_deleted_both_times() {
    let state = test_app();
    let app = init_app!(state);

    let request = test::TestRequest::post()
        .uri("/api/posts")
        .set_json(json!({ "title": "A", "content": "B", "topic": "C" }))
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, request).await;
    let id = body["id"].as_str().unwrap().to_string();

    for _ in 0..2 {
        let request = test::TestRequest::get()
            .uri(&format!("/api/posts/delete/{}", id))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, request).await;
        assert_eq!(body, json!({ "status": "deleted", "id": id }));
    }

    let request = test::TestRequest::get()
        .uri(&format!("/api/posts/{}", id))
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, request).await;
    assert_eq!(body, json!({ "error": "Post not found" }));
}

#[actix_web::test]
async fn search_caps_the_hits_and_orders_them_by_descending_score() {
    let state = test_app();
    let app = init_app!(state);

    for i in 0..12 {
        let request = test::TestRequest::post()
            .uri("/api/posts")
            .set_json(json!({
                "title": format!("Post number {}", i),
                "content": format!("Content about subject {}", i),
                "topic": "various",
            }))
            .to_request();
        let response = test::call_service(&app, request).await;
        assert!(response.status().is_success());
    }

    let request = test::TestRequest::get()
        .uri("/api/posts/search/subject")
        .to_request();
    let hits: serde_json::Value = test::call_and_read_body_json(&app, request).await;

    let hits = hits.as_array().unwrap();
    assert!(hits.len() <= 10);
    assert!(!hits.is_empty());

    let scores: Vec<f64> = hits
        .iter()
        .map(|hit| hit["score"].as_f64().unwrap())
        .collect();
    assert!(scores.windows(2).all(|pair| pair[0] >= pair[1]));
}

#[actix_web::test]
async fn a_fresh_store_is_seeded_with_the_ten_demo_posts() {
    let state = test_app();

    // Mirrors what Application::build does before the server starts
    let seeded = state
        .post_service
        .seed_if_empty(&DEMO_POSTS)
        .await
        .expect("Failed to seed the demo posts");
    assert_eq!(seeded, 10);

    let app = init_app!(state);
    let request = test::TestRequest::get().uri("/api/posts").to_request();
    let posts: serde_json::Value = test::call_and_read_body_json(&app, request).await;

    let posts = posts.as_array().unwrap();
    assert_eq!(posts.len(), 10);

    let mut listed_topics: Vec<&str> = posts
        .iter()
        .map(|post| post["topic"].as_str().unwrap())
        .collect();
    let mut demo_topics: Vec<&str> = DEMO_POSTS.iter().map(|post| post.topic).collect();
    listed_topics.sort_unstable();
    demo_topics.sort_unstable();
    assert_eq!(listed_topics, demo_topics);
}

#[actix_web::test]
async fn a_mid_seed_embedding_failure_leaves_the_store_empty_for_a_retry() {
    let repository = Arc::new(InMemoryBlogPostRepository::new());

    // Fails on the fifth of the ten embeddings
    let flaky_service = BlogPostService::new(
        repository.clone(),
        Arc::new(FakeEmbeddingsService::failing_after(4)),
    );
    flaky_service
        .seed_if_empty(&DEMO_POSTS)
        .await
        .expect_err("Seeding should fail when an embedding fails");

    // No partial demo set was written, so the next startup seeds in full
    assert_eq!(repository.len(), 0);

    let recovered_service =
        BlogPostService::new(repository.clone(), Arc::new(FakeEmbeddingsService::new()));
    let seeded = recovered_service.seed_if_empty(&DEMO_POSTS).await.unwrap();

    assert_eq!(seeded, 10);
    assert_eq!(repository.len(), 10);
}

#[actix_web::test]
async fn create_and_update_embed_the_title_and_content_joined_by_a_space() {
    let state = test_app();
    let app = init_app!(state);

    let request = test::TestRequest::post()
        .uri("/api/posts")
        .set_json(json!({ "title": "A", "content": "B", "topic": "C" }))
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, request).await;
    let id = body["id"].as_str().unwrap().to_string();

    let request = test::TestRequest::post()
        .uri("/api/posts/update")
        .set_json(json!({ "id": id, "title": "T2", "content": "C2", "topic": "t2" }))
        .to_request();
    let response = test::call_service(&app, request).await;
    assert!(response.status().is_success());

    assert_eq!(state.embeddings.texts(), vec!["A B", "T2 C2"]);
}

#[actix_web::test]
async fn seeding_is_skipped_when_the_store_already_has_content() {
    let state = test_app();

    let first = state.post_service.seed_if_empty(&DEMO_POSTS).await.unwrap();
    let second = state.post_service.seed_if_empty(&DEMO_POSTS).await.unwrap();

    assert_eq!(first, 10);
    assert_eq!(second, 0);
    assert_eq!(state.repository.len(), 10);
}

#[actix_web::test]
async fn an_unreachable_embeddings_endpoint_maps_to_a_500() {
    let repository = Arc::new(InMemoryBlogPostRepository::new());
    let state = TestApp {
        post_service: Data::new(BlogPostService::new(
            repository.clone(),
            Arc::new(FailingEmbeddingsService),
        )),
        ..test_app()
    };
    let app = init_app!(state);

    let request = test::TestRequest::post()
        .uri("/api/posts")
        .set_json(json!({ "title": "A", "content": "B", "topic": "C" }))
        .to_request();
    let response = test::call_service(&app, request).await;

    assert_eq!(response.status().as_u16(), 500);
    let body: serde_json::Value = test::read_body_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("unreachable"));
    assert_eq!(repository.len(), 0);
}
