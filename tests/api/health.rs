use actix_web::{test, App};
use blog_post_service::startup::api_routes;

use crate::helpers::test_app;

#[actix_web::test]
async fn health_check_works() {
    let state = test_app();
    let app = test::init_service(
        App::new()
            .configure(api_routes)
            .app_data(state.post_service.clone())
            .app_data(state.generation.clone()),
    )
    .await;

    let request = test::TestRequest::get().uri("/api/health").to_request();
    let response = test::call_service(&app, request).await;

    assert!(response.status().is_success());
    let body: serde_json::Value = test::read_body_json(response).await;
    assert_eq!(body, serde_json::json!({ "status": "ok" }));
}
