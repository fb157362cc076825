mod common;

use std::sync::Arc;

use axum::{Router, routing::get};
use axum_test::TestServer;
use shorty::api::handlers::health_handler;
use shorty::hasher::Md5Hasher;

use common::{FailingStore, create_state_with, create_test_state};

fn health_app(state: shorty::AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .with_state(state)
}

#[tokio::test]
async fn test_health_ok() {
    let (state, _) = create_test_state();
    let server = TestServer::new(health_app(state)).unwrap();

    let response = server.get("/health").await;

    response.assert_status_ok();

    let body = response.json::<serde_json::Value>();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["checks"]["storage"]["status"], "ok");
}

#[tokio::test]
async fn test_health_degraded_on_storage_failure() {
    let state = create_state_with(Arc::new(FailingStore), Arc::new(Md5Hasher::new()));
    let server = TestServer::new(health_app(state)).unwrap();

    let response = server.get("/health").await;

    response.assert_status(axum::http::StatusCode::SERVICE_UNAVAILABLE);

    let body = response.json::<serde_json::Value>();
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["checks"]["storage"]["status"], "error");
}
