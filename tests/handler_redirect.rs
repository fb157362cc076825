mod common;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use axum_test::TestServer;
use serde_json::json;
use shorty::api::handlers::{redirect_handler, shorten_handler};
use shorty::hasher::Md5Hasher;
use shorty::storage::StorageBackend;

use common::{FailingStore, create_state_with, create_test_state};

fn redirect_app(state: shorty::AppState) -> Router {
    Router::new()
        .route("/{hash}", get(redirect_handler))
        .with_state(state)
}

#[tokio::test]
async fn test_redirect_success() {
    let (state, store) = create_test_state();
    store
        .put("test-hash", "http://www.example.com")
        .await
        .unwrap();

    let server = TestServer::new(redirect_app(state)).unwrap();

    let response = server.get("/test-hash").await;

    assert_eq!(response.status_code(), 307);
    assert_eq!(response.header("location"), "http://www.example.com");
}

#[tokio::test]
async fn test_redirect_unknown_hash_is_404() {
    let (state, _) = create_test_state();
    let server = TestServer::new(redirect_app(state)).unwrap();

    let response = server.get("/unknown-hash").await;

    response.assert_status_not_found();

    let body = response.json::<serde_json::Value>();
    assert_eq!(body["error"]["code"], "not_found");
}

#[tokio::test]
async fn test_redirect_storage_failure_is_500() {
    let state = create_state_with(Arc::new(FailingStore), Arc::new(Md5Hasher::new()));
    let server = TestServer::new(redirect_app(state)).unwrap();

    let response = server.get("/test-hash").await;

    response.assert_status_internal_server_error();
}

#[tokio::test]
async fn test_shorten_then_redirect_round_trip() {
    let (state, _) = create_test_state();
    let app = Router::new()
        .route("/shorten", post(shorten_handler))
        .route("/{hash}", get(redirect_handler))
        .with_state(state);

    let server = TestServer::new(app).unwrap();

    let response = server
        .post("/shorten")
        .json(&json!({ "url": "http://www.example.com/some/long/path?q=1" }))
        .await;
    response.assert_status_ok();
    let hash = response.json::<serde_json::Value>()["hash"]
        .as_str()
        .unwrap()
        .to_string();

    let redirect = server.get(&format!("/{hash}")).await;
    assert_eq!(redirect.status_code(), 307);
    assert_eq!(
        redirect.header("location"),
        "http://www.example.com/some/long/path?q=1"
    );
}
