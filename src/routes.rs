//! Route configuration and middleware composition.

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::timeout::{RequestBodyTimeoutLayer, TimeoutLayer};

use crate::api::handlers::{health_handler, redirect_handler, shorten_handler};
use crate::api::middleware;
use crate::config::Config;
use crate::state::AppState;

/// Builds the application router.
///
/// # Endpoints
///
/// - `POST /shorten` - create a mapping for a long URL
/// - `GET  /health`  - service health with storage probe
/// - `GET  /{hash}`  - resolve a mapping via 307 redirect
///
/// Static routes win over the `{hash}` capture, so `/shorten` and
/// `/health` are never treated as hashes.
///
/// Every request is bounded by the configured write timeout (overall
/// deadline, answered with 408 when exceeded) and read timeout (body
/// reads); idle keep-alive connections are bounded at the connection
/// level in [`crate::server`].
pub fn app_router(state: AppState, config: &Config) -> Router {
    Router::new()
        .route("/shorten", post(shorten_handler))
        .route("/health", get(health_handler))
        .route("/{hash}", get(redirect_handler))
        .with_state(state)
        .layer(middleware::tracing::layer())
        .layer(TimeoutLayer::new(config.write_timeout()))
        .layer(RequestBodyTimeoutLayer::new(config.read_timeout()))
}
