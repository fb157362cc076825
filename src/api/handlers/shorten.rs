//! Handler for the shorten endpoint.

use axum::{Json, extract::State};
use tracing::{debug, error};

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short key for a long URL and persists the mapping.
///
/// # Endpoint
///
/// `POST /shorten`
///
/// # Request Body
///
/// ```json
/// { "url": "http://www.example.com" }
/// ```
///
/// # Response
///
/// ```json
/// { "hash": "847310eb455f9ae37cb56962213c491d" }
/// ```
///
/// The key is derived deterministically from the URL, so shortening the
/// same URL twice returns the same hash and overwrites the same mapping.
///
/// # Errors
///
/// Returns 400 Bad Request for an undecodable body (via the `Json`
/// extractor) and 500 Internal Server Error when the storage write fails.
/// A success response is only sent after the mapping is durably stored.
pub async fn shorten_handler(
    State(state): State<AppState>,
    Json(payload): Json<ShortenRequest>,
) -> Result<Json<ShortenResponse>, AppError> {
    let key = state.hasher.hash(&payload.url);

    if let Err(e) = state.storage.put(&key, &payload.url).await {
        error!(key, error = %e, "storage put failed");
        return Err(e.into());
    }

    debug!(key, "mapping created");

    Ok(Json(ShortenResponse { hash: key }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hasher::MockHasher;
    use crate::storage::{MockStorageBackend, StorageError};
    use std::sync::Arc;

    #[tokio::test]
    async fn put_failure_is_internal_error() {
        let mut hasher = MockHasher::new();
        hasher.expect_hash().returning(|_| "test-hash".to_string());

        let mut storage = MockStorageBackend::new();
        storage
            .expect_put()
            .returning(|_, _| Err(StorageError::Io(std::io::Error::other("disk full"))));

        let state = AppState::new(Arc::new(storage), Arc::new(hasher));
        let result = shorten_handler(
            State(state),
            Json(ShortenRequest {
                url: "http://www.example.com".to_string(),
            }),
        )
        .await;

        assert!(matches!(result, Err(AppError::Internal { .. })));
    }

    #[tokio::test]
    async fn responds_with_derived_key() {
        let mut hasher = MockHasher::new();
        hasher.expect_hash().returning(|_| "test-hash".to_string());

        let mut storage = MockStorageBackend::new();
        storage
            .expect_put()
            .withf(|key, value| key == "test-hash" && value == "http://www.example.com")
            .returning(|_, _| Ok(()));

        let state = AppState::new(Arc::new(storage), Arc::new(hasher));
        let Json(response) = shorten_handler(
            State(state),
            Json(ShortenRequest {
                url: "http://www.example.com".to_string(),
            }),
        )
        .await
        .unwrap();

        assert_eq!(response.hash, "test-hash");
    }
}
