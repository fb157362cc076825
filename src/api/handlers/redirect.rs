//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    response::Redirect,
};
use tracing::{debug, error};

use crate::error::AppError;
use crate::state::AppState;
use crate::storage::StorageError;

/// Resolves a short key and redirects to the original URL.
///
/// # Endpoint
///
/// `GET /{hash}`
///
/// Uses 307 Temporary Redirect because a mapping can be overwritten by a
/// later shorten call; clients must not cache it as permanent.
///
/// # Errors
///
/// Returns 404 Not Found for an unknown hash and 500 Internal Server Error
/// on storage failure. The two are deliberately distinguished: an unknown
/// key is a client-side problem, a failing store is not.
pub async fn redirect_handler(
    Path(hash): Path<String>,
    State(state): State<AppState>,
) -> Result<Redirect, AppError> {
    let url = match state.storage.get(&hash).await {
        Ok(url) => url,
        Err(e @ StorageError::NotFound(_)) => {
            debug!(hash, "unknown hash");
            return Err(e.into());
        }
        Err(e) => {
            error!(hash, error = %e, "storage get failed");
            return Err(e.into());
        }
    };

    Ok(Redirect::temporary(&url))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hasher::{Hasher, Md5Hasher};
    use crate::storage::MockStorageBackend;
    use std::sync::Arc;

    fn state_with(storage: MockStorageBackend) -> AppState {
        let hasher: Arc<dyn Hasher> = Arc::new(Md5Hasher::new());
        AppState::new(Arc::new(storage), hasher)
    }

    #[tokio::test]
    async fn unknown_hash_is_not_found() {
        let mut storage = MockStorageBackend::new();
        storage
            .expect_get()
            .returning(|key| Err(StorageError::NotFound(key.to_string())));

        let result =
            redirect_handler(Path("unknown-hash".to_string()), State(state_with(storage))).await;

        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }

    #[tokio::test]
    async fn storage_failure_is_internal_error() {
        let mut storage = MockStorageBackend::new();
        storage
            .expect_get()
            .returning(|_| Err(StorageError::Io(std::io::Error::other("read error"))));

        let result =
            redirect_handler(Path("test-hash".to_string()), State(state_with(storage))).await;

        assert!(matches!(result, Err(AppError::Internal { .. })));
    }
}
