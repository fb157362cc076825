//! In-memory storage backend.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use super::{StorageBackend, StorageError, StorageResult};

/// A storage backend that keeps mappings in process memory only.
///
/// Offers the same concurrency and last-write-wins semantics as
/// [`super::LogStore`] but no durability. Used by tests and by deployments
/// that explicitly opt out of persistence via `STORAGE_BACKEND=memory`.
#[derive(Default)]
pub struct MemStore {
    map: RwLock<HashMap<String, String>>,
}

impl MemStore {
    pub fn new() -> Self {
        debug!("using in-memory storage (no persistence)");
        Self::default()
    }
}

#[async_trait]
impl StorageBackend for MemStore {
    async fn get(&self, key: &str) -> StorageResult<String> {
        self.map
            .read()
            .await
            .get(key)
            .cloned()
            .ok_or_else(|| StorageError::NotFound(key.to_string()))
    }

    async fn put(&self, key: &str, value: &str) -> StorageResult<()> {
        self.map
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn close(&self) -> StorageResult<()> {
        Ok(())
    }
}
