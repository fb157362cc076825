#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use shorty::hasher::{Hasher, Md5Hasher};
use shorty::state::AppState;
use shorty::storage::{MemStore, StorageBackend, StorageError, StorageResult};

/// Hasher returning a fixed key regardless of input.
pub struct StubHasher(pub &'static str);

impl Hasher for StubHasher {
    fn hash(&self, _text: &str) -> String {
        self.0.to_string()
    }
}

/// Storage backend where every operation fails with an I/O error.
pub struct FailingStore;

#[async_trait]
impl StorageBackend for FailingStore {
    async fn get(&self, _key: &str) -> StorageResult<String> {
        Err(StorageError::Io(std::io::Error::other("disk offline")))
    }

    async fn put(&self, _key: &str, _value: &str) -> StorageResult<()> {
        Err(StorageError::Io(std::io::Error::other("disk offline")))
    }

    async fn close(&self) -> StorageResult<()> {
        Ok(())
    }
}

/// State over a fresh in-memory store and the production hasher.
///
/// Returns the store handle as well so tests can seed or inspect it.
pub fn create_test_state() -> (AppState, Arc<MemStore>) {
    let store = Arc::new(MemStore::new());
    let state = AppState::new(store.clone(), Arc::new(Md5Hasher::new()));
    (state, store)
}

/// State with a caller-supplied storage backend and hasher.
pub fn create_state_with(
    storage: Arc<dyn StorageBackend>,
    hasher: Arc<dyn Hasher>,
) -> AppState {
    AppState::new(storage, hasher)
}
