//! Shared application state injected into handlers.

use std::sync::Arc;

use crate::hasher::Hasher;
use crate::storage::StorageBackend;

/// Handler state: the shared storage backend and hasher.
///
/// Both are trait objects so tests and alternate deployments can swap
/// implementations without touching handler code. Handlers borrow these
/// through cheap `Arc` clones; neither holds per-request state.
#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<dyn StorageBackend>,
    pub hasher: Arc<dyn Hasher>,
}

impl AppState {
    pub fn new(storage: Arc<dyn StorageBackend>, hasher: Arc<dyn Hasher>) -> Self {
        Self { storage, hasher }
    }
}
