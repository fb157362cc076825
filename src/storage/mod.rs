//! Durable key-value storage for URL mappings.
//!
//! Provides a [`StorageBackend`] trait with two implementations:
//! - [`LogStore`] - crash-safe append-only log rooted at a filesystem path
//! - [`MemStore`] - in-memory implementation for tests and ephemeral use

mod log_store;
mod memory;

pub use log_store::LogStore;
pub use memory::MemStore;

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The key has never been written.
    #[error("key not found: {0}")]
    NotFound(String),

    /// An underlying I/O failure (disk full, permissions, ...).
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The on-disk log contains an undecodable record.
    #[error("corrupt log record at line {line}: {reason}")]
    Corrupt { line: usize, reason: String },
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Durable mapping from short keys to original URLs.
///
/// Implementations synchronize internally: `get` and `put` are safe to call
/// concurrently from any number of request tasks, and a `get` issued after a
/// `put` for the same key has returned observes the new value. Callers never
/// wrap the backend in their own locks.
///
/// # Implementations
///
/// - [`LogStore`] - production backend; durable on `put` return
/// - [`MemStore`] - in-memory backend for tests
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StorageBackend: Send + Sync {
    /// Returns the exact value previously stored under `key`.
    ///
    /// # Errors
    ///
    /// [`StorageError::NotFound`] when the key is absent,
    /// [`StorageError::Io`] on read failure.
    async fn get(&self, key: &str) -> StorageResult<String>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// Once this returns `Ok`, the record survives process restart.
    ///
    /// # Errors
    ///
    /// [`StorageError::Io`] when the write or sync fails; nothing is
    /// considered stored in that case.
    async fn put(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Flushes and releases underlying resources.
    ///
    /// Called exactly once during orderly shutdown. Operations after
    /// `close` are undefined.
    async fn close(&self) -> StorageResult<()>;
}
