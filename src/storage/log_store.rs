//! Append-only log storage backend.
//!
//! Mappings are persisted as one JSON record per line in a single log file.
//! An in-memory index is rebuilt by replaying the log at startup; later
//! records for the same key shadow earlier ones, which gives last-write-wins
//! overwrite semantics without in-place updates.
//!
//! Durability: `put` appends the record, flushes, and fsyncs before
//! returning, so a successful `put` survives a crash immediately after.
//! A crash *during* an append can leave a torn final line; replay discards
//! it and truncates the file back to the last complete record.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::fs::{self, File, OpenOptions};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use super::{StorageBackend, StorageError, StorageResult};

const LOG_FILE: &str = "mappings.log";

#[derive(Serialize)]
struct RecordRef<'a> {
    key: &'a str,
    value: &'a str,
}

#[derive(Deserialize)]
struct Record {
    key: String,
    value: String,
}

#[derive(Debug)]
struct Inner {
    index: HashMap<String, String>,
    writer: File,
}

/// Embedded storage backend over an append-only JSON-lines log.
#[derive(Debug)]
pub struct LogStore {
    inner: RwLock<Inner>,
    path: PathBuf,
}

impl LogStore {
    /// Opens (or creates) the log under `dir` and replays it into memory.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Io`] if the directory or log file cannot be
    /// created or read, and [`StorageError::Corrupt`] if a record other
    /// than the trailing one fails to decode.
    pub async fn open(dir: impl AsRef<Path>) -> StorageResult<Self> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir).await?;
        let path = dir.join(LOG_FILE);

        let (index, valid_len, torn) = replay(&path).await?;

        if torn {
            // Drop the torn tail so new appends start on a line boundary.
            let file = OpenOptions::new().write(true).open(&path).await?;
            file.set_len(valid_len).await?;
            file.sync_all().await?;
        }

        let writer = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .await?;

        info!(
            path = %path.display(),
            mappings = index.len(),
            "storage log opened"
        );

        Ok(Self {
            inner: RwLock::new(Inner { index, writer }),
            path,
        })
    }
}

/// Rebuilds the index from the log file.
///
/// Returns the index, the byte length of the valid prefix, and whether a
/// torn trailing record was found.
async fn replay(path: &Path) -> StorageResult<(HashMap<String, String>, u64, bool)> {
    let mut index = HashMap::new();
    let mut valid_len: u64 = 0;

    let file = match File::open(path).await {
        Ok(f) => f,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Ok((index, 0, false));
        }
        Err(e) => return Err(e.into()),
    };
    let file_len = file.metadata().await?.len();

    let mut lines = BufReader::new(file).lines();
    let mut line_no = 0usize;
    let mut pending_bad: Option<(usize, String)> = None;

    while let Some(line) = lines.next_line().await? {
        line_no += 1;

        // A bad record followed by more data is corruption, not a torn tail.
        if let Some((bad_line, reason)) = pending_bad.take() {
            return Err(StorageError::Corrupt {
                line: bad_line,
                reason,
            });
        }

        match serde_json::from_str::<Record>(&line) {
            // A record only counts once its newline terminator is on disk;
            // put syncs the newline together with the record, so a valid
            // line that still ends the file is an incomplete append.
            Ok(record) if valid_len + line.len() as u64 + 1 <= file_len => {
                valid_len += line.len() as u64 + 1;
                index.insert(record.key, record.value);
            }
            Ok(_) => {
                pending_bad = Some((line_no, "record not newline-terminated".to_string()));
            }
            Err(e) => {
                pending_bad = Some((line_no, e.to_string()));
            }
        }
    }

    let torn = pending_bad.is_some();
    if let Some((line, reason)) = pending_bad {
        warn!(line, %reason, "discarding torn trailing record");
    }

    Ok((index, valid_len, torn))
}

#[async_trait]
impl StorageBackend for LogStore {
    async fn get(&self, key: &str) -> StorageResult<String> {
        let inner = self.inner.read().await;
        inner
            .index
            .get(key)
            .cloned()
            .ok_or_else(|| StorageError::NotFound(key.to_string()))
    }

    async fn put(&self, key: &str, value: &str) -> StorageResult<()> {
        let mut line = serde_json::to_string(&RecordRef { key, value })
            .map_err(|e| StorageError::Io(std::io::Error::other(e)))?;
        line.push('\n');

        // The write lock covers append, fsync, and index update, so a get
        // that starts after put returns always sees the new value.
        let mut inner = self.inner.write().await;
        inner.writer.write_all(line.as_bytes()).await?;
        inner.writer.flush().await?;
        inner.writer.sync_all().await?;
        inner.index.insert(key.to_string(), value.to_string());

        debug!(key, "mapping persisted");
        Ok(())
    }

    async fn close(&self) -> StorageResult<()> {
        let mut inner = self.inner.write().await;
        inner.writer.flush().await?;
        inner.writer.sync_all().await?;
        info!(path = %self.path.display(), "storage log closed");
        Ok(())
    }
}
