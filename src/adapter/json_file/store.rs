// Keeps every log record in a single pretty-printed JSON array.
// Reads return the whole array; an append reads it, pushes the new record and
// rewrites the file through a uniquely named temp file + rename. Appends are
// serialized by an async mutex so two concurrent ingestions can't drop each
// other's record.

use crate::domain::{LogRecord, NewLogRecord};
use crate::error::StoreError;
use crate::port::LogStore;
use chrono::Utc;
use std::future::Future;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::sync::Arc;
use tokio::fs;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use super::retry::RetryPolicy;

pub struct JsonFileStore {
    path: PathBuf,
    retry: RetryPolicy,
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_retry(path, RetryPolicy::default())
    }

    pub fn with_retry(path: impl Into<PathBuf>, retry: RetryPolicy) -> Self {
        Self {
            path: path.into(),
            retry,
            write_lock: Mutex::new(()),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the backing file with an empty collection if it doesn't exist.
    pub async fn initialize(&self) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;

        let exists = fs::try_exists(&self.path)
            .await
            .map_err(|source| self.unavailable(source))?;
        if exists {
            info!(path = %self.path.display(), "Logs file found");
            return Ok(());
        }

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|source| self.persistence(1, source))?;
        }
        self.write_records(&[]).await?;
        info!(path = %self.path.display(), "Created new logs file");
        Ok(())
    }

    async fn read_records(&self) -> Result<Vec<LogRecord>, StoreError> {
        let data = match fs::read_to_string(&self.path).await {
            Ok(data) => data,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "Logs file missing, treating as empty");
                return Ok(Vec::new());
            }
            Err(source) => return Err(self.unavailable(source)),
        };

        if data.trim().is_empty() {
            return Ok(Vec::new());
        }

        serde_json::from_str(&data).map_err(|source| StoreError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }

    async fn write_records(&self, records: &[LogRecord]) -> Result<(), StoreError> {
        let bytes: Arc<[u8]> = serde_json::to_vec_pretty(records)
            .map_err(StoreError::Encode)?
            .into();

        let mut attempt = 0;
        loop {
            attempt += 1;
            match self.replace_file(bytes.clone()).await {
                Ok(()) => return Ok(()),
                Err(source) if !self.retry.should_retry(attempt) => {
                    return Err(self.persistence(attempt, source));
                }
                Err(e) => {
                    let delay = self.retry.delay_after(attempt);
                    warn!(
                        path = %self.path.display(),
                        attempt,
                        error = %e,
                        "Failed to write logs file, retrying in {delay:?}"
                    );
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }

    async fn replace_file(&self, bytes: Arc<[u8]>) -> io::Result<()> {
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || replace_atomically(&path, &bytes))
            .await
            .map_err(io::Error::other)?
    }

    fn unavailable(&self, source: io::Error) -> StoreError {
        StoreError::Unavailable {
            path: self.path.clone(),
            source,
        }
    }

    fn persistence(&self, attempts: u32, source: io::Error) -> StoreError {
        StoreError::Persistence {
            path: self.path.clone(),
            attempts,
            source,
        }
    }
}

/// Write `bytes` to a fresh temp file next to `path` and rename it over
/// `path`. Each call gets its own temp name, so writers in other processes
/// never share one; an unpersisted temp file is removed when dropped.
fn replace_atomically(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let mut tmp = tempfile::Builder::new()
        .prefix(".logs-")
        .suffix(".tmp")
        .tempfile_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.as_file().sync_data()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

impl LogStore for JsonFileStore {
    fn append(
        &self,
        record: NewLogRecord,
    ) -> Pin<Box<dyn Future<Output = Result<LogRecord, StoreError>> + Send + '_>> {
        Box::pin(async move {
            let _guard = self.write_lock.lock().await;

            // A corrupt file fails here, so it is never overwritten.
            let mut records = self.read_records().await?;
            let stored = record.into_record(Utc::now());
            records.push(stored.clone());
            self.write_records(&records).await?;

            debug!(total = records.len(), "Appended log record");
            Ok(stored)
        })
    }

    fn load_all(&self) -> Pin<Box<dyn Future<Output = Result<Vec<LogRecord>, StoreError>> + Send + '_>> {
        Box::pin(self.read_records())
    }
}
