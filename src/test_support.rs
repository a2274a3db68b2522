//! Shared test support utilities
//!
//! Provides an in-memory `MockStore` implementing `LogStore` for use in unit
//! and integration tests.

use crate::domain::{LogLevel, LogRecord, Metadata, NewLogRecord, Timestamp};
use crate::error::StoreError;
use crate::port::LogStore;
use chrono::{DateTime, Utc};
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// In-memory store that can be told to fail reads or writes.
pub struct MockStore {
    records: Arc<Mutex<Vec<LogRecord>>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl MockStore {
    pub fn new() -> Self {
        Self {
            records: Arc::new(Mutex::new(Vec::new())),
            fail_reads: AtomicBool::new(false),
            fail_writes: AtomicBool::new(false),
        }
    }

    pub fn with_records(records: Vec<LogRecord>) -> Self {
        let store = Self::new();
        *store.records.lock().unwrap() = records;
        store
    }

    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn stored_records(&self) -> Vec<LogRecord> {
        self.records.lock().unwrap().clone()
    }
}

impl Default for MockStore {
    fn default() -> Self {
        Self::new()
    }
}

impl LogStore for MockStore {
    fn append(
        &self,
        record: NewLogRecord,
    ) -> Pin<Box<dyn Future<Output = Result<LogRecord, StoreError>> + Send + '_>> {
        let records = self.records.clone();
        Box::pin(async move {
            if self.fail_writes.load(Ordering::SeqCst) {
                return Err(StoreError::Backend("Mock write failure".to_string()));
            }
            let stored = record.into_record(Utc::now());
            records.lock().unwrap().push(stored.clone());
            Ok(stored)
        })
    }

    fn load_all(&self) -> Pin<Box<dyn Future<Output = Result<Vec<LogRecord>, StoreError>> + Send + '_>> {
        Box::pin(async move {
            if self.fail_reads.load(Ordering::SeqCst) {
                return Err(StoreError::Backend("Mock read failure".to_string()));
            }
            Ok(self.records.lock().unwrap().clone())
        })
    }
}

/// Build an ingest payload with placeholder ids.
pub fn new_log(level: LogLevel, message: &str, resource_id: &str, timestamp: &str) -> NewLogRecord {
    NewLogRecord {
        level,
        message: message.to_string(),
        resource_id: resource_id.to_string(),
        timestamp: Timestamp::parse(timestamp).expect("test timestamp must be ISO 8601"),
        trace_id: "trace-test".to_string(),
        span_id: "span-test".to_string(),
        commit: "abc1234".to_string(),
        metadata: Metadata::new(),
    }
}

/// Build a stored record ingested at its own event time.
pub fn stored_log(level: LogLevel, message: &str, resource_id: &str, timestamp: &str) -> LogRecord {
    let new_record = new_log(level, message, resource_id, timestamp);
    let ingested_at: DateTime<Utc> = new_record.timestamp.instant();
    new_record.into_record(ingested_at)
}
