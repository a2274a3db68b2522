//! LogStore trait for the durable record collection.
//!
//! The engine only sees this trait, so the file-backed store and the test
//! doubles are interchangeable.

use crate::domain::{LogRecord, NewLogRecord};
use crate::error::StoreError;
use std::future::Future;
use std::pin::Pin;

/// Ordered, append-only collection of log records.
///
/// This trait is dyn-compatible by using boxed futures.
pub trait LogStore: Send + Sync {
    /// Stamp `ingestedAt`, persist, and return the stored record.
    ///
    /// On error the record must not be considered stored.
    fn append(
        &self,
        record: NewLogRecord,
    ) -> Pin<Box<dyn Future<Output = Result<LogRecord, StoreError>> + Send + '_>>;

    /// Every record in insertion order. A store that has never been written
    /// yields an empty collection.
    fn load_all(&self) -> Pin<Box<dyn Future<Output = Result<Vec<LogRecord>, StoreError>> + Send + '_>>;
}
