//! Filter and aggregation engine over the full record collection.
//!
//! Every call loads the whole collection from the store and scans it once.

pub mod analytics;
pub mod filter;

use crate::domain::{AnalyticsSummary, FilterSet, LogRecord, NewLogRecord};
use crate::error::EngineError;
use crate::port::LogStore;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::debug;

pub use analytics::{HOURLY_WINDOW, summarize, truncate_to_hour};
pub use filter::{apply_filters, matches, sort_newest_first};

#[derive(Clone)]
pub struct LogService {
    store: Arc<dyn LogStore>,
}

impl LogService {
    pub fn new(store: Arc<dyn LogStore>) -> Self {
        Self { store }
    }

    /// Persist a validated record; the store assigns `ingestedAt`.
    pub async fn ingest(&self, record: NewLogRecord) -> Result<LogRecord, EngineError> {
        self.store
            .append(record)
            .await
            .map_err(EngineError::Persistence)
    }

    /// Matching records, newest first.
    pub async fn find_filtered(&self, filters: &FilterSet) -> Result<Vec<LogRecord>, EngineError> {
        let records = self
            .store
            .load_all()
            .await
            .map_err(EngineError::StoreUnavailable)?;
        let total = records.len();

        let mut matched = apply_filters(records, filters);
        sort_newest_first(&mut matched);

        debug!(total, matched = matched.len(), "Filtered logs");
        Ok(matched)
    }

    /// Analytics over the matching records, with hourly buckets relative to `now`.
    pub async fn compute_analytics(
        &self,
        filters: &FilterSet,
        now: DateTime<Utc>,
    ) -> Result<AnalyticsSummary, EngineError> {
        let records = self
            .store
            .load_all()
            .await
            .map_err(EngineError::Aggregation)?;

        let matched = apply_filters(records, filters);
        Ok(summarize(&matched, now))
    }
}
