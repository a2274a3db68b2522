use chrono::{DateTime, Utc};

use super::log_level::LogLevel;

/// Optional predicates narrowing a query or an analytics request.
///
/// `None` means the dimension is unconstrained; the default value matches
/// every record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSet {
    pub level: Option<LogLevel>,
    /// Case-insensitive substring of the message.
    pub message: Option<String>,
    pub resource_id: Option<String>,
    pub trace_id: Option<String>,
    pub span_id: Option<String>,
    pub commit: Option<String>,
    /// Inclusive lower bound.
    pub timestamp_start: Option<DateTime<Utc>>,
    /// Inclusive upper bound.
    pub timestamp_end: Option<DateTime<Utc>>,
}

impl FilterSet {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == FilterSet::default()
    }

    #[must_use]
    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.level = Some(level);
        self
    }

    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    #[must_use]
    pub fn with_resource_id(mut self, resource_id: impl Into<String>) -> Self {
        self.resource_id = Some(resource_id.into());
        self
    }

    #[must_use]
    pub fn between(mut self, start: Option<DateTime<Utc>>, end: Option<DateTime<Utc>>) -> Self {
        self.timestamp_start = start;
        self.timestamp_end = end;
        self
    }
}
