use crate::domain::{FilterSet, LogRecord};

/// Whether `record` satisfies every constraint in `filters`.
#[must_use]
pub fn matches(record: &LogRecord, filters: &FilterSet) -> bool {
    if filters.level.is_some_and(|level| record.level != level) {
        return false;
    }

    if let Some(needle) = &filters.message {
        if !record
            .message
            .to_lowercase()
            .contains(&needle.to_lowercase())
        {
            return false;
        }
    }

    if !exact(&filters.resource_id, &record.resource_id)
        || !exact(&filters.trace_id, &record.trace_id)
        || !exact(&filters.span_id, &record.span_id)
        || !exact(&filters.commit, &record.commit)
    {
        return false;
    }

    let instant = record.timestamp.instant();
    if filters.timestamp_start.is_some_and(|start| instant < start) {
        return false;
    }
    if filters.timestamp_end.is_some_and(|end| instant > end) {
        return false;
    }

    true
}

fn exact(expected: &Option<String>, actual: &str) -> bool {
    expected.as_deref().is_none_or(|expected| expected == actual)
}

/// Keep the matching records, preserving their order.
#[must_use]
pub fn apply_filters(records: Vec<LogRecord>, filters: &FilterSet) -> Vec<LogRecord> {
    if filters.is_empty() {
        return records;
    }
    records
        .into_iter()
        .filter(|record| matches(record, filters))
        .collect()
}

/// Newest first. Stable, so records sharing a timestamp stay in insertion order.
pub fn sort_newest_first(records: &mut [LogRecord]) {
    records.sort_by(|a, b| b.timestamp.instant().cmp(&a.timestamp.instant()));
}
