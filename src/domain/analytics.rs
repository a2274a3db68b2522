use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;

use super::log_level::LogLevel;
use super::timestamp::Timestamp;

/// Aggregate view over a filtered record set. Built per request, never stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsSummary {
    /// Only levels that occur in the filtered set are present.
    pub level_counts: BTreeMap<LogLevel, usize>,
    /// Always 24 buckets, most recent hour first.
    pub hourly_data: Vec<HourlyBucket>,
    pub resource_counts: BTreeMap<String, usize>,
    pub total_logs: usize,
    pub time_range: TimeRange,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HourlyBucket {
    #[serde(serialize_with = "serialize_hour_start")]
    pub hour_start: DateTime<Utc>,
    pub count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TimeRange {
    pub earliest: Option<Timestamp>,
    pub latest: Option<Timestamp>,
}

fn serialize_hour_start<S: Serializer>(
    hour_start: &DateTime<Utc>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&hour_start.to_rfc3339_opts(SecondsFormat::Millis, true))
}
