use chrono::{DateTime, Duration, DurationRound, Utc};
use std::collections::BTreeMap;

use crate::domain::{AnalyticsSummary, HourlyBucket, LogRecord, TimeRange};

/// Number of hour buckets in `hourlyData`.
pub const HOURLY_WINDOW: usize = 24;

/// Zero the minutes, seconds and sub-seconds of `instant` (UTC).
#[must_use]
pub fn truncate_to_hour(instant: DateTime<Utc>) -> DateTime<Utc> {
    instant
        .duration_trunc(Duration::hours(1))
        .unwrap_or(instant)
}

/// Aggregate an already-filtered record set.
///
/// Level and resource counts, the total and the time range cover every
/// record. Hourly buckets only see records in the last 24 hours before
/// `now`; a record whose hour falls outside the 24 generated buckets (the
/// oldest partial hour, or a future timestamp) is not counted anywhere.
#[must_use]
pub fn summarize(records: &[LogRecord], now: DateTime<Utc>) -> AnalyticsSummary {
    let mut level_counts = BTreeMap::new();
    let mut resource_counts: BTreeMap<String, usize> = BTreeMap::new();
    for record in records {
        *level_counts.entry(record.level).or_insert(0) += 1;
        *resource_counts
            .entry(record.resource_id.clone())
            .or_insert(0) += 1;
    }

    AnalyticsSummary {
        level_counts,
        hourly_data: hourly_buckets(records, now),
        resource_counts,
        total_logs: records.len(),
        time_range: time_range(records),
    }
}

fn hourly_buckets(records: &[LogRecord], now: DateTime<Utc>) -> Vec<HourlyBucket> {
    let mut buckets: Vec<HourlyBucket> = (0..HOURLY_WINDOW as i64)
        .map(|i| HourlyBucket {
            hour_start: truncate_to_hour(now - Duration::hours(i)),
            count: 0,
        })
        .collect();

    let cutoff = now - Duration::hours(HOURLY_WINDOW as i64);
    let current_hour = buckets[0].hour_start;

    for record in records {
        let instant = record.timestamp.instant();
        if instant < cutoff {
            continue;
        }
        let offset = (current_hour - truncate_to_hour(instant)).num_hours();
        if let Ok(index) = usize::try_from(offset) {
            if let Some(bucket) = buckets.get_mut(index) {
                bucket.count += 1;
            }
        }
    }

    buckets
}

fn time_range(records: &[LogRecord]) -> TimeRange {
    // min_by_key keeps the first of equal keys and max_by_key the last, so
    // ties resolve to the earliest and latest ingested record respectively.
    let earliest = records.iter().min_by_key(|r| r.timestamp.instant());
    let latest = records.iter().max_by_key(|r| r.timestamp.instant());
    TimeRange {
        earliest: earliest.map(|r| r.timestamp.clone()),
        latest: latest.map(|r| r.timestamp.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{LogLevel, Timestamp};
    use crate::test_support::stored_log;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 10, 12, 30, 0).unwrap()
    }

    fn log_at(level: LogLevel, resource: &str, instant: DateTime<Utc>) -> LogRecord {
        stored_log(
            level,
            "message",
            resource,
            Timestamp::from_instant(instant).as_str(),
        )
    }

    #[test]
    fn test_truncate_to_hour() {
        let instant = Utc.with_ymd_and_hms(2025, 1, 10, 12, 59, 59).unwrap();
        assert_eq!(
            truncate_to_hour(instant),
            Utc.with_ymd_and_hms(2025, 1, 10, 12, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_empty_set_yields_zeroed_summary() {
        let summary = summarize(&[], now());
        assert_eq!(summary.total_logs, 0);
        assert!(summary.level_counts.is_empty());
        assert!(summary.resource_counts.is_empty());
        assert_eq!(summary.time_range, TimeRange::default());
        assert_eq!(summary.hourly_data.len(), HOURLY_WINDOW);
        assert!(summary.hourly_data.iter().all(|b| b.count == 0));
    }

    #[test]
    fn test_buckets_are_most_recent_first() {
        let summary = summarize(&[], now());
        assert_eq!(
            summary.hourly_data[0].hour_start,
            Utc.with_ymd_and_hms(2025, 1, 10, 12, 0, 0).unwrap()
        );
        assert_eq!(
            summary.hourly_data[23].hour_start,
            Utc.with_ymd_and_hms(2025, 1, 9, 13, 0, 0).unwrap()
        );
        for pair in summary.hourly_data.windows(2) {
            assert_eq!(pair[0].hour_start - pair[1].hour_start, Duration::hours(1));
        }
    }

    #[test]
    fn test_records_land_in_their_hour() {
        let records = vec![
            log_at(LogLevel::Info, "a", now() - Duration::minutes(10)),
            log_at(LogLevel::Info, "a", now() - Duration::minutes(29)),
            log_at(LogLevel::Error, "b", now() - Duration::minutes(31)),
            log_at(LogLevel::Warn, "b", now() - Duration::hours(5)),
        ];
        let summary = summarize(&records, now());
        assert_eq!(summary.hourly_data[0].count, 2);
        assert_eq!(summary.hourly_data[1].count, 1);
        assert_eq!(summary.hourly_data[5].count, 1);
        assert_eq!(summary.hourly_data.iter().map(|b| b.count).sum::<usize>(), 4);
    }

    #[test]
    fn test_old_partial_hour_is_dropped_but_still_counted_in_totals() {
        // 23h50m ago is inside the 24h cutoff, but its hour (12:00 the day
        // before) is older than the oldest bucket (13:00 the day before).
        let edge = log_at(LogLevel::Debug, "edge", now() - Duration::minutes(23 * 60 + 50));
        let stale = log_at(LogLevel::Debug, "stale", now() - Duration::hours(30));
        let future = log_at(LogLevel::Debug, "future", now() + Duration::hours(2));
        let summary = summarize(&[edge, stale, future], now());

        assert!(summary.hourly_data.iter().all(|b| b.count == 0));
        assert_eq!(summary.total_logs, 3);
        assert_eq!(summary.level_counts[&LogLevel::Debug], 3);
        assert_eq!(summary.resource_counts.len(), 3);
    }

    #[test]
    fn test_counts_by_level_and_resource() {
        let records = vec![
            log_at(LogLevel::Error, "server-1", now() - Duration::days(3)),
            log_at(LogLevel::Info, "server-1", now()),
            log_at(LogLevel::Info, "server-2", now()),
        ];
        let summary = summarize(&records, now());
        assert_eq!(summary.level_counts.len(), 2);
        assert_eq!(summary.level_counts[&LogLevel::Error], 1);
        assert_eq!(summary.level_counts[&LogLevel::Info], 2);
        assert!(!summary.level_counts.contains_key(&LogLevel::Warn));
        assert_eq!(summary.resource_counts["server-1"], 2);
        assert_eq!(summary.resource_counts["server-2"], 1);
        assert_eq!(summary.total_logs, 3);
    }

    #[test]
    fn test_time_range_uses_instants() {
        let records = vec![
            stored_log(LogLevel::Info, "m", "r", "2025-01-10T12:00:00Z"),
            // Earlier instant despite the lexicographically larger text.
            stored_log(LogLevel::Info, "m", "r", "2025-01-10T20:00:00+09:00"),
            stored_log(LogLevel::Info, "m", "r", "2025-01-11T00:00:00Z"),
        ];
        let summary = summarize(&records, now());
        assert_eq!(
            summary.time_range.earliest.unwrap().as_str(),
            "2025-01-10T20:00:00+09:00"
        );
        assert_eq!(
            summary.time_range.latest.unwrap().as_str(),
            "2025-01-11T00:00:00Z"
        );
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn level_counts_sum_to_total(
                entries in proptest::collection::vec((0usize..4, 0i64..(48 * 60)), 0..60)
            ) {
                let records: Vec<_> = entries
                    .iter()
                    .map(|(level, minutes_ago)| {
                        log_at(LogLevel::ALL[*level], "r", now() - Duration::minutes(*minutes_ago))
                    })
                    .collect();
                let summary = summarize(&records, now());
                prop_assert_eq!(summary.level_counts.values().sum::<usize>(), summary.total_logs);
                prop_assert_eq!(summary.total_logs, records.len());
                prop_assert_eq!(summary.hourly_data.len(), HOURLY_WINDOW);
                prop_assert!(summary.hourly_data.iter().map(|b| b.count).sum::<usize>() <= records.len());
            }
        }
    }
}
