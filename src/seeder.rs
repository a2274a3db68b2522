//! Sample data for local development (`rask-log-insight seed [count]`).

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use serde_json::json;
use tracing::{info, warn};

use crate::domain::{LogLevel, Metadata, NewLogRecord, Timestamp};
use crate::port::LogStore;

pub const DEFAULT_SEED_COUNT: usize = 50;

const RESOURCES: [&str; 6] = [
    "server-1234",
    "server-5678",
    "server-9012",
    "worker-3456",
    "api-gateway-001",
    "db-primary-002",
];

const MESSAGES: [&str; 15] = [
    "Database connection established successfully",
    "Failed to connect to external API",
    "User authentication completed",
    "Memory usage threshold exceeded",
    "Cache invalidation triggered",
    "Request processing completed",
    "Error parsing JSON payload",
    "Service health check passed",
    "Rate limit exceeded for user",
    "Background job completed successfully",
    "SSL certificate renewal required",
    "Disk space running low",
    "Network timeout occurred",
    "Configuration updated successfully",
    "Backup process initiated",
];

const ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Minutes in the window sample timestamps are spread over.
const SPREAD_MINUTES: i64 = 1440;

fn pick<'a, R: Rng + ?Sized>(rng: &mut R, items: &'a [&'a str]) -> &'a str {
    items[rng.random_range(0..items.len())]
}

fn random_id<R: Rng + ?Sized>(rng: &mut R, len: usize) -> String {
    (0..len)
        .map(|_| char::from(ID_ALPHABET[rng.random_range(0..ID_ALPHABET.len())]))
        .collect()
}

/// One random record with a timestamp in the 24 hours before `now`.
pub fn generate_sample_log<R: Rng + ?Sized>(rng: &mut R, now: DateTime<Utc>) -> NewLogRecord {
    let minutes_ago = rng.random_range(0..SPREAD_MINUTES);
    let timestamp = Timestamp::from_instant(now - Duration::minutes(minutes_ago));

    let mut metadata = Metadata::new();
    metadata.insert("userId".into(), json!(rng.random_range(0..1000)));
    metadata.insert("requestId".into(), json!(format!("req-{}", random_id(rng, 8))));
    metadata.insert("duration".into(), json!(rng.random_range(0..1000)));
    metadata.insert(
        "environment".into(),
        json!(if rng.random_bool(0.5) { "production" } else { "staging" }),
    );
    metadata.insert(
        "version".into(),
        json!(format!(
            "v{}.{}.{}",
            rng.random_range(1..=5),
            rng.random_range(0..10),
            rng.random_range(0..10)
        )),
    );

    NewLogRecord {
        level: LogLevel::ALL[rng.random_range(0..LogLevel::ALL.len())],
        message: pick(rng, &MESSAGES).to_string(),
        resource_id: pick(rng, &RESOURCES).to_string(),
        timestamp,
        trace_id: format!("trace-{}", random_id(rng, 9)),
        span_id: format!("span-{}", random_id(rng, 6)),
        commit: random_id(rng, 7),
        metadata,
    }
}

pub fn generate_sample_logs<R: Rng + ?Sized>(
    rng: &mut R,
    count: usize,
    now: DateTime<Utc>,
) -> Vec<NewLogRecord> {
    (0..count).map(|_| generate_sample_log(rng, now)).collect()
}

/// Append `records` one by one. Failed appends are logged and skipped;
/// returns how many were stored.
pub async fn seed_store(store: &dyn LogStore, records: Vec<NewLogRecord>) -> usize {
    let requested = records.len();
    info!("Generating {requested} sample logs...");

    let mut stored = 0;
    for record in records {
        match store.append(record).await {
            Ok(_) => stored += 1,
            Err(e) => warn!("Failed to store sample log: {e}"),
        }
    }

    info!(stored, requested, "Sample log generation completed");
    stored
}
