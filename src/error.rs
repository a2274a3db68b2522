use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Failed to load configuration: {0}")]
    Config(String),

    #[error("Failed to bind to address {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    Server(#[from] std::io::Error),

    #[error("Log store error: {0}")]
    Store(#[from] StoreError),
}

/// Failures of the backing log store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The backing file exists but could not be read.
    #[error("log store {path} is unavailable: {source}")]
    Unavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The backing file exists but does not hold a valid record collection.
    #[error("log store {path} is corrupt: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The rewritten collection did not reach the disk.
    #[error("failed to persist log store {path} after {attempts} attempt(s): {source}")]
    Persistence {
        path: PathBuf,
        attempts: u32,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode log records: {0}")]
    Encode(#[source] serde_json::Error),

    /// Used by non-file stores (and test doubles) that have no path to report.
    #[error("log store backend failure: {0}")]
    Backend(String),
}

/// Failures surfaced by the filter and aggregation engine.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("failed to read logs: {0}")]
    StoreUnavailable(#[source] StoreError),

    #[error("failed to persist log: {0}")]
    Persistence(#[source] StoreError),

    #[error("failed to compute analytics: {0}")]
    Aggregation(#[source] StoreError),
}
