use crate::adapter::json_file::JsonFileStore;
use crate::config::Settings;
use crate::engine::LogService;
use crate::error::StoreError;
use crate::port::LogStore;
use std::sync::Arc;

/// Shared application state holding the engine and its store.
pub struct AppState {
    pub service: Arc<LogService>,
}

impl AppState {
    /// Open the JSON file store named in `settings`, creating the file on
    /// first run, and wire the engine to it.
    pub async fn from_settings(settings: &Settings) -> Result<Self, StoreError> {
        let store = open_store(settings).await?;
        Ok(Self {
            service: Arc::new(LogService::new(store)),
        })
    }
}

pub(crate) async fn open_store(settings: &Settings) -> Result<Arc<dyn LogStore>, StoreError> {
    let store = JsonFileStore::with_retry(&settings.logs_file, settings.retry_policy());
    store.initialize().await?;
    tracing::info!(path = %store.path().display(), "Log store ready");
    Ok(Arc::new(store))
}
