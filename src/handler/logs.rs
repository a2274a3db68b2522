use crate::domain::{LogRecord, NewLogRecord};
use crate::engine::LogService;
use crate::handler::error::ApiError;
use crate::handler::params::{FilterParams, parse_filters};
use axum::Json;
use axum::extract::rejection::QueryRejection;
use axum::extract::{OriginalUri, Query, State};
use axum::http::StatusCode;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Handler for POST /logs (ingest a single record)
pub async fn create_log_handler(
    State(service): State<Arc<LogService>>,
    OriginalUri(uri): OriginalUri,
    body: String,
) -> Result<(StatusCode, Json<LogRecord>), ApiError> {
    let payload: serde_json::Value = serde_json::from_str(&body).map_err(|e| {
        warn!("Rejected log with malformed JSON: {e}");
        ApiError::bad_request("Invalid JSON syntax").at(uri.path())
    })?;

    let new_record = NewLogRecord::from_json(&payload).map_err(|e| {
        warn!(violations = e.details.len(), "Rejected invalid log payload");
        ApiError::from(e).at(uri.path())
    })?;

    match service.ingest(new_record).await {
        Ok(record) => {
            info!("Log ingested: {} - {}", record.level, record.message);
            Ok((StatusCode::CREATED, Json(record)))
        }
        Err(e) => {
            error!("Error creating log: {e}");
            Err(ApiError::internal("Failed to create log").at(uri.path()))
        }
    }
}

/// Handler for GET /logs (filtered records, newest first)
pub async fn list_logs_handler(
    State(service): State<Arc<LogService>>,
    OriginalUri(uri): OriginalUri,
    params: Result<Query<FilterParams>, QueryRejection>,
) -> Result<Json<Vec<LogRecord>>, ApiError> {
    let filters = parse_filters(params).map_err(|e| e.at(uri.path()))?;

    match service.find_filtered(&filters).await {
        Ok(records) => {
            info!("Retrieved {} logs with filters: {:?}", records.len(), filters);
            Ok(Json(records))
        }
        Err(e) => {
            error!("Error filtering logs: {e}");
            Err(ApiError::internal("Failed to filter logs").at(uri.path()))
        }
    }
}
