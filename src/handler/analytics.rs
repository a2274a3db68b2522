use crate::domain::AnalyticsSummary;
use crate::engine::LogService;
use crate::handler::error::ApiError;
use crate::handler::params::{FilterParams, parse_filters};
use axum::Json;
use axum::extract::rejection::QueryRejection;
use axum::extract::{OriginalUri, Query, State};
use chrono::Utc;
use std::sync::Arc;
use tracing::{error, info};

/// Handler for GET /analytics
pub async fn analytics_handler(
    State(service): State<Arc<LogService>>,
    OriginalUri(uri): OriginalUri,
    params: Result<Query<FilterParams>, QueryRejection>,
) -> Result<Json<AnalyticsSummary>, ApiError> {
    let filters = parse_filters(params).map_err(|e| e.at(uri.path()))?;

    match service.compute_analytics(&filters, Utc::now()).await {
        Ok(summary) => {
            info!(
                "Analytics requested with filters: {:?} ({} logs)",
                filters, summary.total_logs
            );
            Ok(Json(summary))
        }
        Err(e) => {
            error!("Error getting analytics: {e}");
            Err(ApiError::internal("Failed to get analytics").at(uri.path()))
        }
    }
}
