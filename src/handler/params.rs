use axum::extract::Query;
use axum::extract::rejection::QueryRejection;
use serde::Deserialize;
use tracing::warn;

use crate::domain::{FieldViolation, FilterSet, LogLevel, Timestamp, ValidationError};
use crate::handler::error::ApiError;

/// Raw query parameters shared by `GET /logs` and `GET /analytics`.
///
/// Unknown parameters are ignored and empty values count as absent.
#[derive(Debug, Default, Deserialize)]
pub struct FilterParams {
    pub level: Option<String>,
    pub message: Option<String>,
    #[serde(rename = "resourceId")]
    pub resource_id: Option<String>,
    #[serde(rename = "traceId")]
    pub trace_id: Option<String>,
    #[serde(rename = "spanId")]
    pub span_id: Option<String>,
    pub commit: Option<String>,
    #[serde(alias = "timestampStart")]
    pub timestamp_start: Option<String>,
    #[serde(alias = "timestampEnd")]
    pub timestamp_end: Option<String>,
}

impl FilterParams {
    pub fn into_filter_set(self) -> Result<FilterSet, ValidationError> {
        let mut violations = Vec::new();

        let level = match non_empty(self.level) {
            None => None,
            Some(raw) => match raw.parse::<LogLevel>() {
                Ok(level) => Some(level),
                Err(_) => {
                    violations.push(FieldViolation::new(
                        "level",
                        format!(
                            "Invalid enum value. Expected 'error' | 'warn' | 'info' | 'debug', received '{raw}'"
                        ),
                        "invalid_enum_value",
                    ));
                    None
                }
            },
        };

        let mut bound = |field: &str, raw: Option<String>| {
            let raw = non_empty(raw)?;
            match Timestamp::parse(raw) {
                Ok(ts) => Some(ts.instant()),
                Err(_) => {
                    violations.push(FieldViolation::new(field, "Invalid datetime", "invalid_string"));
                    None
                }
            }
        };
        let timestamp_start = bound("timestamp_start", self.timestamp_start);
        let timestamp_end = bound("timestamp_end", self.timestamp_end);

        if !violations.is_empty() {
            return Err(ValidationError::query(violations));
        }

        Ok(FilterSet {
            level,
            message: non_empty(self.message),
            resource_id: non_empty(self.resource_id),
            trace_id: non_empty(self.trace_id),
            span_id: non_empty(self.span_id),
            commit: non_empty(self.commit),
            timestamp_start,
            timestamp_end,
        })
    }
}

/// Turn the (possibly rejected) query extractor into a `FilterSet`.
pub fn parse_filters(
    params: Result<Query<FilterParams>, QueryRejection>,
) -> Result<FilterSet, ApiError> {
    let Query(params) = params.map_err(|rejection| {
        warn!("Rejected query string: {rejection}");
        ApiError::from(ValidationError::query(vec![FieldViolation::new(
            "",
            rejection.body_text(),
            "invalid_query",
        )]))
    })?;

    params.into_filter_set().map_err(|e| {
        warn!(violations = e.details.len(), "Rejected invalid query filters");
        ApiError::from(e)
    })
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
