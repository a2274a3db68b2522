use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::log_level::LogLevel;
use super::timestamp::Timestamp;
use super::validation::{FieldViolation, ValidationError};

/// Free-form structured context attached to a record.
pub type Metadata = serde_json::Map<String, Value>;

/// Ingest payload: a log record before the store has accepted it.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewLogRecord {
    pub level: LogLevel,
    pub message: String,
    pub resource_id: String,
    pub timestamp: Timestamp,
    pub trace_id: String,
    pub span_id: String,
    pub commit: String,
    pub metadata: Metadata,
}

/// A stored log record. Never mutated after the store hands it back.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LogRecord {
    pub level: LogLevel,
    pub message: String,
    pub resource_id: String,
    pub timestamp: Timestamp,
    pub trace_id: String,
    pub span_id: String,
    pub commit: String,
    pub metadata: Metadata,
    #[serde(alias = "_ingested_at")]
    pub ingested_at: DateTime<Utc>,
}

const TEXT_FIELDS: [(&str, &str); 5] = [
    ("message", "Message"),
    ("resourceId", "ResourceId"),
    ("traceId", "TraceId"),
    ("spanId", "SpanId"),
    ("commit", "Commit"),
];

impl NewLogRecord {
    /// Validates a decoded JSON body and converts it into a record.
    ///
    /// Every offending field is reported, not only the first one.
    pub fn from_json(value: &Value) -> Result<Self, ValidationError> {
        let Some(object) = value.as_object() else {
            return Err(ValidationError::body(vec![FieldViolation::new(
                "",
                "Expected a JSON object",
                "invalid_type",
            )]));
        };

        let mut violations = Vec::new();

        match object.get("level") {
            None | Some(Value::Null) => {
                violations.push(FieldViolation::new("level", "Level is required", "invalid_type"));
            }
            Some(Value::String(level)) if level.parse::<LogLevel>().is_ok() => {}
            Some(Value::String(_)) => violations.push(FieldViolation::new(
                "level",
                "Level must be one of: error, warn, info, debug",
                "invalid_enum_value",
            )),
            Some(_) => violations.push(FieldViolation::new(
                "level",
                "Level must be one of: error, warn, info, debug",
                "invalid_type",
            )),
        }

        for (field, label) in TEXT_FIELDS {
            if let Some(violation) = check_text(field, label, object.get(field)) {
                violations.push(violation);
            }
        }

        match object.get("timestamp") {
            None | Some(Value::Null) => violations.push(FieldViolation::new(
                "timestamp",
                "Timestamp is required",
                "invalid_type",
            )),
            Some(Value::String(raw)) if Timestamp::parse(raw.as_str()).is_ok() => {}
            Some(Value::String(_)) => violations.push(FieldViolation::new(
                "timestamp",
                "Timestamp must be in ISO 8601 format",
                "invalid_string",
            )),
            Some(_) => violations.push(FieldViolation::new(
                "timestamp",
                "Timestamp must be a string",
                "invalid_type",
            )),
        }

        match object.get("metadata") {
            None | Some(Value::Null) => violations.push(FieldViolation::new(
                "metadata",
                "Metadata is required",
                "invalid_type",
            )),
            Some(Value::Object(_)) => {}
            Some(_) => violations.push(FieldViolation::new(
                "metadata",
                "Metadata must be an object",
                "invalid_type",
            )),
        }

        if !violations.is_empty() {
            return Err(ValidationError::body(violations));
        }

        // Shape is known-good at this point; unknown keys are dropped by serde.
        Self::deserialize(value).map_err(|e| {
            ValidationError::body(vec![FieldViolation::new("", e.to_string(), "custom")])
        })
    }

    /// Stamps the record with the time the store accepted it.
    #[must_use]
    pub fn into_record(self, ingested_at: DateTime<Utc>) -> LogRecord {
        LogRecord {
            level: self.level,
            message: self.message,
            resource_id: self.resource_id,
            timestamp: self.timestamp,
            trace_id: self.trace_id,
            span_id: self.span_id,
            commit: self.commit,
            metadata: self.metadata,
            ingested_at,
        }
    }
}

fn check_text(field: &str, label: &str, value: Option<&Value>) -> Option<FieldViolation> {
    match value {
        None | Some(Value::Null) => Some(FieldViolation::new(
            field,
            format!("{label} is required"),
            "invalid_type",
        )),
        Some(Value::String(s)) if s.is_empty() => Some(FieldViolation::new(
            field,
            format!("{label} cannot be empty"),
            "too_small",
        )),
        Some(Value::String(_)) => None,
        Some(_) => Some(FieldViolation::new(
            field,
            format!("{label} must be a string"),
            "invalid_type",
        )),
    }
}
