use serde::Serialize;
use thiserror::Error;

/// One rejected field of an incoming payload or query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
    pub code: &'static str,
}

impl FieldViolation {
    pub fn new(field: impl Into<String>, message: impl Into<String>, code: &'static str) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            code,
        }
    }
}

/// Malformed or missing input. Raised by the HTTP layer before anything
/// reaches the engine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ValidationError {
    pub message: &'static str,
    pub details: Vec<FieldViolation>,
}

impl ValidationError {
    pub const BODY: &'static str = "Validation failed";
    pub const QUERY: &'static str = "Query validation failed";

    #[must_use]
    pub fn body(details: Vec<FieldViolation>) -> Self {
        Self {
            message: Self::BODY,
            details,
        }
    }

    #[must_use]
    pub fn query(details: Vec<FieldViolation>) -> Self {
        Self {
            message: Self::QUERY,
            details,
        }
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.details.iter().any(|d| d.field == field)
    }
}
