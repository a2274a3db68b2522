pub mod analytics;
pub mod filter;
pub mod log_level;
pub mod log_record;
pub mod timestamp;
pub mod validation;

pub use analytics::{AnalyticsSummary, HourlyBucket, TimeRange};
pub use filter::FilterSet;
pub use log_level::LogLevel;
pub use log_record::{LogRecord, Metadata, NewLogRecord};
pub use timestamp::Timestamp;
pub use validation::{FieldViolation, ValidationError};
