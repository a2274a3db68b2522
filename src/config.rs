use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::adapter::json_file::RetryPolicy;
use crate::error::AppError;

/// Default HTTP port for the API and the healthcheck subcommand
pub const DEFAULT_HTTP_PORT: u16 = 3000;
pub const DEFAULT_LOGS_FILE: &str = "logs.json";
const DEFAULT_PERSIST_MAX_ATTEMPTS: u32 = 3;
const DEFAULT_PERSIST_RETRY_DELAY_MS: u64 = 100;

/// Output format of the tracing subscriber (`RUST_LOG_FORMAT`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// One JSON object per event, for log shippers.
    #[default]
    Json,
    /// Human-readable lines for local runs.
    Pretty,
}

impl LogFormat {
    /// `json` selects JSON; any other value selects the readable format.
    #[must_use]
    pub fn from_env_value(value: &str) -> Self {
        if value.eq_ignore_ascii_case("json") {
            LogFormat::Json
        } else {
            LogFormat::Pretty
        }
    }
}

#[derive(Debug, Clone)]
pub struct Settings {
    /// HTTP server port (logs, analytics, health)
    pub http_port: u16,
    /// JSON file holding every ingested record
    pub logs_file: PathBuf,
    /// Total write attempts per append, including the first one
    pub persist_max_attempts: u32,
    /// Base delay between write attempts (grows linearly)
    pub persist_retry_delay: Duration,
    pub log_format: LogFormat,
}

impl Settings {
    /// Validates the settings and returns an error if invalid.
    pub fn validate(&self) -> Result<(), AppError> {
        validate_port(self.http_port)?;
        validate_logs_file(&self.logs_file)?;
        validate_attempts(self.persist_max_attempts)?;
        Ok(())
    }

    #[must_use]
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.persist_max_attempts,
            base_delay: self.persist_retry_delay,
        }
    }
}

/// Validates that the port is in valid range (1-65535).
fn validate_port(port: u16) -> Result<(), AppError> {
    if port == 0 {
        return Err(AppError::Config("Port cannot be 0".into()));
    }
    Ok(())
}

fn validate_logs_file(path: &std::path::Path) -> Result<(), AppError> {
    if path.as_os_str().is_empty() || path.file_name().is_none() {
        return Err(AppError::Config("Logs file path must name a file".into()));
    }
    Ok(())
}

fn validate_attempts(attempts: u32) -> Result<(), AppError> {
    if attempts == 0 {
        return Err(AppError::Config(
            "Persist attempts must be at least 1".into(),
        ));
    }
    Ok(())
}

pub fn get_configuration() -> Result<Settings, Box<dyn std::error::Error>> {
    load_from(|name| env::var(name).ok())
}

/// Build settings from an arbitrary variable source (the process environment
/// in production).
pub fn load_from<F>(lookup: F) -> Result<Settings, Box<dyn std::error::Error>>
where
    F: Fn(&str) -> Option<String>,
{
    let http_port = lookup("HTTP_PORT")
        .map(|v| v.parse::<u16>())
        .transpose()?
        .unwrap_or(DEFAULT_HTTP_PORT);
    let logs_file = lookup("APP_LOGS_FILE")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_LOGS_FILE));
    let persist_max_attempts = lookup("APP_PERSIST_MAX_ATTEMPTS")
        .map(|v| v.parse::<u32>())
        .transpose()?
        .unwrap_or(DEFAULT_PERSIST_MAX_ATTEMPTS);
    let persist_retry_delay_ms = lookup("APP_PERSIST_RETRY_DELAY_MS")
        .map(|v| v.parse::<u64>())
        .transpose()?
        .unwrap_or(DEFAULT_PERSIST_RETRY_DELAY_MS);
    let log_format = lookup("RUST_LOG_FORMAT")
        .map(|v| LogFormat::from_env_value(&v))
        .unwrap_or_default();

    let settings = Settings {
        http_port,
        logs_file,
        persist_max_attempts,
        persist_retry_delay: Duration::from_millis(persist_retry_delay_ms),
        log_format,
    };

    // Validate settings before returning
    settings.validate()?;

    Ok(settings)
}

/// Port for the healthcheck subcommand; falls back to the default on a
/// missing or unparsable `HTTP_PORT`.
#[must_use]
pub fn http_port_from_env() -> u16 {
    env::var("HTTP_PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_HTTP_PORT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| vars.get(name).cloned()
    }

    fn valid_settings() -> Settings {
        Settings {
            http_port: 3000,
            logs_file: PathBuf::from("logs.json"),
            persist_max_attempts: 3,
            persist_retry_delay: Duration::from_millis(100),
            log_format: LogFormat::Json,
        }
    }

    #[test]
    fn test_validate_port_valid() {
        assert!(validate_port(80).is_ok());
        assert!(validate_port(3000).is_ok());
        assert!(validate_port(65535).is_ok());
        assert!(validate_port(1).is_ok());
    }

    #[test]
    fn test_validate_port_zero_fails() {
        let result = validate_port(0);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(err.to_string().contains("Port cannot be 0"));
    }

    #[test]
    fn test_settings_validate_success() {
        assert!(valid_settings().validate().is_ok());
    }

    #[test]
    fn test_settings_validate_empty_logs_file_fails() {
        let settings = Settings {
            logs_file: PathBuf::new(),
            ..valid_settings()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_settings_validate_zero_attempts_fails() {
        let settings = Settings {
            persist_max_attempts: 0,
            ..valid_settings()
        };
        let err = settings.validate().unwrap_err();
        assert!(err.to_string().contains("at least 1"));
    }

    #[test]
    fn test_load_from_uses_defaults() {
        let settings = load_from(lookup_from(&[])).unwrap();
        assert_eq!(settings.http_port, DEFAULT_HTTP_PORT);
        assert_eq!(settings.logs_file, PathBuf::from(DEFAULT_LOGS_FILE));
        assert_eq!(settings.retry_policy(), RetryPolicy::default());
        assert_eq!(settings.log_format, LogFormat::Json);
    }

    #[test]
    fn test_load_from_reads_overrides() {
        let settings = load_from(lookup_from(&[
            ("HTTP_PORT", "8080"),
            ("APP_LOGS_FILE", "/var/lib/rask/logs.json"),
            ("APP_PERSIST_MAX_ATTEMPTS", "5"),
            ("APP_PERSIST_RETRY_DELAY_MS", "10"),
            ("RUST_LOG_FORMAT", "pretty"),
        ]))
        .unwrap();
        assert_eq!(settings.http_port, 8080);
        assert_eq!(settings.logs_file, PathBuf::from("/var/lib/rask/logs.json"));
        assert_eq!(settings.persist_max_attempts, 5);
        assert_eq!(settings.persist_retry_delay, Duration::from_millis(10));
        assert_eq!(settings.log_format, LogFormat::Pretty);
    }

    #[test]
    fn test_log_format_from_env_value() {
        assert_eq!(LogFormat::from_env_value("json"), LogFormat::Json);
        assert_eq!(LogFormat::from_env_value("JSON"), LogFormat::Json);
        assert_eq!(LogFormat::from_env_value("text"), LogFormat::Pretty);
        assert_eq!(LogFormat::from_env_value(""), LogFormat::Pretty);
    }

    #[test]
    fn test_load_from_rejects_bad_numbers() {
        assert!(load_from(lookup_from(&[("HTTP_PORT", "http")])).is_err());
        assert!(load_from(lookup_from(&[("HTTP_PORT", "0")])).is_err());
        assert!(load_from(lookup_from(&[("APP_PERSIST_MAX_ATTEMPTS", "-1")])).is_err());
    }
}
