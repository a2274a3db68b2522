use tracing::debug;

/// Body of a successful `GET /v1/health`.
pub const HEALTHY: &str = "Healthy";

/// Handler for GET /v1/health. Liveness only; the log store is not touched.
pub async fn health_handler() -> &'static str {
    debug!("Health probe");
    HEALTHY
}
