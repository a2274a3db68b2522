use crate::engine::LogService;
use crate::handler::analytics::analytics_handler;
use crate::handler::health::health_handler;
use crate::handler::logs::{create_log_handler, list_logs_handler};
use axum::Router;
use axum::routing::get;
use std::sync::Arc;
use tower_http::LatencyUnit;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{
    DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, HttpMakeClassifier, TraceLayer,
};
use tracing::Level;

type RequestTraceLayer =
    TraceLayer<HttpMakeClassifier, DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse>;

/// Build the HTTP router (health + logs + analytics).
pub fn router(service: Arc<LogService>) -> Router {
    let v1_health_router = Router::new().route("/v1/health", get(health_handler));

    let logs_router = Router::new()
        .route("/logs", get(list_logs_handler).post(create_log_handler))
        .route("/analytics", get(analytics_handler))
        .with_state(service);

    // The browser client is served from another origin.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(v1_health_router)
        .merge(logs_router)
        .layer(cors)
        .layer(request_trace_layer())
}

/// One `info` line per response with method, URI, status and latency.
/// Unmatched routes are logged too.
fn request_trace_layer() -> RequestTraceLayer {
    TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(
            DefaultOnResponse::new()
                .level(Level::INFO)
                .latency_unit(LatencyUnit::Millis),
        )
}
