use crate::api::{handlers, AppState};
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};

/// Build the main API router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health endpoints
        .route("/health", get(handlers::health_check))
        .route("/health/live", get(handlers::health_check))
        .route("/health/ready", get(handlers::health_check))
        // Detection
        .route("/v1/suggestions", get(handlers::get_suggestions))
        .route("/v1/detect", post(handlers::detect))
        .route("/v1/signals", get(handlers::get_signals))
        // Catalog
        .route("/v1/catalog", get(handlers::get_catalog))
        .route("/v1/catalog/refresh", post(handlers::refresh_catalog))
        .route("/v1/catalog/:id", get(handlers::get_runbook))
        // Prometheus exposition
        .route("/metrics", get(handlers::metrics))
        // Add state
        .with_state(state)
        // Add middleware
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().include_headers(true))
                .on_response(DefaultOnResponse::new().include_headers(true)),
        )
        .layer(CorsLayer::permissive())
}
