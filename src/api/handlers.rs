use crate::api::AppState;
use crate::catalog::CatalogStats;
use crate::detection::ExtractedSignals;
use crate::error::{AppError, Result};
use crate::metrics;
use crate::models::{RunbookRecord, Suggestion, SuggestionSource};
use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Result<Json<HealthResponse>> {
    Ok(Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        catalog_records: state.catalog.len().await,
    }))
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub catalog_records: usize,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Serialize)]
pub struct DetectionResponse {
    pub query: String,
    pub signals: ExtractedSignals,
    pub suggestions: Vec<Suggestion>,
    /// Database-tier suggestion count, shown as "N verified" in clients
    pub verified_count: usize,
}

/// Suggest runbooks for the `q` query parameter
pub async fn get_suggestions(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> Result<Json<DetectionResponse>> {
    Ok(Json(run_detection(&state, &params.q).await))
}

#[derive(Debug, Deserialize, Validate)]
pub struct DetectRequest {
    #[validate(length(min = 1, max = 2000))]
    pub query: String,
}

/// Suggest runbooks for a JSON request body
pub async fn detect(
    State(state): State<AppState>,
    Json(request): Json<DetectRequest>,
) -> Result<Json<DetectionResponse>> {
    request.validate()?;

    Ok(Json(run_detection(&state, &request.query).await))
}

async fn run_detection(state: &AppState, query: &str) -> DetectionResponse {
    let trimmed = query.trim();

    // Empty input never reaches the engine.
    if trimmed.is_empty() {
        return DetectionResponse {
            query: trimmed.to_string(),
            signals: ExtractedSignals::default(),
            suggestions: Vec::new(),
            verified_count: 0,
        };
    }

    let timer = metrics::DETECTION_DURATION_SECONDS.start_timer();
    let records = state.catalog.snapshot().await;
    let detection = state.engine.detect(trimmed, &records);
    timer.observe_duration();

    let tier = detection
        .suggestions
        .first()
        .map(|s| s.source.to_string())
        .unwrap_or_else(|| "none".to_string());
    metrics::DETECTION_REQUESTS_TOTAL
        .with_label_values(&[tier.as_str()])
        .inc();
    metrics::SUGGESTIONS_RETURNED.observe(detection.suggestions.len() as f64);

    let verified_count = detection
        .suggestions
        .iter()
        .filter(|s| s.source == SuggestionSource::Database)
        .count();

    DetectionResponse {
        query: trimmed.to_string(),
        signals: detection.signals,
        suggestions: detection.suggestions,
        verified_count,
    }
}

#[derive(Debug, Serialize)]
pub struct SignalsResponse {
    pub query: String,
    pub signals: ExtractedSignals,
}

/// Extract signals without ranking
pub async fn get_signals(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> Result<Json<SignalsResponse>> {
    let trimmed = params.q.trim();

    Ok(Json(SignalsResponse {
        query: trimmed.to_string(),
        signals: state.engine.extract(trimmed),
    }))
}

#[derive(Debug, Serialize)]
pub struct CatalogResponse {
    #[serde(flatten)]
    pub stats: CatalogStats,
    pub runbooks: Vec<RunbookRecord>,
}

/// Current catalog snapshot with stats
pub async fn get_catalog(State(state): State<AppState>) -> Result<Json<CatalogResponse>> {
    Ok(Json(CatalogResponse {
        stats: state.catalog.stats().await,
        runbooks: state.catalog.snapshot().await,
    }))
}

/// Fetch a single catalog record by id
pub async fn get_runbook(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<RunbookRecord>> {
    state
        .catalog
        .get(&id)
        .await
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Runbook '{}' is not in the catalog", id)))
}

#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    pub records: usize,
}

/// Force a catalog refresh; 502 when the upstream is unavailable
pub async fn refresh_catalog(State(state): State<AppState>) -> Result<Json<RefreshResponse>> {
    let records = state.catalog.refresh().await?;
    Ok(Json(RefreshResponse { records }))
}

/// Prometheus exposition endpoint
pub async fn metrics() -> Result<String> {
    metrics::gather()
}
