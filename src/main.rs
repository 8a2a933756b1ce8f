use runbook_advisor::{
    api::{build_router, AppState},
    catalog::{CatalogService, HttpRunbookSource},
    config::Config,
    detection::DetectionEngine,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::load().unwrap_or_else(|e| {
        eprintln!("Failed to load configuration: {}", e);
        eprintln!("Using default configuration");
        default_config()
    });

    // Initialize tracing
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!(
            "runbook_advisor={},tower_http=info",
            config.observability.log_level
        )
        .into()
    });

    if config.observability.json_logs {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    tracing::info!("Starting Runbook Advisor v{}", env!("CARGO_PKG_VERSION"));

    // Initialize Prometheus metrics
    if config.observability.prometheus_enabled {
        if let Err(e) = runbook_advisor::metrics::init_metrics() {
            tracing::warn!("Failed to initialize metrics: {}", e);
            tracing::warn!("Continuing without metrics");
        } else {
            tracing::info!("✅ Prometheus metrics initialized");
        }
    } else {
        tracing::info!("⚠️  Prometheus metrics disabled in configuration");
    }

    // Initialize catalog service
    let source = HttpRunbookSource::new(
        config.catalog.url.clone(),
        config.catalog.request_timeout_secs,
    )?;
    let catalog = Arc::new(CatalogService::new(Arc::new(source)));

    match catalog.refresh().await {
        Ok(records) => tracing::info!("✅ Runbook catalog loaded: {} records", records),
        Err(e) => {
            tracing::warn!("⚠️  Initial catalog load failed: {}", e);
            tracing::warn!("   Continuing with an empty catalog");
        }
    }

    if config.catalog.auto_refresh {
        catalog.clone().start_refresh_task(config.catalog.refresh_interval_secs);
        tracing::info!(
            "✅ Catalog auto-refresh started (every {}s)",
            config.catalog.refresh_interval_secs
        );
    } else {
        tracing::info!("⚠️  Catalog auto-refresh disabled in configuration");
    }

    // Initialize detection engine
    let engine = Arc::new(DetectionEngine::new(config.detection.clone()));
    tracing::info!("✅ Detection engine initialized");

    // Create application state and HTTP router
    let app_state = AppState::new(catalog.clone(), engine);
    let app = build_router(app_state);

    // Start HTTP server
    let http_addr = format!("{}:{}", config.server.host, config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_addr).await?;

    tracing::info!("🚀 HTTP API server listening on http://{}", http_addr);
    tracing::info!("   Health check: http://{}/health", http_addr);
    tracing::info!("   Suggestions: http://{}/v1/suggestions?q=...", http_addr);
    tracing::info!("   Catalog: http://{}/v1/catalog", http_addr);
    tracing::info!("   Metrics: http://{}/metrics", http_addr);

    let http_handle = tokio::spawn(async move {
        if let Err(e) = axum::serve(http_listener, app).await {
            tracing::error!("HTTP server error: {}", e);
        }
    });

    tokio::select! {
        _ = http_handle => {
            tracing::warn!("HTTP server stopped");
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    tracing::info!("Shutting down gracefully...");
    Ok(())
}

fn default_config() -> Config {
    use runbook_advisor::config::*;
    use runbook_advisor::detection::DetectionConfig;

    Config {
        server: ServerConfig {
            host: "0.0.0.0".to_string(),
            http_port: 8080,
        },
        catalog: CatalogConfig {
            url: "https://raw.githubusercontent.com/hashpotlia/dcogarage-api/main/runbooks.json"
                .to_string(),
            refresh_interval_secs: 180,
            request_timeout_secs: 10,
            auto_refresh: true,
        },
        detection: DetectionConfig::default(),
        observability: ObservabilityConfig {
            log_level: "info".to_string(),
            json_logs: false,
            service_name: "runbook-advisor".to_string(),
            prometheus_enabled: true,
        },
    }
}
