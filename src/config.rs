use serde::{Deserialize, Serialize};

use crate::detection::DetectionConfig;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server configuration
    pub server: ServerConfig,

    /// Runbook catalog configuration
    pub catalog: CatalogConfig,

    /// Detection engine configuration
    #[serde(default)]
    pub detection: DetectionConfig,

    /// Observability configuration
    pub observability: ObservabilityConfig,
}

impl Config {
    /// Load configuration from file and environment
    pub fn load() -> Result<Self, config::ConfigError> {
        let config_path =
            std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config/default.toml".to_string());

        config::Config::builder()
            // Start with default values
            .add_source(config::File::from_str(
                include_str!("../config/default.toml"),
                config::FileFormat::Toml,
            ))
            // Override with config file if it exists
            .add_source(config::File::with_name(&config_path).required(false))
            // Override with environment variables (prefix: RUNBOOK_ADVISOR_)
            .add_source(
                config::Environment::with_prefix("RUNBOOK_ADVISOR")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// HTTP server host
    #[serde(default = "default_host")]
    pub host: String,

    /// HTTP server port
    #[serde(default = "default_http_port")]
    pub http_port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Remote catalog endpoint serving `{ "runbooks": [...] }`
    #[serde(default = "default_catalog_url")]
    pub url: String,

    /// Interval between automatic catalog refreshes (seconds)
    #[serde(default = "default_refresh_interval")]
    pub refresh_interval_secs: u64,

    /// Catalog request timeout (seconds)
    #[serde(default = "default_catalog_timeout")]
    pub request_timeout_secs: u64,

    /// Enable the background refresh task
    #[serde(default = "default_true")]
    pub auto_refresh: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Enable JSON logging
    #[serde(default)]
    pub json_logs: bool,

    /// Service name
    #[serde(default = "default_service_name")]
    pub service_name: String,

    /// Enable Prometheus metrics
    #[serde(default = "default_true")]
    pub prometheus_enabled: bool,
}

// Default value functions
fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_http_port() -> u16 {
    8080
}

fn default_catalog_url() -> String {
    "https://raw.githubusercontent.com/hashpotlia/dcogarage-api/main/runbooks.json".to_string()
}

fn default_refresh_interval() -> u64 {
    180 // 3 minutes
}

fn default_catalog_timeout() -> u64 {
    10
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_service_name() -> String {
    "runbook-advisor".to_string()
}

fn default_true() -> bool {
    true
}
