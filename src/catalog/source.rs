use async_trait::async_trait;
use std::time::Duration;

use crate::error::{AppError, Result};
use crate::models::{RunbookCatalog, RunbookRecord};

/// Where runbook catalogs come from.
#[async_trait]
pub trait RunbookSource: Send + Sync + 'static {
    /// Human-readable identifier for logs and stats
    fn describe(&self) -> String;

    /// Fetch the current catalog
    async fn fetch(&self) -> Result<Vec<RunbookRecord>>;
}

/// Fetches the catalog from a remote JSON endpoint.
pub struct HttpRunbookSource {
    client: reqwest::Client,
    url: String,
}

impl HttpRunbookSource {
    pub fn new(url: String, timeout_secs: u64) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, url })
    }
}

#[async_trait]
impl RunbookSource for HttpRunbookSource {
    fn describe(&self) -> String {
        self.url.clone()
    }

    async fn fetch(&self) -> Result<Vec<RunbookRecord>> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| AppError::Network(format!("Catalog request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::Network(format!(
                "Catalog endpoint returned {}",
                response.status()
            )));
        }

        let catalog = response
            .json::<RunbookCatalog>()
            .await
            .map_err(|e| AppError::Serialization(format!("Failed to parse catalog: {}", e)))?;

        Ok(catalog.runbooks)
    }
}
