use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::interval;
use tracing::{info, warn};

use crate::catalog::source::RunbookSource;
use crate::error::Result;
use crate::metrics;
use crate::models::RunbookRecord;

/// Owns the runbook catalog snapshot and its refresh lifecycle.
///
/// The detection path never reads shared state: callers take a [`snapshot`]
/// and pass it to the engine explicitly, so a refresh mid-request only
/// affects the next request.
///
/// [`snapshot`]: CatalogService::snapshot
pub struct CatalogService {
    source: Arc<dyn RunbookSource>,
    records: Arc<RwLock<Vec<RunbookRecord>>>,
    last_refreshed: Arc<RwLock<Option<DateTime<Utc>>>>,
}

/// Point-in-time catalog summary.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogStats {
    pub records: usize,
    pub source: String,
    pub last_refreshed: Option<DateTime<Utc>>,
}

impl CatalogService {
    pub fn new(source: Arc<dyn RunbookSource>) -> Self {
        Self {
            source,
            records: Arc::new(RwLock::new(Vec::new())),
            last_refreshed: Arc::new(RwLock::new(None)),
        }
    }

    /// Fetch the catalog and swap the snapshot. On failure the previous
    /// snapshot stays in place and keeps serving detection requests.
    pub async fn refresh(&self) -> Result<usize> {
        let fetched = match self.source.fetch().await {
            Ok(records) => records,
            Err(e) => {
                metrics::CATALOG_REFRESHES_TOTAL
                    .with_label_values(&["failure"])
                    .inc();
                return Err(e);
            }
        };

        let count = fetched.len();
        *self.records.write().await = fetched;
        *self.last_refreshed.write().await = Some(Utc::now());

        metrics::CATALOG_REFRESHES_TOTAL
            .with_label_values(&["success"])
            .inc();
        metrics::CATALOG_SIZE.set(count as i64);

        info!(records = count, source = %self.source.describe(), "Runbook catalog refreshed");
        Ok(count)
    }

    /// Clone of the current catalog snapshot.
    pub async fn snapshot(&self) -> Vec<RunbookRecord> {
        self.records.read().await.clone()
    }

    /// Number of records in the current snapshot.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    /// Look up a single record by id.
    pub async fn get(&self, id: &str) -> Option<RunbookRecord> {
        self.records.read().await.iter().find(|r| r.id == id).cloned()
    }

    pub async fn stats(&self) -> CatalogStats {
        CatalogStats {
            records: self.len().await,
            source: self.source.describe(),
            last_refreshed: *self.last_refreshed.read().await,
        }
    }

    /// Spawn the background refresh loop.
    pub fn start_refresh_task(self: Arc<Self>, interval_secs: u64) -> tokio::task::JoinHandle<()> {
        let service = self;

        tokio::spawn(async move {
            let mut ticker = interval(Duration::from_secs(interval_secs));
            // The first tick completes immediately; the initial load already
            // happened at startup.
            ticker.tick().await;

            loop {
                ticker.tick().await;
                if let Err(e) = service.refresh().await {
                    warn!("Catalog auto-refresh failed: {}", e);
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, Ordering};

    struct StaticSource {
        records: Vec<RunbookRecord>,
        fail: AtomicBool,
    }

    impl StaticSource {
        fn new(records: Vec<RunbookRecord>) -> Self {
            Self {
                records,
                fail: AtomicBool::new(false),
            }
        }
    }

    #[async_trait]
    impl RunbookSource for StaticSource {
        fn describe(&self) -> String {
            "static://test".to_string()
        }

        async fn fetch(&self) -> Result<Vec<RunbookRecord>> {
            if self.fail.load(Ordering::SeqCst) {
                return Err(AppError::Network("source down".to_string()));
            }
            Ok(self.records.clone())
        }
    }

    fn sample_records() -> Vec<RunbookRecord> {
        serde_json::from_str(
            r#"[
                {"id": "rb-1", "title": "One", "url": "https://runbooks.example.com/1"},
                {"id": "rb-2", "title": "Two", "url": "https://runbooks.example.com/2"}
            ]"#,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_refresh_swaps_snapshot() {
        let catalog = CatalogService::new(Arc::new(StaticSource::new(sample_records())));
        assert!(catalog.is_empty().await);

        let count = catalog.refresh().await.unwrap();
        assert_eq!(count, 2);
        assert_eq!(catalog.len().await, 2);
        assert_eq!(catalog.snapshot().await[0].id, "rb-1");
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_previous_snapshot() {
        let source = Arc::new(StaticSource::new(sample_records()));
        let catalog = CatalogService::new(source.clone());

        catalog.refresh().await.unwrap();
        assert_eq!(catalog.len().await, 2);

        source.fail.store(true, Ordering::SeqCst);
        assert!(catalog.refresh().await.is_err());
        // Stale data keeps serving.
        assert_eq!(catalog.len().await, 2);
        assert!(catalog.stats().await.last_refreshed.is_some());
    }

    #[tokio::test]
    async fn test_get_by_id() {
        let catalog = CatalogService::new(Arc::new(StaticSource::new(sample_records())));
        catalog.refresh().await.unwrap();

        assert_eq!(catalog.get("rb-2").await.unwrap().title, "Two");
        assert!(catalog.get("rb-999").await.is_none());
    }

    #[tokio::test]
    async fn test_stats_before_first_refresh() {
        let catalog = CatalogService::new(Arc::new(StaticSource::new(vec![])));
        let stats = catalog.stats().await;
        assert_eq!(stats.records, 0);
        assert_eq!(stats.source, "static://test");
        assert!(stats.last_refreshed.is_none());
    }
}
