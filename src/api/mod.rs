pub mod handlers;
pub mod routes;

pub use routes::*;

use crate::{catalog::CatalogService, detection::DetectionEngine};
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<CatalogService>,
    pub engine: Arc<DetectionEngine>,
}

impl AppState {
    pub fn new(catalog: Arc<CatalogService>, engine: Arc<DetectionEngine>) -> Self {
        Self { catalog, engine }
    }
}
