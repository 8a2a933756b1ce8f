//! Runbook catalog lifecycle: remote fetch, in-memory snapshot, periodic
//! refresh. The rest of the system only ever sees immutable snapshots.

pub mod service;
pub mod source;

pub use service::{CatalogService, CatalogStats};
pub use source::{HttpRunbookSource, RunbookSource};
