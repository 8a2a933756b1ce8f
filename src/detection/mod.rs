//! Runbook detection: pattern-based signal extraction and three-tier
//! suggestion ranking over a caller-supplied catalog snapshot.

pub mod engine;
pub mod ranker;
pub mod signals;

pub use engine::{Detection, DetectionConfig, DetectionEngine};
pub use ranker::{suggest, vendor_display_name};
pub use signals::{extract_signals, ExtractedSignals, VENDOR_CODES};
