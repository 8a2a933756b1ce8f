use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::detection::ranker;
use crate::detection::signals::{extract_signals, ExtractedSignals};
use crate::models::{RunbookRecord, Suggestion};

/// Detection engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectionConfig {
    /// Maximum number of suggestions returned per request
    #[serde(default = "default_max_suggestions")]
    pub max_suggestions: usize,

    /// URL prefix for synthesized standard vetting runbooks
    #[serde(default = "default_standard_runbook_base")]
    pub standard_runbook_base: String,

    /// URL prefix for generic vendor hardware guides
    #[serde(default = "default_vendor_guide_base")]
    pub vendor_guide_base: String,

    /// URL prefix for generic issue troubleshooting guides
    #[serde(default = "default_issue_guide_base")]
    pub issue_guide_base: String,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            max_suggestions: default_max_suggestions(),
            standard_runbook_base: default_standard_runbook_base(),
            vendor_guide_base: default_vendor_guide_base(),
            issue_guide_base: default_issue_guide_base(),
        }
    }
}

fn default_max_suggestions() -> usize {
    6
}

fn default_standard_runbook_base() -> String {
    "https://w.amazon.com/bin/view/VettingDCORunbook".to_string()
}

fn default_vendor_guide_base() -> String {
    "https://w.amazon.com/bin/view/HardwareRunbooks".to_string()
}

fn default_issue_guide_base() -> String {
    "https://w.amazon.com/bin/view/DCOSE/Documentation/Runbooks".to_string()
}

/// Result of one detection pass: the extracted signals and the ranked
/// suggestions they produced.
#[derive(Debug, Clone, Serialize)]
pub struct Detection {
    pub signals: ExtractedSignals,
    pub suggestions: Vec<Suggestion>,
}

/// Facade over the extractor and ranker.
///
/// Pure and synchronous: the catalog snapshot arrives as an explicit
/// parameter on every call, so the engine holds no state beyond its config.
pub struct DetectionEngine {
    config: DetectionConfig,
}

impl DetectionEngine {
    pub fn new(config: DetectionConfig) -> Self {
        Self { config }
    }

    /// Extract signals without ranking.
    pub fn extract(&self, text: &str) -> ExtractedSignals {
        extract_signals(text)
    }

    /// Run the full pipeline: extract signals, rank the catalog.
    pub fn detect(&self, text: &str, records: &[RunbookRecord]) -> Detection {
        let signals = extract_signals(text);
        let suggestions = ranker::suggest(&signals, text, records, &self.config);

        debug!(
            signals_empty = signals.is_empty(),
            suggestions = suggestions.len(),
            catalog_records = records.len(),
            "Detection pass complete"
        );

        Detection {
            signals,
            suggestions,
        }
    }
}
