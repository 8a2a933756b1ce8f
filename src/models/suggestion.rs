use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use super::runbook::RunbookRecord;

/// Confidence ceiling for any suggestion, database-scored or synthetic.
pub const MAX_CONFIDENCE: u32 = 95;

/// Which tier produced a suggestion.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, EnumString, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SuggestionSource {
    /// Scored against a catalog record
    Database,
    /// Synthesized from the extracted host type
    Fallback,
    /// Low-confidence vendor or issue guide
    Generic,
}

impl SuggestionSource {
    /// Badge text shown next to a suggestion.
    pub fn label(&self) -> &'static str {
        match self {
            SuggestionSource::Database => "VERIFIED",
            SuggestionSource::Fallback => "STANDARD",
            SuggestionSource::Generic => "GENERAL",
        }
    }
}

/// A ranked runbook suggestion produced by the detection engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    pub id: String,
    pub title: String,
    pub url: String,
    pub category: String,
    pub icon: String,

    /// Host types the suggestion covers; consulted when deciding whether
    /// a host-type fallback would duplicate a database match
    #[serde(default)]
    pub host_types: Vec<String>,

    /// Sum of weighted signal matches
    pub match_score: u32,

    /// One human-readable line per contributing match, in discovery order
    pub match_reasons: Vec<String>,

    /// Base confidence plus match score, clamped to [`MAX_CONFIDENCE`]
    pub final_confidence: u32,

    pub source: SuggestionSource,
}

impl Suggestion {
    /// Build a database-tier suggestion from a scored catalog record.
    pub fn from_match(record: &RunbookRecord, match_score: u32, match_reasons: Vec<String>) -> Self {
        Self {
            id: record.id.clone(),
            title: record.title.clone(),
            url: record.url.clone(),
            category: record.category.clone(),
            icon: record.icon.clone(),
            host_types: record.host_types.clone(),
            match_score,
            match_reasons,
            final_confidence: (record.confidence + match_score).min(MAX_CONFIDENCE),
            source: SuggestionSource::Database,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(confidence: u32) -> RunbookRecord {
        serde_json::from_value(serde_json::json!({
            "id": "rb-test",
            "title": "Test Runbook",
            "url": "https://runbooks.example.com/test",
            "confidence": confidence,
            "hostTypes": ["EC2M6I"]
        }))
        .unwrap()
    }

    #[test]
    fn test_confidence_clamped_at_ceiling() {
        let suggestion = Suggestion::from_match(&record(80), 90, vec![]);
        assert_eq!(suggestion.final_confidence, MAX_CONFIDENCE);
    }

    #[test]
    fn test_confidence_below_ceiling_is_exact() {
        let suggestion = Suggestion::from_match(&record(50), 40, vec![]);
        assert_eq!(suggestion.final_confidence, 90);
    }

    #[test]
    fn test_source_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&SuggestionSource::Database).unwrap(),
            "\"database\""
        );
        assert_eq!(SuggestionSource::Fallback.to_string(), "fallback");
        assert_eq!(SuggestionSource::Generic.label(), "GENERAL");
    }
}
