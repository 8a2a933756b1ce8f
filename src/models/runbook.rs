use serde::{Deserialize, Serialize};

/// A runbook catalog entry: a documentation resource with the criteria
/// the detection engine matches extracted signals against.
///
/// Records arrive from a remote JSON catalog with camelCase field names.
/// Every criteria list is optional on the wire; a missing list deserializes
/// to an empty set so the scoring rules never have to null-check.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunbookRecord {
    /// Unique identifier
    pub id: String,

    /// Human-readable title
    pub title: String,

    /// Documentation URL
    pub url: String,

    /// Display category (e.g. "Vetting", "Hardware")
    #[serde(default)]
    pub category: String,

    /// Display glyph
    #[serde(default = "default_icon")]
    pub icon: String,

    /// Base confidence score, 0-100
    #[serde(default)]
    pub confidence: u32,

    /// Host type codes this runbook covers (e.g. "EC2M6I")
    #[serde(default)]
    pub host_types: Vec<String>,

    /// Fully-qualified issue types (e.g. "VETTING_MEMORY")
    #[serde(default)]
    pub issue_types: Vec<String>,

    /// Hardware vendor codes (e.g. "FOX")
    #[serde(default)]
    pub vendors: Vec<String>,

    /// Uppercase component names (e.g. "DIMM")
    #[serde(default)]
    pub components: Vec<String>,

    /// Free-form tags matched as substrings of the search text
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Wire shape of the remote catalog document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunbookCatalog {
    #[serde(default)]
    pub runbooks: Vec<RunbookRecord>,
}

fn default_icon() -> String {
    "📖".to_string()
}
