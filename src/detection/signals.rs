use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Hardware vendor codes recognized in identifiers and vendor-prefixed text.
pub const VENDOR_CODES: [&str; 6] = ["FOX", "SNX", "QCI", "ZT", "JBL", "WYN"];

// The pattern set is fixed; compilation happens once on first use. A pattern
// that fails to compile is a programming defect, not a runtime condition.
static HOST_TYPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[(EC2[a-zA-Z0-9]*)\]").expect("host type pattern"));
static HARDWARE_ID: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"((?:FOX|SNX|QCI|ZT|JBL|WYN)\.[a-zA-Z0-9]*)").expect("hardware id pattern")
});
static REGION: Lazy<Regex> = Lazy::new(|| Regex::new(r"([A-Z]{3}\d{2,3})").expect("region pattern"));
static DEVICE_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([a-z]{3}[0-9]{2}-[a-z0-9\-]*)").expect("device name pattern"));
static ISSUE_TYPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"VETTING_([A-Z_]+)").expect("issue type pattern"));
static WORK_DEFINITION_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Work-Definition-ID = (\d+)").expect("work definition id pattern"));
static RACK_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"RACK[_-]([A-Z0-9]+)").expect("rack id pattern"));
static PSC_ID: Lazy<Regex> = Lazy::new(|| Regex::new(r"PSC[_-]([A-Z0-9]+)").expect("psc id pattern"));
static VENDOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(FOX|SNX|QCI|ZT|JBL|WYN)").expect("vendor pattern"));
static COMPONENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(PSU|DIMM|NIC|PSC|BMC|CPU|MEMORY|DISK|SSD)").expect("component pattern")
});

/// Structured signals extracted from free-text input.
///
/// Every field is absent unless its pattern matched; serialization skips
/// absent fields so API consumers see only the signals that fired.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedSignals {
    /// Host type code from a `[EC2...]` bracket
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host_type: Option<String>,

    /// Vendor-prefixed hardware identifier (e.g. `FOX.ABC123`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hardware_id: Option<String>,

    /// Region/site code (three uppercase letters plus 2-3 digits)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,

    /// All device names found, in order of appearance
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub device_names: Vec<String>,

    /// Suffix of a `VETTING_*` issue marker
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issue_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub work_definition_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub rack_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub psc_id: Option<String>,

    /// Vendor code, only when the text begins with one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor: Option<String>,

    /// Hardware component name as it appeared in the text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component: Option<String>,
}

impl ExtractedSignals {
    /// True when no pattern matched at all.
    pub fn is_empty(&self) -> bool {
        *self == ExtractedSignals::default()
    }

    /// All extracted values joined with single spaces, in field order.
    /// Tag matching scans this alongside the original search text.
    pub fn joined_values(&self) -> String {
        let mut values: Vec<&str> = Vec::new();
        if let Some(v) = &self.host_type {
            values.push(v);
        }
        if let Some(v) = &self.hardware_id {
            values.push(v);
        }
        if let Some(v) = &self.region {
            values.push(v);
        }
        for name in &self.device_names {
            values.push(name);
        }
        if let Some(v) = &self.issue_type {
            values.push(v);
        }
        if let Some(v) = &self.work_definition_id {
            values.push(v);
        }
        if let Some(v) = &self.rack_id {
            values.push(v);
        }
        if let Some(v) = &self.psc_id {
            values.push(v);
        }
        if let Some(v) = &self.vendor {
            values.push(v);
        }
        if let Some(v) = &self.component {
            values.push(v);
        }
        values.join(" ")
    }
}

/// Scan free text against the fixed pattern set.
///
/// Patterns apply independently; each single-valued signal keeps its first
/// match (first capturing group when the pattern has one), `device_names`
/// collects every non-overlapping match in order. Extraction never fails;
/// text with no recognizable signals yields the default struct.
pub fn extract_signals(text: &str) -> ExtractedSignals {
    ExtractedSignals {
        host_type: first_capture(&HOST_TYPE, text),
        hardware_id: first_capture(&HARDWARE_ID, text),
        region: first_capture(&REGION, text),
        device_names: DEVICE_NAME
            .find_iter(text)
            .map(|m| m.as_str().to_string())
            .collect(),
        issue_type: first_capture(&ISSUE_TYPE, text),
        work_definition_id: first_capture(&WORK_DEFINITION_ID, text),
        rack_id: first_capture(&RACK_ID, text),
        psc_id: first_capture(&PSC_ID, text),
        vendor: first_capture(&VENDOR, text),
        component: first_capture(&COMPONENT, text),
    }
}

fn first_capture(pattern: &Regex, text: &str) -> Option<String> {
    pattern
        .captures(text)
        .and_then(|caps| caps.get(1).or_else(|| caps.get(0)))
        .map(|m| m.as_str().to_string())
}
