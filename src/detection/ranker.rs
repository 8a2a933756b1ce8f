use crate::detection::engine::DetectionConfig;
use crate::detection::signals::ExtractedSignals;
use crate::models::{RunbookRecord, Suggestion, SuggestionSource};

// Weights for the database tier, applied cumulatively in evaluation order.
const HOST_TYPE_WEIGHT: u32 = 40;
const ISSUE_TYPE_WEIGHT: u32 = 30;
const VENDOR_WEIGHT: u32 = 20;
const COMPONENT_WEIGHT: u32 = 25;
const TAG_WEIGHT: u32 = 15;

// Fixed scores for the synthetic tiers.
const FALLBACK_SCORE: u32 = 35;
const FALLBACK_CONFIDENCE: u32 = 85;
const VENDOR_GUIDE_SCORE: u32 = 25;
const VENDOR_GUIDE_CONFIDENCE: u32 = 65;
const ISSUE_GUIDE_SCORE: u32 = 20;
const ISSUE_GUIDE_CONFIDENCE: u32 = 60;

/// Rank the catalog against the extracted signals and original search text.
///
/// Three tiers: database-scored matches, a single host-type fallback when no
/// database match covers the extracted host type, and generic vendor/issue
/// guides only when the list is otherwise empty. The result is stable-sorted
/// by score descending and capped at `config.max_suggestions`.
pub fn suggest(
    signals: &ExtractedSignals,
    original_text: &str,
    records: &[RunbookRecord],
    config: &DetectionConfig,
) -> Vec<Suggestion> {
    let mut suggestions: Vec<Suggestion> = records
        .iter()
        .filter_map(|record| {
            score_record(record, signals, original_text)
                .map(|(score, reasons)| Suggestion::from_match(record, score, reasons))
        })
        .collect();

    if let Some(host_type) = &signals.host_type {
        let already_covered = suggestions
            .iter()
            .any(|s| s.host_types.iter().any(|h| h == host_type));
        if !already_covered {
            suggestions.push(host_type_fallback(host_type, signals, config));
        }
    }

    if suggestions.is_empty() {
        suggestions.extend(generic_fallbacks(signals, config));
    }

    suggestions.sort_by(|a, b| b.match_score.cmp(&a.match_score));
    suggestions.truncate(config.max_suggestions);
    suggestions
}

/// Score one record against the signals. Returns the accumulated score and
/// the match reasons in discovery order, or `None` when nothing matched.
pub fn score_record(
    record: &RunbookRecord,
    signals: &ExtractedSignals,
    original_text: &str,
) -> Option<(u32, Vec<String>)> {
    let mut score = 0;
    let mut reasons = Vec::new();

    if let Some(host_type) = &signals.host_type {
        if record.host_types.iter().any(|h| h == host_type) {
            score += HOST_TYPE_WEIGHT;
            reasons.push(format!("Host Type: {}", host_type));
        }
    }

    if let Some(issue_type) = &signals.issue_type {
        let qualified = format!("VETTING_{}", issue_type);
        if record.issue_types.iter().any(|i| i == &qualified) {
            score += ISSUE_TYPE_WEIGHT;
            reasons.push(format!("Issue: {}", issue_type));
        }
    }

    if let Some(vendor) = &signals.vendor {
        if record.vendors.iter().any(|v| v == vendor) {
            score += VENDOR_WEIGHT;
            reasons.push(format!("Vendor: {}", vendor));
        }
    }

    if let Some(component) = &signals.component {
        let upper = component.to_uppercase();
        if record.components.iter().any(|c| c == &upper) {
            score += COMPONENT_WEIGHT;
            reasons.push(format!("Component: {}", component));
        }
    }

    if !record.tags.is_empty() {
        let search_lower = original_text.to_lowercase();
        let extracted_lower = signals.joined_values().to_lowercase();

        for tag in &record.tags {
            let tag_lower = tag.to_lowercase();
            if search_lower.contains(&tag_lower) || extracted_lower.contains(&tag_lower) {
                score += TAG_WEIGHT;
                reasons.push(format!("Tag: {}", tag));
            }
        }
    }

    (score > 0).then_some((score, reasons))
}

/// Synthesize the standard vetting runbook for an extracted host type.
fn host_type_fallback(
    host_type: &str,
    signals: &ExtractedSignals,
    config: &DetectionConfig,
) -> Suggestion {
    let mut reasons = vec![format!("Host Type: {} (Auto-Generated)", host_type)];
    if let Some(vendor) = &signals.vendor {
        reasons.push(format!("Vendor: {}", vendor));
    }
    if let Some(issue_type) = &signals.issue_type {
        reasons.push(format!("Issue: {}", issue_type));
    }

    Suggestion {
        id: format!("fallback-{}", host_type.to_lowercase()),
        title: format!("{} Standard Vetting Runbook", host_type),
        url: format!("{}/{}", config.standard_runbook_base, host_type),
        category: "Standard Runbook".to_string(),
        icon: "📖".to_string(),
        host_types: vec![host_type.to_string()],
        match_score: FALLBACK_SCORE,
        match_reasons: reasons,
        final_confidence: FALLBACK_CONFIDENCE,
        source: SuggestionSource::Fallback,
    }
}

/// Last-resort vendor and issue guides, at most one of each.
fn generic_fallbacks(signals: &ExtractedSignals, config: &DetectionConfig) -> Vec<Suggestion> {
    let mut fallbacks = Vec::new();

    if let Some(vendor) = &signals.vendor {
        let vendor_name = vendor_display_name(vendor);
        fallbacks.push(Suggestion {
            id: format!("vendor-{}", vendor.to_lowercase()),
            title: format!("{} Hardware Guide", vendor_name),
            url: format!("{}/{}", config.vendor_guide_base, vendor_name),
            category: "Vendor Guide".to_string(),
            icon: "🔧".to_string(),
            host_types: Vec::new(),
            match_score: VENDOR_GUIDE_SCORE,
            match_reasons: vec![format!("Vendor: {}", vendor)],
            final_confidence: VENDOR_GUIDE_CONFIDENCE,
            source: SuggestionSource::Generic,
        });
    }

    if let Some(issue_type) = &signals.issue_type {
        fallbacks.push(Suggestion {
            id: format!("issue-{}", issue_type.to_lowercase()),
            // Only the first underscore becomes a space ("MEMORY_TEST_FAIL"
            // reads "MEMORY TEST_FAIL").
            title: format!("{} Troubleshooting Guide", issue_type.replacen('_', " ", 1)),
            url: format!("{}/{}", config.issue_guide_base, issue_type),
            category: "Issue Guide".to_string(),
            icon: "🔍".to_string(),
            host_types: Vec::new(),
            match_score: ISSUE_GUIDE_SCORE,
            match_reasons: vec![format!("Issue Type: {}", issue_type)],
            final_confidence: ISSUE_GUIDE_CONFIDENCE,
            source: SuggestionSource::Generic,
        });
    }

    fallbacks
}

/// Display name for a vendor code; unknown codes pass through unchanged.
pub fn vendor_display_name(code: &str) -> &str {
    match code {
        "FOX" => "Foxconn",
        "SNX" => "Supermicro",
        "QCI" => "Quanta",
        "ZT" => "ZT_Systems",
        "JBL" => "Jabil",
        "WYN" => "Wiwynn",
        other => other,
    }
}
