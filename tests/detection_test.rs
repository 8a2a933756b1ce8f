//! End-to-end tests for the detection pipeline: signal extraction through
//! three-tier ranking.

use runbook_advisor::detection::{
    extract_signals, DetectionConfig, DetectionEngine, ExtractedSignals,
};
use runbook_advisor::models::{RunbookRecord, SuggestionSource, MAX_CONFIDENCE};

/// Helper to build a catalog record
fn record(id: &str, fields: serde_json::Value) -> RunbookRecord {
    let mut object = fields;
    object["id"] = serde_json::json!(id);
    if object.get("title").is_none() {
        object["title"] = serde_json::json!(format!("Runbook {}", id));
    }
    object["url"] = serde_json::json!(format!("https://runbooks.example.com/{}", id));
    serde_json::from_value(object).unwrap()
}

fn engine() -> DetectionEngine {
    DetectionEngine::new(DetectionConfig::default())
}

#[test]
fn test_extraction_returns_only_matched_signals() {
    let signals = extract_signals("[EC2X1] SNX.12345");

    assert_eq!(
        signals,
        ExtractedSignals {
            host_type: Some("EC2X1".to_string()),
            hardware_id: Some("SNX.12345".to_string()),
            ..Default::default()
        }
    );
}

#[test]
fn test_full_match_hits_confidence_ceiling() {
    // Vendor-anchored input: all three heavy rules fire.
    let text = "FOX.ABC123 [EC2M6I] VETTING_MEMORY failure";
    let rb = record(
        "rb-vetting",
        serde_json::json!({
            "confidence": 50,
            "hostTypes": ["EC2M6I"],
            "vendors": ["FOX"],
            "issueTypes": ["VETTING_MEMORY"]
        }),
    );

    let detection = engine().detect(text, &[rb]);
    assert_eq!(detection.suggestions.len(), 1);

    let top = &detection.suggestions[0];
    assert_eq!(top.source, SuggestionSource::Database);
    assert_eq!(top.match_score, 90);
    assert_eq!(top.final_confidence, MAX_CONFIDENCE);
    assert_eq!(
        top.match_reasons,
        vec![
            "Host Type: EC2M6I".to_string(),
            "Issue: MEMORY".to_string(),
            "Vendor: FOX".to_string()
        ]
    );
}

#[test]
fn test_mid_string_vendor_code_scores_without_vendor_rule() {
    // The vendor pattern is anchored to the start of the text, so FOX after
    // the host-type bracket contributes no vendor score.
    let text = "[EC2M6I] FOX.ABC123 VETTING_MEMORY failure";
    let rb = record(
        "rb-vetting",
        serde_json::json!({
            "confidence": 50,
            "hostTypes": ["EC2M6I"],
            "vendors": ["FOX"],
            "issueTypes": ["VETTING_MEMORY"]
        }),
    );

    let detection = engine().detect(text, &[rb]);
    let top = &detection.suggestions[0];
    assert_eq!(top.match_score, 70);
    assert_eq!(top.final_confidence, MAX_CONFIDENCE);
    assert_eq!(top.match_reasons.len(), 2);
}

#[test]
fn test_no_signals_yields_empty_result() {
    let rb = record(
        "rb-any",
        serde_json::json!({ "confidence": 90, "hostTypes": ["EC2M6I"], "tags": ["thermal"] }),
    );

    let detection = engine().detect("random text with no matches here", &[rb]);
    assert!(detection.signals.is_empty());
    assert!(detection.suggestions.is_empty());
}

#[test]
fn test_host_type_fallback_when_catalog_misses() {
    let rb = record("rb-other", serde_json::json!({ "hostTypes": ["EC2X9"] }));

    let detection = engine().detect("[EC2M6I] unreviewed host", &[rb]);
    assert_eq!(detection.suggestions.len(), 1);

    let fallback = &detection.suggestions[0];
    assert_eq!(fallback.source, SuggestionSource::Fallback);
    assert_eq!(fallback.title, "EC2M6I Standard Vetting Runbook");
    assert_eq!(
        fallback.url,
        "https://w.amazon.com/bin/view/VettingDCORunbook/EC2M6I"
    );
    assert_eq!(fallback.match_score, 35);
    assert_eq!(fallback.final_confidence, 85);
}

#[test]
fn test_no_duplicate_fallback_for_covered_host_type() {
    let rb = record(
        "rb-m6i",
        serde_json::json!({ "confidence": 60, "hostTypes": ["EC2M6I"] }),
    );

    let detection = engine().detect("[EC2M6I] host check", &[rb]);
    assert_eq!(detection.suggestions.len(), 1);
    assert_eq!(detection.suggestions[0].source, SuggestionSource::Database);
}

#[test]
fn test_generic_tier_is_last_resort() {
    // No catalog, no host type: vendor and issue guides only.
    let detection = engine().detect("SNX VETTING_BIOS_CHECK failed", &[]);

    assert_eq!(detection.suggestions.len(), 2);
    assert_eq!(detection.suggestions[0].source, SuggestionSource::Generic);
    assert_eq!(detection.suggestions[0].title, "Supermicro Hardware Guide");
    assert_eq!(
        detection.suggestions[1].url,
        "https://w.amazon.com/bin/view/DCOSE/Documentation/Runbooks/BIOS_CHECK"
    );
}

#[test]
fn test_generic_tier_suppressed_by_any_earlier_suggestion() {
    // Host-type fallback fills the list, so no generic guides appear even
    // though an issue type was extracted.
    let detection = engine().detect("[EC2M6I] VETTING_BIOS_CHECK failed", &[]);

    assert_eq!(detection.suggestions.len(), 1);
    assert_eq!(detection.suggestions[0].source, SuggestionSource::Fallback);
}

#[test]
fn test_empty_when_nothing_to_fall_back_on() {
    // A region code alone extracts a signal but drives no tier.
    let detection = engine().detect("IAD12", &[]);
    assert!(!detection.signals.is_empty());
    assert!(detection.suggestions.is_empty());
}

#[test]
fn test_output_capped_and_sorted() {
    let text = "[EC2M6I] dimm thermal noise cabling fiber power issues";
    let tag_pool = ["dimm", "thermal", "noise", "cabling", "fiber", "power"];

    // Records with 1..=6 matching tags plus a host-type match.
    let mut records: Vec<RunbookRecord> = (1..=6)
        .map(|n| {
            record(
                &format!("rb-{}", n),
                serde_json::json!({ "confidence": 10, "tags": tag_pool[..n].to_vec() }),
            )
        })
        .collect();
    records.push(record(
        "rb-host",
        serde_json::json!({ "confidence": 10, "hostTypes": ["EC2M6I"] }),
    ));

    let detection = engine().detect(text, &records);
    assert_eq!(detection.suggestions.len(), 6);
    for window in detection.suggestions.windows(2) {
        assert!(window[0].match_score >= window[1].match_score);
    }
    assert!(detection.suggestions.iter().all(|s| s.match_score > 0));
    assert!(detection
        .suggestions
        .iter()
        .all(|s| s.final_confidence <= MAX_CONFIDENCE));
}

#[test]
fn test_ties_keep_scoring_order() {
    // Two records with identical scores stay in catalog order.
    let text = "[EC2M6I] check";
    let records = vec![
        record(
            "rb-first",
            serde_json::json!({ "confidence": 10, "hostTypes": ["EC2M6I"] }),
        ),
        record(
            "rb-second",
            serde_json::json!({ "confidence": 90, "hostTypes": ["EC2M6I"] }),
        ),
    ];

    let detection = engine().detect(text, &records);
    assert_eq!(detection.suggestions[0].id, "rb-first");
    assert_eq!(detection.suggestions[1].id, "rb-second");
}

#[test]
fn test_tag_only_match_through_extracted_values() {
    // "ec2m6i fox" spans a value boundary: the raw text has "] " between
    // the two tokens, so only the space-joined extracted values match it.
    let text = "[EC2M6I] FOX.ABC123";
    let rb = record(
        "rb-tagged",
        serde_json::json!({ "confidence": 20, "hostTypes": ["EC2X9"], "tags": ["ec2m6i fox"] }),
    );

    let detection = engine().detect(text, &[rb]);
    let database: Vec<_> = detection
        .suggestions
        .iter()
        .filter(|s| s.source == SuggestionSource::Database)
        .collect();
    assert_eq!(database.len(), 1);
    assert_eq!(database[0].match_score, 15);
    assert_eq!(
        database[0].match_reasons,
        vec!["Tag: ec2m6i fox".to_string()]
    );
}

#[test]
fn test_records_parsed_from_catalog_json_with_missing_fields() {
    let catalog: runbook_advisor::models::RunbookCatalog = serde_json::from_str(
        r#"{
            "runbooks": [
                { "id": "rb-lean", "title": "Lean", "url": "https://runbooks.example.com/lean",
                  "confidence": 30, "issueTypes": ["VETTING_MEMORY"] }
            ]
        }"#,
    )
    .unwrap();

    let detection = engine().detect("VETTING_MEMORY on host", &catalog.runbooks);
    assert_eq!(detection.suggestions.len(), 1);
    assert_eq!(detection.suggestions[0].match_score, 30);
    assert_eq!(detection.suggestions[0].final_confidence, 60);
}
