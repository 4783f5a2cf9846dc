use record_contract::ChunkType;
use serde_json::{Value, json};
use topo_config::AppConfig;
use topo_ingest::{InlineSource, ValidationError};
use topo_pipeline::{InstallationLoader, PipelineConfig, SUMMARY_DOCUMENT_TYPE};
use topo_telemetry::{CollectingDiagnostics, DiagnosticKind};

fn sample_config() -> Value {
    json!({
        "metadata": {"name": "Villa Rosa", "revision": 12, "major": 3, "minor": 1},
        "endpoints": [
            {"uuid": "e1", "name": "Motion", "category": 18, "partitions": ["p1"]},
            {"uuid": "e2", "name": "Ceiling", "category": 1, "partitions": ["p2"]},
            {"uuid": "e3", "category": 5, "partitions": ["p1", "p2"]}
        ],
        "areas": [
            {"uuid": "a1", "name": "Kitchen", "partitions": ["p1"]},
            {"uuid": "a2", "name": "Hall", "partitions": [{"uuid": "p2", "name": "Entry"}]}
        ]
    })
}

#[test]
fn valid_document_yields_single_summary_record() {
    let loader = InstallationLoader::default();
    let sink = CollectingDiagnostics::new();
    let outcome = loader
        .load(Some(&sample_config().to_string()), &sink)
        .expect("load");

    assert_eq!(outcome.records.len(), 1);
    assert!(!outcome.is_fallback());
    let record = &outcome.records[0];
    assert_eq!(record.chunk_type(), ChunkType::Summary);
    assert!(record.is_valid());
    assert_eq!(record.metadata.total_endpoints, Some(3));
    assert_eq!(record.metadata.total_areas, Some(2));
    assert_eq!(record.metadata.has_partitions, Some(true));
    assert_eq!(record.metadata.installation_name.as_deref(), Some("Villa Rosa"));
    assert_eq!(record.metadata.revision, Some(json!(12)));
    assert_eq!(record.metadata.source, "installation_config");

    let statistics = outcome.statistics.expect("statistics");
    assert_eq!(statistics.sensors, 1);
    assert_eq!(statistics.actuators, 1);
    assert_eq!(statistics.controllers, 1);
    assert_eq!(statistics.total_partitions, 2);

    assert_eq!(outcome.relations.len(), 3);
    assert_eq!(
        outcome.relations.get("e3").and_then(|r| r.area_name.as_deref()),
        Some("Kitchen")
    );
    assert_eq!(sink.count(DiagnosticKind::RelationConflict), 1);
}

#[test]
fn summary_payload_carries_document_content() {
    let loader = InstallationLoader::default();
    let sink = CollectingDiagnostics::new();
    let outcome = loader
        .load(Some(&sample_config().to_string()), &sink)
        .expect("load");
    let payload: Value = serde_json::from_str(&outcome.records[0].payload).expect("payload");

    assert_eq!(payload["type"], json!(SUMMARY_DOCUMENT_TYPE));
    assert_eq!(payload["installation"]["name"], json!("Villa Rosa"));
    assert_eq!(payload["installation"]["major"], json!(3));
    assert_eq!(payload["statistics"]["totalEndpoints"], json!(3));
    assert_eq!(payload["endpoints"], sample_config()["endpoints"]);
    assert_eq!(payload["areas"], sample_config()["areas"]);
    assert_eq!(payload["partitions"], json!({"p1": "Partition_p1", "p2": "Entry"}));
}

#[test]
fn missing_metadata_uses_default_name() {
    let loader = InstallationLoader::default();
    let sink = CollectingDiagnostics::new();
    let outcome = loader
        .load(Some(r#"{"endpoints": [{"uuid": "e1"}]}"#), &sink)
        .expect("load");
    let record = &outcome.records[0];

    assert_eq!(
        record.metadata.installation_name.as_deref(),
        Some("Unknown Installation")
    );
    assert!(record.metadata.revision.is_none());
    assert_eq!(record.metadata.has_partitions, Some(false));
    assert_eq!(record.metadata.total_areas, Some(0));
    assert!(outcome.relations.is_empty());

    let payload: Value = serde_json::from_str(&record.payload).expect("payload");
    assert!(payload["installation"].get("name").is_none());
}

#[test]
fn empty_endpoints_yield_one_fallback_record() {
    let loader = InstallationLoader::default();
    let sink = CollectingDiagnostics::new();
    let outcome = loader
        .load(Some(r#"{"endpoints": []}"#), &sink)
        .expect("fallback");

    assert_eq!(outcome.records.len(), 1);
    assert!(outcome.is_fallback());
    assert!(!outcome.records[0].metadata.is_valid);
    assert_eq!(outcome.records[0].chunk_type(), ChunkType::Fallback);
    assert!(outcome.relations.is_empty());
    assert!(outcome.statistics.is_none());
    assert!(sink.has(DiagnosticKind::NoUsableEndpoints));
    assert!(sink.has(DiagnosticKind::FallbackGenerated));
}

#[test]
fn missing_endpoints_yield_fallback() {
    let loader = InstallationLoader::default();
    let sink = CollectingDiagnostics::new();
    let outcome = loader
        .load(
            Some(r#"{"areas": [{"uuid": "a1", "partitions": ["p1"]}]}"#),
            &sink,
        )
        .expect("fallback");
    assert_eq!(outcome.records.len(), 1);
    assert!(outcome.is_fallback());
}

#[test]
fn fatal_errors_produce_no_records() {
    let loader = InstallationLoader::default();
    let sink = CollectingDiagnostics::new();

    let err = loader.load(Some("not json"), &sink).expect_err("malformed");
    assert!(matches!(err, ValidationError::MalformedInput(_)));
    assert_eq!(
        loader.load(None, &sink).expect_err("missing"),
        ValidationError::MissingSource
    );
    assert_eq!(
        loader.load(Some("   "), &sink).expect_err("empty"),
        ValidationError::EmptyInput
    );
    assert_eq!(
        loader.load(Some("42"), &sink).expect_err("root"),
        ValidationError::InvalidRoot("number")
    );
    assert!(!sink.has(DiagnosticKind::FallbackGenerated));
}

#[test]
fn unreadable_source_is_missing_source() {
    let loader = InstallationLoader::default();
    let sink = CollectingDiagnostics::new();
    let err = loader
        .load_source(&InlineSource::unavailable("remote.json"), &sink)
        .expect_err("missing");
    assert_eq!(err, ValidationError::MissingSource);
    assert!(sink.has(DiagnosticKind::SourceUnavailable));
}

#[test]
fn source_id_flows_into_metadata() {
    let loader = InstallationLoader::default();
    let sink = CollectingDiagnostics::new();
    let source = InlineSource::new("villa.json", sample_config().to_string());
    let outcome = loader.load_source(&source, &sink).expect("load");
    assert_eq!(outcome.records[0].metadata.source, "villa.json");
    assert_eq!(outcome.records[0].metadata.location, "villa.json");
    assert_eq!(outcome.records[0].id, "villa.json:summary");
}

#[test]
fn area_records_are_optional() {
    let config = AppConfig {
        emit_area_records: true,
        ..AppConfig::default()
    };
    let loader = InstallationLoader::new(PipelineConfig::from(&config));
    let sink = CollectingDiagnostics::new();
    let outcome = loader
        .load(Some(&sample_config().to_string()), &sink)
        .expect("load");

    assert_eq!(outcome.records.len(), 3);
    let summaries = outcome
        .records
        .iter()
        .filter(|record| record.chunk_type() == ChunkType::Summary)
        .count();
    assert_eq!(summaries, 1);

    let kitchen = outcome
        .records
        .iter()
        .find(|record| record.metadata.area_name.as_deref() == Some("Kitchen"))
        .expect("kitchen record");
    assert_eq!(kitchen.chunk_type(), ChunkType::Area);
    assert_eq!(kitchen.metadata.extra.get("relatedEndpoints"), Some(&json!(2)));
    let payload: Value = serde_json::from_str(&kitchen.payload).expect("payload");
    assert_eq!(payload["endpoints"].as_array().map(Vec::len), Some(2));
}

#[test]
fn skipped_entries_do_not_block_summary() {
    let loader = InstallationLoader::default();
    let sink = CollectingDiagnostics::new();
    let content = json!({
        "endpoints": [{"partitions": ["p1"]}, {"uuid": "e2", "partitions": ["p1"]}],
        "areas": [42, {"uuid": "a1", "partitions": ["p1", {"uuid": "p2"}]}]
    });
    let outcome = loader
        .load(Some(&content.to_string()), &sink)
        .expect("load");

    assert_eq!(outcome.records.len(), 1);
    assert!(outcome.records[0].is_valid());
    assert_eq!(outcome.records[0].metadata.total_areas, Some(2));
    assert_eq!(outcome.relations.len(), 1);
    assert_eq!(sink.skipped_entries(), 3);
}
