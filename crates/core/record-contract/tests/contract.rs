use record_contract::{ChunkType, OutputRecord, RecordMetadata};
use serde_json::{Value, json};

#[test]
fn metadata_is_camel_case() {
    let mut metadata = RecordMetadata::new("config.json", "config.json", ChunkType::Summary, true, 1);
    metadata.total_endpoints = Some(3);
    metadata.has_partitions = Some(true);
    let value = serde_json::to_value(metadata).expect("serialize");
    assert_eq!(value.get("isValid"), Some(&json!(true)));
    assert_eq!(value.get("chunkType"), Some(&json!("summary")));
    assert_eq!(value.get("totalEndpoints"), Some(&json!(3)));
    assert_eq!(value.get("hasPartitions"), Some(&json!(true)));
    assert!(value.get("is_valid").is_none());
}

#[test]
fn absent_facets_are_omitted() {
    let metadata = RecordMetadata::new("s", "s", ChunkType::Fallback, false, 1);
    let value = serde_json::to_value(metadata).expect("serialize");
    assert!(value.get("installationName").is_none());
    assert!(value.get("revision").is_none());
    assert!(value.get("areaUuid").is_none());
}

#[test]
fn extra_fields_are_flattened() {
    let metadata =
        RecordMetadata::new("s", "s", ChunkType::Area, true, 1).with_extra("relatedEndpoints", 2);
    let value = serde_json::to_value(metadata).expect("serialize");
    assert_eq!(value.get("relatedEndpoints"), Some(&json!(2)));
    assert!(value.get("extra").is_none());
}

#[test]
fn record_parses_unknown_metadata_into_extra() {
    let payload = r#"{
        "id": "r1",
        "payload": "{}",
        "metadata": {
            "source": "s",
            "location": "s",
            "isValid": true,
            "timestampMs": 5,
            "chunkType": "area",
            "floor": "2"
        }
    }"#;
    let record: OutputRecord = serde_json::from_str(payload).expect("parse");
    assert_eq!(record.chunk_type(), ChunkType::Area);
    assert!(record.is_valid());
    assert_eq!(record.metadata.extra.get("floor"), Some(&Value::from("2")));
}
