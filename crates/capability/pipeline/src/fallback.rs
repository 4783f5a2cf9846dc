use crate::PipelineConfig;
use domain::category;
use record_contract::{ChunkType, OutputRecord, RecordMetadata};
use serde_json::json;

pub const FALLBACK_DOCUMENT_TYPE: &str = "fallback";

/// 构建降级记录：校验失败或合成失败时仍保证至少输出一条记录。
pub fn fallback_record(config: &PipelineConfig, timestamp_ms: i64) -> OutputRecord {
    let fallback_id = format!("fallback_{}", uuid::Uuid::new_v4());
    let payload = json!({
        "type": FALLBACK_DOCUMENT_TYPE,
        "category": category::NON_DEVICE,
        "message": config.fallback_message,
    });

    let mut metadata = RecordMetadata::new(
        fallback_id.clone(),
        config.source_id.clone(),
        ChunkType::Fallback,
        false,
        timestamp_ms,
    );
    metadata.category = Some(category::NON_DEVICE);
    metadata.installation_name = Some(config.default_installation_name.clone());

    OutputRecord::new(fallback_id, payload.to_string(), metadata)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn fallback_record_is_invalid_and_unique() {
        let config = PipelineConfig::default();
        let first = fallback_record(&config, 10);
        let second = fallback_record(&config, 10);

        assert!(!first.is_valid());
        assert_eq!(first.chunk_type(), ChunkType::Fallback);
        assert_eq!(first.metadata.category, Some(category::NON_DEVICE));
        assert!(first.id.starts_with("fallback_"));
        assert_eq!(first.metadata.source, first.id);
        assert_ne!(first.id, second.id);

        let payload: Value = serde_json::from_str(&first.payload).expect("payload");
        assert_eq!(payload["message"], Value::from(config.fallback_message.as_str()));
    }
}
