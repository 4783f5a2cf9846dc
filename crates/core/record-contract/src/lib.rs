//! 交给检索层的稳定记录契约。

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// 记录分类（检索层按此过滤）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChunkType {
    Summary,
    Area,
    Fallback,
}

impl ChunkType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChunkType::Summary => "summary",
            ChunkType::Area => "area",
            ChunkType::Fallback => "fallback",
        }
    }
}

/// 记录元数据。
///
/// 已知字段显式声明；未预见的字段进入 `extra`，序列化时平铺到同一层。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordMetadata {
    pub source: String,
    pub location: String,
    pub is_valid: bool,
    pub timestamp_ms: i64,
    pub chunk_type: ChunkType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub installation_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revision: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub major: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minor: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_endpoints: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_areas: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_partitions: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_partitions: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area_uuid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area_name: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl RecordMetadata {
    /// 仅填充通用字段，其余 facet 为空。
    pub fn new(
        source: impl Into<String>,
        location: impl Into<String>,
        chunk_type: ChunkType,
        is_valid: bool,
        timestamp_ms: i64,
    ) -> Self {
        Self {
            source: source.into(),
            location: location.into(),
            is_valid,
            timestamp_ms,
            chunk_type,
            category: None,
            installation_name: None,
            revision: None,
            major: None,
            minor: None,
            total_endpoints: None,
            total_areas: None,
            total_partitions: None,
            has_partitions: None,
            area_uuid: None,
            area_name: None,
            extra: BTreeMap::new(),
        }
    }

    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}

/// 输出记录：序列化 payload + 元数据。创建后不再修改。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputRecord {
    pub id: String,
    pub payload: String,
    pub metadata: RecordMetadata,
}

impl OutputRecord {
    pub fn new(id: impl Into<String>, payload: impl Into<String>, metadata: RecordMetadata) -> Self {
        Self {
            id: id.into(),
            payload: payload.into(),
            metadata,
        }
    }

    pub fn chunk_type(&self) -> ChunkType {
        self.metadata.chunk_type
    }

    pub fn is_valid(&self) -> bool {
        self.metadata.is_valid
    }
}
