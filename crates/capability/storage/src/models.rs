//! 检索请求与结果模型

use record_contract::{ChunkType, OutputRecord};

/// 检索请求
///
/// `chunk_type` 与 `valid_only` 按记录元数据过滤。
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    pub query: String,
    pub limit: usize,
    pub chunk_type: Option<ChunkType>,
    pub valid_only: bool,
}

impl SearchRequest {
    pub fn new(query: impl Into<String>, limit: usize) -> Self {
        Self {
            query: query.into(),
            limit,
            chunk_type: None,
            valid_only: false,
        }
    }

    pub fn with_chunk_type(mut self, chunk_type: ChunkType) -> Self {
        self.chunk_type = Some(chunk_type);
        self
    }

    pub fn valid_only(mut self) -> Self {
        self.valid_only = true;
        self
    }

    /// 记录是否满足元数据过滤条件
    pub fn accepts(&self, record: &OutputRecord) -> bool {
        if self.valid_only && !record.is_valid() {
            return false;
        }
        match self.chunk_type {
            Some(chunk_type) => record.chunk_type() == chunk_type,
            None => true,
        }
    }
}

/// 带排序分数的检索结果
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredRecord {
    pub record: OutputRecord,
    /// 后端自身的排序分数，范围 [0, 1]
    pub score: f64,
}
