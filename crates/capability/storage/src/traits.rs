//! 存储接口 Trait 定义
//!
//! 核心流水线只通过 RecordStore 把记录交给检索后端，
//! 查询时再从后端取回排序后的记录。
//!
//! 设计原则：
//! - 所有接口返回 StorageError
//! - 使用 async_trait 支持动态分发（真实后端通常是网络服务）

use crate::error::StorageError;
use crate::models::{ScoredRecord, SearchRequest};
use async_trait::async_trait;
use record_contract::OutputRecord;

/// 记录存储接口
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// 写入记录（同 id 覆盖），返回写入数量
    async fn index_records(&self, records: Vec<OutputRecord>) -> Result<usize, StorageError>;

    /// 按查询返回排序后的记录
    async fn search(&self, request: &SearchRequest) -> Result<Vec<ScoredRecord>, StorageError>;

    /// 当前记录数量
    async fn count(&self) -> Result<usize, StorageError>;

    /// 清空所有记录
    async fn clear(&self) -> Result<(), StorageError>;
}
