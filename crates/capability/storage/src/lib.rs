//! # Topology Storage 模块
//!
//! 检索后端的记录存储契约。流水线生成的 OutputRecord 通过 [`RecordStore`]
//! 交给检索层索引；查询时再按查询词取回排序后的记录，交给相关性过滤。
//!
//! ## 模块说明
//!
//! - [`models`]：检索请求与结果（SearchRequest、ScoredRecord）
//! - [`traits`]：存储接口定义（写入、检索、计数、清空）
//! - [`error`]：存储错误类型定义
//! - [`validation`]：记录 id 与检索参数验证
//! - [`in_memory`]：内存存储实现
//!   - 使用 `RwLock<Vec>` 提供线程安全的内存存储
//!   - 适用于单元测试、集成测试和本地演示
//!
//! ## 使用示例
//!
//! ```rust,ignore
//! use topo_storage::{InMemoryRecordStore, RecordStore, SearchRequest};
//!
//! let store = InMemoryRecordStore::new();
//! store.index_records(outcome.records).await?;
//! let hits = store.search(&SearchRequest::new("kitchen sensors", 4)).await?;
//! ```
//!
//! ## 设计约束
//!
//! - 真实的向量检索后端不在本仓库范围内，只需实现 [`RecordStore`]
//! - 同 id 记录覆盖写入，重复加载同一文档不会产生重复记录

// 模块导出：将子模块的内容导出到 crate 根目录
pub mod error;
pub mod in_memory;
pub mod models;
pub mod traits;
pub mod validation;

// 导出常用类型到 crate 根目录，方便外部引用
pub use error::*;
pub use in_memory::InMemoryRecordStore;
pub use models::*;
pub use traits::*;
pub use validation::*;
