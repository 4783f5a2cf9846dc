//! 查询时的检索与相关性过滤。
//!
//! - [`relevance`]：词重叠打分与阈值过滤（主阈值 0.3，放宽阈值 0.2）
//! - [`retriever`]：组合 RecordStore 与两级过滤

pub mod relevance;
pub mod retriever;

pub use relevance::{MIN_TERM_CHARS, RecordPayload, RelevanceFilter, query_terms, relevance_score};
pub use retriever::{Retriever, RetrieverConfig};
