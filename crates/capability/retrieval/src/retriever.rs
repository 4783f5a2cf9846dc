//! 存储检索 + 相关性过滤。

use crate::relevance::RelevanceFilter;
use record_contract::OutputRecord;
use std::sync::Arc;
use topo_config::AppConfig;
use topo_storage::{RecordStore, ScoredRecord, SearchRequest, StorageError};
use topo_telemetry::{record_records_filtered_out, record_records_indexed};
use tracing::debug;

/// Retriever 参数。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetrieverConfig {
    pub threshold: f64,
    pub relaxed_threshold: f64,
    pub limit: usize,
    pub relaxed_limit: usize,
}

impl Default for RetrieverConfig {
    fn default() -> Self {
        Self::from(&AppConfig::default())
    }
}

impl From<&AppConfig> for RetrieverConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            threshold: config.relevance_threshold,
            relaxed_threshold: config.relaxed_relevance_threshold,
            limit: config.retrieval_limit,
            relaxed_limit: config.relaxed_retrieval_limit,
        }
    }
}

pub struct Retriever {
    store: Arc<dyn RecordStore>,
    primary: RelevanceFilter,
    relaxed: RelevanceFilter,
    limit: usize,
    relaxed_limit: usize,
}

impl Retriever {
    pub fn new(store: Arc<dyn RecordStore>, config: RetrieverConfig) -> Self {
        Self {
            store,
            primary: RelevanceFilter::new(config.threshold),
            relaxed: RelevanceFilter::new(config.relaxed_threshold),
            limit: config.limit,
            relaxed_limit: config.relaxed_limit,
        }
    }

    pub fn store(&self) -> &Arc<dyn RecordStore> {
        &self.store
    }

    /// 写入记录，返回写入数量。
    pub async fn index(&self, records: Vec<OutputRecord>) -> Result<usize, StorageError> {
        let written = self.store.index_records(records).await?;
        record_records_indexed(written as u64);
        Ok(written)
    }

    /// 主阈值、主数量。
    pub async fn retrieve(&self, query: &str) -> Result<Vec<ScoredRecord>, StorageError> {
        self.run(query, self.limit, self.primary).await
    }

    /// 放宽阈值、更大数量，用于主检索结果不足时的重试。
    pub async fn retrieve_relaxed(&self, query: &str) -> Result<Vec<ScoredRecord>, StorageError> {
        self.run(query, self.relaxed_limit, self.relaxed).await
    }

    async fn run(
        &self,
        query: &str,
        limit: usize,
        filter: RelevanceFilter,
    ) -> Result<Vec<ScoredRecord>, StorageError> {
        let hits = self.store.search(&SearchRequest::new(query, limit)).await?;
        let fetched = hits.len();
        let kept = filter.filter(hits, query);
        let dropped = fetched - kept.len();
        if dropped > 0 {
            record_records_filtered_out(dropped as u64);
        }
        debug!(
            target: "topo.retrieval",
            fetched,
            kept = kept.len(),
            threshold = filter.threshold(),
            "relevance filter applied"
        );
        Ok(kept)
    }
}
