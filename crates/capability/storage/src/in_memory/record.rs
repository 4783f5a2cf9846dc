//! 记录内存存储实现
//!
//! 仅用于本地演示和测试。
//!
//! 功能：
//! - 按 id 覆盖写入，保持首次写入顺序
//! - 按查询词命中数排序（小写子串匹配），同分保持写入顺序
//! - 元数据过滤（chunk_type、valid_only）

use crate::error::StorageError;
use crate::models::{ScoredRecord, SearchRequest};
use crate::traits::RecordStore;
use crate::validation::{ensure_limit, ensure_record_id};
use record_contract::OutputRecord;
use std::sync::RwLock;
use tracing::debug;

/// 记录内存存储
///
/// 使用 RwLock + Vec 提供线程安全的内存存储。
pub struct InMemoryRecordStore {
    records: RwLock<Vec<OutputRecord>>,
}

impl InMemoryRecordStore {
    /// 创建新的记录存储
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
        }
    }
}

impl Default for InMemoryRecordStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn index_records(&self, records: Vec<OutputRecord>) -> Result<usize, StorageError> {
        for record in &records {
            ensure_record_id(record)?;
        }
        let mut stored = self
            .records
            .write()
            .map_err(|_| StorageError::new("lock failed"))?;
        let written = records.len();
        for record in records {
            match stored.iter_mut().find(|existing| existing.id == record.id) {
                Some(existing) => *existing = record,
                None => stored.push(record),
            }
        }
        debug!(target: "topo.storage", written, total = stored.len(), "records indexed");
        Ok(written)
    }

    async fn search(&self, request: &SearchRequest) -> Result<Vec<ScoredRecord>, StorageError> {
        ensure_limit(request.limit)?;
        let terms = query_terms(&request.query);
        let stored = self
            .records
            .read()
            .map_err(|_| StorageError::new("lock failed"))?;

        let mut hits: Vec<(usize, &OutputRecord)> = stored
            .iter()
            .filter(|record| request.accepts(record))
            .filter_map(|record| {
                if terms.is_empty() {
                    return Some((0, record));
                }
                let payload = record.payload.to_lowercase();
                let matched = terms
                    .iter()
                    .filter(|term| payload.contains(term.as_str()))
                    .count();
                (matched > 0).then_some((matched, record))
            })
            .collect();
        // sort_by 是稳定排序，同分保持写入顺序
        hits.sort_by(|a, b| b.0.cmp(&a.0));

        Ok(hits
            .into_iter()
            .take(request.limit)
            .map(|(matched, record)| ScoredRecord {
                record: record.clone(),
                score: if terms.is_empty() {
                    0.0
                } else {
                    matched as f64 / terms.len() as f64
                },
            })
            .collect())
    }

    async fn count(&self) -> Result<usize, StorageError> {
        self.records
            .read()
            .map(|records| records.len())
            .map_err(|_| StorageError::new("lock failed"))
    }

    async fn clear(&self) -> Result<(), StorageError> {
        let mut stored = self
            .records
            .write()
            .map_err(|_| StorageError::new("lock failed"))?;
        stored.clear();
        Ok(())
    }
}

/// 小写、去重后的查询词
fn query_terms(query: &str) -> Vec<String> {
    let mut terms: Vec<String> = Vec::new();
    for term in query.split_whitespace().map(str::to_lowercase) {
        if !terms.contains(&term) {
            terms.push(term);
        }
    }
    terms
}

#[cfg(test)]
mod tests {
    use super::query_terms;

    #[test]
    fn query_terms_are_lowercase_and_unique() {
        assert_eq!(
            query_terms("Kitchen  kitchen LIGHT"),
            vec!["kitchen".to_string(), "light".to_string()]
        );
        assert!(query_terms("   ").is_empty());
    }
}
