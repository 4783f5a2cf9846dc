//! 检索后的词重叠相关性过滤。
//!
//! 查询按空白切词，丢弃长度不超过 2 的词，统一小写并去重；
//! 分数 = payload 中出现的查询词数 / 查询词总数，范围 [0, 1]。
//! 没有可用查询词时分数为 0.0。

use record_contract::OutputRecord;
use topo_config::{DEFAULT_RELAXED_RELEVANCE_THRESHOLD, DEFAULT_RELEVANCE_THRESHOLD};
use topo_storage::ScoredRecord;

/// 参与打分的最短词长（字符数，含）。
pub const MIN_TERM_CHARS: usize = 3;

/// 提供被打分文本的类型。
pub trait RecordPayload {
    fn payload(&self) -> &str;
}

impl RecordPayload for OutputRecord {
    fn payload(&self) -> &str {
        &self.payload
    }
}

impl RecordPayload for ScoredRecord {
    fn payload(&self) -> &str {
        &self.record.payload
    }
}

impl RecordPayload for String {
    fn payload(&self) -> &str {
        self
    }
}

impl RecordPayload for &str {
    fn payload(&self) -> &str {
        self
    }
}

/// 切分查询词：长度 >= 3、小写、按首次出现去重。
pub fn query_terms(query: &str) -> Vec<String> {
    let mut terms: Vec<String> = Vec::new();
    for token in query.split_whitespace() {
        if token.chars().count() < MIN_TERM_CHARS {
            continue;
        }
        let term = token.to_lowercase();
        if !terms.contains(&term) {
            terms.push(term);
        }
    }
    terms
}

/// 计算已切分查询词在 payload 中的覆盖率。
pub fn relevance_score(terms: &[String], payload: &str) -> f64 {
    if terms.is_empty() {
        return 0.0;
    }
    let payload = payload.to_lowercase();
    let matched = terms
        .iter()
        .filter(|term| payload.contains(term.as_str()))
        .count();
    matched as f64 / terms.len() as f64
}

/// 按阈值保留记录（score >= threshold）。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RelevanceFilter {
    threshold: f64,
}

impl RelevanceFilter {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    pub fn primary() -> Self {
        Self::new(DEFAULT_RELEVANCE_THRESHOLD)
    }

    pub fn relaxed() -> Self {
        Self::new(DEFAULT_RELAXED_RELEVANCE_THRESHOLD)
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn score(&self, query: &str, payload: &str) -> f64 {
        relevance_score(&query_terms(query), payload)
    }

    /// 过滤并保持原有顺序。
    pub fn filter<T: RecordPayload>(&self, items: Vec<T>, query: &str) -> Vec<T> {
        let terms = query_terms(query);
        items
            .into_iter()
            .filter(|item| relevance_score(&terms, item.payload()) >= self.threshold)
            .collect()
    }
}

impl Default for RelevanceFilter {
    fn default() -> Self {
        Self::primary()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_tokens_are_dropped() {
        assert_eq!(
            query_terms("is the Kitchen on ON kitchen"),
            vec!["the".to_string(), "kitchen".to_string()]
        );
        assert!(query_terms("a of to").is_empty());
    }

    #[test]
    fn token_length_counts_characters() {
        assert_eq!(query_terms("éé ééé"), vec!["ééé".to_string()]);
    }

    #[test]
    fn score_is_fraction_of_terms() {
        let terms = query_terms("kitchen motion sensor garage");
        assert_eq!(relevance_score(&terms, "KITCHEN Motion Sensor"), 0.75);
        assert_eq!(relevance_score(&terms, "nothing here"), 0.0);
        assert_eq!(relevance_score(&[], "kitchen"), 0.0);
    }
}
