//! 追踪、诊断收集与计数指标。

pub mod diagnostics;

pub use diagnostics::{
    CollectingDiagnostics, Diagnostic, DiagnosticKind, DiagnosticLevel, DiagnosticsSink,
    FanoutDiagnostics, TracingDiagnostics,
};

use std::sync::OnceLock;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing_subscriber::{EnvFilter, fmt};

/// 指标快照。
#[derive(Debug, Clone, Copy, Default)]
pub struct MetricsSnapshot {
    pub documents_loaded: u64,
    pub summary_records: u64,
    pub area_records: u64,
    pub fallback_records: u64,
    pub fatal_errors: u64,
    pub skipped_entries: u64,
    pub relation_conflicts: u64,
    pub records_indexed: u64,
    pub records_filtered_out: u64,
}

/// 进程级计数指标。
pub struct TelemetryMetrics {
    documents_loaded: AtomicU64,
    summary_records: AtomicU64,
    area_records: AtomicU64,
    fallback_records: AtomicU64,
    fatal_errors: AtomicU64,
    skipped_entries: AtomicU64,
    relation_conflicts: AtomicU64,
    records_indexed: AtomicU64,
    records_filtered_out: AtomicU64,
}

impl TelemetryMetrics {
    pub fn new() -> Self {
        Self {
            documents_loaded: AtomicU64::new(0),
            summary_records: AtomicU64::new(0),
            area_records: AtomicU64::new(0),
            fallback_records: AtomicU64::new(0),
            fatal_errors: AtomicU64::new(0),
            skipped_entries: AtomicU64::new(0),
            relation_conflicts: AtomicU64::new(0),
            records_indexed: AtomicU64::new(0),
            records_filtered_out: AtomicU64::new(0),
        }
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            documents_loaded: self.documents_loaded.load(Ordering::Relaxed),
            summary_records: self.summary_records.load(Ordering::Relaxed),
            area_records: self.area_records.load(Ordering::Relaxed),
            fallback_records: self.fallback_records.load(Ordering::Relaxed),
            fatal_errors: self.fatal_errors.load(Ordering::Relaxed),
            skipped_entries: self.skipped_entries.load(Ordering::Relaxed),
            relation_conflicts: self.relation_conflicts.load(Ordering::Relaxed),
            records_indexed: self.records_indexed.load(Ordering::Relaxed),
            records_filtered_out: self.records_filtered_out.load(Ordering::Relaxed),
        }
    }
}

impl Default for TelemetryMetrics {
    fn default() -> Self {
        Self::new()
    }
}

static METRICS: OnceLock<TelemetryMetrics> = OnceLock::new();

/// 获取全局指标实例。
pub fn metrics() -> &'static TelemetryMetrics {
    METRICS.get_or_init(TelemetryMetrics::new)
}

/// 初始化 tracing（默认 info）。
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt().with_env_filter(filter).try_init();
}

/// 生成单次加载的 load_id。
pub fn new_load_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// 记录文档加载次数（含降级）。
pub fn record_document_loaded() {
    metrics().documents_loaded.fetch_add(1, Ordering::Relaxed);
}

/// 记录摘要记录生成次数。
pub fn record_summary_record() {
    metrics().summary_records.fetch_add(1, Ordering::Relaxed);
}

/// 记录区域记录生成数量。
pub fn record_area_records(count: u64) {
    metrics().area_records.fetch_add(count, Ordering::Relaxed);
}

/// 记录降级记录生成次数。
pub fn record_fallback_record() {
    metrics().fallback_records.fetch_add(1, Ordering::Relaxed);
}

/// 记录致命错误次数。
pub fn record_fatal_error() {
    metrics().fatal_errors.fetch_add(1, Ordering::Relaxed);
}

/// 记录被跳过的条目数量（区域、分区、设备）。
pub fn record_skipped_entries(count: u64) {
    metrics().skipped_entries.fetch_add(count, Ordering::Relaxed);
}

/// 记录归属冲突数量。
pub fn record_relation_conflicts(count: u64) {
    metrics()
        .relation_conflicts
        .fetch_add(count, Ordering::Relaxed);
}

/// 记录写入检索层的记录数量。
pub fn record_records_indexed(count: u64) {
    metrics().records_indexed.fetch_add(count, Ordering::Relaxed);
}

/// 记录相关性过滤剔除的记录数量。
pub fn record_records_filtered_out(count: u64) {
    metrics()
        .records_filtered_out
        .fetch_add(count, Ordering::Relaxed);
}
