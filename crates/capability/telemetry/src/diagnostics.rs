//! 诊断收集。
//!
//! 拓扑构建各阶段不直接写日志，而是把跳过、冲突等事件上报给注入的
//! [`DiagnosticsSink`]：
//! - [`TracingDiagnostics`]：转发到 tracing（运行时使用）
//! - [`CollectingDiagnostics`]：收集到内存（测试或调用方需要检查告警时使用）

use std::sync::Mutex;
use tracing::{debug, info, warn};

/// 诊断级别。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticLevel {
    Debug,
    Info,
    Warn,
}

/// 诊断类型。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    /// 区域条目不是对象，或缺少 uuid 与 name。
    InvalidArea,
    /// 分区条目缺少 uuid/name 或类型不支持。
    InvalidPartition,
    /// 设备条目不是对象。
    InvalidEndpoint,
    MissingEndpointUuid,
    /// 设备与多个区域共享分区，后续匹配被丢弃。
    RelationConflict,
    NoUsableEndpoints,
    FallbackGenerated,
    SourceUnavailable,
}

impl DiagnosticKind {
    /// 是否表示某个条目被跳过。
    pub fn is_skipped_entry(&self) -> bool {
        matches!(
            self,
            DiagnosticKind::InvalidArea
                | DiagnosticKind::InvalidPartition
                | DiagnosticKind::InvalidEndpoint
                | DiagnosticKind::MissingEndpointUuid
        )
    }
}

/// 单条诊断。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub level: DiagnosticLevel,
    pub kind: DiagnosticKind,
    pub stage: &'static str,
    pub message: String,
}

/// 诊断接收器抽象。
pub trait DiagnosticsSink: Send + Sync {
    fn report(&self, diagnostic: Diagnostic);

    fn warn(&self, kind: DiagnosticKind, stage: &'static str, message: String) {
        self.report(Diagnostic {
            level: DiagnosticLevel::Warn,
            kind,
            stage,
            message,
        });
    }

    fn info(&self, kind: DiagnosticKind, stage: &'static str, message: String) {
        self.report(Diagnostic {
            level: DiagnosticLevel::Info,
            kind,
            stage,
            message,
        });
    }
}

/// 转发到 tracing 的诊断接收器。
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingDiagnostics;

impl DiagnosticsSink for TracingDiagnostics {
    fn report(&self, diagnostic: Diagnostic) {
        let Diagnostic {
            level,
            kind,
            stage,
            message,
        } = diagnostic;
        match level {
            DiagnosticLevel::Warn => {
                warn!(target: "topo.diagnostics", stage, kind = ?kind, "{}", message)
            }
            DiagnosticLevel::Info => {
                info!(target: "topo.diagnostics", stage, kind = ?kind, "{}", message)
            }
            DiagnosticLevel::Debug => {
                debug!(target: "topo.diagnostics", stage, kind = ?kind, "{}", message)
            }
        }
    }
}

/// 内存诊断收集器。
#[derive(Debug, Default)]
pub struct CollectingDiagnostics {
    entries: Mutex<Vec<Diagnostic>>,
}

impl CollectingDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<Diagnostic> {
        self.entries
            .lock()
            .map(|entries| entries.clone())
            .unwrap_or_default()
    }

    pub fn count(&self, kind: DiagnosticKind) -> usize {
        self.entries
            .lock()
            .map(|entries| entries.iter().filter(|entry| entry.kind == kind).count())
            .unwrap_or(0)
    }

    pub fn has(&self, kind: DiagnosticKind) -> bool {
        self.count(kind) > 0
    }

    pub fn skipped_entries(&self) -> usize {
        self.entries
            .lock()
            .map(|entries| {
                entries
                    .iter()
                    .filter(|entry| entry.kind.is_skipped_entry())
                    .count()
            })
            .unwrap_or(0)
    }
}

impl DiagnosticsSink for CollectingDiagnostics {
    fn report(&self, diagnostic: Diagnostic) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.push(diagnostic);
        }
    }
}

/// 同时上报到多个接收器。
pub struct FanoutDiagnostics<'a> {
    sinks: Vec<&'a dyn DiagnosticsSink>,
}

impl<'a> FanoutDiagnostics<'a> {
    pub fn new(sinks: Vec<&'a dyn DiagnosticsSink>) -> Self {
        Self { sinks }
    }
}

impl DiagnosticsSink for FanoutDiagnostics<'_> {
    fn report(&self, diagnostic: Diagnostic) {
        for sink in &self.sinks {
            sink.report(diagnostic.clone());
        }
    }
}
