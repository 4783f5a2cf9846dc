//! 安装配置 → 检索记录的加载流水线。
//!
//! 流程：Validator → 拓扑重建（分区解析、区域映射、设备归属）→ 统计 → 记录合成。
//! 缺少可用设备或合成失败时输出一条降级记录；致命校验错误直接返回给调用方。

pub mod fallback;
pub mod statistics;
pub mod synthesizer;

pub use fallback::{FALLBACK_DOCUMENT_TYPE, fallback_record};
pub use statistics::compute_statistics;
pub use synthesizer::{
    AREA_DOCUMENT_TYPE, SUMMARY_DOCUMENT_TYPE, SynthesisError, synthesize_area_records,
    synthesize_summary,
};

use domain::{EndpointAreaRelations, InstallationDocument, InstallationStatistics};
use record_contract::OutputRecord;
use topo_config::AppConfig;
use topo_ingest::{DocumentSource, ValidationError, validate};
use topo_normalize::{Topology, build_topology};
use topo_telemetry::{
    CollectingDiagnostics, DiagnosticKind, DiagnosticsSink, FanoutDiagnostics, new_load_id,
    record_area_records, record_document_loaded, record_fallback_record, record_fatal_error,
    record_relation_conflicts, record_skipped_entries, record_summary_record,
};
use tracing::{info, info_span, warn};

/// 流水线参数。
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub source_id: String,
    pub default_installation_name: String,
    pub fallback_message: String,
    pub emit_area_records: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::from(&AppConfig::default())
    }
}

impl From<&AppConfig> for PipelineConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            source_id: config.source_id.clone(),
            default_installation_name: config.default_installation_name.clone(),
            fallback_message: config.fallback_message.clone(),
            emit_area_records: config.emit_area_records,
        }
    }
}

/// 单次加载的结果。`records` 至少包含一条记录。
#[derive(Debug, Clone)]
pub struct LoadOutcome {
    pub load_id: String,
    pub records: Vec<OutputRecord>,
    /// 降级时恒为空。
    pub relations: EndpointAreaRelations,
    pub statistics: Option<InstallationStatistics>,
}

impl LoadOutcome {
    pub fn is_fallback(&self) -> bool {
        self.records.iter().all(|record| !record.is_valid())
    }
}

/// 加载入口。
#[derive(Debug, Clone, Default)]
pub struct InstallationLoader {
    config: PipelineConfig,
}

impl InstallationLoader {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// 从来源读取并加载；读取失败视为 `MissingSource`。
    ///
    /// 记录的 source/location 使用来源自身的标识。
    pub fn load_source(
        &self,
        source: &dyn DocumentSource,
        sink: &dyn DiagnosticsSink,
    ) -> Result<LoadOutcome, ValidationError> {
        let content = match source.read() {
            Ok(content) => Some(content),
            Err(err) => {
                sink.warn(
                    DiagnosticKind::SourceUnavailable,
                    "loader",
                    format!("failed to read {}: {}", source.source_id(), err),
                );
                None
            }
        };
        let config = PipelineConfig {
            source_id: source.source_id().to_string(),
            ..self.config.clone()
        };
        load_with_config(&config, content.as_deref(), sink)
    }

    /// 加载已读入内存的内容（None 表示来源缺失）。
    pub fn load(
        &self,
        content: Option<&str>,
        sink: &dyn DiagnosticsSink,
    ) -> Result<LoadOutcome, ValidationError> {
        load_with_config(&self.config, content, sink)
    }
}

fn load_with_config(
    config: &PipelineConfig,
    content: Option<&str>,
    sink: &dyn DiagnosticsSink,
) -> Result<LoadOutcome, ValidationError> {
    let load_id = new_load_id();
    let span = info_span!("load", load_id = %load_id, source = %config.source_id);
    let _entered = span.enter();
    record_document_loaded();

    let collector = CollectingDiagnostics::new();
    let sinks: Vec<&dyn DiagnosticsSink> = vec![sink, &collector];
    let diagnostics = FanoutDiagnostics::new(sinks);
    let timestamp_ms = now_epoch_ms();

    let document = match validate(content) {
        Ok(document) => document,
        Err(ValidationError::NoUsableEndpoints) => {
            diagnostics.warn(
                DiagnosticKind::NoUsableEndpoints,
                "validator",
                "configuration has no usable endpoints".to_string(),
            );
            return Ok(fallback_outcome(load_id, config, timestamp_ms, &diagnostics));
        }
        Err(err) => {
            record_fatal_error();
            warn!(target: "topo.pipeline", error = %err, "configuration rejected");
            return Err(err);
        }
    };

    let topology = build_topology(&document, &diagnostics);
    let statistics = compute_statistics(&document, &topology.global_partitions);
    record_skipped_entries(collector.skipped_entries() as u64);
    record_relation_conflicts(collector.count(DiagnosticKind::RelationConflict) as u64);

    let records = match synthesize(&document, &topology, &statistics, config, timestamp_ms) {
        Ok(records) => records,
        Err(err) => {
            warn!(target: "topo.pipeline", error = %err, "synthesis failed");
            return Ok(fallback_outcome(load_id, config, timestamp_ms, &diagnostics));
        }
    };

    info!(
        target: "topo.pipeline",
        endpoints = statistics.total_endpoints,
        areas = statistics.total_areas,
        partitions = statistics.total_partitions,
        relations = topology.relations.len(),
        records = records.len(),
        "installation loaded"
    );
    Ok(LoadOutcome {
        load_id,
        records,
        relations: topology.relations,
        statistics: Some(statistics),
    })
}

fn synthesize(
    document: &InstallationDocument,
    topology: &Topology,
    statistics: &InstallationStatistics,
    config: &PipelineConfig,
    timestamp_ms: i64,
) -> Result<Vec<OutputRecord>, SynthesisError> {
    let mut records = vec![synthesize_summary(
        document,
        topology,
        statistics,
        config,
        timestamp_ms,
    )?];
    if config.emit_area_records {
        let area_records = synthesize_area_records(document, topology, config, timestamp_ms)?;
        record_area_records(area_records.len() as u64);
        records.extend(area_records);
    }
    record_summary_record();
    Ok(records)
}

fn fallback_outcome(
    load_id: String,
    config: &PipelineConfig,
    timestamp_ms: i64,
    sink: &dyn DiagnosticsSink,
) -> LoadOutcome {
    let record = fallback_record(config, timestamp_ms);
    sink.info(
        DiagnosticKind::FallbackGenerated,
        "fallback",
        format!("fallback record {} generated", record.id),
    );
    record_fallback_record();
    LoadOutcome {
        load_id,
        records: vec![record],
        relations: EndpointAreaRelations::new(),
        statistics: None,
    }
}

fn now_epoch_ms() -> i64 {
    let now = std::time::SystemTime::now();
    let duration = now
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default();
    duration.as_millis() as i64
}
