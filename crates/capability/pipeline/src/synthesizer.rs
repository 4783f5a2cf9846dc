//! 摘要记录与区域记录合成。

use crate::PipelineConfig;
use domain::{
    EndpointAreaRelation, GlobalPartitionMap, InstallationDocument, InstallationMetadata,
    InstallationStatistics, Partition,
};
use record_contract::{ChunkType, OutputRecord, RecordMetadata};
use serde::Serialize;
use serde_json::Value;
use topo_normalize::Topology;

pub const SUMMARY_DOCUMENT_TYPE: &str = "installation_summary";
pub const AREA_DOCUMENT_TYPE: &str = "installation_area";

/// 合成错误（触发降级记录）。
#[derive(Debug, thiserror::Error)]
pub enum SynthesisError {
    #[error("payload serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[derive(Serialize)]
struct InstallationInfo<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    revision: Option<&'a Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    major: Option<&'a Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    minor: Option<&'a Value>,
}

impl<'a> From<&'a InstallationMetadata> for InstallationInfo<'a> {
    fn from(metadata: &'a InstallationMetadata) -> Self {
        Self {
            name: metadata.name.as_deref(),
            revision: metadata.revision.as_ref(),
            major: metadata.major.as_ref(),
            minor: metadata.minor.as_ref(),
        }
    }
}

#[derive(Serialize)]
struct SummaryPayload<'a> {
    #[serde(rename = "type")]
    document_type: &'static str,
    installation: InstallationInfo<'a>,
    statistics: &'a InstallationStatistics,
    endpoints: &'a [Value],
    areas: &'a [Value],
    partitions: &'a GlobalPartitionMap,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AreaPayload<'a> {
    #[serde(rename = "type")]
    document_type: &'static str,
    installation_name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    area_uuid: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    area_name: Option<&'a str>,
    partitions: &'a [Partition],
    endpoints: Vec<&'a EndpointAreaRelation>,
}

/// 构建唯一的摘要记录。
pub fn synthesize_summary(
    document: &InstallationDocument,
    topology: &Topology,
    statistics: &InstallationStatistics,
    config: &PipelineConfig,
    timestamp_ms: i64,
) -> Result<OutputRecord, SynthesisError> {
    let payload = SummaryPayload {
        document_type: SUMMARY_DOCUMENT_TYPE,
        installation: InstallationInfo::from(&document.metadata),
        statistics,
        endpoints: &document.endpoints,
        areas: &document.areas,
        partitions: &topology.global_partitions,
    };
    let payload = serde_json::to_string_pretty(&payload)?;

    let metadata = &document.metadata;
    let mut record_metadata = RecordMetadata::new(
        config.source_id.clone(),
        config.source_id.clone(),
        ChunkType::Summary,
        true,
        timestamp_ms,
    );
    record_metadata.installation_name = Some(installation_name(metadata, config).to_string());
    record_metadata.revision = metadata.revision.clone();
    record_metadata.major = metadata.major.clone();
    record_metadata.minor = metadata.minor.clone();
    record_metadata.total_endpoints = Some(statistics.total_endpoints);
    record_metadata.total_areas = Some(statistics.total_areas);
    record_metadata.total_partitions = Some(statistics.total_partitions);
    record_metadata.has_partitions = Some(!topology.global_partitions.is_empty());

    Ok(OutputRecord::new(
        format!("{}:summary", config.source_id),
        payload,
        record_metadata,
    ))
}

/// 为每个已映射区域构建一条记录，列出其分区与归属设备。
pub fn synthesize_area_records(
    document: &InstallationDocument,
    topology: &Topology,
    config: &PipelineConfig,
    timestamp_ms: i64,
) -> Result<Vec<OutputRecord>, SynthesisError> {
    let name = installation_name(&document.metadata, config);
    let mut records = Vec::with_capacity(topology.area_maps.len());
    for (index, area) in topology.area_maps.iter().enumerate() {
        let endpoints: Vec<&EndpointAreaRelation> = topology
            .relations
            .values()
            .filter(|relation| {
                relation.area_uuid == area.area_uuid && relation.area_name == area.area_name
            })
            .collect();
        let related = endpoints.len();
        let payload = AreaPayload {
            document_type: AREA_DOCUMENT_TYPE,
            installation_name: name,
            area_uuid: area.area_uuid.as_deref(),
            area_name: area.area_name.as_deref(),
            partitions: &area.partitions,
            endpoints,
        };
        let payload = serde_json::to_string_pretty(&payload)?;

        let mut record_metadata = RecordMetadata::new(
            config.source_id.clone(),
            config.source_id.clone(),
            ChunkType::Area,
            true,
            timestamp_ms,
        )
        .with_extra("relatedEndpoints", related);
        record_metadata.installation_name = Some(name.to_string());
        record_metadata.area_uuid = area.area_uuid.clone();
        record_metadata.area_name = area.area_name.clone();
        record_metadata.has_partitions = Some(!area.partitions.is_empty());

        records.push(OutputRecord::new(
            format!("{}:area:{}", config.source_id, index),
            payload,
            record_metadata,
        ));
    }
    Ok(records)
}

fn installation_name<'a>(metadata: &'a InstallationMetadata, config: &'a PipelineConfig) -> &'a str {
    metadata
        .name
        .as_deref()
        .unwrap_or(config.default_installation_name.as_str())
}
