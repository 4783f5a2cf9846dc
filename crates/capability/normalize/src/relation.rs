use domain::{
    AreaPartitionMap, Endpoint, EndpointAreaRelation, EndpointAreaRelations, InstallationDocument,
    Partition,
};
use std::collections::btree_map::Entry;
use topo_telemetry::{DiagnosticKind, DiagnosticsSink};

const STAGE: &str = "relator";

/// 通过分区交集确定每个设备所属的区域。
///
/// 区域按 `area_maps` 的顺序扫描，第一个与设备共享分区的区域胜出；
/// 后续命中的其他区域只上报冲突，不覆盖已有关系。设备在源拓扑中可能
/// 属于多个区域，输出模型只保留一个。
///
/// 没有区域或没有分区映射时直接返回空结果。
pub fn build_endpoint_area_relations(
    document: &InstallationDocument,
    area_maps: &[AreaPartitionMap],
    sink: &dyn DiagnosticsSink,
) -> EndpointAreaRelations {
    let mut relations = EndpointAreaRelations::new();
    if !document.has_areas() || area_maps.is_empty() {
        return relations;
    }

    for (index, value) in document.endpoints.iter().enumerate() {
        let endpoint = match Endpoint::from_value(value) {
            Some(endpoint) => endpoint,
            None => {
                sink.warn(
                    DiagnosticKind::InvalidEndpoint,
                    STAGE,
                    format!("endpoint entry {} is not an object", index),
                );
                continue;
            }
        };
        let endpoint_uuid = match endpoint.uuid.as_deref() {
            Some(uuid) => uuid,
            None => {
                sink.warn(
                    DiagnosticKind::MissingEndpointUuid,
                    STAGE,
                    format!("endpoint entry {} has no uuid", index),
                );
                continue;
            }
        };
        if endpoint.partitions.is_empty() {
            continue;
        }
        let endpoint_name = endpoint
            .display_name()
            .unwrap_or_else(|| domain::default_endpoint_name(endpoint_uuid));

        for area in area_maps {
            let shared = shared_partitions(&endpoint, area);
            if shared.is_empty() {
                continue;
            }
            match relations.entry(endpoint_uuid.to_string()) {
                Entry::Vacant(slot) => {
                    slot.insert(EndpointAreaRelation {
                        endpoint_uuid: endpoint_uuid.to_string(),
                        endpoint_name: endpoint_name.clone(),
                        area_uuid: area.area_uuid.clone(),
                        area_name: area.area_name.clone(),
                        partition_uuids: shared.iter().map(|p| p.uuid.clone()).collect(),
                        location: shared.iter().map(|p| p.name.clone()).collect(),
                    });
                }
                Entry::Occupied(existing) => {
                    let existing = existing.get();
                    if existing.area_uuid == area.area_uuid && existing.area_name == area.area_name
                    {
                        continue;
                    }
                    sink.warn(
                        DiagnosticKind::RelationConflict,
                        STAGE,
                        format!(
                            "endpoint {} already related to area {}, ignoring area {}",
                            endpoint_uuid,
                            existing
                                .area_uuid
                                .as_deref()
                                .or(existing.area_name.as_deref())
                                .unwrap_or(""),
                            area.label()
                        ),
                    );
                }
            }
        }
    }
    relations
}

/// 区域分区中被设备声明的部分，按区域内分区顺序。
fn shared_partitions<'a>(endpoint: &Endpoint, area: &'a AreaPartitionMap) -> Vec<&'a Partition> {
    area.partitions
        .iter()
        .filter(|partition| endpoint.partitions.contains(&partition.uuid))
        .collect()
}
