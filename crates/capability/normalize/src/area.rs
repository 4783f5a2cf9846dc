use crate::partition::{PartitionEntry, resolve_partition_entry};
use domain::{Area, AreaPartitionMap, InstallationDocument};
use topo_telemetry::{DiagnosticKind, DiagnosticsSink};

const STAGE: &str = "area_mapper";

/// 为每个有效区域构建分区集合，保持输入顺序。
///
/// 非对象、或同时缺少 uuid 与 name 的区域被跳过（不会用占位项代替）。
/// 区域内的无效分区条目由全局分区解析负责上报，这里只静默跳过；
/// 同一区域内重复的分区标识保留第一次出现。
pub fn build_area_partition_maps(
    document: &InstallationDocument,
    sink: &dyn DiagnosticsSink,
) -> Vec<AreaPartitionMap> {
    let mut maps = Vec::with_capacity(document.areas.len());
    for (index, value) in document.areas.iter().enumerate() {
        let area = match Area::from_value(value) {
            Some(area) => area,
            None => {
                sink.warn(
                    DiagnosticKind::InvalidArea,
                    STAGE,
                    format!("area entry {} is not an object", index),
                );
                continue;
            }
        };
        if !area.is_identified() {
            sink.warn(
                DiagnosticKind::InvalidArea,
                STAGE,
                format!("area entry {} has neither uuid nor name", index),
            );
            continue;
        }

        let mut map = AreaPartitionMap {
            area_uuid: area.uuid,
            area_name: area.name,
            partitions: Vec::with_capacity(area.partitions.len()),
        };
        for entry in &area.partitions {
            if let PartitionEntry::Resolved(partition) = resolve_partition_entry(entry) {
                if !map.contains(&partition.uuid) {
                    map.partitions.push(partition);
                }
            }
        }
        maps.push(map);
    }
    maps
}
