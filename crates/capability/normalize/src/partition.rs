use domain::{Area, GlobalPartitionMap, InstallationDocument, Partition};
use serde_json::Value;
use topo_telemetry::{DiagnosticKind, DiagnosticsSink};

const STAGE: &str = "partition_resolver";

/// 区域内单个分区条目的解析结果。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PartitionEntry {
    Resolved(Partition),
    /// null 条目，静默跳过。
    Absent,
    Invalid(&'static str),
}

/// 解析分区条目：
/// - 字符串：标识本身，名称为 `Partition_` + 前 8 个字符
/// - 对象：使用自身的 uuid/name，任一缺失即无效
pub fn resolve_partition_entry(entry: &Value) -> PartitionEntry {
    match entry {
        Value::Null => PartitionEntry::Absent,
        Value::String(id) if id.is_empty() => PartitionEntry::Invalid("empty partition identifier"),
        Value::String(id) => PartitionEntry::Resolved(Partition::synthetic(id.as_str())),
        Value::Object(map) => {
            let uuid = map
                .get("uuid")
                .and_then(Value::as_str)
                .filter(|value| !value.is_empty());
            let name = map
                .get("name")
                .and_then(Value::as_str)
                .filter(|value| !value.is_empty());
            match (uuid, name) {
                (Some(uuid), Some(name)) => PartitionEntry::Resolved(Partition::new(uuid, name)),
                _ => PartitionEntry::Invalid("partition object missing uuid or name"),
            }
        }
        _ => PartitionEntry::Invalid("unsupported partition entry"),
    }
}

/// 汇总所有区域声明的分区：标识 -> 名称。
///
/// 同一标识出现在多个区域时以最后一次为准（分区标识在安装内全局唯一）。
pub fn build_global_partition_map(
    document: &InstallationDocument,
    sink: &dyn DiagnosticsSink,
) -> GlobalPartitionMap {
    let mut map = GlobalPartitionMap::new();
    for (area_index, value) in document.areas.iter().enumerate() {
        let area = match Area::from_value(value) {
            Some(area) => area,
            None => continue,
        };
        for (entry_index, entry) in area.partitions.iter().enumerate() {
            match resolve_partition_entry(entry) {
                PartitionEntry::Resolved(partition) => {
                    map.insert(partition.uuid, partition.name);
                }
                PartitionEntry::Absent => {}
                PartitionEntry::Invalid(reason) => sink.warn(
                    DiagnosticKind::InvalidPartition,
                    STAGE,
                    format!(
                        "area {} partition {} skipped: {}",
                        area_index, entry_index, reason
                    ),
                ),
            }
        }
    }
    map
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn string_entries_get_synthetic_names() {
        assert_eq!(
            resolve_partition_entry(&json!("0123456789")),
            PartitionEntry::Resolved(Partition::new("0123456789", "Partition_01234567"))
        );
    }

    #[test]
    fn object_entries_need_both_fields() {
        assert_eq!(
            resolve_partition_entry(&json!({"uuid": "p1", "name": "North"})),
            PartitionEntry::Resolved(Partition::new("p1", "North"))
        );
        assert!(matches!(
            resolve_partition_entry(&json!({"uuid": "p1"})),
            PartitionEntry::Invalid(_)
        ));
        assert!(matches!(
            resolve_partition_entry(&json!({"name": "North"})),
            PartitionEntry::Invalid(_)
        ));
    }

    #[test]
    fn null_and_other_entries() {
        assert_eq!(resolve_partition_entry(&Value::Null), PartitionEntry::Absent);
        assert!(matches!(
            resolve_partition_entry(&json!(7)),
            PartitionEntry::Invalid("unsupported partition entry")
        ));
        assert!(matches!(
            resolve_partition_entry(&json!("")),
            PartitionEntry::Invalid(_)
        ));
    }
}
