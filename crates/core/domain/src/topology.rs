use serde::Serialize;
use std::collections::BTreeMap;

/// 分区（仅作为区域/设备之间的关系存在）。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Partition {
    pub uuid: String,
    pub name: String,
}

impl Partition {
    pub fn new(uuid: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            uuid: uuid.into(),
            name: name.into(),
        }
    }

    /// 仅有标识时使用合成名称。
    pub fn synthetic(uuid: impl Into<String>) -> Self {
        let uuid = uuid.into();
        let name = crate::synthetic_partition_name(&uuid);
        Self { uuid, name }
    }
}

/// 全局分区映射：分区标识 -> 名称。
pub type GlobalPartitionMap = BTreeMap<String, String>;

/// 单个区域拥有的分区集合。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AreaPartitionMap {
    pub area_uuid: Option<String>,
    pub area_name: Option<String>,
    pub partitions: Vec<Partition>,
}

impl AreaPartitionMap {
    pub fn contains(&self, partition_uuid: &str) -> bool {
        self.partitions
            .iter()
            .any(|partition| partition.uuid == partition_uuid)
    }

    /// 区域标识，用于冲突判断与日志。
    pub fn label(&self) -> &str {
        self.area_uuid
            .as_deref()
            .or(self.area_name.as_deref())
            .unwrap_or("")
    }
}

/// 设备与区域的归属关系（每个设备最多保留一条）。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointAreaRelation {
    pub endpoint_uuid: String,
    pub endpoint_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area_uuid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area_name: Option<String>,
    pub partition_uuids: Vec<String>,
    pub location: Vec<String>,
}

/// 设备标识 -> 归属关系。
pub type EndpointAreaRelations = BTreeMap<String, EndpointAreaRelation>;

/// 安装级统计。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InstallationStatistics {
    pub total_endpoints: usize,
    pub total_areas: usize,
    pub total_partitions: usize,
    pub sensors: usize,
    pub actuators: usize,
    pub controllers: usize,
}
