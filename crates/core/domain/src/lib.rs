pub mod category;
pub mod data;
pub mod topology;

pub use category::DeviceKind;
pub use data::{Area, Endpoint, InstallationDocument, InstallationMetadata};
pub use topology::{
    AreaPartitionMap, EndpointAreaRelation, EndpointAreaRelations, GlobalPartitionMap,
    InstallationStatistics, Partition,
};

/// 合成名称使用的标识前缀长度（按字符计）。
pub const ID_PREFIX_LEN: usize = 8;

/// 取标识的前 8 个字符（不足则取全部）。
pub fn id_prefix(id: &str) -> String {
    id.chars().take(ID_PREFIX_LEN).collect()
}

/// 缺省分区名：`Partition_` + 标识前缀。
pub fn synthetic_partition_name(partition_uuid: &str) -> String {
    format!("Partition_{}", id_prefix(partition_uuid))
}

/// 缺省设备名：`Device_` + 标识前缀。
pub fn default_endpoint_name(endpoint_uuid: &str) -> String {
    format!("Device_{}", id_prefix(endpoint_uuid))
}
