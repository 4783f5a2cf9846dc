//! 拓扑重建：分区解析 → 区域分区映射 → 设备区域归属。
//!
//! 源文档只隐式地编码了区域、分区、设备之间的关系：区域声明自己拥有的分区，
//! 设备声明自己接入的分区。本 crate 通过分区交集还原设备所属区域。
//!
//! 所有函数都是对内存文档的同步纯变换；逐条目的问题（非法区域、不完整的分区对象、
//! 缺少 uuid 的设备）只跳过该条目并上报到 [`DiagnosticsSink`]，不会中断处理。

pub mod area;
pub mod partition;
pub mod relation;

pub use area::build_area_partition_maps;
pub use partition::{PartitionEntry, build_global_partition_map, resolve_partition_entry};
pub use relation::build_endpoint_area_relations;

use domain::{AreaPartitionMap, EndpointAreaRelations, GlobalPartitionMap, InstallationDocument};
use topo_telemetry::DiagnosticsSink;
use tracing::debug;

/// 单次加载重建出的完整拓扑。
#[derive(Debug, Clone, Default)]
pub struct Topology {
    pub global_partitions: GlobalPartitionMap,
    pub area_maps: Vec<AreaPartitionMap>,
    pub relations: EndpointAreaRelations,
}

/// 按固定顺序构建全部拓扑结构。
pub fn build_topology(document: &InstallationDocument, sink: &dyn DiagnosticsSink) -> Topology {
    let global_partitions = build_global_partition_map(document, sink);
    let area_maps = build_area_partition_maps(document, sink);
    let relations = build_endpoint_area_relations(document, &area_maps, sink);
    debug!(
        target: "topo.normalize",
        partitions = global_partitions.len(),
        areas = area_maps.len(),
        relations = relations.len(),
        "topology built"
    );
    Topology {
        global_partitions,
        area_maps,
        relations,
    }
}
