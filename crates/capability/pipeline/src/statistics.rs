use domain::category::{self, DeviceKind};
use domain::{GlobalPartitionMap, InstallationStatistics, InstallationDocument};
use serde_json::Value;

/// 计算安装级统计（纯函数，相同输入得到相同结果）。
///
/// 设备与区域总数取原始序列长度；分区总数取全局分区映射的大小。
pub fn compute_statistics(
    document: &InstallationDocument,
    global_partitions: &GlobalPartitionMap,
) -> InstallationStatistics {
    let mut statistics = InstallationStatistics {
        total_endpoints: document.endpoints.len(),
        total_areas: document.areas.len(),
        total_partitions: global_partitions.len(),
        ..InstallationStatistics::default()
    };
    for endpoint in &document.endpoints {
        let code = match endpoint.get("category").and_then(Value::as_i64) {
            Some(code) => code,
            None => continue,
        };
        match category::classify(code) {
            DeviceKind::Sensor => statistics.sensors += 1,
            DeviceKind::Actuator => statistics.actuators += 1,
            DeviceKind::Controller => statistics.controllers += 1,
            DeviceKind::Other => {}
        }
    }
    statistics
}
