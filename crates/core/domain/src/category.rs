//! 设备类别编码。
//!
//! 源文档中的 `category` 是小整数枚举，统计时按固定编码集合归类。

/// 传感器类别编码。
pub const SENSOR: i64 = 18;

/// 执行器类别编码集合（灯光、调光、窗帘、阀门、继电器）。
pub const ACTUATORS: &[i64] = &[1, 2, 3, 4, 7];

/// 控制器类别编码集合（温控、面板、场景控制器）。
pub const CONTROLLERS: &[i64] = &[5, 6, 8];

/// 非设备记录（如降级记录）使用的保留编码。
pub const NON_DEVICE: i64 = 0;

/// 设备大类。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceKind {
    Sensor,
    Actuator,
    Controller,
    Other,
}

/// 按类别编码归类。
pub fn classify(category: i64) -> DeviceKind {
    if category == SENSOR {
        DeviceKind::Sensor
    } else if ACTUATORS.contains(&category) {
        DeviceKind::Actuator
    } else if CONTROLLERS.contains(&category) {
        DeviceKind::Controller
    } else {
        DeviceKind::Other
    }
}
