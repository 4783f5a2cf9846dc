use serde_json::{Map, Value};

/// 安装元数据（原样透传，缺失即为 None）。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InstallationMetadata {
    pub name: Option<String>,
    pub revision: Option<Value>,
    pub major: Option<Value>,
    pub minor: Option<Value>,
}

impl InstallationMetadata {
    /// 从 `metadata` 字段读取；非对象时返回空元数据。
    pub fn from_value(value: Option<&Value>) -> Self {
        let map = match value.and_then(Value::as_object) {
            Some(map) => map,
            None => return Self::default(),
        };
        Self {
            name: read_str(map, "name"),
            revision: read_present(map, "revision"),
            major: read_present(map, "major"),
            minor: read_present(map, "minor"),
        }
    }
}

/// 校验通过的安装配置文档。
///
/// `endpoints` 与 `areas` 保留原始 JSON 条目，合成记录时原样输出；
/// 逐条目的结构解析由 [`Endpoint::from_value`] / [`Area::from_value`] 完成。
#[derive(Debug, Clone, Default)]
pub struct InstallationDocument {
    pub metadata: InstallationMetadata,
    pub endpoints: Vec<Value>,
    pub areas: Vec<Value>,
}

impl InstallationDocument {
    pub fn from_root(root: &Map<String, Value>) -> Self {
        Self {
            metadata: InstallationMetadata::from_value(root.get("metadata")),
            endpoints: read_array(root, "endpoints"),
            areas: read_array(root, "areas"),
        }
    }

    pub fn has_endpoints(&self) -> bool {
        !self.endpoints.is_empty()
    }

    pub fn has_areas(&self) -> bool {
        !self.areas.is_empty()
    }
}

/// 设备条目。
#[derive(Debug, Clone, PartialEq)]
pub struct Endpoint {
    pub uuid: Option<String>,
    pub name: Option<String>,
    pub category: Option<i64>,
    pub visualization_type: Option<Value>,
    /// 设备接入的分区标识（去重，保持声明顺序）。
    pub partitions: Vec<String>,
}

impl Endpoint {
    /// 解析单个设备条目；非对象返回 None。
    pub fn from_value(value: &Value) -> Option<Self> {
        let map = value.as_object()?;
        let mut partitions: Vec<String> = Vec::new();
        if let Some(items) = map.get("partitions").and_then(Value::as_array) {
            for item in items {
                let id = match item {
                    Value::String(id) => Some(id.as_str()),
                    Value::Object(obj) => obj.get("uuid").and_then(Value::as_str),
                    _ => None,
                };
                if let Some(id) = id.filter(|id| !id.is_empty()) {
                    if !partitions.iter().any(|existing| existing == id) {
                        partitions.push(id.to_string());
                    }
                }
            }
        }
        Some(Self {
            uuid: read_str(map, "uuid"),
            name: read_str(map, "name"),
            category: map.get("category").and_then(Value::as_i64),
            visualization_type: read_present(map, "visualizationType"),
            partitions,
        })
    }

    /// 展示名：声明名称，缺失时回退为 `Device_` + uuid 前缀。
    pub fn display_name(&self) -> Option<String> {
        match (&self.name, &self.uuid) {
            (Some(name), _) => Some(name.clone()),
            (None, Some(uuid)) => Some(crate::default_endpoint_name(uuid)),
            (None, None) => None,
        }
    }
}

/// 区域条目。
#[derive(Debug, Clone, PartialEq)]
pub struct Area {
    pub uuid: Option<String>,
    pub name: Option<String>,
    /// 分区条目原值：字符串标识、`{uuid, name}` 对象或 null。
    pub partitions: Vec<Value>,
}

impl Area {
    /// 解析单个区域条目；非对象返回 None。
    pub fn from_value(value: &Value) -> Option<Self> {
        let map = value.as_object()?;
        Some(Self {
            uuid: read_str(map, "uuid"),
            name: read_str(map, "name"),
            partitions: read_array(map, "partitions"),
        })
    }

    /// 至少具备 uuid 或 name 之一。
    pub fn is_identified(&self) -> bool {
        self.uuid.is_some() || self.name.is_some()
    }
}

fn read_str(map: &Map<String, Value>, key: &str) -> Option<String> {
    map.get(key)
        .and_then(Value::as_str)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

fn read_present(map: &Map<String, Value>, key: &str) -> Option<Value> {
    map.get(key).filter(|value| !value.is_null()).cloned()
}

fn read_array(map: &Map<String, Value>, key: &str) -> Vec<Value> {
    map.get(key)
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default()
}
