use domain::InstallationDocument;
use serde_json::Value;
use tracing::debug;

/// 校验错误。
///
/// 除 `NoUsableEndpoints` 外均为致命错误：不生成任何记录，直接返回给调用方。
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("configuration source is missing or unreadable")]
    MissingSource,
    #[error("configuration content is empty")]
    EmptyInput,
    #[error("malformed configuration: {0}")]
    MalformedInput(String),
    #[error("configuration root must be an object, found {0}")]
    InvalidRoot(&'static str),
    #[error("configuration has no usable endpoints")]
    NoUsableEndpoints,
}

impl ValidationError {
    pub fn is_fatal(&self) -> bool {
        !matches!(self, ValidationError::NoUsableEndpoints)
    }
}

/// 校验原始内容并解析为安装文档。
///
/// `endpoints` 缺失、不是数组或为空时返回 `NoUsableEndpoints`；
/// `areas` 可选，缺失时只影响区域相关的映射。
pub fn validate(content: Option<&str>) -> Result<InstallationDocument, ValidationError> {
    let content = content.ok_or(ValidationError::MissingSource)?;
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyInput);
    }
    debug!(target: "topo.ingest", bytes = content.len(), "validating configuration");

    let root: Value = serde_json::from_str(trimmed)
        .map_err(|err| ValidationError::MalformedInput(err.to_string()))?;
    let root = match root {
        Value::Object(map) => map,
        other => return Err(ValidationError::InvalidRoot(value_kind(&other))),
    };

    let document = InstallationDocument::from_root(&root);
    if !document.has_endpoints() {
        return Err(ValidationError::NoUsableEndpoints);
    }
    if !document.has_areas() {
        debug!(target: "topo.ingest", "configuration declares no areas");
    }
    Ok(document)
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
