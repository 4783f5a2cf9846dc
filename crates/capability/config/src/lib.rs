//! 运行配置加载。

use std::env;

/// 配置加载错误。
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {0}: {1}")]
    Invalid(String, String),
}

pub const DEFAULT_SOURCE_ID: &str = "installation_config";
pub const DEFAULT_INSTALLATION_NAME: &str = "Unknown Installation";
pub const DEFAULT_FALLBACK_MESSAGE: &str =
    "The installation data is temporarily unavailable. Please try again later.";
pub const DEFAULT_RELEVANCE_THRESHOLD: f64 = 0.3;
pub const DEFAULT_RELAXED_RELEVANCE_THRESHOLD: f64 = 0.2;
pub const DEFAULT_RETRIEVAL_LIMIT: usize = 4;
pub const DEFAULT_RELAXED_RETRIEVAL_LIMIT: usize = 10;

/// 运行配置。
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// 记录元数据中的 source/location 标识。
    pub source_id: String,
    pub default_installation_name: String,
    pub fallback_message: String,
    /// 是否额外输出按区域划分的记录。
    pub emit_area_records: bool,
    pub relevance_threshold: f64,
    pub relaxed_relevance_threshold: f64,
    pub retrieval_limit: usize,
    pub relaxed_retrieval_limit: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            source_id: DEFAULT_SOURCE_ID.to_string(),
            default_installation_name: DEFAULT_INSTALLATION_NAME.to_string(),
            fallback_message: DEFAULT_FALLBACK_MESSAGE.to_string(),
            emit_area_records: false,
            relevance_threshold: DEFAULT_RELEVANCE_THRESHOLD,
            relaxed_relevance_threshold: DEFAULT_RELAXED_RELEVANCE_THRESHOLD,
            retrieval_limit: DEFAULT_RETRIEVAL_LIMIT,
            relaxed_retrieval_limit: DEFAULT_RELAXED_RETRIEVAL_LIMIT,
        }
    }
}

impl AppConfig {
    /// 从环境变量读取配置，未设置的项使用默认值。
    pub fn from_env() -> Result<Self, ConfigError> {
        let source_id = read_string_with_default("TOPO_SOURCE_ID", DEFAULT_SOURCE_ID);
        let default_installation_name =
            read_string_with_default("TOPO_DEFAULT_INSTALLATION_NAME", DEFAULT_INSTALLATION_NAME);
        let fallback_message =
            read_string_with_default("TOPO_FALLBACK_MESSAGE", DEFAULT_FALLBACK_MESSAGE);
        let emit_area_records = read_bool_with_default("TOPO_EMIT_AREA_RECORDS", false);
        let relevance_threshold =
            read_threshold_with_default("TOPO_RELEVANCE_THRESHOLD", DEFAULT_RELEVANCE_THRESHOLD)?;
        let relaxed_relevance_threshold = read_threshold_with_default(
            "TOPO_RELAXED_RELEVANCE_THRESHOLD",
            DEFAULT_RELAXED_RELEVANCE_THRESHOLD,
        )?;
        let retrieval_limit =
            read_usize_with_default("TOPO_RETRIEVAL_LIMIT", DEFAULT_RETRIEVAL_LIMIT)?;
        let relaxed_retrieval_limit = read_usize_with_default(
            "TOPO_RELAXED_RETRIEVAL_LIMIT",
            DEFAULT_RELAXED_RETRIEVAL_LIMIT,
        )?;

        Ok(Self {
            source_id,
            default_installation_name,
            fallback_message,
            emit_area_records,
            relevance_threshold,
            relaxed_relevance_threshold,
            retrieval_limit,
            relaxed_retrieval_limit,
        })
    }
}

fn read_string_with_default(key: &str, default: &str) -> String {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => value,
        _ => default.to_string(),
    }
}

fn read_usize_with_default(key: &str, default: usize) -> Result<usize, ConfigError> {
    let value = match env::var(key) {
        Ok(value) => value,
        Err(_) => return Ok(default),
    };
    value
        .parse::<usize>()
        .map_err(|_| ConfigError::Invalid(key.to_string(), value))
}

/// 阈值必须是有限的非负数。
fn read_threshold_with_default(key: &str, default: f64) -> Result<f64, ConfigError> {
    let value = match env::var(key) {
        Ok(value) => value,
        Err(_) => return Ok(default),
    };
    match value.trim().parse::<f64>() {
        Ok(parsed) if parsed.is_finite() && parsed >= 0.0 => Ok(parsed),
        _ => Err(ConfigError::Invalid(key.to_string(), value)),
    }
}

fn read_bool_with_default(key: &str, default: bool) -> bool {
    match env::var(key) {
        Ok(value) => matches!(value.to_ascii_lowercase().as_str(), "1" | "true" | "on"),
        Err(_) => default,
    }
}
