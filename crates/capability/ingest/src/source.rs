//! 文档来源。
//!
//! 读取只在加载开始时发生一次，之后的拓扑构建完全在内存中进行。

use std::path::{Path, PathBuf};

/// 来源读取错误。
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("source unavailable: {0}")]
    Unavailable(String),
}

/// 文档来源抽象。
pub trait DocumentSource: Send + Sync {
    /// 写入记录元数据的来源标识。
    fn source_id(&self) -> &str;

    fn read(&self) -> Result<String, SourceError>;
}

/// 本地文件来源。
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
    source_id: String,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let source_id = path.display().to_string();
        Self { path, source_id }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DocumentSource for FileSource {
    fn source_id(&self) -> &str {
        &self.source_id
    }

    fn read(&self) -> Result<String, SourceError> {
        Ok(std::fs::read_to_string(&self.path)?)
    }
}

/// 内存来源（用于接线与测试）；内容为 None 时视为不可用。
#[derive(Debug, Clone)]
pub struct InlineSource {
    source_id: String,
    content: Option<String>,
}

impl InlineSource {
    pub fn new(source_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            source_id: source_id.into(),
            content: Some(content.into()),
        }
    }

    pub fn unavailable(source_id: impl Into<String>) -> Self {
        Self {
            source_id: source_id.into(),
            content: None,
        }
    }
}

impl DocumentSource for InlineSource {
    fn source_id(&self) -> &str {
        &self.source_id
    }

    fn read(&self) -> Result<String, SourceError> {
        self.content
            .clone()
            .ok_or_else(|| SourceError::Unavailable(self.source_id.clone()))
    }
}
