//! 安装配置文档的读取与校验。

pub mod source;
pub mod validator;

pub use source::{DocumentSource, FileSource, InlineSource, SourceError};
pub use validator::{ValidationError, validate};
