// crates/gh_config/src/error.rs

//! 配置层错误类型

use std::path::PathBuf;

/// 配置错误
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// 配置文件无法读取或写入
    #[error("配置文件 {path} 访问失败: {source}")]
    File {
        /// 配置文件路径
        path: PathBuf,
        /// 底层 IO 错误
        #[source]
        source: std::io::Error,
    },

    /// JSON 语法或字段类型错误
    #[error("配置 JSON 无效: {0}")]
    Json(#[from] serde_json::Error),

    /// 配置项取值无效
    #[error("配置项 {key} = {value} 无效: {reason}")]
    InvalidValue {
        /// 配置键
        key: String,
        /// 配置值
        value: String,
        /// 原因
        reason: String,
    },
}

impl ConfigError {
    /// 配置文件访问失败
    pub fn file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::File {
            path: path.into(),
            source,
        }
    }

    /// 无效值
    pub fn invalid_value(
        key: impl Into<String>,
        value: impl ToString,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidValue {
            key: key.into(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}
