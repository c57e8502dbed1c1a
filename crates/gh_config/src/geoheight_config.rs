// crates/gh_config/src/geoheight_config.rs

//! GeoHeightConfig - 运行配置
//!
//! 默认值对应示例查询：波尔图 (41.157944, -8.629105)，椭球高 148 m，
//! 模型文件 `GeodPT08.dat`。

use gh_geoid::{BoundsPolicy, GeodeticQuery, GridLayout, LoaderConfig};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// 运行配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeoHeightConfig {
    /// 模型配置
    #[serde(default)]
    pub model: ModelConfig,

    /// 默认查询点
    #[serde(default)]
    pub query: QueryConfig,

    /// 越界策略
    #[serde(default)]
    pub bounds: BoundsPolicy,

    /// 输出配置
    #[serde(default)]
    pub output: OutputConfig,
}

/// 模型配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// 模型文件路径
    #[serde(default = "default_model_path")]
    pub path: PathBuf,

    /// 网格布局
    #[serde(default)]
    pub layout: GridLayout,

    /// 是否跳过空数据行
    #[serde(default)]
    pub allow_blank_lines: bool,
}

fn default_model_path() -> PathBuf { PathBuf::from("GeodPT08.dat") }

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            path: default_model_path(),
            layout: GridLayout::default(),
            allow_blank_lines: false,
        }
    }
}

impl ModelConfig {
    /// 转换为加载器配置
    pub fn loader_config(&self) -> LoaderConfig {
        LoaderConfig::default()
            .with_layout(self.layout)
            .allow_blank_lines(self.allow_blank_lines)
    }
}

/// 查询点配置
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct QueryConfig {
    /// 纬度 [°]
    #[serde(default = "default_latitude")]
    pub latitude: f64,

    /// 经度 [°]
    #[serde(default = "default_longitude")]
    pub longitude: f64,

    /// 椭球高 [m]
    #[serde(default = "default_ellipsoid_height")]
    pub ellipsoid_height: f64,
}

fn default_latitude() -> f64 { 41.157944 }
fn default_longitude() -> f64 { -8.629105 }
fn default_ellipsoid_height() -> f64 { 148.0 }

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            latitude: default_latitude(),
            longitude: default_longitude(),
            ellipsoid_height: default_ellipsoid_height(),
        }
    }
}

impl QueryConfig {
    /// 转换为查询
    pub fn to_query(&self) -> GeodeticQuery {
        GeodeticQuery::new(self.latitude, self.longitude, self.ellipsoid_height)
    }
}

/// 输出配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    /// 输出格式
    #[serde(default)]
    pub format: OutputFormat,
}

/// 输出格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// 可读文本
    #[default]
    Text,
    /// JSON
    Json,
}

impl GeoHeightConfig {
    /// 从文件加载配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::file(path, e))?;
        Self::from_json(&content)
    }

    /// 从 JSON 字符串解析配置
    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        let config: GeoHeightConfig = serde_json::from_str(content)?;

        config.validate()?;
        Ok(config)
    }

    /// 验证配置有效性
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.model.path.as_os_str().is_empty() {
            return Err(ConfigError::invalid_value("model.path", "\"\"", "模型路径不能为空"));
        }

        let q = &self.query;
        if !(-90.0..=90.0).contains(&q.latitude) {
            return Err(ConfigError::invalid_value(
                "query.latitude",
                q.latitude,
                "纬度必须在 [-90, 90] 范围内",
            ));
        }
        if !(-180.0..=360.0).contains(&q.longitude) {
            return Err(ConfigError::invalid_value(
                "query.longitude",
                q.longitude,
                "经度必须在 [-180, 360] 范围内",
            ));
        }
        if !q.ellipsoid_height.is_finite() {
            return Err(ConfigError::invalid_value(
                "query.ellipsoid_height",
                q.ellipsoid_height,
                "椭球高必须为有限值",
            ));
        }

        Ok(())
    }

    /// 保存配置到文件
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|e| ConfigError::file(path, e))?;
        Ok(())
    }
}
