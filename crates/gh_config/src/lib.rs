// crates/gh_config/src/lib.rs

//! GeoHeight 配置层
//!
//! 把模型路径、网格布局、越界策略和默认查询点从代码常量变为配置输入。
//! 配置文件为 JSON，所有字段都有默认值；命令行参数覆盖配置文件。
//!
//! # 模块概览
//!
//! - [`geoheight_config`]: `GeoHeightConfig` 及各分节配置
//! - [`error`]: 配置错误类型
//!
//! # 层级架构
//!
//! ```text
//! gh_cli     ─> uses GeoHeightConfig
//! gh_config  ─> GeoHeightConfig (本层)
//! gh_geoid   ─> GridLayout, BoundsPolicy, GeodeticQuery
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod geoheight_config;

// 重导出核心类型
pub use error::ConfigError;
pub use geoheight_config::{GeoHeightConfig, ModelConfig, OutputConfig, OutputFormat, QueryConfig};
