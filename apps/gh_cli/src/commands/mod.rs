// apps/gh_cli/src/commands/mod.rs

//! 子命令实现及共用的模型参数

pub mod batch;
pub mod height;
pub mod info;

use anyhow::{Context, Result};
use clap::Args;
use gh_config::GeoHeightConfig;
use gh_geoid::{BoundsPolicy, GeoidGrid, GridLayout, GridLoader};
use std::path::PathBuf;
use tracing::info;

/// 模型相关参数（命令行优先于配置文件）
#[derive(Args, Debug, Clone)]
pub struct ModelArgs {
    /// 配置文件路径 (JSON)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// 模型文件路径
    #[arg(short, long, env = "GH_MODEL")]
    pub model: Option<PathBuf>,

    /// 网格布局 (regular, flattened)
    #[arg(long)]
    pub layout: Option<GridLayout>,

    /// 跳过模型文件中的空行
    #[arg(long)]
    pub allow_blank_lines: bool,

    /// 越界策略 (clamp, strict)
    #[arg(long)]
    pub bounds: Option<BoundsPolicy>,
}

impl ModelArgs {
    /// 读取配置文件（若有）并应用命令行覆盖
    pub fn resolve_config(&self) -> Result<GeoHeightConfig> {
        let mut config = match &self.config {
            Some(path) => GeoHeightConfig::from_file(path)
                .with_context(|| format!("无法加载配置文件 {}", path.display()))?,
            None => GeoHeightConfig::default(),
        };

        if let Some(model) = &self.model {
            config.model.path = model.clone();
        }
        if let Some(layout) = self.layout {
            config.model.layout = layout;
        }
        if self.allow_blank_lines {
            config.model.allow_blank_lines = true;
        }
        if let Some(policy) = self.bounds {
            config.bounds = policy;
        }

        Ok(config)
    }
}

/// 按配置加载模型
pub fn load_grid(config: &GeoHeightConfig) -> Result<GeoidGrid> {
    let path = &config.model.path;
    let loader = GridLoader::new(config.model.loader_config());
    info!(
        "加载模型: {} (布局 {}, 跳过空行 {})",
        path.display(),
        loader.config().layout,
        loader.config().allow_blank_lines
    );

    loader
        .load_path(path)
        .with_context(|| format!("无法加载大地水准面模型 {}", path.display()))
}
