// apps/gh_cli/src/commands/height.rs

//! 单点地形高度命令
//!
//! 未指定坐标时使用配置中的默认查询点。

use anyhow::{Context, Result};
use clap::Args;
use gh_config::OutputFormat;
use gh_geoid::{BoundsPolicy, HeightInterpolator, HeightReport};
use tracing::info;

use super::{load_grid, ModelArgs};

/// 单点查询参数
#[derive(Args)]
pub struct HeightArgs {
    #[command(flatten)]
    pub model: ModelArgs,

    /// 纬度 [°]
    #[arg(long, allow_hyphen_values = true)]
    pub lat: Option<f64>,

    /// 经度 [°]
    #[arg(long, allow_hyphen_values = true)]
    pub lon: Option<f64>,

    /// 椭球高 [m]
    #[arg(short, long, allow_hyphen_values = true)]
    pub ellipsoid_height: Option<f64>,

    /// 严格模式，等同于 `--bounds strict`
    #[arg(long)]
    pub strict: bool,

    /// 以 JSON 输出
    #[arg(long)]
    pub json: bool,
}

/// 执行单点查询
pub fn execute(args: HeightArgs) -> Result<()> {
    let mut config = args.model.resolve_config()?;

    if let Some(lat) = args.lat {
        config.query.latitude = lat;
    }
    if let Some(lon) = args.lon {
        config.query.longitude = lon;
    }
    if let Some(h) = args.ellipsoid_height {
        config.query.ellipsoid_height = h;
    }
    if args.strict {
        config.bounds = BoundsPolicy::Strict;
    }
    if args.json {
        config.output.format = OutputFormat::Json;
    }
    config.validate().context("查询参数无效")?;

    let grid = load_grid(&config)?;
    let interpolator = HeightInterpolator::new(&grid).with_policy(config.bounds);

    let query = config.query.to_query();
    info!(
        "查询点: ({}, {}), 椭球高 {} m, 越界策略 {}",
        query.latitude, query.longitude, query.ellipsoid_height, config.bounds
    );
    let report = interpolator
        .evaluate(&query)
        .context("地形高度计算失败")?;

    match config.output.format {
        OutputFormat::Text => print_report(&report),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    Ok(())
}

fn print_report(report: &HeightReport) {
    println!("GPS 坐标: ({}, {})", report.latitude, report.longitude);
    println!("椭球高: {} m", report.ellipsoid_height);
    println!("大地水准面高: {} m", report.geoid_height);
    println!("地形高度: {} m", report.topographic_height);
}
