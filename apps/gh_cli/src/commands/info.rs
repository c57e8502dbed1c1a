// apps/gh_cli/src/commands/info.rs

//! 模型信息命令
//!
//! 加载模型并显示其几何信息。

use anyhow::Result;
use clap::Args;
use gh_geoid::GeoidGrid;

use super::{load_grid, ModelArgs};

/// 信息显示参数
#[derive(Args)]
pub struct InfoArgs {
    #[command(flatten)]
    pub model: ModelArgs,

    /// 以 JSON 输出几何信息
    #[arg(long)]
    pub json: bool,
}

/// 执行信息命令
pub fn execute(args: InfoArgs) -> Result<()> {
    let config = args.model.resolve_config()?;
    let grid = load_grid(&config)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(grid.geometry())?);
    } else {
        print_geometry(&grid);
    }

    Ok(())
}

fn print_geometry(grid: &GeoidGrid) {
    let g = grid.geometry();
    let (lat_lo, lat_hi) = g.lat_range();
    let (lon_lo, lon_hi) = g.lon_range();

    println!("=== 模型信息 ===");
    println!("布局: {}", grid.layout());
    println!("尺寸: {} 行 × {} 列 ({} 个节点)", g.row_count, g.col_count, g.n_nodes());
    println!("纬度范围: [{}, {}], 步长 {}", lat_lo, lat_hi, g.lat_step);
    println!("经度范围: [{}, {}], 步长 {}", lon_lo, lon_hi, g.lon_step);

    let (min, max) = grid
        .samples()
        .iter()
        .fold((f64::MAX, f64::MIN), |(lo, hi), &v| (lo.min(v), hi.max(v)));
    println!("样本范围: [{}, {}]", min, max);
}
