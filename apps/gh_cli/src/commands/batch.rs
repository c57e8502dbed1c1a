// apps/gh_cli/src/commands/batch.rs

//! 批量查询命令
//!
//! 读取查询文件（每行 `纬度 经度 椭球高`），输出 CSV。
//! 单个查询失败只记录警告并留空结果列，不中断整个批次。

use anyhow::{Context, Result};
use clap::Args;
use gh_geoid::query::load_queries;
use gh_geoid::{BoundsPolicy, GeodeticQuery, GeoidResult, HeightInterpolator, HeightReport};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::time::Instant;
use tracing::{info, warn};

use super::{load_grid, ModelArgs};

/// 批量查询参数
#[derive(Args)]
pub struct BatchArgs {
    #[command(flatten)]
    pub model: ModelArgs,

    /// 查询文件路径
    #[arg(short, long)]
    pub input: PathBuf,

    /// 输出 CSV 路径（默认 stdout）
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// 严格模式，等同于 `--bounds strict`；越界查询记为失败
    #[arg(long)]
    pub strict: bool,
}

/// 执行批量查询
pub fn execute(args: BatchArgs) -> Result<()> {
    let mut config = args.model.resolve_config()?;
    if args.strict {
        config.bounds = BoundsPolicy::Strict;
    }

    let grid = load_grid(&config)?;
    let queries = load_queries(&args.input)
        .with_context(|| format!("无法读取查询文件 {}", args.input.display()))?;
    info!("读取 {} 个查询点, 越界策略 {}", queries.len(), config.bounds);

    let start = Instant::now();
    let interpolator = HeightInterpolator::new(&grid).with_policy(config.bounds);
    let results = interpolator.evaluate_batch(&queries);
    let elapsed = start.elapsed();

    let sink: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(
            File::create(path).with_context(|| format!("无法创建输出文件 {}", path.display()))?,
        ),
        None => Box::new(std::io::stdout().lock()),
    };
    let mut writer = BufWriter::new(sink);
    let failed = write_csv(&mut writer, &queries, &results)?;
    writer.flush()?;

    info!("=== 批量查询完成 ===");
    info!("成功: {}, 失败: {}", queries.len() - failed, failed);
    info!("计算时间: {:.3} ms", elapsed.as_secs_f64() * 1000.0);

    Ok(())
}

/// 写出 CSV，返回失败的查询数
fn write_csv<W: Write>(
    writer: &mut W,
    queries: &[GeodeticQuery],
    results: &[GeoidResult<HeightReport>],
) -> Result<usize> {
    writeln!(writer, "latitude,longitude,ellipsoid_height,geoid_height,topographic_height")?;

    let mut failed = 0;
    for (i, (query, result)) in queries.iter().zip(results).enumerate() {
        match result {
            Ok(report) => writeln!(
                writer,
                "{},{},{},{},{}",
                report.latitude,
                report.longitude,
                report.ellipsoid_height,
                report.geoid_height,
                report.topographic_height
            )?,
            Err(e) => {
                warn!("查询 #{} ({}, {}) 失败: {}", i + 1, query.latitude, query.longitude, e);
                failed += 1;
                writeln!(
                    writer,
                    "{},{},{},,",
                    query.latitude, query.longitude, query.ellipsoid_height
                )?;
            }
        }
    }

    Ok(failed)
}
