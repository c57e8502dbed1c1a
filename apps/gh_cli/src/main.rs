// apps/gh_cli/src/main.rs

//! GeoHeight 命令行界面
//!
//! 把 GNSS 椭球高转换为地形高度的命令行工具。
//!
//! # 子命令
//!
//! - `height`: 单点查询（无参数时运行默认示例查询）
//! - `batch`: 批量查询文件
//! - `info`: 显示模型几何信息

mod commands;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// GeoHeight 椭球高转地形高度命令行工具
#[derive(Parser)]
#[command(name = "gh_cli")]
#[command(author = "GeoHeight Team")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Convert GNSS ellipsoidal heights to topographic heights using a geoid grid", long_about = None)]
struct Cli {
    /// 日志级别 (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 单点地形高度
    Height(commands::height::HeightArgs),
    /// 批量查询
    Batch(commands::batch::BatchArgs),
    /// 显示模型信息
    Info(commands::info::InfoArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // 初始化日志
    let level = match cli.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    // 日志写到 stderr，stdout 留给结果输出
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Height(args) => commands::height::execute(args),
        Commands::Batch(args) => commands::batch::execute(args),
        Commands::Info(args) => commands::info::execute(args),
    }
}
