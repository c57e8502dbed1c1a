// crates/gh_geoid/src/lib.rs

//! GeoHeight 大地水准面核心模块
//!
//! 把 GNSS 接收机给出的椭球高转换为地形（正高）高度：
//! 在表格形式的大地水准面模型上对查询点做双线性插值，
//! 再从椭球高中减去插值得到的大地水准面差距。
//!
//! # 模块
//!
//! - [`grid`]: 网格数据与几何信息
//! - [`loader`]: 模型文件加载（规则布局 / 展平布局）
//! - [`locator`]: 包围单元定位与边界钳制
//! - [`bounds`]: 闭区间范围验证与越界策略
//! - [`interpolator`]: 双线性插值与地形高度
//! - [`query`]: 查询点与结果
//! - [`error`]: 错误类型
//!
//! # 数据流
//!
//! ```text
//! GridLoader ─> GeoidGrid ─> locate (每次查询) ─> interpolate ─> 地形高度
//! ```
//!
//! # 示例
//!
//! ```
//! use gh_geoid::prelude::*;
//!
//! let content = "Longitude\tLatitude\tHeight\n\
//!                -9.0 40.0 50.0\n-8.0 40.0 52.0\n\
//!                -9.0 41.0 48.0\n-8.0 41.0 49.0\n";
//! let grid = GridLoader::default().parse_str(content).unwrap();
//!
//! let h = compute_topographic_height(&grid, 40.5, -8.5, 148.0);
//! assert!((h - 98.25).abs() < 1e-10);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod bounds;
pub mod error;
pub mod grid;
pub mod interpolator;
pub mod loader;
pub mod locator;
pub mod query;

/// 预导入模块
pub mod prelude {
    pub use crate::bounds::{check_bounds, BoundsPolicy};
    pub use crate::error::{GeoidError, GeoidResult};
    pub use crate::grid::{GeoidGrid, GridGeometry, GridLayout};
    pub use crate::interpolator::{compute_topographic_height, interpolate, HeightInterpolator};
    pub use crate::loader::{load_geoid_model, GridLoader, LoaderConfig};
    pub use crate::locator::{locate, CellIndices};
    pub use crate::query::{GeodeticQuery, HeightReport};
}

// 重导出常用类型
pub use bounds::{check_bounds, BoundsPolicy};
pub use error::{GeoidError, GeoidResult};
pub use grid::{GeoidGrid, GridGeometry, GridLayout};
pub use interpolator::{compute_topographic_height, interpolate, HeightInterpolator};
pub use loader::{load_geoid_model, GridLoader, LoaderConfig};
pub use locator::{locate, CellIndices};
pub use query::{GeodeticQuery, HeightReport};
