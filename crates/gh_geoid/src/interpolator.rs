// crates/gh_geoid/src/interpolator.rs

//! 大地水准面高度插值
//!
//! 在定位到的单元上做双线性插值：先沿经度方向插值两行，再沿纬度方向插值。
//! 没有外推保护，`dlat`/`dlon` 超出 [0, 1] 时结果为线性外推。
//!
//! # 示例
//!
//! ```
//! use gh_geoid::grid::{GeoidGrid, GridGeometry, GridLayout};
//! use gh_geoid::interpolator::{compute_topographic_height, interpolate};
//!
//! let geometry = GridGeometry::from_bounds(2, 2, 40.0, 41.0, -9.0, -8.0).unwrap();
//! let grid = GeoidGrid::new(geometry, vec![50.0, 52.0, 48.0, 49.0], GridLayout::Regular).unwrap();
//!
//! let n = interpolate(&grid, 40.5, -8.5);
//! assert!((n - 49.75).abs() < 1e-10);
//!
//! let h = compute_topographic_height(&grid, 40.0, -9.0, 148.0);
//! assert!((h - 98.0).abs() < 1e-10);
//! ```

use rayon::prelude::*;

use crate::bounds::{check_bounds, BoundsPolicy};
use crate::error::GeoidResult;
use crate::grid::GeoidGrid;
use crate::locator::locate;
use crate::query::{GeodeticQuery, HeightReport};

/// 批量查询的并行阈值
pub const PARALLEL_THRESHOLD: usize = 2000;

/// 双线性插值查询点的大地水准面差距
pub fn interpolate(grid: &GeoidGrid, lat: f64, lon: f64) -> f64 {
    let cell = locate(grid, lat, lon);
    let g = grid.geometry();

    let h11 = grid.value(cell.row_low, cell.col_low);
    let h12 = grid.value(cell.row_low, cell.col_high);
    let h21 = grid.value(cell.row_high, cell.col_low);
    let h22 = grid.value(cell.row_high, cell.col_high);

    let dlat = (lat - g.lat_min - cell.row_low as f64 * g.lat_step) / g.lat_step;
    let dlon = (lon - g.lon_min - cell.col_low as f64 * g.lon_step) / g.lon_step;

    let h1 = h11 + dlon * (h12 - h11);
    let h2 = h21 + dlon * (h22 - h21);
    h1 + dlat * (h2 - h1)
}

/// 地形高度 = 椭球高 - 大地水准面差距
#[inline]
pub fn compute_topographic_height(
    grid: &GeoidGrid,
    lat: f64,
    lon: f64,
    ellipsoid_height: f64,
) -> f64 {
    ellipsoid_height - interpolate(grid, lat, lon)
}

/// 绑定网格和越界策略的插值器
///
/// 只持有网格的共享引用，可在线程间复制使用。
#[derive(Debug, Clone, Copy)]
pub struct HeightInterpolator<'a> {
    grid: &'a GeoidGrid,
    policy: BoundsPolicy,
}

impl<'a> HeightInterpolator<'a> {
    /// 使用默认（钳制）策略创建
    pub fn new(grid: &'a GeoidGrid) -> Self {
        Self {
            grid,
            policy: BoundsPolicy::default(),
        }
    }

    /// 设置越界策略
    pub fn with_policy(mut self, policy: BoundsPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// 当前越界策略
    pub fn policy(&self) -> BoundsPolicy {
        self.policy
    }

    /// 大地水准面差距，严格模式下越界返回错误
    pub fn undulation(&self, lat: f64, lon: f64) -> GeoidResult<f64> {
        if self.policy.is_strict() {
            check_bounds(self.grid, lat, lon)?;
        }
        Ok(interpolate(self.grid, lat, lon))
    }

    /// 地形高度
    pub fn topographic_height(&self, lat: f64, lon: f64, ellipsoid_height: f64) -> GeoidResult<f64> {
        Ok(ellipsoid_height - self.undulation(lat, lon)?)
    }

    /// 计算单个查询的完整结果
    pub fn evaluate(&self, query: &GeodeticQuery) -> GeoidResult<HeightReport> {
        let geoid_height = self.undulation(query.latitude, query.longitude)?;
        Ok(HeightReport {
            latitude: query.latitude,
            longitude: query.longitude,
            ellipsoid_height: query.ellipsoid_height,
            geoid_height,
            topographic_height: query.ellipsoid_height - geoid_height,
        })
    }

    /// 批量计算，结果顺序与输入一致
    ///
    /// 查询数达到 [`PARALLEL_THRESHOLD`] 时使用 rayon 并行。
    pub fn evaluate_batch(&self, queries: &[GeodeticQuery]) -> Vec<GeoidResult<HeightReport>> {
        if queries.len() >= PARALLEL_THRESHOLD {
            queries.par_iter().map(|q| self.evaluate(q)).collect()
        } else {
            queries.iter().map(|q| self.evaluate(q)).collect()
        }
    }
}
