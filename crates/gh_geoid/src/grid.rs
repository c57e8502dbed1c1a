// crates/gh_geoid/src/grid.rs

//! 大地水准面网格
//!
//! 提供加载后的网格数据及其几何信息。网格构建后只读，
//! 可在多个线程间共享引用进行并发查询。

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::{GeoidError, GeoidResult};

/// 网格布局
///
/// 决定加载器如何把数据记录组织为矩形网格。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GridLayout {
    /// 规则网格：每条记录对应一个节点，按纬度分行、经度分列
    #[default]
    Regular,
    /// 展平布局：把记录中的数值按文件顺序视为 `行数 × 列数` 的数组
    ///
    /// 与 GeodPT08 示例数据集的历史结果逐位一致。
    Flattened,
}

impl GridLayout {
    /// 获取布局名称
    pub fn name(&self) -> &'static str {
        match self {
            Self::Regular => "regular",
            Self::Flattened => "flattened",
        }
    }
}

impl std::fmt::Display for GridLayout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// 布局解析错误
#[derive(Debug, Clone)]
pub struct LayoutParseError(String);

impl FromStr for GridLayout {
    type Err = LayoutParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "regular" | "grid" => Ok(Self::Regular),
            "flattened" | "flat" | "legacy" => Ok(Self::Flattened),
            _ => Err(LayoutParseError(s.to_string())),
        }
    }
}

impl std::fmt::Display for LayoutParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "无效的网格布局: '{}', 期望 'regular' 或 'flattened'", self.0)
    }
}

impl std::error::Error for LayoutParseError {}

/// 网格几何信息
///
/// 步长带符号，由 `(max - min) / (count - 1)` 计算，加载后不再修改。
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GridGeometry {
    /// 行数（纬度方向）
    pub row_count: usize,
    /// 列数（经度方向）
    pub col_count: usize,
    /// 第 0 行纬度
    pub lat_min: f64,
    /// 第 0 列经度
    pub lon_min: f64,
    /// 最后一行纬度
    pub lat_max: f64,
    /// 最后一列经度
    pub lon_max: f64,
    /// 纬度步长
    pub lat_step: f64,
    /// 经度步长
    pub lon_step: f64,
}

impl GridGeometry {
    /// 从边界和尺寸创建几何信息，计算步长
    ///
    /// 行数或列数小于 2、或步长为零/非有限值时返回 `DegenerateGrid`。
    pub fn from_bounds(
        row_count: usize,
        col_count: usize,
        lat_min: f64,
        lat_max: f64,
        lon_min: f64,
        lon_max: f64,
    ) -> GeoidResult<Self> {
        if row_count < 2 || col_count < 2 {
            return Err(GeoidError::degenerate(
                row_count,
                col_count,
                "行数和列数都至少为 2 才能计算步长",
            ));
        }

        let lat_step = (lat_max - lat_min) / (row_count - 1) as f64;
        let lon_step = (lon_max - lon_min) / (col_count - 1) as f64;

        if !lat_step.is_finite() || lat_step == 0.0 {
            return Err(GeoidError::degenerate(
                row_count,
                col_count,
                format!("纬度步长无效: {lat_step}"),
            ));
        }
        if !lon_step.is_finite() || lon_step == 0.0 {
            return Err(GeoidError::degenerate(
                row_count,
                col_count,
                format!("经度步长无效: {lon_step}"),
            ));
        }

        Ok(Self {
            row_count,
            col_count,
            lat_min,
            lon_min,
            lat_max,
            lon_max,
            lat_step,
            lon_step,
        })
    }

    /// 节点总数
    #[inline]
    pub fn n_nodes(&self) -> usize {
        self.row_count * self.col_count
    }

    /// 纬度覆盖范围 (下界, 上界)，与步长符号无关
    #[inline]
    pub fn lat_range(&self) -> (f64, f64) {
        (self.lat_min.min(self.lat_max), self.lat_min.max(self.lat_max))
    }

    /// 经度覆盖范围 (下界, 上界)，与步长符号无关
    #[inline]
    pub fn lon_range(&self) -> (f64, f64) {
        (self.lon_min.min(self.lon_max), self.lon_min.max(self.lon_max))
    }

    /// 节点 (row, col) 的地理坐标 (纬度, 经度)
    #[inline]
    pub fn node_coords(&self, row: usize, col: usize) -> (f64, f64) {
        (
            self.lat_min + row as f64 * self.lat_step,
            self.lon_min + col as f64 * self.lon_step,
        )
    }
}

/// 大地水准面网格
#[derive(Debug, Clone)]
pub struct GeoidGrid {
    geometry: GridGeometry,
    samples: Vec<f64>,
    layout: GridLayout,
}

impl GeoidGrid {
    /// 从几何信息和行优先样本创建网格
    pub fn new(geometry: GridGeometry, samples: Vec<f64>, layout: GridLayout) -> GeoidResult<Self> {
        if samples.len() != geometry.n_nodes() {
            return Err(GeoidError::SizeMismatch {
                expected: geometry.n_nodes(),
                actual: samples.len(),
            });
        }
        Ok(Self {
            geometry,
            samples,
            layout,
        })
    }

    /// 几何信息
    #[inline]
    pub fn geometry(&self) -> &GridGeometry {
        &self.geometry
    }

    /// 行数
    #[inline]
    pub fn row_count(&self) -> usize {
        self.geometry.row_count
    }

    /// 列数
    #[inline]
    pub fn col_count(&self) -> usize {
        self.geometry.col_count
    }

    /// 产生该网格的布局
    #[inline]
    pub fn layout(&self) -> GridLayout {
        self.layout
    }

    /// 行优先样本
    #[inline]
    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    /// 获取节点值，越界返回 `None`
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row < self.geometry.row_count && col < self.geometry.col_count {
            Some(self.samples[row * self.geometry.col_count + col])
        } else {
            None
        }
    }

    /// 获取节点值（调用方保证索引有效）
    #[inline]
    pub(crate) fn value(&self, row: usize, col: usize) -> f64 {
        debug_assert!(row < self.geometry.row_count && col < self.geometry.col_count);
        self.samples[row * self.geometry.col_count + col]
    }

    /// 查询点是否在模型覆盖范围内（含边界）
    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        crate::bounds::check_bounds(self, lat, lon).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_bounds_steps() {
        let g = GridGeometry::from_bounds(3, 5, 40.0, 41.0, -9.0, -8.0).unwrap();
        assert!((g.lat_step - 0.5).abs() < 1e-12);
        assert!((g.lon_step - 0.25).abs() < 1e-12);
        assert_eq!(g.n_nodes(), 15);

        let (lat, lon) = g.node_coords(2, 4);
        assert!((lat - 41.0).abs() < 1e-12);
        assert!((lon + 8.0).abs() < 1e-12);
    }

    #[test]
    fn test_single_row_is_degenerate() {
        let result = GridGeometry::from_bounds(1, 4, 40.0, 40.0, -9.0, -8.0);
        assert!(matches!(result, Err(GeoidError::DegenerateGrid { rows: 1, .. })));
    }

    #[test]
    fn test_zero_step_is_degenerate() {
        let result = GridGeometry::from_bounds(2, 2, 40.0, 40.0, -9.0, -8.0);
        assert!(matches!(result, Err(GeoidError::DegenerateGrid { .. })));
    }

    #[test]
    fn test_negative_step_ranges() {
        let g = GridGeometry::from_bounds(2, 2, 41.0, 40.0, -8.0, -9.0).unwrap();
        assert!(g.lat_step < 0.0);
        assert_eq!(g.lat_range(), (40.0, 41.0));
        assert_eq!(g.lon_range(), (-9.0, -8.0));
    }

    #[test]
    fn test_grid_size_mismatch() {
        let g = GridGeometry::from_bounds(2, 2, 40.0, 41.0, -9.0, -8.0).unwrap();
        let result = GeoidGrid::new(g, vec![1.0, 2.0, 3.0], GridLayout::Regular);
        assert!(matches!(
            result,
            Err(GeoidError::SizeMismatch { expected: 4, actual: 3 })
        ));
    }

    #[test]
    fn test_grid_get() {
        let g = GridGeometry::from_bounds(2, 2, 40.0, 41.0, -9.0, -8.0).unwrap();
        let grid = GeoidGrid::new(g, vec![1.0, 2.0, 3.0, 4.0], GridLayout::Regular).unwrap();
        assert_eq!(grid.get(0, 1), Some(2.0));
        assert_eq!(grid.get(1, 0), Some(3.0));
        assert_eq!(grid.get(2, 0), None);
    }

    #[test]
    fn test_layout_parse() {
        assert_eq!("regular".parse::<GridLayout>().unwrap(), GridLayout::Regular);
        assert_eq!("Flattened".parse::<GridLayout>().unwrap(), GridLayout::Flattened);
        assert_eq!("legacy".parse::<GridLayout>().unwrap(), GridLayout::Flattened);
        assert!("cubic".parse::<GridLayout>().is_err());
        assert_eq!(GridLayout::default(), GridLayout::Regular);
    }
}
