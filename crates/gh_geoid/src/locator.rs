// crates/gh_geoid/src/locator.rs

//! 单元定位
//!
//! 把查询坐标映射为包围它的四个网格节点索引。
//! 超出范围的查询被钳制到最近的边缘单元，不报错；
//! 需要严格拒绝时先调用 [`crate::bounds::check_bounds`]。

use crate::grid::GeoidGrid;

/// 包围查询点的单元索引
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellIndices {
    /// 下行索引 floor(row)
    pub row_low: usize,
    /// 下列索引 floor(col)
    pub col_low: usize,
    /// 上行索引 ceil(row)
    pub row_high: usize,
    /// 上列索引 ceil(col)
    pub col_high: usize,
}

impl CellIndices {
    /// 查询点是否恰好落在节点上
    #[inline]
    pub fn is_on_node(&self) -> bool {
        self.row_low == self.row_high && self.col_low == self.col_high
    }
}

/// 把浮点索引钳制到 [0, n-1]
#[inline]
fn clamp_index(x: f64, n: usize) -> usize {
    if n == 0 {
        return 0;
    }
    // NaN 转为 0，超大值饱和
    let i = x as isize;
    if i <= 0 {
        0
    } else {
        let max = (n - 1) as isize;
        if i >= max { n - 1 } else { i as usize }
    }
}

/// 查询点在网格中的连续索引 (row, col)
#[inline]
pub fn fractional_position(grid: &GeoidGrid, lat: f64, lon: f64) -> (f64, f64) {
    let g = grid.geometry();
    let row = (lat - g.lat_min) / g.lat_step;
    let col = (lon - g.lon_min) / g.lon_step;
    (row, col)
}

/// 定位包围查询点的四个节点
pub fn locate(grid: &GeoidGrid, lat: f64, lon: f64) -> CellIndices {
    let (row, col) = fractional_position(grid, lat, lon);
    let nrows = grid.row_count();
    let ncols = grid.col_count();

    CellIndices {
        row_low: clamp_index(row.floor(), nrows),
        row_high: clamp_index(row.ceil(), nrows),
        col_low: clamp_index(col.floor(), ncols),
        col_high: clamp_index(col.ceil(), ncols),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{GridGeometry, GridLayout};

    fn grid_4x5() -> GeoidGrid {
        let g = GridGeometry::from_bounds(4, 5, 40.0, 41.5, -9.0, -7.0).unwrap();
        GeoidGrid::new(g, vec![0.0; 20], GridLayout::Regular).unwrap()
    }

    #[test]
    fn test_interior_point() {
        let grid = grid_4x5();
        // 步长 0.5°，行 1.4，列 2.6
        let cell = locate(&grid, 40.7, -7.7);
        assert_eq!(cell.row_low, 1);
        assert_eq!(cell.row_high, 2);
        assert_eq!(cell.col_low, 2);
        assert_eq!(cell.col_high, 3);
        assert!(!cell.is_on_node());
    }

    #[test]
    fn test_on_node() {
        let grid = grid_4x5();
        let cell = locate(&grid, 41.0, -8.0);
        assert_eq!((cell.row_low, cell.row_high), (2, 2));
        assert_eq!((cell.col_low, cell.col_high), (2, 2));
        assert!(cell.is_on_node());
    }

    #[test]
    fn test_clamp_far_outside_equals_edge() {
        let grid = grid_4x5();
        let at_edge = locate(&grid, 41.5, -7.0);
        let beyond = locate(&grid, 60.0, 20.0);
        let beyond_again = locate(&grid, 60.0, 20.0);
        assert_eq!(at_edge, beyond);
        assert_eq!(beyond, beyond_again);

        let below = locate(&grid, -10.0, -100.0);
        assert_eq!(below, locate(&grid, 40.0, -9.0));
    }

    #[test]
    fn test_nan_clamps_to_origin() {
        let grid = grid_4x5();
        let cell = locate(&grid, f64::NAN, f64::NAN);
        assert_eq!(
            cell,
            CellIndices { row_low: 0, col_low: 0, row_high: 0, col_high: 0 }
        );
    }

    #[test]
    fn test_clamp_index() {
        assert_eq!(clamp_index(-3.0, 5), 0);
        assert_eq!(clamp_index(2.0, 5), 2);
        assert_eq!(clamp_index(7.0, 5), 4);
        assert_eq!(clamp_index(f64::INFINITY, 5), 4);
        assert_eq!(clamp_index(1.0, 0), 0);
    }
}
