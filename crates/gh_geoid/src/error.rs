// crates/gh_geoid/src/error.rs

//! 大地水准面模块错误类型
//!
//! 提供 `GeoidError` 枚举和 `GeoidResult` 类型别名。
//!
//! # 错误分类
//!
//! - **IO 错误**：模型文件无法打开或读取
//! - **格式错误**：表头不匹配、数据行无法解析、无数据行、非规则网格
//! - **退化网格**：行数或列数不足、步长为零
//! - **越界错误**：严格模式下查询点超出模型范围
//!
//! # 示例
//!
//! ```
//! use gh_geoid::error::{GeoidError, GeoidResult};
//!
//! fn check_rows(rows: usize) -> GeoidResult<()> {
//!     if rows < 2 {
//!         return Err(GeoidError::degenerate(rows, 3, "至少需要两行"));
//!     }
//!     Ok(())
//! }
//!
//! assert!(check_rows(1).is_err());
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// 大地水准面模块结果类型
pub type GeoidResult<T> = Result<T, GeoidError>;

/// 大地水准面处理错误
#[derive(Error, Debug)]
pub enum GeoidError {
    /// 模型数据源不可用
    #[error("无法读取模型文件: {path}")]
    SourceUnavailable {
        /// 文件路径
        path: PathBuf,
        /// 底层 IO 错误
        #[source]
        source: std::io::Error,
    },

    /// 模型格式错误
    #[error("模型格式错误: {source_name} 第{line}行: {message}")]
    Format {
        /// 数据源名称
        source_name: String,
        /// 行号（从 1 开始，0 表示整体错误）
        line: usize,
        /// 错误信息
        message: String,
    },

    /// 退化网格（步长无法计算）
    #[error("退化网格: {rows}×{cols}, {reason}")]
    DegenerateGrid {
        /// 行数
        rows: usize,
        /// 列数
        cols: usize,
        /// 原因
        reason: String,
    },

    /// 查询点超出模型范围
    #[error("{axis} 超出模型范围: {value:.6} (允许范围: {min} 到 {max})")]
    OutOfBounds {
        /// 坐标轴（"纬度"、"经度"）
        axis: &'static str,
        /// 实际值
        value: f64,
        /// 最小允许值
        min: f64,
        /// 最大允许值
        max: f64,
    },

    /// 样本数量与网格尺寸不匹配
    #[error("样本数量不匹配: 期望{expected}, 实际{actual}")]
    SizeMismatch {
        /// 期望数量
        expected: usize,
        /// 实际数量
        actual: usize,
    },
}

impl GeoidError {
    /// 数据源不可用
    pub fn source_unavailable(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::SourceUnavailable {
            path: path.into(),
            source,
        }
    }

    /// 格式错误
    pub fn format(source_name: impl Into<String>, line: usize, message: impl Into<String>) -> Self {
        Self::Format {
            source_name: source_name.into(),
            line,
            message: message.into(),
        }
    }

    /// 退化网格
    pub fn degenerate(rows: usize, cols: usize, reason: impl Into<String>) -> Self {
        Self::DegenerateGrid {
            rows,
            cols,
            reason: reason.into(),
        }
    }

    /// 坐标越界
    pub fn out_of_bounds(axis: &'static str, value: f64, min: f64, max: f64) -> Self {
        Self::OutOfBounds {
            axis,
            value,
            min,
            max,
        }
    }

    /// 是否为格式错误
    pub fn is_format(&self) -> bool {
        matches!(self, Self::Format { .. })
    }
}
