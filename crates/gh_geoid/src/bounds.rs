// crates/gh_geoid/src/bounds.rs

//! 查询范围验证
//!
//! 与单元定位的边界钳制相互独立。调用方可选择严格拒绝越界查询，
//! 或接受钳制后的最佳估计。上下界均为闭区间，恰好位于最大边界的点有效。

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::{GeoidError, GeoidResult};
use crate::grid::GeoidGrid;

/// 越界处理策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoundsPolicy {
    /// 钳制到最近的边缘单元，不报错
    #[default]
    Clamp,
    /// 越界查询返回 `OutOfBounds`
    Strict,
}

impl BoundsPolicy {
    /// 获取策略名称
    pub fn name(&self) -> &'static str {
        match self {
            Self::Clamp => "clamp",
            Self::Strict => "strict",
        }
    }

    /// 是否为严格模式
    #[inline]
    pub fn is_strict(&self) -> bool {
        matches!(self, Self::Strict)
    }
}

impl std::fmt::Display for BoundsPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// 策略解析错误
#[derive(Debug, Clone)]
pub struct PolicyParseError(String);

impl FromStr for BoundsPolicy {
    type Err = PolicyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "clamp" | "clamped" => Ok(Self::Clamp),
            "strict" => Ok(Self::Strict),
            _ => Err(PolicyParseError(s.to_string())),
        }
    }
}

impl std::fmt::Display for PolicyParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "无效的越界策略: '{}', 期望 'clamp' 或 'strict'", self.0)
    }
}

impl std::error::Error for PolicyParseError {}

/// 检查查询点是否位于模型覆盖范围内（闭区间）
///
/// NaN 坐标总是越界。
pub fn check_bounds(grid: &GeoidGrid, lat: f64, lon: f64) -> GeoidResult<()> {
    let geometry = grid.geometry();

    let (lat_lo, lat_hi) = geometry.lat_range();
    if !(lat >= lat_lo && lat <= lat_hi) {
        return Err(GeoidError::out_of_bounds("纬度", lat, lat_lo, lat_hi));
    }

    let (lon_lo, lon_hi) = geometry.lon_range();
    if !(lon >= lon_lo && lon <= lon_hi) {
        return Err(GeoidError::out_of_bounds("经度", lon, lon_lo, lon_hi));
    }

    Ok(())
}
