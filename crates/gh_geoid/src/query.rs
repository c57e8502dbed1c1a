// crates/gh_geoid/src/query.rs

//! 查询点与结果
//!
//! 批量查询文件每行一个点：`纬度 经度 椭球高`，以空白或逗号分隔。
//! 以 `#` 开头的注释行和空行被跳过。
//!
//! # 示例
//!
//! ```
//! use gh_geoid::query::parse_queries;
//!
//! let content = "# lat lon h\n41.157944, -8.629105, 148.0\n";
//! let queries = parse_queries(content, "<string>").unwrap();
//! assert_eq!(queries.len(), 1);
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{GeoidError, GeoidResult};

/// 单个查询：GNSS 坐标和椭球高
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeodeticQuery {
    /// 纬度 [°]
    pub latitude: f64,
    /// 经度 [°]
    pub longitude: f64,
    /// 椭球高 [m]
    pub ellipsoid_height: f64,
}

impl GeodeticQuery {
    /// 创建查询
    pub fn new(latitude: f64, longitude: f64, ellipsoid_height: f64) -> Self {
        Self {
            latitude,
            longitude,
            ellipsoid_height,
        }
    }
}

/// 查询结果
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HeightReport {
    /// 纬度 [°]
    pub latitude: f64,
    /// 经度 [°]
    pub longitude: f64,
    /// 椭球高 [m]
    pub ellipsoid_height: f64,
    /// 插值得到的大地水准面差距 [m]
    pub geoid_height: f64,
    /// 地形（正高）高度 [m]
    pub topographic_height: f64,
}

/// 从文件加载查询点
pub fn load_queries(path: &Path) -> GeoidResult<Vec<GeodeticQuery>> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| GeoidError::source_unavailable(path, e))?;
    parse_queries(&content, &path.display().to_string())
}

/// 从字符串解析查询点
pub fn parse_queries(content: &str, source_name: &str) -> GeoidResult<Vec<GeodeticQuery>> {
    let mut queries = Vec::new();

    for (line_num, line) in content.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let parts: Vec<&str> = trimmed
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|s| !s.is_empty())
            .collect();

        if parts.len() != 3 {
            return Err(GeoidError::format(
                source_name,
                line_num + 1,
                format!("需要 3 个数值 (纬度 经度 椭球高), 实际 {} 个", parts.len()),
            ));
        }

        let mut values = [0.0_f64; 3];
        for (slot, token) in values.iter_mut().zip(&parts) {
            *slot = match token.parse::<f64>() {
                Ok(v) if v.is_finite() => v,
                _ => {
                    return Err(GeoidError::format(
                        source_name,
                        line_num + 1,
                        format!("无法解析数值: '{token}'"),
                    ));
                }
            };
        }

        queries.push(GeodeticQuery::new(values[0], values[1], values[2]));
    }

    Ok(queries)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mixed_separators() {
        let content = "# header\n41.0 -8.5 148.0\n\n40.5,-8.0,  120.5\n";
        let queries = parse_queries(content, "<string>").unwrap();
        assert_eq!(queries.len(), 2);
        assert_eq!(queries[0], GeodeticQuery::new(41.0, -8.5, 148.0));
        assert_eq!(queries[1], GeodeticQuery::new(40.5, -8.0, 120.5));
    }

    #[test]
    fn test_parse_wrong_count() {
        let err = parse_queries("41.0 -8.5\n", "q.txt").unwrap_err();
        assert!(matches!(err, GeoidError::Format { line: 1, .. }));
    }

    #[test]
    fn test_parse_bad_number() {
        let err = parse_queries("41.0 -8.5 148.0\n41.0 abc 1.0\n", "q.txt").unwrap_err();
        assert!(matches!(err, GeoidError::Format { line: 2, .. }));
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_queries(Path::new("/nonexistent/queries.txt")).unwrap_err();
        assert!(matches!(err, GeoidError::SourceUnavailable { .. }));
    }
}
