// crates/gh_geoid/src/loader.rs

//! 大地水准面模型加载
//!
//! 从制表符分隔的文本读取模型：
//!
//! ```text
//! Longitude\tLatitude\tHeight
//! <lon> <lat> <height>
//! ...
//! ```
//!
//! 表头必须与 `Longitude\tLatitude\tHeight` 完全一致，数据行以任意空白分隔，
//! 每行恰好 3 个浮点数。加载分两遍进行：第一遍验证表头并统计数据行数，
//! 第二遍回到开头按行数一次性分配缓冲区并解析。
//!
//! # 使用示例
//!
//! ```
//! use gh_geoid::loader::{GridLoader, LoaderConfig};
//!
//! let content = "Longitude\tLatitude\tHeight\n\
//!                -9.0 40.0 50.0\n-8.0 40.0 52.0\n\
//!                -9.0 41.0 48.0\n-8.0 41.0 49.0\n";
//!
//! let grid = GridLoader::new(LoaderConfig::default()).parse_str(content).unwrap();
//! assert_eq!(grid.row_count(), 2);
//! assert_eq!(grid.col_count(), 2);
//! ```

use std::fs::File;
use std::io::{BufRead, BufReader, Cursor, ErrorKind, Read, Seek, SeekFrom};
use std::path::Path;

use tracing::{debug, info};

use crate::error::{GeoidError, GeoidResult};
use crate::grid::{GeoidGrid, GridGeometry, GridLayout};

/// 模型文件要求的表头
pub const EXPECTED_HEADER: &str = "Longitude\tLatitude\tHeight";

/// 每条记录的数值个数
const FIELDS_PER_RECORD: usize = 3;

/// 网格线位置容差，以步长为单位
///
/// 坐标按有限小数位写出时（如 1′ 间距写成 4 位小数），网格线会偏离
/// `origin + i·step` 若干个末位单位。偏差在该比例内的坐标视为同一网格线。
const GRID_TOL: f64 = 0.01;

/// 加载器配置
#[derive(Debug, Clone, Default)]
pub struct LoaderConfig {
    /// 网格布局
    pub layout: GridLayout,
    /// 是否跳过空数据行（默认空行是格式错误）
    pub allow_blank_lines: bool,
}

impl LoaderConfig {
    /// 展平布局配置
    pub fn flattened() -> Self {
        Self {
            layout: GridLayout::Flattened,
            ..Default::default()
        }
    }

    /// 设置布局
    pub fn with_layout(mut self, layout: GridLayout) -> Self {
        self.layout = layout;
        self
    }

    /// 设置是否跳过空行
    pub fn allow_blank_lines(mut self, allow: bool) -> Self {
        self.allow_blank_lines = allow;
        self
    }
}

/// 单条数据记录
#[derive(Debug, Clone, Copy)]
struct Record {
    /// 源文件行号（从 1 开始）
    line: usize,
    lon: f64,
    lat: f64,
    height: f64,
}

impl Record {
    #[inline]
    fn values(&self) -> [f64; FIELDS_PER_RECORD] {
        [self.lon, self.lat, self.height]
    }
}

/// 网格加载器
#[derive(Debug, Clone, Default)]
pub struct GridLoader {
    config: LoaderConfig,
}

/// 使用默认配置从文件加载模型
pub fn load_geoid_model(path: impl AsRef<Path>) -> GeoidResult<GeoidGrid> {
    GridLoader::default().load_path(path.as_ref())
}

impl GridLoader {
    /// 创建加载器
    pub fn new(config: LoaderConfig) -> Self {
        Self { config }
    }

    /// 加载器配置
    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// 从文件加载
    pub fn load_path(&self, path: &Path) -> GeoidResult<GeoidGrid> {
        let file = File::open(path).map_err(|e| GeoidError::source_unavailable(path, e))?;
        self.load_reader(file, &path.display().to_string())
    }

    /// 从字符串加载
    pub fn parse_str(&self, content: &str) -> GeoidResult<GeoidGrid> {
        self.load_reader(Cursor::new(content.as_bytes()), "<string>")
    }

    /// 从可回绕的数据源加载
    pub fn load_reader<R: Read + Seek>(&self, reader: R, source_name: &str) -> GeoidResult<GeoidGrid> {
        let mut reader = BufReader::new(reader);
        let mut line = String::new();

        // 第一遍：验证表头并统计数据行
        self.read_header(&mut reader, &mut line, source_name)?;
        let mut row_count = 0usize;
        let mut line_num = 1usize;
        while read_line(&mut reader, &mut line, source_name, line_num + 1)? {
            line_num += 1;
            if self.skips(&line) {
                continue;
            }
            row_count += 1;
        }

        if row_count == 0 {
            return Err(GeoidError::format(source_name, line_num, "表头之后没有数据行"));
        }
        debug!("{}: 第一遍统计到 {} 个数据行", source_name, row_count);

        // 第二遍：回到开头，按表头字段数确定列数并解析数据
        reader
            .seek(SeekFrom::Start(0))
            .map_err(|e| GeoidError::source_unavailable(source_name, e))?;
        let col_count = self.read_header(&mut reader, &mut line, source_name)?;

        let mut records = Vec::with_capacity(row_count);
        let mut line_num = 1usize;
        while read_line(&mut reader, &mut line, source_name, line_num + 1)? {
            line_num += 1;
            if self.skips(&line) {
                continue;
            }
            records.push(parse_record(&line, line_num, source_name)?);
        }

        if records.len() != row_count {
            return Err(GeoidError::format(
                source_name,
                line_num,
                format!("两遍读取行数不一致: {} vs {}", row_count, records.len()),
            ));
        }
        debug!("{}: 第二遍解析 {} 条记录, 表头 {} 列", source_name, records.len(), col_count);

        let grid = match self.config.layout {
            GridLayout::Flattened => build_flattened(&records, col_count)?,
            GridLayout::Regular => build_regular(&records, source_name)?,
        };

        let g = grid.geometry();
        info!(
            "模型已加载: {} ({} 布局), {}×{}, 纬度 [{}, {}] 步长 {}, 经度 [{}, {}] 步长 {}",
            source_name,
            grid.layout(),
            g.row_count,
            g.col_count,
            g.lat_min,
            g.lat_max,
            g.lat_step,
            g.lon_min,
            g.lon_max,
            g.lon_step
        );

        Ok(grid)
    }

    /// 读取并验证表头，返回表头字段数
    fn read_header<R: BufRead>(
        &self,
        reader: &mut R,
        line: &mut String,
        source_name: &str,
    ) -> GeoidResult<usize> {
        if !read_line(reader, line, source_name, 1)? {
            return Err(GeoidError::format(source_name, 1, "空文件，缺少表头"));
        }
        if line.as_str() != EXPECTED_HEADER {
            return Err(GeoidError::format(
                source_name,
                1,
                format!("表头不匹配: 期望 {EXPECTED_HEADER:?}, 实际 {line:?}"),
            ));
        }
        Ok(line.matches('\t').count() + 1)
    }

    #[inline]
    fn skips(&self, line: &str) -> bool {
        self.config.allow_blank_lines && line.trim().is_empty()
    }
}

/// 读取第 `line_num` 行并去掉行尾换行符，到达末尾返回 false
///
/// 非 UTF-8 内容属于格式错误，其余 IO 错误视为数据源不可用。
fn read_line<R: BufRead>(
    reader: &mut R,
    line: &mut String,
    source_name: &str,
    line_num: usize,
) -> GeoidResult<bool> {
    line.clear();
    let n = reader.read_line(line).map_err(|e| match e.kind() {
        ErrorKind::InvalidData => GeoidError::format(source_name, line_num, "不是有效的 UTF-8 文本"),
        _ => GeoidError::source_unavailable(source_name, e),
    })?;
    if n == 0 {
        return Ok(false);
    }
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
    Ok(true)
}

/// 解析一行为 (经度, 纬度, 高度)
fn parse_record(line: &str, line_num: usize, source_name: &str) -> GeoidResult<Record> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() != FIELDS_PER_RECORD {
        return Err(GeoidError::format(
            source_name,
            line_num,
            format!("需要 {} 个数值, 实际 {} 个", FIELDS_PER_RECORD, tokens.len()),
        ));
    }

    let mut values = [0.0_f64; FIELDS_PER_RECORD];
    for (slot, token) in values.iter_mut().zip(&tokens) {
        *slot = match token.parse::<f64>() {
            Ok(v) if v.is_finite() => v,
            _ => {
                return Err(GeoidError::format(
                    source_name,
                    line_num,
                    format!("无法解析数值: '{token}'"),
                ));
            }
        };
    }

    Ok(Record {
        line: line_num,
        lon: values[0],
        lat: values[1],
        height: values[2],
    })
}

/// 展平布局：数值按文件顺序视为 `行数 × 列数` 数组
///
/// 经度上界取自 `(col_count - 1) * 3` 处，即第 `col_count - 1` 条记录的经度；
/// 纬度上界取自最后一条记录。
fn build_flattened(records: &[Record], col_count: usize) -> GeoidResult<GeoidGrid> {
    let row_count = records.len();
    if row_count < col_count {
        return Err(GeoidError::degenerate(
            row_count,
            col_count,
            format!("展平布局至少需要 {col_count} 条记录才能确定经度上界"),
        ));
    }

    let mut data = vec![0.0; row_count * col_count];
    let width = FIELDS_PER_RECORD.min(col_count);
    for (row, record) in data.chunks_exact_mut(col_count).zip(records) {
        row[..width].copy_from_slice(&record.values()[..width]);
    }

    let lon_min = data[0];
    let lat_min = data[1];
    let lon_max = data[(col_count - 1) * FIELDS_PER_RECORD];
    let lat_max = data[(row_count - 1) * col_count + 1];

    let geometry = GridGeometry::from_bounds(row_count, col_count, lat_min, lat_max, lon_min, lon_max)?;
    GeoidGrid::new(geometry, data, GridLayout::Flattened)
}

/// 规则布局：不同纬度为行、不同经度为列，记录顺序任意
fn build_regular(records: &[Record], source_name: &str) -> GeoidResult<GeoidGrid> {
    let lats = grid_lines(records.iter().map(|r| r.lat));
    let lons = grid_lines(records.iter().map(|r| r.lon));
    let row_count = lats.len();
    let col_count = lons.len();

    let geometry = GridGeometry::from_bounds(
        row_count,
        col_count,
        lats[0],
        lats[row_count - 1],
        lons[0],
        lons[col_count - 1],
    )?;

    if row_count * col_count != records.len() {
        return Err(GeoidError::format(
            source_name,
            0,
            format!(
                "记录数 {} 与 {}×{} 网格节点数不符",
                records.len(),
                row_count,
                col_count
            ),
        ));
    }

    check_uniform(&lats, geometry.lat_min, geometry.lat_step, "纬度", source_name)?;
    check_uniform(&lons, geometry.lon_min, geometry.lon_step, "经度", source_name)?;

    let mut samples = vec![0.0; geometry.n_nodes()];
    let mut filled = vec![false; geometry.n_nodes()];
    for record in records {
        let row = node_index(record.lat, geometry.lat_min, geometry.lat_step);
        let col = node_index(record.lon, geometry.lon_min, geometry.lon_step);
        let (row, col) = match (row, col) {
            (Some(row), Some(col)) if row < row_count && col < col_count => (row, col),
            _ => {
                return Err(GeoidError::format(
                    source_name,
                    record.line,
                    format!("节点 (经度 {}, 纬度 {}) 不在网格线上", record.lon, record.lat),
                ));
            }
        };
        let idx = row * col_count + col;
        if filled[idx] {
            return Err(GeoidError::format(
                source_name,
                record.line,
                format!("重复的网格节点 (经度 {}, 纬度 {})", record.lon, record.lat),
            ));
        }
        filled[idx] = true;
        samples[idx] = record.height;
    }

    GeoidGrid::new(geometry, samples, GridLayout::Regular)
}

/// 排序并合并为网格线
///
/// 先精确去重，再把间隔小于 `GRID_TOL × 平均间距` 的相邻坐标合并。
fn grid_lines(values: impl Iterator<Item = f64>) -> Vec<f64> {
    let mut v: Vec<f64> = values.collect();
    v.sort_by(f64::total_cmp);
    v.dedup();
    if v.len() >= 2 {
        let tol = GRID_TOL * (v[v.len() - 1] - v[0]) / (v.len() - 1) as f64;
        v.dedup_by(|a, b| (*a - *b).abs() <= tol);
    }
    v
}

/// 坐标对应的网格线序号，偏离网格线超过容差时返回 None
fn node_index(x: f64, origin: f64, step: f64) -> Option<usize> {
    let pos = (x - origin) / step;
    let idx = pos.round();
    if idx < 0.0 || (pos - idx).abs() > GRID_TOL {
        return None;
    }
    Some(idx as usize)
}

/// 检查网格线间距是否均匀
fn check_uniform(
    values: &[f64],
    origin: f64,
    step: f64,
    axis: &str,
    source_name: &str,
) -> GeoidResult<()> {
    let tol = GRID_TOL * step.abs();
    for (i, &v) in values.iter().enumerate() {
        let expected = origin + i as f64 * step;
        if (v - expected).abs() > tol {
            return Err(GeoidError::format(
                source_name,
                0,
                format!("{axis}间距不均匀: 第 {i} 条网格线为 {v}, 期望 {expected}"),
            ));
        }
    }
    Ok(())
}
