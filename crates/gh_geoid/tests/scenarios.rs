// crates/gh_geoid/tests/scenarios.rs

//! 端到端场景测试
//!
//! 从磁盘加载模型文件，验证插值和地形高度的整体行为。

use std::io::Write;
use std::path::Path;

use gh_geoid::prelude::*;

const HEADER: &str = "Longitude\tLatitude\tHeight";

/// 写入规则网格模型：纬度 40..=42 步长 0.5，经度 -9..=-7 步长 0.25，
/// 差距 N = 50 + 2·(lat - 40) - 3·(lon + 9)
fn write_plane_model(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("plane.dat");
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(file, "{HEADER}").unwrap();
    for i in 0..5 {
        for j in 0..9 {
            let lat = 40.0 + 0.5 * i as f64;
            let lon = -9.0 + 0.25 * j as f64;
            writeln!(file, "{lon} {lat} {}", plane(lat, lon)).unwrap();
        }
    }
    path
}

fn plane(lat: f64, lon: f64) -> f64 {
    50.0 + 2.0 * (lat - 40.0) - 3.0 * (lon + 9.0)
}

// ============================================================
// 规则网格
// ============================================================

#[test]
fn test_plane_model_is_reproduced_exactly() {
    let dir = tempfile::tempdir().unwrap();
    let grid = load_geoid_model(write_plane_model(dir.path())).unwrap();

    assert_eq!(grid.row_count(), 5);
    assert_eq!(grid.col_count(), 9);

    // 平面在双线性插值下精确重现
    for &(lat, lon) in &[(40.1, -8.9), (41.37, -7.61), (41.999, -7.001), (40.5, -8.0)] {
        let n = interpolate(&grid, lat, lon);
        assert!((n - plane(lat, lon)).abs() < 1e-9, "({lat}, {lon}): {n}");
    }
}

#[test]
fn test_round_trip_at_every_node() {
    let dir = tempfile::tempdir().unwrap();
    let grid = load_geoid_model(write_plane_model(dir.path())).unwrap();

    for r in 0..grid.row_count() {
        for c in 0..grid.col_count() {
            let (lat, lon) = grid.geometry().node_coords(r, c);
            let n = interpolate(&grid, lat, lon);
            assert!((n - grid.get(r, c).unwrap()).abs() < 1e-10);
        }
    }
}

#[test]
fn test_reference_2x2_scenario() {
    let content = format!("{HEADER}\n-9 40 50.0\n-8 40 52.0\n-9 41 48.0\n-8 41 49.0\n");
    let grid = GridLoader::default().parse_str(&content).unwrap();

    let n = interpolate(&grid, 40.5, -8.5);
    assert!((n - 49.75).abs() < 1e-10);

    // 大地水准面差距 50 m，椭球高 148 m
    let h = compute_topographic_height(&grid, 40.0, -9.0, 148.0);
    assert!((h - 98.0).abs() < 1e-10);
}

#[test]
fn test_clamping_is_idempotent_beyond_bounds() {
    let dir = tempfile::tempdir().unwrap();
    let grid = load_geoid_model(write_plane_model(dir.path())).unwrap();

    let edge = locate(&grid, 42.0, -7.0);
    for &(lat, lon) in &[(42.0001, -6.9999), (50.0, 0.0), (89.0, 179.0)] {
        assert_eq!(locate(&grid, lat, lon), edge);
    }

    let origin = locate(&grid, 40.0, -9.0);
    assert_eq!(locate(&grid, -45.0, -120.0), origin);
}

#[test]
fn test_strict_and_clamped_policies() {
    let dir = tempfile::tempdir().unwrap();
    let grid = load_geoid_model(write_plane_model(dir.path())).unwrap();

    let strict = HeightInterpolator::new(&grid).with_policy(BoundsPolicy::Strict);
    let clamped = HeightInterpolator::new(&grid);

    // 最大边界闭区间
    assert!(strict.undulation(42.0, -7.0).is_ok());
    assert!(matches!(
        strict.undulation(42.01, -7.0),
        Err(GeoidError::OutOfBounds { .. })
    ));
    assert!(clamped.undulation(42.01, -7.0).is_ok());
}

#[test]
fn test_batch_from_query_file() {
    let dir = tempfile::tempdir().unwrap();
    let grid = load_geoid_model(write_plane_model(dir.path())).unwrap();

    let queries_path = dir.path().join("queries.txt");
    std::fs::write(
        &queries_path,
        "# lat lon h\n40.25 -8.5 120.0\n43.0 -8.0 10.0\n41.0,-7.5,200.0\n",
    )
    .unwrap();
    let queries = gh_geoid::query::load_queries(&queries_path).unwrap();
    assert_eq!(queries.len(), 3);

    let interp = HeightInterpolator::new(&grid).with_policy(BoundsPolicy::Strict);
    let results = interp.evaluate_batch(&queries);

    let first = results[0].as_ref().unwrap();
    assert!((first.topographic_height - (120.0 - plane(40.25, -8.5))).abs() < 1e-9);
    assert!(results[1].is_err());
    assert!(results[2].is_ok());
}

#[test]
fn test_report_serializes_to_json() {
    let content = format!("{HEADER}\n-9 40 50.0\n-8 40 52.0\n-9 41 48.0\n-8 41 49.0\n");
    let grid = GridLoader::default().parse_str(&content).unwrap();
    let report = HeightInterpolator::new(&grid)
        .evaluate(&GeodeticQuery::new(40.5, -8.5, 148.0))
        .unwrap();

    let json = serde_json::to_value(report).unwrap();
    assert_eq!(json["geoid_height"], 49.75);
    assert_eq!(json["topographic_height"], 98.25);
}

#[test]
fn test_grid_is_shared_across_threads() {
    let content = format!("{HEADER}\n-9 40 50.0\n-8 40 52.0\n-9 41 48.0\n-8 41 49.0\n");
    let grid = std::sync::Arc::new(GridLoader::default().parse_str(&content).unwrap());

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let grid = std::sync::Arc::clone(&grid);
            std::thread::spawn(move || interpolate(&grid, 40.0 + 0.25 * i as f64, -8.5))
        })
        .collect();

    let values: Vec<f64> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert!((values[2] - 49.75).abs() < 1e-10);
}

// ============================================================
// 格式拒绝与展平布局
// ============================================================

#[test]
fn test_format_rejections() {
    let loader = GridLoader::default();

    let wrong_header = "Longitude,Latitude,Height\n-9 40 50.0\n";
    assert!(loader.parse_str(wrong_header).unwrap_err().is_format());

    let two_tokens = format!("{HEADER}\n-9 40 50.0\n-8 40\n");
    assert!(loader.parse_str(&two_tokens).unwrap_err().is_format());
}

#[test]
fn test_flattened_layout_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("GeodPT08.dat");
    std::fs::write(
        &path,
        format!(
            "{HEADER}\n-9.5 37.0 55.10\n-9.0 37.0 54.20\n-8.5 37.0 53.60\n\
             -9.5 37.5 55.40\n-9.0 37.5 54.50\n-8.5 37.5 53.90\n"
        ),
    )
    .unwrap();

    let grid = GridLoader::new(LoaderConfig::flattened()).load_path(&path).unwrap();
    let g = grid.geometry();

    assert_eq!(grid.layout(), GridLayout::Flattened);
    assert_eq!((g.row_count, g.col_count), (6, 3));
    assert!((g.lon_min + 9.5).abs() < 1e-12);
    assert!((g.lon_max + 8.5).abs() < 1e-12);
    assert!((g.lat_min - 37.0).abs() < 1e-12);
    assert!((g.lat_max - 37.5).abs() < 1e-12);
    assert!((g.lon_step - 0.5).abs() < 1e-12);
    assert!((g.lat_step - 0.1).abs() < 1e-12);

    // 节点 (r, c) 为第 r 条记录的第 c 个数值
    let (lat, lon) = g.node_coords(4, 2);
    assert!((interpolate(&grid, lat, lon) - 54.50).abs() < 1e-10);
}
