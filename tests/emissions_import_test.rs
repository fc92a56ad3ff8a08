// ==========================================
// 排放数据集端到端测试
// ==========================================
// 测试目标: 数据集 → 按日总量 → 看板快照；加载失败降级为 0 + 告警
// ==========================================


use eco_ticker::app::{render_text, AppState};
use eco_ticker::config::{DashboardConfig, EmissionsSourceConfig};
use eco_ticker::domain::MetricId;
use test_helpers::{la_time, write_temp_csv};

fn config_with(path: &std::path::Path) -> DashboardConfig {
    DashboardConfig::default().with_emissions(EmissionsSourceConfig::new(path))
}

#[test]
fn test_dataset_total_feeds_snapshot() {
    let csv = write_temp_csv(&[
        "country,date,sector,value",
        "WORLD,15/06/2019,Power,40",
        "WORLD,15/06/2019,Ground Transport,20",
        "WORLD,15/06/2020,Power,36",
        "WORLD,16/06/2019,Power,1000",
        "WORLD,not-a-date,Power,1000",
    ]);

    let mut state = AppState::new(config_with(csv.path())).unwrap();
    let snapshot = state.tick_at(la_time(2025, 6, 15, 12, 0, 0));

    let co2 = snapshot.reading(MetricId::Co2Emitted).unwrap();
    assert_eq!(co2.daily_total, 96.0 * 1_000_000.0);
    assert_eq!(co2.accrued, 48.0 * 1_000_000.0);
    assert!(snapshot.warnings.is_empty());
}

#[test]
fn test_missing_dataset_degrades_to_zero() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("carbon.csv");

    let mut state = AppState::new(config_with(&missing)).unwrap();
    let snapshot = state.tick_at(la_time(2025, 6, 15, 12, 0, 0));

    let co2 = snapshot.reading(MetricId::Co2Emitted).unwrap();
    assert_eq!(co2.daily_total, 0.0);
    assert_eq!(co2.accrued, 0.0);
    assert_eq!(snapshot.warnings.len(), 1);
    assert_eq!(snapshot.warnings[0].metric, MetricId::Co2Emitted);

    // 其余指标不受影响
    let plastic = snapshot.reading(MetricId::PlasticProduced).unwrap();
    assert_eq!(plastic.accrued, 630_136_986.5);

    let text = render_text(&snapshot);
    assert!(text.contains("carbon.csv"));
}

#[test]
fn test_dataset_reloaded_next_day() {
    let csv = write_temp_csv(&[
        "date,value",
        "2019-06-15,10",
        "2019-06-16,20",
    ]);

    let mut state = AppState::new(config_with(csv.path())).unwrap();

    let day1 = state.tick_at(la_time(2025, 6, 15, 23, 0, 0));
    assert_eq!(day1.reading(MetricId::Co2Emitted).unwrap().daily_total, 10_000_000.0);

    let day2 = state.tick_at(la_time(2025, 6, 16, 1, 0, 0));
    assert_eq!(day2.reading(MetricId::Co2Emitted).unwrap().daily_total, 20_000_000.0);
}

#[test]
fn test_dataset_cached_within_day() {
    let csv = write_temp_csv(&["date,value", "2019-06-15,10"]);
    let mut state = AppState::new(config_with(csv.path())).unwrap();

    let first = state.tick_at(la_time(2025, 6, 15, 8, 0, 0));
    assert_eq!(first.reading(MetricId::Co2Emitted).unwrap().daily_total, 10_000_000.0);

    // 同日内文件被删除，仍使用缓存值
    let path = csv.path().to_path_buf();
    drop(csv);
    assert!(!path.exists());

    let later = state.tick_at(la_time(2025, 6, 15, 20, 0, 0));
    assert_eq!(later.reading(MetricId::Co2Emitted).unwrap().daily_total, 10_000_000.0);
    assert!(later.warnings.is_empty());
}
