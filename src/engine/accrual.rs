// ==========================================
// 今日环境累计量看板 - 当日累计计算器
// ==========================================
// 职责: 当日已过比例 × 全天总量 → 累计量；累计量 → 换算量
// 红线: 无状态，每个刷新周期从头计算
// ==========================================

use crate::config::{ConfigResult, DailyTotalSource, DashboardConfig, MetricConfig};
use crate::domain::quantity::{ComparisonRatio, DailyTotal, ElapsedFraction};
use crate::domain::snapshot::{ComparisonReading, DashboardSnapshot, DashboardWarning, MetricReading};
use crate::engine::clock::DayPosition;
use crate::i18n::t;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use tracing::instrument;

/// 累计量 = 全天总量 × 已过比例
///
/// 比例已收敛到 [0, 1]，结果必落在 [0, daily_total]。
pub fn accrued_quantity(daily_total: f64, fraction: ElapsedFraction) -> f64 {
    daily_total * fraction.value()
}

/// 换算量 = 累计量 × multiplier / divisor
///
/// divisor 为 0 的配置在启动校验时已被拒绝。
pub fn derive_comparison(accrued_quantity: f64, ratio: &ComparisonRatio) -> f64 {
    accrued_quantity * ratio.multiplier / ratio.divisor
}

// ==========================================
// ExternalTotal - 外部数据源给出的全天总量
// ==========================================
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ExternalTotal {
    pub value: f64,
    /// 加载失败原因；存在时 value 为 0
    pub warning: Option<String>,
}

impl ExternalTotal {
    pub fn loaded(value: f64) -> Self {
        Self {
            value,
            warning: None,
        }
    }

    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            value: 0.0,
            warning: Some(reason.into()),
        }
    }
}

// ==========================================
// DailyAccrualCalculator - 当日累计计算器
// ==========================================
#[derive(Debug, Clone)]
pub struct DailyAccrualCalculator {
    config: DashboardConfig,
    tz: Tz,
}

impl DailyAccrualCalculator {
    /// 创建计算器（此处完成配置校验）
    pub fn new(config: DashboardConfig) -> ConfigResult<Self> {
        config.validate()?;
        let tz = config.reference_tz()?;
        Ok(Self { config, tz })
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn timezone(&self) -> Tz {
        self.tz
    }

    pub fn day_position(&self, now: DateTime<Utc>) -> DayPosition {
        DayPosition::of(now, self.tz)
    }

    /// 生成一个刷新周期的看板快照
    ///
    /// # 参数
    /// - now: 当前时刻
    /// - external: 数据集来源指标的全天总量（None 视为未加载，取 0 并告警）
    #[instrument(skip(self, external), fields(metrics = self.config.metrics.len()))]
    pub fn snapshot(&self, now: DateTime<Utc>, external: Option<&ExternalTotal>) -> DashboardSnapshot {
        let position = self.day_position(now);

        let mut readings = Vec::with_capacity(self.config.metrics.len());
        let mut warnings = Vec::new();

        for metric in &self.config.metrics {
            let daily_total = match metric.daily_total {
                DailyTotalSource::Fixed { value } => value,
                DailyTotalSource::EmissionsDataset => match external {
                    Some(total) => {
                        if let Some(reason) = &total.warning {
                            warnings.push(DashboardWarning {
                                metric: metric.metric,
                                message: reason.clone(),
                            });
                        }
                        total.value
                    }
                    None => {
                        warnings.push(DashboardWarning {
                            metric: metric.metric,
                            message: t("warning.dataset_not_loaded"),
                        });
                        0.0
                    }
                },
            };

            let total = DailyTotal::new(metric.metric, daily_total, metric.unit);
            readings.push(read_metric(metric, total, position.fraction));
        }

        tracing::debug!(
            elapsed_seconds = position.elapsed_seconds,
            fraction = position.fraction.value(),
            warnings = warnings.len(),
            "快照已生成"
        );

        DashboardSnapshot {
            taken_at: now,
            timezone: self.tz.name().to_string(),
            elapsed_seconds: position.elapsed_seconds,
            elapsed_fraction: position.fraction,
            running_hours: position.running_hours(),
            readings,
            warnings,
        }
    }
}

fn read_metric(metric: &MetricConfig, total: DailyTotal, fraction: ElapsedFraction) -> MetricReading {
    let accrued = accrued_quantity(total.value, fraction);
    let comparisons = metric
        .comparisons
        .iter()
        .map(|c| ComparisonReading {
            label_key: c.label_key.clone(),
            value: derive_comparison(accrued, &c.ratio),
            decimals: c.decimals,
        })
        .collect();

    MetricReading {
        metric: total.metric,
        unit: total.unit,
        daily_total: total.value,
        accrued,
        comparisons,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EmissionsSourceConfig;
    use crate::domain::types::MetricId;
    use crate::engine::clock::{Clock, FixedClock};
    use crate::i18n::set_locale;
    use crate::i18n::tests::LOCALE_TEST_LOCK;
    use chrono::{NaiveDate, NaiveTime};
    use chrono_tz::America::Los_Angeles;

    fn at(h: u32, m: u32, s: u32) -> DateTime<Utc> {
        FixedClock::at_local(
            Los_Angeles,
            NaiveDate::from_ymd_opt(2025, 6, 15).unwrap(),
            NaiveTime::from_hms_opt(h, m, s).unwrap(),
        )
        .now()
    }

    #[test]
    fn test_accrued_quantity_is_product() {
        assert_eq!(accrued_quantity(1_000.0, ElapsedFraction::ZERO), 0.0);
        assert_eq!(accrued_quantity(1_000.0, ElapsedFraction::FULL), 1_000.0);
        assert_eq!(accrued_quantity(714.0, ElapsedFraction::new(0.25)), 714.0 * 0.25);
    }

    #[test]
    fn test_derive_comparison_cars() {
        let ratio = ComparisonRatio::per(1_500.0);
        assert_eq!(derive_comparison(1_500.0, &ratio), 1.0);
        assert_eq!(derive_comparison(3_000.0, &ratio), 2.0);
    }

    #[test]
    fn test_credit_card_formula() {
        // 5000 mg 一天 → 一周 7 张卡 → 700%
        let ratio = ComparisonRatio::scaled(700.0, 5_000.0);
        assert_eq!(derive_comparison(5_000.0, &ratio), 700.0);
        assert_eq!(derive_comparison(0.0, &ratio), 0.0);
    }

    #[test]
    fn test_snapshot_at_midnight_is_zero() {
        let calc = DailyAccrualCalculator::new(DashboardConfig::default()).unwrap();
        let snapshot = calc.snapshot(at(0, 0, 0), None);

        assert_eq!(snapshot.running_hours, 0);
        for reading in &snapshot.readings {
            assert_eq!(reading.accrued, 0.0);
            assert!(reading.comparisons.iter().all(|c| c.value == 0.0));
        }
        assert!(snapshot.warnings.is_empty());
    }

    #[test]
    fn test_snapshot_at_noon_is_half() {
        let calc = DailyAccrualCalculator::new(DashboardConfig::default()).unwrap();
        let snapshot = calc.snapshot(at(12, 0, 0), None);

        let plastic = snapshot.reading(MetricId::PlasticProduced).unwrap();
        assert_eq!(plastic.accrued, 630_136_986.5);
        assert_eq!(snapshot.reading(MetricId::MicroplasticIngested).unwrap().accrued, 357.0);
        assert_eq!(snapshot.running_hours, 12);
    }

    #[test]
    fn test_missing_dataset_warning_follows_locale() {
        let _guard = LOCALE_TEST_LOCK.lock().unwrap();
        let config = DashboardConfig::default().with_emissions(EmissionsSourceConfig::new("missing.csv"));
        let calc = DailyAccrualCalculator::new(config).unwrap();

        set_locale("en");
        let snapshot = calc.snapshot(at(12, 0, 0), None);
        assert_eq!(snapshot.warnings[0].message, "dataset not loaded");

        set_locale("zh-CN");
        let snapshot = calc.snapshot(at(12, 0, 0), None);
        assert_eq!(snapshot.warnings[0].message, "数据集未加载");

        // 恢复默认语言
        set_locale("en");
    }

    #[test]
    fn test_dataset_metric_without_total_warns() {
        let config = DashboardConfig::default().with_emissions(EmissionsSourceConfig::new("missing.csv"));
        let calc = DailyAccrualCalculator::new(config).unwrap();

        let snapshot = calc.snapshot(at(12, 0, 0), None);
        assert_eq!(snapshot.reading(MetricId::Co2Emitted).unwrap().accrued, 0.0);
        assert_eq!(snapshot.warnings.len(), 1);
        assert!(!snapshot.warnings[0].message.is_empty());

        let loaded = ExternalTotal::loaded(100_000_000.0);
        let snapshot = calc.snapshot(at(12, 0, 0), Some(&loaded));
        assert_eq!(snapshot.reading(MetricId::Co2Emitted).unwrap().accrued, 50_000_000.0);
        assert!(snapshot.warnings.is_empty());
    }
}
