// ==========================================
// 今日环境累计量看板 - 看板配置
// ==========================================
// 职责: 全天总量、换算比例、刷新间隔、参考时区、参考年份
// 来源: 内置默认值；可选 JSON 文件整体替换
// 红线: 配置不可变，启动时一次性校验
// ==========================================

use crate::config::error::{ConfigError, ConfigResult};
use crate::domain::quantity::ComparisonRatio;
use crate::domain::types::{MetricId, QuantityUnit};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Duration;

// ==========================================
// 默认常量
// ==========================================
pub mod defaults {
    /// 参考时区（美国太平洋时间）
    pub const TIMEZONE: &str = "America/Los_Angeles";

    /// 刷新间隔（秒）
    pub const REFRESH_INTERVAL_SECS: u64 = 2;

    /// 历史数据匹配用的参考年份（闰年，保证 2 月 29 日可匹配）
    pub const REFERENCE_YEAR: i32 = 2024;

    // ===== 全天总量 =====
    pub const TOTAL_DAILY_PLASTIC_KG: f64 = 1_260_273_973.0;
    pub const TOTAL_DAILY_OCEAN_PLASTIC_KG: f64 = 30_136_986.0;
    pub const TOTAL_DAILY_MICROPLASTIC_MG: f64 = 714.0;

    // ===== 换算比例 =====
    pub const KG_PER_CAR: f64 = 1_500.0;
    pub const KG_PER_STATUE_OF_LIBERTY: f64 = 204_116.0;
    /// 一张信用卡约 5000 mg 塑料
    pub const MG_PER_CREDIT_CARD: f64 = 5_000.0;
    /// 日量 → 周量 (×7) → 百分比 (×100)
    pub const CREDIT_CARD_WEEK_PERCENT_MULTIPLIER: f64 = 700.0;

    /// 排放数据集每行单位为百万吨
    pub const EMISSIONS_UNIT_MULTIPLIER: f64 = 1_000_000.0;
}

// ==========================================
// DailyTotalSource - 全天总量来源
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum DailyTotalSource {
    /// 固定常量
    Fixed { value: f64 },
    /// 由排放数据集按日推导（加载失败时取 0）
    EmissionsDataset,
}

// ==========================================
// ComparisonConfig - 换算指标配置
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonConfig {
    /// i18n 标签键（文案中含 %{value} 占位）
    pub label_key: String,
    pub ratio: ComparisonRatio,
    /// 展示小数位
    #[serde(default)]
    pub decimals: u8,
}

// ==========================================
// MetricConfig - 单指标配置
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricConfig {
    pub metric: MetricId,
    pub unit: QuantityUnit,
    pub daily_total: DailyTotalSource,
    #[serde(default)]
    pub comparisons: Vec<ComparisonConfig>,
}

impl MetricConfig {
    pub fn fixed(metric: MetricId, unit: QuantityUnit, value: f64) -> Self {
        Self {
            metric,
            unit,
            daily_total: DailyTotalSource::Fixed { value },
            comparisons: Vec::new(),
        }
    }

    pub fn with_comparison(mut self, label_key: &str, ratio: ComparisonRatio, decimals: u8) -> Self {
        self.comparisons.push(ComparisonConfig {
            label_key: label_key.to_string(),
            ratio,
            decimals,
        });
        self
    }
}

// ==========================================
// EmissionsSourceConfig - 排放数据集
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmissionsSourceConfig {
    pub path: PathBuf,
    #[serde(default = "default_date_column")]
    pub date_column: String,
    #[serde(default = "default_value_column")]
    pub value_column: String,
    #[serde(default = "default_unit_multiplier")]
    pub unit_multiplier: f64,
}

fn default_date_column() -> String {
    "date".to_string()
}

fn default_value_column() -> String {
    "value".to_string()
}

fn default_unit_multiplier() -> f64 {
    defaults::EMISSIONS_UNIT_MULTIPLIER
}

impl EmissionsSourceConfig {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            path: path.into(),
            date_column: default_date_column(),
            value_column: default_value_column(),
            unit_multiplier: default_unit_multiplier(),
        }
    }
}

// ==========================================
// DashboardConfig - 看板配置
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub timezone: String,
    pub refresh_interval_secs: u64,
    pub reference_year: i32,
    pub metrics: Vec<MetricConfig>,
    pub emissions: Option<EmissionsSourceConfig>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        use self::defaults::*;

        Self {
            timezone: TIMEZONE.to_string(),
            refresh_interval_secs: REFRESH_INTERVAL_SECS,
            reference_year: REFERENCE_YEAR,
            metrics: vec![
                MetricConfig::fixed(
                    MetricId::PlasticProduced,
                    QuantityUnit::Kilograms,
                    TOTAL_DAILY_PLASTIC_KG,
                )
                .with_comparison("comparison.cars", ComparisonRatio::per(KG_PER_CAR), 0),
                MetricConfig::fixed(
                    MetricId::OceanPlastic,
                    QuantityUnit::Kilograms,
                    TOTAL_DAILY_OCEAN_PLASTIC_KG,
                )
                .with_comparison(
                    "comparison.statues_of_liberty",
                    ComparisonRatio::per(KG_PER_STATUE_OF_LIBERTY),
                    0,
                ),
                MetricConfig::fixed(
                    MetricId::MicroplasticIngested,
                    QuantityUnit::Milligrams,
                    TOTAL_DAILY_MICROPLASTIC_MG,
                )
                .with_comparison(
                    "comparison.credit_card_week",
                    ComparisonRatio::scaled(CREDIT_CARD_WEEK_PERCENT_MULTIPLIER, MG_PER_CREDIT_CARD),
                    1,
                ),
            ],
            emissions: None,
        }
    }
}

impl DashboardConfig {
    /// 在默认配置上追加 CO2 排放指标（总量来自排放数据集）
    pub fn with_emissions(mut self, source: EmissionsSourceConfig) -> Self {
        self.metrics.retain(|m| m.metric != MetricId::Co2Emitted);
        self.metrics.push(MetricConfig {
            metric: MetricId::Co2Emitted,
            unit: QuantityUnit::MetricTons,
            daily_total: DailyTotalSource::EmissionsDataset,
            comparisons: Vec::new(),
        });
        self.emissions = Some(source);
        self
    }

    /// 从 JSON 字符串解析（不校验）
    pub fn from_json_str(raw: &str) -> ConfigResult<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    /// 从 JSON 文件加载并校验
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileReadError(format!("{}: {}", path.display(), e)))?;
        let config = Self::from_json_str(&raw)?;
        config.validate()?;
        tracing::info!(path = %path.display(), metrics = config.metrics.len(), "配置文件已加载");
        Ok(config)
    }

    /// 加载配置：指定路径则读文件，否则使用内置默认值
    pub fn load(path: Option<&Path>) -> ConfigResult<Self> {
        match path {
            Some(p) => Self::from_json_file(p),
            None => {
                let config = Self::default();
                config.validate()?;
                Ok(config)
            }
        }
    }

    /// 解析参考时区
    pub fn reference_tz(&self) -> ConfigResult<Tz> {
        self.timezone
            .parse::<Tz>()
            .map_err(|_| ConfigError::UnknownTimezone(self.timezone.clone()))
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs)
    }

    /// 启动时校验
    ///
    /// # 校验项
    /// - 时区可解析
    /// - 刷新间隔 > 0
    /// - 固定总量为有限非负数
    /// - 换算除数为有限正数（除零在此拦截）
    /// - 指标不重复
    /// - 数据集来源的指标必须有 emissions 配置
    pub fn validate(&self) -> ConfigResult<()> {
        self.reference_tz()?;

        if self.refresh_interval_secs == 0 {
            return Err(ConfigError::InvalidRefreshInterval);
        }

        let mut seen = HashSet::new();
        for metric in &self.metrics {
            if !seen.insert(metric.metric) {
                return Err(ConfigError::DuplicateMetric(metric.metric));
            }

            match metric.daily_total {
                DailyTotalSource::Fixed { value } => {
                    if !value.is_finite() || value < 0.0 {
                        return Err(ConfigError::InvalidDailyTotal {
                            metric: metric.metric,
                            value,
                        });
                    }
                }
                DailyTotalSource::EmissionsDataset => {
                    if self.emissions.is_none() {
                        return Err(ConfigError::MissingEmissionsSource(metric.metric));
                    }
                }
            }

            for comparison in &metric.comparisons {
                if !comparison.ratio.is_valid() {
                    return Err(ConfigError::InvalidRatio {
                        metric: metric.metric,
                        label_key: comparison.label_key.clone(),
                        divisor: comparison.ratio.divisor,
                        multiplier: comparison.ratio.multiplier,
                    });
                }
            }
        }

        if let Some(source) = &self.emissions {
            if !source.unit_multiplier.is_finite() || source.unit_multiplier < 0.0 {
                return Err(ConfigError::InvalidUnitMultiplier(source.unit_multiplier));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = DashboardConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.metrics.len(), 3);
        assert_eq!(config.refresh_interval(), Duration::from_secs(2));
        assert_eq!(config.reference_tz().unwrap(), chrono_tz::America::Los_Angeles);
    }

    #[test]
    fn test_zero_divisor_rejected() {
        let mut config = DashboardConfig::default();
        config.metrics[0].comparisons[0].ratio = ComparisonRatio::per(0.0);

        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidRatio { metric: MetricId::PlasticProduced, .. }));
    }

    #[test]
    fn test_unknown_timezone_rejected() {
        let config = DashboardConfig {
            timezone: "Mars/Olympus_Mons".to_string(),
            ..DashboardConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::UnknownTimezone(_))));
    }

    #[test]
    fn test_negative_total_rejected() {
        let mut config = DashboardConfig::default();
        config.metrics[1].daily_total = DailyTotalSource::Fixed { value: -1.0 };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidDailyTotal { metric: MetricId::OceanPlastic, .. })
        ));
    }

    #[test]
    fn test_dataset_metric_requires_source() {
        let mut config = DashboardConfig::default().with_emissions(EmissionsSourceConfig::new("x.csv"));
        assert!(config.validate().is_ok());

        config.emissions = None;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::MissingEmissionsSource(MetricId::Co2Emitted))
        ));
    }

    #[test]
    fn test_duplicate_metric_rejected() {
        let mut config = DashboardConfig::default();
        let dup = config.metrics[0].clone();
        config.metrics.push(dup);
        assert!(matches!(config.validate(), Err(ConfigError::DuplicateMetric(MetricId::PlasticProduced))));
    }

    #[test]
    fn test_partial_json_falls_back_to_defaults() {
        let config = DashboardConfig::from_json_str(r#"{"refresh_interval_secs": 5}"#).unwrap();
        assert_eq!(config.refresh_interval_secs, 5);
        assert_eq!(config.timezone, defaults::TIMEZONE);
        assert_eq!(config.metrics.len(), 3);
    }

    #[test]
    fn test_json_metric_shape() {
        let raw = r#"{
            "metrics": [
                {
                    "metric": "land_lost",
                    "unit": "hectares",
                    "daily_total": {"source": "fixed", "value": 86400},
                    "comparisons": [
                        {"label_key": "comparison.football_fields", "ratio": {"divisor": 0.714}}
                    ]
                }
            ]
        }"#;
        let config = DashboardConfig::from_json_str(raw).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.metrics[0].metric, MetricId::LandLost);
        assert_eq!(config.metrics[0].daily_total, DailyTotalSource::Fixed { value: 86_400.0 });
        assert_eq!(config.metrics[0].comparisons[0].decimals, 0);
    }
}
