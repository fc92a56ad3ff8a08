// ==========================================
// 今日环境累计量看板 - 看板快照
// ==========================================
// 每个刷新周期生成一次，交给展示层渲染
// 不持久化
// ==========================================

use crate::domain::quantity::ElapsedFraction;
use crate::domain::types::{MetricId, QuantityUnit};
use chrono::{DateTime, Utc};
use serde::Serialize;

// ==========================================
// ComparisonReading - 换算读数
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonReading {
    pub label_key: String, // i18n 标签键
    pub value: f64,        // 换算值
    pub decimals: u8,      // 展示小数位
}

// ==========================================
// MetricReading - 单指标读数
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricReading {
    pub metric: MetricId,
    pub unit: QuantityUnit,
    pub daily_total: f64, // 当日使用的全天总量
    pub accrued: f64,     // 截至当前累计量
    pub comparisons: Vec<ComparisonReading>,
}

// ==========================================
// DashboardWarning - 看板告警
// ==========================================
// 目前仅由可选数据源加载失败产生
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardWarning {
    pub metric: MetricId,
    pub message: String,
}

// ==========================================
// DashboardSnapshot - 看板快照
// ==========================================
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSnapshot {
    pub taken_at: DateTime<Utc>,
    pub timezone: String,
    pub elapsed_seconds: f64,
    pub elapsed_fraction: ElapsedFraction,
    pub running_hours: u32,
    pub readings: Vec<MetricReading>,
    pub warnings: Vec<DashboardWarning>,
}

impl DashboardSnapshot {
    /// 按指标查找读数
    pub fn reading(&self, metric: MetricId) -> Option<&MetricReading> {
        self.readings.iter().find(|r| r.metric == metric)
    }
}
