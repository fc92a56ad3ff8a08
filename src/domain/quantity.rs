// ==========================================
// 今日环境累计量看板 - 计量值对象
// ==========================================
// DailyTotal / ElapsedFraction / ComparisonRatio
// 全部为值类型，单次计算内有效
// ==========================================

use crate::domain::types::{MetricId, QuantityUnit};
use serde::{Deserialize, Serialize};

/// 一天的秒数（线性累计基准）
pub const SECONDS_PER_DAY: f64 = 86_400.0;

// ==========================================
// DailyTotal - 全天总量
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyTotal {
    pub metric: MetricId,
    pub value: f64,
    pub unit: QuantityUnit,
}

impl DailyTotal {
    pub fn new(metric: MetricId, value: f64, unit: QuantityUnit) -> Self {
        Self {
            metric,
            value,
            unit,
        }
    }
}

// ==========================================
// ElapsedFraction - 当日已过比例
// ==========================================
// 不变量: 0 <= value <= 1
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct ElapsedFraction(f64);

impl ElapsedFraction {
    pub const ZERO: ElapsedFraction = ElapsedFraction(0.0);
    pub const FULL: ElapsedFraction = ElapsedFraction(1.0);

    /// 由比例构造，越界值收敛到 [0, 1]，NaN 视为 0
    pub fn new(fraction: f64) -> Self {
        if fraction.is_nan() {
            return Self::ZERO;
        }
        Self(fraction.clamp(0.0, 1.0))
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

/// 已过秒数收敛到 [0, 86400]
///
/// 时钟回拨或夏令时回退日（当天 25 小时）都可能产生越界值。
pub fn clamp_day_seconds(elapsed_seconds: f64) -> f64 {
    if elapsed_seconds.is_nan() {
        return 0.0;
    }
    elapsed_seconds.clamp(0.0, SECONDS_PER_DAY)
}

// ==========================================
// ComparisonRatio - 换算比例
// ==========================================
// 统一公式: accrued * multiplier / divisor
// 例: 汽车 = kg / 1500; 信用卡周占比(%) = mg * 700 / 5000
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRatio {
    pub divisor: f64,
    #[serde(default = "default_multiplier")]
    pub multiplier: f64,
}

fn default_multiplier() -> f64 {
    1.0
}

impl ComparisonRatio {
    /// 纯除数比例（multiplier = 1）
    pub fn per(divisor: f64) -> Self {
        Self {
            divisor,
            multiplier: 1.0,
        }
    }

    pub fn scaled(multiplier: f64, divisor: f64) -> Self {
        Self {
            divisor,
            multiplier,
        }
    }

    /// 除数必须为有限正数；在启动时由配置校验调用
    pub fn is_valid(&self) -> bool {
        self.divisor.is_finite() && self.divisor > 0.0 && self.multiplier.is_finite()
    }
}
