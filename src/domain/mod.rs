// ==========================================
// 今日环境累计量看板 - 领域模型层
// ==========================================
// 职责: 定义值类型与快照结构
// 红线: 不含计算逻辑,不含数据加载
// ==========================================

pub mod quantity;
pub mod snapshot;
pub mod types;

// 重导出核心类型
pub use quantity::{clamp_day_seconds, ComparisonRatio, DailyTotal, ElapsedFraction, SECONDS_PER_DAY};
pub use snapshot::{ComparisonReading, DashboardSnapshot, DashboardWarning, MetricReading};
pub use types::{MetricId, QuantityUnit};
