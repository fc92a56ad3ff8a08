// ==========================================
// 今日环境累计量看板 - 核心库
// ==========================================
// 系统定位: 按日线性外推的"今日至今"累计量实时看板
// 核心: 当日已过比例 × 全天总量 → 累计量 → 换算量
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "en");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 值类型与快照
pub mod domain;

// 引擎层 - 纯计算
pub mod engine;

// 导入层 - 可选外部数据
pub mod importer;

// 配置层 - 看板配置
pub mod config;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// 应用层 - 渲染与刷新调度
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

pub use domain::{
    ComparisonRatio, DailyTotal, DashboardSnapshot, ElapsedFraction, MetricId, MetricReading,
    QuantityUnit,
};

pub use engine::{
    accrued_quantity, derive_comparison, elapsed_fraction_of_day, elapsed_seconds_of_day,
    format_abbreviated, DailyAccrualCalculator,
};

pub use config::{ConfigError, DashboardConfig};

pub use importer::{ImportError, EmissionsCsvLoader};

pub use app::AppState;

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "今日环境累计量看板";
