// ==========================================
// 今日环境累计量看板 - 配置层
// ==========================================
// 职责: 看板配置定义、加载与启动校验
// 存储: 内置默认值 / JSON 文件
// ==========================================

pub mod dashboard_config;
pub mod error;

// 重导出核心配置
pub use dashboard_config::{
    defaults, ComparisonConfig, DailyTotalSource, DashboardConfig, EmissionsSourceConfig,
    MetricConfig,
};
pub use error::{ConfigError, ConfigResult};
