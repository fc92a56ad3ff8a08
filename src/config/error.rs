// ==========================================
// 今日环境累计量看板 - 配置层错误类型
// ==========================================
// 工具: thiserror 派生宏
// 说明: 配置错误只在启动时出现，运行期计算不再有错误路径
// ==========================================

use crate::domain::types::MetricId;
use thiserror::Error;

/// 配置错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    // ===== 文件相关错误 =====
    #[error("配置文件读取失败: {0}")]
    FileReadError(String),

    #[error("配置解析失败: {0}")]
    ParseError(String),

    // ===== 取值校验错误 =====
    #[error("未知时区: {0}")]
    UnknownTimezone(String),

    #[error("刷新间隔必须大于 0 秒")]
    InvalidRefreshInterval,

    #[error("全天总量无效 (指标 {metric}): {value}")]
    InvalidDailyTotal { metric: MetricId, value: f64 },

    #[error("换算比例无效 (指标 {metric}, 标签 {label_key}): divisor={divisor}, multiplier={multiplier}")]
    InvalidRatio {
        metric: MetricId,
        label_key: String,
        divisor: f64,
        multiplier: f64,
    },

    #[error("指标重复配置: {0}")]
    DuplicateMetric(MetricId),

    #[error("指标 {0} 使用排放数据集，但未配置 emissions 数据源")]
    MissingEmissionsSource(MetricId),

    #[error("数据集单位倍数无效: {0}")]
    InvalidUnitMultiplier(f64),
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::FileReadError(err.to_string())
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}

/// Result 类型别名
pub type ConfigResult<T> = Result<T, ConfigError>;
