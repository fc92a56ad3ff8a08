// ==========================================
// 今日环境累计量看板 - 引擎层
// ==========================================
// 职责: 当日进度、线性累计、换算、数值格式化
// 红线: 纯函数,不读文件,不持有可变状态
// ==========================================

pub mod accrual;
pub mod clock;
pub mod format;

// 重导出核心引擎
pub use accrual::{accrued_quantity, derive_comparison, DailyAccrualCalculator, ExternalTotal};
pub use clock::{
    elapsed_fraction_of_day, elapsed_seconds_of_day, local_day_length_seconds, local_midnight,
    next_local_midnight, running_hours, Clock, DayPosition, FixedClock, SystemClock,
};
pub use format::{format_abbreviated, format_grouped};
