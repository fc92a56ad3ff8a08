// ==========================================
// 今日环境累计量看板 - 导入层
// ==========================================
// 职责: 外部数据导入（可选排放数据集），按日缓存
// 支持: CSV
// ==========================================

pub mod daily_memo;
pub mod emissions_csv;
pub mod error;

// 重导出核心类型
pub use daily_memo::{CachedDailyTotal, DailyMemo};
pub use emissions_csv::{
    normalize_year, parse_dataset_date, DailyTotalProvider, EmissionRow, EmissionsCsvLoader,
};
pub use error::{ImportError, ImportResult};
