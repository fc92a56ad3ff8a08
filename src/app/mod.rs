// ==========================================
// 今日环境累计量看板 - 应用层
// ==========================================
// 职责: 应用状态、终端渲染、刷新调度
// ==========================================

pub mod render;
pub mod runner;
pub mod state;

pub use render::{render, render_text, OutputFormat};
pub use runner::{run_forever, run_once, run_until};
pub use state::AppState;
