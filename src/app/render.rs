// ==========================================
// 今日环境累计量看板 - 终端渲染
// ==========================================
// 输入: DashboardSnapshot
// 输出: 文本画面 / JSON
// ==========================================

use crate::domain::snapshot::{DashboardSnapshot, MetricReading};
use crate::engine::format::{format_abbreviated, format_grouped};
use crate::i18n::{t, t_with_args};
use std::fmt::Write;

/// 输出格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

/// 渲染一帧
pub fn render(snapshot: &DashboardSnapshot, format: OutputFormat) -> serde_json::Result<String> {
    match format {
        OutputFormat::Text => Ok(render_text(snapshot)),
        OutputFormat::Json => serde_json::to_string(snapshot),
    }
}

/// 文本画面
///
/// 每个指标三行: 标签 / 主值（千分位 + 单位 + 缩写）/ 换算值；
/// 告警与运行时长置于末尾。
pub fn render_text(snapshot: &DashboardSnapshot) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{}", t("app.title"));
    let _ = writeln!(
        out,
        "{}",
        t_with_args("app.subtitle", &[("timezone", snapshot.timezone.as_str())])
    );
    out.push('\n');

    for reading in &snapshot.readings {
        render_metric(&mut out, reading);
        out.push('\n');
    }

    for warning in &snapshot.warnings {
        let metric = t(warning.metric.label_key());
        let _ = writeln!(
            out,
            "{}",
            t_with_args(
                "warning.dataset_unavailable",
                &[("metric", metric.as_str()), ("detail", warning.message.as_str())],
            )
        );
    }

    let hours = snapshot.running_hours.to_string();
    let _ = writeln!(out, "{}", t_with_args("footer.running_time", &[("hours", hours.as_str())]));

    out
}

fn render_metric(out: &mut String, reading: &MetricReading) {
    let _ = writeln!(out, "{}", t(reading.metric.label_key()));
    let _ = writeln!(
        out,
        "  {} {}  ({})",
        format_grouped(reading.accrued, 0),
        reading.unit,
        format_abbreviated(reading.accrued)
    );

    for comparison in &reading.comparisons {
        let value = format_grouped(comparison.value, usize::from(comparison.decimals));
        let _ = writeln!(
            out,
            "  {}",
            t_with_args(&comparison.label_key, &[("value", value.as_str())])
        );
    }
}
