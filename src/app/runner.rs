// ==========================================
// 今日环境累计量看板 - 刷新调度
// ==========================================
// 定时器由展示层持有；每个周期调用一次纯计算并输出一帧
// 错过的周期直接跳过，不补帧
// ==========================================

use crate::app::render::{render, OutputFormat};
use crate::app::state::AppState;
use std::future::Future;
use std::io::Write;
use tokio::time::{interval, MissedTickBehavior};

/// 清屏并将光标移到左上角
const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// 输出一帧后返回
pub fn run_once<W: Write>(state: &mut AppState, format: OutputFormat, out: &mut W) -> anyhow::Result<()> {
    let snapshot = state.tick();
    let frame = render(&snapshot, format)?;
    writeln!(out, "{}", frame.trim_end())?;
    out.flush()?;
    Ok(())
}

/// 周期刷新，直到 `shutdown` 完成或输出 `max_frames` 帧
///
/// # 返回
/// - 已输出的帧数
pub async fn run_until<W, S>(
    state: &mut AppState,
    format: OutputFormat,
    out: &mut W,
    shutdown: S,
    max_frames: Option<usize>,
) -> anyhow::Result<usize>
where
    W: Write,
    S: Future<Output = ()>,
{
    let mut ticker = interval(state.refresh_interval());
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    tokio::pin!(shutdown);

    let mut frames = 0usize;
    loop {
        tokio::select! {
            _ = &mut shutdown => {
                tracing::info!(frames, "收到退出信号");
                break;
            }
            _ = ticker.tick() => {
                if format == OutputFormat::Text {
                    write!(out, "{}", CLEAR_SCREEN)?;
                }
                run_once(state, format, out)?;
                frames += 1;

                if max_frames.is_some_and(|max| frames >= max) {
                    break;
                }
            }
        }
    }

    Ok(frames)
}

/// 周期刷新直到 Ctrl-C
pub async fn run_forever<W: Write>(state: &mut AppState, format: OutputFormat, out: &mut W) -> anyhow::Result<()> {
    tracing::info!(interval_secs = state.refresh_interval().as_secs(), "开始刷新");
    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "无法监听 Ctrl-C");
            std::future::pending::<()>().await;
        }
    };
    run_until(state, format, out, shutdown, None).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DashboardConfig;

    #[tokio::test]
    async fn test_run_until_max_frames() {
        let mut state = AppState::new(DashboardConfig::default()).unwrap();
        let mut out = Vec::new();

        let frames = run_until(
            &mut state,
            OutputFormat::Json,
            &mut out,
            std::future::pending::<()>(),
            Some(1),
        )
        .await
        .unwrap();

        assert_eq!(frames, 1);
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), 1);
        assert!(text.contains("\"readings\""));
    }

    #[tokio::test]
    async fn test_run_until_shutdown() {
        let mut state = AppState::new(DashboardConfig::default()).unwrap();
        let mut out = Vec::new();

        let frames = run_until(&mut state, OutputFormat::Text, &mut out, async {}, None)
            .await
            .unwrap();

        // 退出信号可能先于或后于首帧就绪，不超过一帧
        assert!(frames <= 1);
    }
}
