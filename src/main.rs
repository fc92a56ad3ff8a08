// ==========================================
// 今日环境累计量看板 - 主入口
// ==========================================
// 用法:
//   eco-ticker [--config <path>] [--once] [--json] [--locale <en|zh-CN>]
// ==========================================

use anyhow::{bail, Context};
use eco_ticker::app::{run_forever, run_once, AppState, OutputFormat};
use eco_ticker::config::DashboardConfig;
use eco_ticker::{i18n, logging};
use std::path::PathBuf;

#[derive(Debug, Default)]
struct CliArgs {
    config_path: Option<PathBuf>,
    once: bool,
    json: bool,
    locale: Option<String>,
}

fn parse_args() -> anyhow::Result<CliArgs> {
    let mut parsed = CliArgs::default();
    let mut args = std::env::args().skip(1);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                let path = args.next().context("--config 需要文件路径")?;
                parsed.config_path = Some(PathBuf::from(path));
            }
            "--locale" => {
                parsed.locale = Some(args.next().context("--locale 需要语言代码")?);
            }
            "--once" => parsed.once = true,
            "--json" => parsed.json = true,
            other => bail!("未知参数: {}", other),
        }
    }

    Ok(parsed)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = parse_args()?;

    if args.json {
        logging::init_json();
    } else {
        logging::init();
    }

    tracing::info!("今日环境累计量看板 v{}", eco_ticker::VERSION);

    if let Some(locale) = &args.locale {
        i18n::set_locale(locale);
    }

    let config = DashboardConfig::load(args.config_path.as_deref()).context("配置加载失败")?;
    let mut state = AppState::new(config)?;

    let format = if args.json {
        OutputFormat::Json
    } else {
        OutputFormat::Text
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    if args.once {
        run_once(&mut state, format, &mut out)?;
    } else {
        run_forever(&mut state, format, &mut out).await?;
    }

    tracing::info!("看板已退出");
    Ok(())
}
