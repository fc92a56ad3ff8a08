// ==========================================
// 今日环境累计量看板 - 应用状态
// ==========================================
// 职责: 持有配置化的计算器、时钟与按日缓存的数据集总量
// 每个刷新周期调用一次 tick()
// ==========================================

use crate::config::{ConfigResult, DashboardConfig};
use crate::domain::snapshot::DashboardSnapshot;
use crate::engine::accrual::DailyAccrualCalculator;
use crate::engine::clock::{Clock, SystemClock};
use crate::importer::daily_memo::CachedDailyTotal;
use crate::importer::emissions_csv::EmissionsCsvLoader;
use chrono::{DateTime, Utc};
use std::time::Duration;

/// 应用状态
pub struct AppState {
    calculator: DailyAccrualCalculator,
    clock: Box<dyn Clock>,
    /// 仅在配置了排放数据集时存在
    emissions: Option<CachedDailyTotal<EmissionsCsvLoader>>,
}

impl AppState {
    /// 使用系统时钟创建
    pub fn new(config: DashboardConfig) -> ConfigResult<Self> {
        Self::with_clock(config, Box::new(SystemClock))
    }

    /// 注入时钟创建（测试用）
    pub fn with_clock(config: DashboardConfig, clock: Box<dyn Clock>) -> ConfigResult<Self> {
        let calculator = DailyAccrualCalculator::new(config)?;
        let tz = calculator.timezone();

        let emissions = calculator.config().emissions.clone().map(|source| {
            tracing::info!(path = %source.path.display(), "启用排放数据集");
            let loader = EmissionsCsvLoader::new(source, calculator.config().reference_year);
            CachedDailyTotal::new(loader, tz)
        });

        tracing::info!(
            timezone = %tz.name(),
            metrics = calculator.config().metrics.len(),
            refresh_secs = calculator.config().refresh_interval_secs,
            "AppState初始化成功"
        );

        Ok(Self {
            calculator,
            clock,
            emissions,
        })
    }

    pub fn calculator(&self) -> &DailyAccrualCalculator {
        &self.calculator
    }

    pub fn refresh_interval(&self) -> Duration {
        self.calculator.config().refresh_interval()
    }

    /// 按当前时钟生成快照
    pub fn tick(&mut self) -> DashboardSnapshot {
        let now = self.clock.now();
        self.tick_at(now)
    }

    /// 按指定时刻生成快照
    pub fn tick_at(&mut self, now: DateTime<Utc>) -> DashboardSnapshot {
        let external = self.emissions.as_mut().map(|cached| cached.total_for(now));
        self.calculator.snapshot(now, external.as_ref())
    }
}
