// ==========================================
// 今日环境累计量看板 - 按日缓存
// ==========================================
// 职责: 一次性数据加载的显式缓存，过期时刻为下一个本地零点
// 说明: 过期后首次访问时惰性重算；重算幂等，无需加锁
// ==========================================

use crate::engine::accrual::ExternalTotal;
use crate::engine::clock::next_local_midnight;
use crate::importer::emissions_csv::DailyTotalProvider;
use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;

#[derive(Debug, Clone)]
struct MemoEntry<T> {
    value: T,
    expires_at: DateTime<Utc>,
}

// ==========================================
// DailyMemo - 带过期时刻的记忆值
// ==========================================
#[derive(Debug, Clone)]
pub struct DailyMemo<T> {
    tz: Tz,
    entry: Option<MemoEntry<T>>,
}

impl<T> DailyMemo<T> {
    pub fn new(tz: Tz) -> Self {
        Self { tz, entry: None }
    }

    /// 当前缓存的过期时刻
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.entry.as_ref().map(|e| e.expires_at)
    }

    pub fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        matches!(&self.entry, Some(e) if now < e.expires_at)
    }

    pub fn invalidate(&mut self) {
        self.entry = None;
    }

    /// 取缓存值；缺失或已过期时以本地日期调用 `load` 重算
    pub fn get_or_refresh<F>(&mut self, now: DateTime<Utc>, load: F) -> &T
    where
        F: FnOnce(NaiveDate) -> T,
    {
        if !self.is_fresh(now) {
            self.entry = None;
        }

        let tz = self.tz;
        let entry = self.entry.get_or_insert_with(|| {
            let local_date = now.with_timezone(&tz).date_naive();
            let expires_at = next_local_midnight(now, tz);
            tracing::debug!(%local_date, %expires_at, "按日缓存重算");
            MemoEntry {
                value: load(local_date),
                expires_at,
            }
        });
        &entry.value
    }
}

// ==========================================
// CachedDailyTotal - 带降级的按日总量
// ==========================================
// 加载失败: 记录告警，总量取 0，当日不再重试
pub struct CachedDailyTotal<P: DailyTotalProvider> {
    provider: P,
    memo: DailyMemo<ExternalTotal>,
}

impl<P: DailyTotalProvider> CachedDailyTotal<P> {
    pub fn new(provider: P, tz: Tz) -> Self {
        Self {
            provider,
            memo: DailyMemo::new(tz),
        }
    }

    pub fn total_for(&mut self, now: DateTime<Utc>) -> ExternalTotal {
        let provider = &self.provider;
        self.memo
            .get_or_refresh(now, |date| match provider.daily_total(date) {
                Ok(value) => ExternalTotal::loaded(value),
                Err(e) => {
                    tracing::warn!(error = %e, %date, "数据集加载失败，总量按 0 处理");
                    ExternalTotal::unavailable(e.to_string())
                }
            })
            .clone()
    }

    pub fn memo(&self) -> &DailyMemo<ExternalTotal> {
        &self.memo
    }
}
