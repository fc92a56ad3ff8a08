// ==========================================
// 今日环境累计量看板 - 时钟与当日进度
// ==========================================
// 职责: 当前时刻 → 参考时区本地零点 → 当日已过秒数/比例
// 红线: 已过秒数必须收敛到 [0, 86400]
// ==========================================

use crate::domain::quantity::{clamp_day_seconds, ElapsedFraction};
use chrono::{DateTime, Duration, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeZone, Utc};
use chrono_tz::Tz;

// ==========================================
// Clock - 当前时刻来源
// ==========================================
// 测试中注入 FixedClock 以得到确定输出
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[derive(Debug, Clone)]
pub struct FixedClock {
    now: DateTime<Utc>,
}

impl FixedClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self { now }
    }

    /// 以参考时区的本地时间构造（测试便利）
    ///
    /// 歧义时刻取较早者；落入跳变缺口时按该时刻附近的偏移折算，结果仍在同一本地日。
    pub fn at_local(tz: Tz, date: NaiveDate, time: NaiveTime) -> Self {
        let local = date.and_time(time);
        let gap_offset_seconds = tz.offset_from_utc_datetime(&local).fix().local_minus_utc();
        Self {
            now: resolve_local(tz, local, gap_offset_seconds),
        }
    }

    pub fn set(&mut self, now: DateTime<Utc>) {
        self.now = now;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.now
    }
}

// ==========================================
// DayPosition - 当日进度
// ==========================================
/// 同时暴露已过秒数与已过比例
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DayPosition {
    pub elapsed_seconds: f64,
    pub fraction: ElapsedFraction,
}

impl DayPosition {
    /// 计算 `now` 在参考时区当日中的位置
    pub fn of(now: DateTime<Utc>, tz: Tz) -> Self {
        Self {
            elapsed_seconds: elapsed_seconds_of_day(now, tz),
            fraction: elapsed_fraction_of_day(now, tz),
        }
    }

    /// 已运行整小时数
    pub fn running_hours(&self) -> u32 {
        running_hours(self.elapsed_seconds)
    }
}

// ==========================================
// 本地零点
// ==========================================

/// `now` 所在本地日期的零点（UTC 表示）
pub fn local_midnight(now: DateTime<Utc>, tz: Tz) -> DateTime<Utc> {
    let local = now.with_timezone(&tz);
    let offset_seconds = local.offset().fix().local_minus_utc();
    resolve_midnight(tz, local.date_naive(), offset_seconds)
}

/// 下一个本地零点（UTC 表示），用作按日缓存的过期时刻
pub fn next_local_midnight(now: DateTime<Utc>, tz: Tz) -> DateTime<Utc> {
    let local = now.with_timezone(&tz);
    let offset_seconds = local.offset().fix().local_minus_utc();
    match local.date_naive().succ_opt() {
        Some(next_day) => resolve_midnight(tz, next_day, offset_seconds),
        None => now + Duration::days(1),
    }
}

/// 本地日期零点 → UTC
///
/// 零点有歧义时取较早时刻；零点落入跳变缺口时按 `fallback_offset_seconds` 折算。
fn resolve_midnight(tz: Tz, date: NaiveDate, fallback_offset_seconds: i32) -> DateTime<Utc> {
    resolve_local(tz, date.and_time(NaiveTime::MIN), fallback_offset_seconds)
}

fn resolve_local(tz: Tz, local: NaiveDateTime, fallback_offset_seconds: i32) -> DateTime<Utc> {
    match tz.from_local_datetime(&local) {
        LocalResult::Single(dt) => dt.with_timezone(&Utc),
        LocalResult::Ambiguous(earliest, _) => earliest.with_timezone(&Utc),
        LocalResult::None => {
            Utc.from_utc_datetime(&(local - Duration::seconds(i64::from(fallback_offset_seconds))))
        }
    }
}

fn duration_seconds(delta: Duration) -> f64 {
    match delta.num_microseconds() {
        Some(us) => us as f64 / 1_000_000.0,
        None => delta.num_seconds() as f64,
    }
}

// ==========================================
// 当日已过时间
// ==========================================

/// 本地零点至 `now` 的真实秒数，收敛到 [0, 86400]
pub fn elapsed_seconds_of_day(now: DateTime<Utc>, tz: Tz) -> f64 {
    clamp_day_seconds(duration_seconds(now - local_midnight(now, tz)))
}

/// 当前本地日的真实长度（秒）：夏令时开始日 82800，结束日 90000
pub fn local_day_length_seconds(now: DateTime<Utc>, tz: Tz) -> f64 {
    duration_seconds(next_local_midnight(now, tz) - local_midnight(now, tz))
}

/// 当日已过比例 = 真实已过秒数 / 当日真实长度，保证落在 [0, 1]
///
/// 23/25 小时的切换日同样从 0 单调增至接近 1。
pub fn elapsed_fraction_of_day(now: DateTime<Utc>, tz: Tz) -> ElapsedFraction {
    let day_length = local_day_length_seconds(now, tz);
    if day_length <= 0.0 {
        return ElapsedFraction::ZERO;
    }
    ElapsedFraction::new(duration_seconds(now - local_midnight(now, tz)) / day_length)
}

pub fn running_hours(elapsed_seconds: f64) -> u32 {
    (clamp_day_seconds(elapsed_seconds) / 3600.0).floor() as u32
}
