// ==========================================
// 今日环境累计量看板 - 排放数据集解析
// ==========================================
// 输入: 历史逐日排放 CSV（每行单位: 百万吨 CO2）
// 输出: 今日对应的全天总量（公吨）
// 规则: 日期年份统一替换为参考年份后按月日匹配，求和后乘单位倍数
// ==========================================

use crate::config::EmissionsSourceConfig;
use crate::importer::error::{ImportError, ImportResult};
use chrono::{Datelike, NaiveDate, NaiveDateTime};
use csv::ReaderBuilder;
use std::fs::File;
use tracing::instrument;

// ==========================================
// DailyTotalProvider - 按日总量来源
// ==========================================
pub trait DailyTotalProvider {
    /// 返回 `date` 当天的全天总量
    fn daily_total(&self, date: NaiveDate) -> ImportResult<f64>;
}

/// 数据集单行（日期已解析，数值保留原文）
#[derive(Debug, Clone, PartialEq)]
pub struct EmissionRow {
    pub row: usize,
    pub date: NaiveDate,
    pub raw_value: String,
}

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y", "%Y/%m/%d"];
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];

/// 解析数据集日期；无法解析返回 None（该行被丢弃）
///
/// 斜杠格式按 日/月/年 解析。
pub fn parse_dataset_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
                .map(|dt| dt.date())
        })
}

/// 年份统一替换为参考年份；2 月 29 日落到平年时无法归一，返回 None
pub fn normalize_year(date: NaiveDate, reference_year: i32) -> Option<NaiveDate> {
    date.with_year(reference_year)
}

// ==========================================
// EmissionsCsvLoader
// ==========================================
#[derive(Debug, Clone)]
pub struct EmissionsCsvLoader {
    source: EmissionsSourceConfig,
    reference_year: i32,
}

impl EmissionsCsvLoader {
    pub fn new(source: EmissionsSourceConfig, reference_year: i32) -> Self {
        Self {
            source,
            reference_year,
        }
    }

    /// 读取全部行；日期无法解析的行直接丢弃
    pub fn read_rows(&self) -> ImportResult<Vec<EmissionRow>> {
        let path = self.source.path.as_path();

        // 检查文件存在
        if !path.exists() {
            return Err(ImportError::FileNotFound(path.display().to_string()));
        }

        let file = File::open(path)?;
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // 允许行长度不一致
            .from_reader(file);

        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        let date_idx = column_index(&headers, &self.source.date_column)?;
        let value_idx = column_index(&headers, &self.source.value_column)?;

        let mut rows = Vec::new();
        let mut dropped = 0usize;
        for (row_idx, result) in reader.records().enumerate() {
            let record = result?;
            // 表头占第 1 行
            let row = row_idx + 2;

            let date = match record.get(date_idx).and_then(parse_dataset_date) {
                Some(d) => d,
                None => {
                    dropped += 1;
                    continue;
                }
            };

            rows.push(EmissionRow {
                row,
                date,
                raw_value: record.get(value_idx).unwrap_or("").trim().to_string(),
            });
        }

        if dropped > 0 {
            tracing::debug!(dropped, path = %path.display(), "丢弃日期无法解析的行");
        }

        Ok(rows)
    }

    /// 对已读取的行求今日全天总量
    pub fn sum_for_date(&self, rows: &[EmissionRow], date: NaiveDate) -> ImportResult<f64> {
        let target = match normalize_year(date, self.reference_year) {
            Some(t) => t,
            None => {
                tracing::warn!(%date, reference_year = self.reference_year, "日期无法归一到参考年份");
                return Ok(0.0);
            }
        };

        let mut sum = 0.0;
        let mut matched = 0usize;
        for row in rows {
            if normalize_year(row.date, self.reference_year) != Some(target) {
                continue;
            }

            let value = row.raw_value.parse::<f64>().map_err(|e| ImportError::TypeConversionError {
                row: row.row,
                field: self.source.value_column.clone(),
                message: format!("{} ({})", e, row.raw_value),
            })?;
            sum += value;
            matched += 1;
        }

        tracing::debug!(%target, matched, sum, "数据集按日匹配完成");
        Ok(sum * self.source.unit_multiplier)
    }
}

impl DailyTotalProvider for EmissionsCsvLoader {
    #[instrument(skip(self), fields(path = %self.source.path.display()))]
    fn daily_total(&self, date: NaiveDate) -> ImportResult<f64> {
        let rows = self.read_rows()?;
        let total = self.sum_for_date(&rows, date)?;
        tracing::info!(rows = rows.len(), total_t = total, "排放数据集已加载");
        Ok(total)
    }
}

fn column_index(headers: &[String], column: &str) -> ImportResult<usize> {
    headers
        .iter()
        .position(|h| h == column)
        .ok_or_else(|| ImportError::MissingColumn(column.to_string()))
}
