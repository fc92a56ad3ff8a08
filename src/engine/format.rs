// ==========================================
// 今日环境累计量看板 - 数值格式化
// ==========================================
// format_abbreviated: 对外可见的缩写格式（B/M/k）
// format_grouped: 千分位分组
// ==========================================

const BILLION: f64 = 1_000_000_000.0;
const MILLION: f64 = 1_000_000.0;
const THOUSAND: f64 = 1_000.0;

/// 缩写格式化
///
/// 规则（顺序判断，命中即返回）:
/// 1) value >= 1e9 → 一位小数 + "B"，去掉末尾 0 与小数点
/// 2) value >= 1e6 → 一位小数 + "M"，同上
/// 3) value >= 1e3 → 零位小数 + "k"
/// 4) 其他 → 千分位整数
///
/// 进位发生在缩放之后：999_500 → "1000k"，999_999_999 → "1000M"。
pub fn format_abbreviated(value: f64) -> String {
    if value >= BILLION {
        one_decimal_trimmed(value / BILLION, "B")
    } else if value >= MILLION {
        one_decimal_trimmed(value / MILLION, "M")
    } else if value >= THOUSAND {
        format!("{:.0}k", value / THOUSAND)
    } else {
        format_grouped(value, 0)
    }
}

fn one_decimal_trimmed(scaled: f64, suffix: &str) -> String {
    let fixed = format!("{:.1}", scaled);
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    format!("{}{}", trimmed, suffix)
}

/// 千分位分组，保留 `decimals` 位小数
///
/// # 示例
/// ```
/// use eco_ticker::engine::format::format_grouped;
/// assert_eq!(format_grouped(1_234_567.0, 0), "1,234,567");
/// assert_eq!(format_grouped(14.28, 1), "14.3");
/// ```
pub fn format_grouped(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let fixed = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (fixed.as_str(), None),
    };

    let mut grouped = String::with_capacity(fixed.len() + int_part.len() / 3 + 1);
    let is_zero = fixed.chars().all(|c| c == '0' || c == '.');
    if value.is_sign_negative() && !is_zero {
        grouped.push('-');
    }

    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    if let Some(frac) = frac_part {
        grouped.push('.');
        grouped.push_str(frac);
    }

    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_abbreviated_below_thousand() {
        assert_eq!(format_abbreviated(0.0), "0");
        assert_eq!(format_abbreviated(842.0), "842");
        assert_eq!(format_abbreviated(999.0), "999");
        assert_eq!(format_abbreviated(998.4), "998");
    }

    #[test]
    fn test_abbreviated_thousands() {
        assert_eq!(format_abbreviated(1_000.0), "1k");
        assert_eq!(format_abbreviated(1_500.0), "2k");
        assert_eq!(format_abbreviated(12_345.0), "12k");
    }

    #[test]
    fn test_abbreviated_rounding_boundaries() {
        // 缩放后进位，不升级到下一个后缀
        assert_eq!(format_abbreviated(999_500.0), "1000k");
        assert_eq!(format_abbreviated(999_499.0), "999k");
        assert_eq!(format_abbreviated(999_999_999.0), "1000M");
        assert_eq!(format_abbreviated(999.6), "1,000");
    }

    #[test]
    fn test_abbreviated_millions() {
        assert_eq!(format_abbreviated(1_000_000.0), "1M");
        assert_eq!(format_abbreviated(1_500_000.0), "1.5M");
        assert_eq!(format_abbreviated(2_000_000.0), "2M");
        assert_eq!(format_abbreviated(30_136_986.0), "30.1M");
        assert_eq!(format_abbreviated(10_000_000.0), "10M");
    }

    #[test]
    fn test_abbreviated_billions() {
        assert_eq!(format_abbreviated(1_500_000_000.0), "1.5B");
        assert_eq!(format_abbreviated(2_000_000_000.0), "2B");
        assert_eq!(format_abbreviated(1_260_273_973.0), "1.3B");
        assert_eq!(format_abbreviated(100_000_000_000.0), "100B");
    }

    #[test]
    fn test_grouped() {
        assert_eq!(format_grouped(0.0, 0), "0");
        assert_eq!(format_grouped(842.0, 0), "842");
        assert_eq!(format_grouped(1_000.0, 0), "1,000");
        assert_eq!(format_grouped(630_136_986.5, 1), "630,136,986.5");
        assert_eq!(format_grouped(1_260_273_973.0, 0), "1,260,273,973");
        assert_eq!(format_grouped(-12_345.0, 0), "-12,345");
        assert_eq!(format_grouped(-0.2, 0), "0");
    }
}
