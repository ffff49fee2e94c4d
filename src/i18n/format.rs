//! Locale-aware number and date formatting
//!
//! Date masks use the PHP `date()` letters (`Y-m-d H:i:s`, `D, d M Y`, ...).
//! A backslash marks the next character as literal, so `\T` prints a `T`
//! instead of the timezone abbreviation.

use std::fmt::{Display, Write};

use chrono::{DateTime, Datelike, Local, NaiveDate, Offset, TimeZone, Timelike, Utc};

use super::locale::LocaleTable;

/// 按语言的千位分隔符与小数点格式化数字；`decimals` 小于 0 时按 0 处理
pub fn format_number(value: f64, decimals: i32, table: &LocaleTable) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let decimals = decimals.max(0) as usize;
    let rendered = format!("{:.*}", decimals, value.abs());
    let (integer, fraction) = match rendered.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (rendered.as_str(), None),
    };

    let mut grouped = String::with_capacity(rendered.len() + integer.len() / 3);
    for (i, digit) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push_str(&table.thousands_sep);
        }
        grouped.push(digit);
    }
    if let Some(fraction) = fraction {
        grouped.push_str(&table.decimal_point);
        grouped.push_str(fraction);
    }

    // -0.00 显示为 0.00
    let is_zero = rendered.chars().all(|c| c == '0' || c == '.');
    if value.is_sign_negative() && !is_zero {
        grouped.insert(0, '-');
    }
    grouped
}

/// 格式化时间戳（秒）；`timestamp` 为 None 时使用当前时间
///
/// `use_utc` 为 false 时使用 `timezone`，未配置时使用系统本地时区。
pub fn format_date(
    mask: &str,
    timestamp: Option<i64>,
    use_utc: bool,
    timezone: Option<chrono_tz::Tz>,
    table: &LocaleTable,
) -> String {
    let instant = timestamp
        .and_then(|ts| DateTime::<Utc>::from_timestamp(ts, 0))
        .unwrap_or_else(Utc::now);

    match (use_utc, timezone) {
        (true, _) => render(mask, &instant, "UTC", table),
        (false, Some(tz)) => render(mask, &instant.with_timezone(&tz), tz.name(), table),
        (false, None) => render(mask, &instant.with_timezone(&Local), "Local", table),
    }
}

fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|d| d.pred_opt())
        .map(|d| d.day())
        .unwrap_or(31)
}

fn ordinal_suffix(day: u32) -> &'static str {
    match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    }
}

fn twelve_hour(hour: u32) -> u32 {
    match hour % 12 {
        0 => 12,
        h => h,
    }
}

/// 逐字符扫描掩码；未知字符原样输出
fn render<Tz>(mask: &str, dt: &DateTime<Tz>, zone_name: &str, table: &LocaleTable) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let mut out = String::with_capacity(mask.len() * 2);
    let mut chars = mask.chars();
    let offset_secs = dt.offset().fix().local_minus_utc();
    let weekday = dt.weekday().num_days_from_sunday();

    while let Some(token) = chars.next() {
        // write! 到 String 不会失败
        let _ = match token {
            '\\' => {
                if let Some(literal) = chars.next() {
                    out.push(literal);
                }
                Ok(())
            }
            // 日
            'd' => write!(out, "{:02}", dt.day()),
            'D' => write!(out, "{}", table.weekday_abbrev_name(weekday)),
            'j' => write!(out, "{}", dt.day()),
            'l' => write!(out, "{}", table.weekday_name(weekday)),
            'N' => write!(out, "{}", dt.weekday().number_from_monday()),
            'S' => write!(out, "{}", ordinal_suffix(dt.day())),
            'w' => write!(out, "{}", weekday),
            'z' => write!(out, "{}", dt.ordinal0()),
            // 周
            'W' => write!(out, "{:02}", dt.iso_week().week()),
            // 月
            'F' => write!(out, "{}", table.month_name(dt.month())),
            'm' => write!(out, "{:02}", dt.month()),
            'M' => write!(out, "{}", table.month_abbrev_name(dt.month())),
            'n' => write!(out, "{}", dt.month()),
            't' => write!(out, "{}", days_in_month(dt.year(), dt.month())),
            // 年
            'L' => write!(out, "{}", u8::from(NaiveDate::from_ymd_opt(dt.year(), 2, 29).is_some())),
            'o' => write!(out, "{}", dt.iso_week().year()),
            'Y' => write!(out, "{}", dt.year()),
            'y' => write!(out, "{:02}", dt.year().rem_euclid(100)),
            // 时间
            'a' => write!(out, "{}", table.meridiem(dt.hour(), false)),
            'A' => write!(out, "{}", table.meridiem(dt.hour(), true)),
            'g' => write!(out, "{}", twelve_hour(dt.hour())),
            'G' => write!(out, "{}", dt.hour()),
            'h' => write!(out, "{:02}", twelve_hour(dt.hour())),
            'H' => write!(out, "{:02}", dt.hour()),
            'i' => write!(out, "{:02}", dt.minute()),
            's' => write!(out, "{:02}", dt.second()),
            'u' => write!(out, "{:06}", dt.timestamp_subsec_micros()),
            'v' => write!(out, "{:03}", dt.timestamp_subsec_millis()),
            // 时区
            'e' => write!(out, "{}", zone_name),
            'T' => write!(out, "{}", dt.offset()),
            'P' => write!(out, "{}", dt.format("%:z")),
            'O' => write!(out, "{}", dt.format("%z")),
            'Z' => write!(out, "{}", offset_secs),
            // 完整格式
            'c' => write!(out, "{}", dt.format("%Y-%m-%dT%H:%M:%S%:z")),
            'r' => write!(out, "{}", dt.format("%a, %d %b %Y %H:%M:%S %z")),
            'U' => write!(out, "{}", dt.timestamp()),
            other => {
                out.push(other);
                Ok(())
            }
        };
    }

    out
}
