//! Structured predicate clauses
//!
//! A clause never carries SQL text: the column comes from [`Column`] and the
//! literal travels as a bound value, so raw input can change what is matched
//! but never the shape of the query.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::Serialize;

use super::{ClickFilter, DateFilter, SearchIn};

/// LIKE 转义字符
pub const LIKE_ESCAPE: char = '\\';

/// links 表中允许参与过滤/排序的列
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Column {
    Keyword,
    Url,
    Title,
    Ip,
    Timestamp,
    Clicks,
}

impl Column {
    pub fn as_str(self) -> &'static str {
        match self {
            Column::Keyword => "keyword",
            Column::Url => "url",
            Column::Title => "title",
            Column::Ip => "ip",
            Column::Timestamp => "timestamp",
            Column::Clicks => "clicks",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    Like,
    GreaterThan,
    LessThan,
    /// 半开区间 `[start, end)`
    Range,
}

impl Operator {
    fn symbol(self) -> &'static str {
        match self {
            Operator::Like => "LIKE",
            Operator::GreaterThan => ">",
            Operator::LessThan => "<",
            Operator::Range => "RANGE",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ClauseValue {
    Text(String),
    Integer(i64),
    DateTime(DateTime<Utc>),
    Range(DateTime<Utc>, DateTime<Utc>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Clause {
    pub column: Column,
    pub operator: Operator,
    pub value: ClauseValue,
}

impl Clause {
    pub fn like(column: Column, pattern: String) -> Self {
        Self {
            column,
            operator: Operator::Like,
            value: ClauseValue::Text(pattern),
        }
    }

    pub fn clicks(operator: Operator, limit: i64) -> Self {
        Self {
            column: Column::Clicks,
            operator,
            value: ClauseValue::Integer(limit),
        }
    }

    pub fn timestamp(operator: Operator, at: DateTime<Utc>) -> Self {
        Self {
            column: Column::Timestamp,
            operator,
            value: ClauseValue::DateTime(at),
        }
    }

    pub fn timestamp_range(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            column: Column::Timestamp,
            operator: Operator::Range,
            value: ClauseValue::Range(start, end),
        }
    }
}

/// 以占位符形式输出，便于日志记录（不包含任何字面量）
impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.operator {
            Operator::Range => write!(
                f,
                "`{0}` >= ? AND `{0}` < ?",
                self.column.as_str()
            ),
            Operator::Like => write!(
                f,
                "`{}` LIKE ? ESCAPE '{}'",
                self.column.as_str(),
                LIKE_ESCAPE
            ),
            op => write!(f, "`{}` {} ?", self.column.as_str(), op.symbol()),
        }
    }
}

/// 点击数过滤：`more` => clicks > limit，其余 => clicks < limit
pub fn build_click_clause(limit: Option<&str>, filter: ClickFilter) -> Option<Clause> {
    let limit = limit?.trim();
    if limit.is_empty() {
        return None;
    }
    let limit = limit.parse::<i64>().ok()?.unsigned_abs().min(i64::MAX as u64) as i64;

    let operator = match filter {
        ClickFilter::More => Operator::GreaterThan,
        ClickFilter::Less => Operator::LessThan,
    };
    Some(Clause::clicks(operator, limit))
}

/// 转义 LIKE 通配符（`%`、`_`）与转义字符本身
pub fn escape_like(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        if matches!(ch, '%' | '_') || ch == LIKE_ESCAPE {
            escaped.push(LIKE_ESCAPE);
        }
        escaped.push(ch);
    }
    escaped
}

/// 构造子串匹配模式：`*` 作为位置通配符，整体前后包裹 `%`
///
/// ```
/// use linkboard::filter::search_pattern;
/// assert_eq!(search_pattern("a*b"), "%a%b%");
/// assert_eq!(search_pattern("50%"), "%50\\%%");
/// ```
pub fn search_pattern(text: &str) -> String {
    let inner = text
        .split('*')
        .map(escape_like)
        .collect::<Vec<_>>()
        .join("%");
    format!("%{}%", inner)
}

pub fn build_search_clause(text: Option<&str>, search_in: SearchIn) -> Option<Clause> {
    let text = text?.trim();
    if text.is_empty() {
        return None;
    }
    Some(Clause::like(search_in.column(), search_pattern(text)))
}

/// 解析过滤日期，支持 `YYYY-MM-DD` 与 `MM/DD/YYYY`
pub fn parse_filter_date(input: &str) -> Option<NaiveDate> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(input, "%m/%d/%Y"))
        .ok()
}

fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

/// 次日零点；日期已到上限时退回当天最后一个可表示时刻
fn start_of_next_day(date: NaiveDate) -> DateTime<Utc> {
    match date.succ_opt() {
        Some(next) => start_of_day(next),
        None => DateTime::<Utc>::MAX_UTC,
    }
}

/// 创建时间过滤
///
/// - `before`: timestamp < first 00:00:00
/// - `after`: timestamp > first 00:00:00
/// - `between`: first 00:00:00 <= timestamp < (second + 1 day) 00:00:00
///
/// 日界一律按 UTC 计算，与存储的时间戳一致；配置的 `i18n.timezone`
/// 只影响展示，不影响过滤。
///
/// 任一需要的日期解析失败时不产生子句。
pub fn build_date_clause(
    filter: Option<DateFilter>,
    first: Option<&str>,
    second: Option<&str>,
) -> Option<Clause> {
    let filter = filter?;
    let first = parse_filter_date(first?)?;

    match filter {
        DateFilter::Before => Some(Clause::timestamp(Operator::LessThan, start_of_day(first))),
        DateFilter::After => Some(Clause::timestamp(
            Operator::GreaterThan,
            start_of_day(first),
        )),
        DateFilter::Between => {
            let second = parse_filter_date(second?)?;
            // 用户把日期填反时按时间先后纠正
            let (low, high) = if second < first {
                (second, first)
            } else {
                (first, second)
            };
            Some(Clause::timestamp_range(
                start_of_day(low),
                start_of_next_day(high),
            ))
        }
    }
}
