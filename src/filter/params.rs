//! Closed parameter sets of the admin listing

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

use super::Column;

/// 将输入解析为封闭集合中的值，非法或缺失时返回默认值
///
/// ```
/// use linkboard::filter::{SortBy, normalize_enum};
/// assert_eq!(normalize_enum(Some("clicks"), SortBy::Timestamp), SortBy::Clicks);
/// assert_eq!(normalize_enum(Some("DROP TABLE"), SortBy::Timestamp), SortBy::Timestamp);
/// assert_eq!(normalize_enum::<SortBy>(None, SortBy::Timestamp), SortBy::Timestamp);
/// ```
pub fn normalize_enum<T: FromStr>(input: Option<&str>, default: T) -> T {
    input
        .map(str::trim)
        .and_then(|s| T::from_str(s).ok())
        .unwrap_or(default)
}

/// 搜索字段
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    EnumString,
    AsRefStr,
    Display,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SearchIn {
    Keyword,
    #[default]
    Url,
    Title,
    Ip,
}

impl SearchIn {
    pub fn column(self) -> Column {
        match self {
            SearchIn::Keyword => Column::Keyword,
            SearchIn::Url => Column::Url,
            SearchIn::Title => Column::Title,
            SearchIn::Ip => Column::Ip,
        }
    }

    /// 页面上展示的字段名（未翻译的原文）
    pub fn label(self) -> &'static str {
        match self {
            SearchIn::Keyword => "Short URL",
            SearchIn::Url => "URL",
            SearchIn::Title => "Title",
            SearchIn::Ip => "IP",
        }
    }
}

/// 排序字段
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    EnumString,
    AsRefStr,
    Display,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SortBy {
    Keyword,
    Url,
    #[default]
    Timestamp,
    Ip,
    Clicks,
}

impl SortBy {
    pub fn column(self) -> Column {
        match self {
            SortBy::Keyword => Column::Keyword,
            SortBy::Url => Column::Url,
            SortBy::Timestamp => Column::Timestamp,
            SortBy::Ip => Column::Ip,
            SortBy::Clicks => Column::Clicks,
        }
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    EnumString,
    AsRefStr,
    Display,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

/// 点击数过滤方向
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    EnumString,
    AsRefStr,
    Display,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ClickFilter {
    More,
    #[default]
    Less,
}

/// 创建时间过滤方式（没有默认值，缺失即不过滤）
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumString, AsRefStr, Display, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum DateFilter {
    Before,
    After,
    Between,
}

impl DateFilter {
    pub fn parse(input: Option<&str>) -> Option<Self> {
        input.and_then(|s| s.trim().parse().ok())
    }
}
