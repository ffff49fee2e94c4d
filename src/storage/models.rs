use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// links 表中的一行
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkRow {
    pub keyword: String,
    pub url: String,
    pub title: Option<String>,
    pub timestamp: DateTime<Utc>,
    pub ip: String,

    #[serde(default)]
    pub clicks: i64,
}

/// 匹配行数与点击数合计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkTotals {
    pub total_links: u64,
    pub total_clicks: u64,
}
