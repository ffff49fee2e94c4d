//! Admin API 类型定义

use serde::{Deserialize, Serialize};

use crate::filter::{
    ClickFilter, DateFilter, FilterDescriptor, FilterRequest, Pagination, SearchIn, SortBy,
    SortOrder,
};
use crate::storage::LinkTotals;

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ApiResponse<T> {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

/// 管理页查询参数
///
/// 过滤参数之外，`u`/`k`/`t` 存在时进入书签工具模式。
#[derive(Deserialize, Clone, Debug, Default)]
pub struct AdminQuery {
    #[serde(flatten)]
    pub filter: FilterRequest,
    /// 书签工具：要缩短的 URL
    pub u: Option<String>,
    /// 书签工具：关键字
    pub k: Option<String>,
    /// 书签工具：标题
    pub t: Option<String>,
    /// `yourls` 时书签工具返回 JSON
    pub jsonp: Option<String>,
}

impl AdminQuery {
    pub fn bookmarklet_url(&self) -> Option<&str> {
        self.u.as_deref().map(str::trim).filter(|u| !u.is_empty())
    }

    pub fn wants_json(&self) -> bool {
        self.jsonp.as_deref() == Some("yourls")
    }
}

/// 列表中的一行
#[derive(Serialize, Clone, Debug)]
pub struct LinkView {
    pub keyword: String,
    pub short_url: String,
    pub url: String,
    pub title: Option<String>,
    pub timestamp: i64,
    /// 按当前语言格式化的创建时间
    pub date: String,
    pub ip: String,
    pub clicks: i64,
    /// 按当前语言格式化的点击数
    pub clicks_display: String,
}

/// 生效的过滤条件（回显给页面，便于重新填充表单）
#[derive(Serialize, Clone, Debug)]
pub struct AppliedFilters {
    pub search: Option<String>,
    pub search_in: SearchIn,
    pub sort_by: SortBy,
    pub sort_order: SortOrder,
    pub click_limit: Option<i64>,
    pub click_filter: ClickFilter,
    pub date_filter: Option<DateFilter>,
    pub date_first: Option<String>,
    pub date_second: Option<String>,
}

impl From<&FilterDescriptor> for AppliedFilters {
    fn from(d: &FilterDescriptor) -> Self {
        let iso = |date: chrono::NaiveDate| date.format("%Y-%m-%d").to_string();
        Self {
            search: d.search.clone(),
            search_in: d.search_in,
            sort_by: d.sort_by,
            sort_order: d.sort_order,
            click_limit: d.click_limit,
            click_filter: d.click_filter,
            date_filter: d.date_filter,
            date_first: d.date_first.map(iso),
            date_second: d.date_second.map(iso),
        }
    }
}

#[derive(Serialize, Clone, Debug)]
pub struct PaginationInfo {
    pub page: u64,
    pub per_page: u64,
    pub total: u64,
    pub total_pages: u64,
    /// 本页第一条与最后一条的序号（从 1 开始）
    pub first: Option<u64>,
    pub last: Option<u64>,
}

impl From<&Pagination> for PaginationInfo {
    fn from(p: &Pagination) -> Self {
        Self {
            page: p.page,
            per_page: p.per_page,
            total: p.total_items,
            total_pages: p.total_pages,
            first: p.displayed.map(|(first, _)| first),
            last: p.displayed.map(|(_, last)| last),
        }
    }
}

#[derive(Serialize, Clone, Debug)]
pub struct ListingResponse {
    pub links: Vec<LinkView>,
    pub pagination: PaginationInfo,
    pub matching: LinkTotals,
    pub overall: LinkTotals,
    pub filters: AppliedFilters,
    /// 过滤条件的文字描述
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_sentence: Option<String>,
    pub text_direction: &'static str,
}

/// `jsonp=yourls` 时书签工具的响应
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct BookmarkletJson {
    pub short_url: String,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::web::Query;

    fn parse(qs: &str) -> AdminQuery {
        Query::<AdminQuery>::from_query(qs).unwrap().into_inner()
    }

    #[test]
    fn test_admin_query_bookmarklet_detection() {
        let q: AdminQuery =
            parse("u=https%3A%2F%2Fexample.com&k=ex&jsonp=yourls");
        assert_eq!(q.bookmarklet_url(), Some("https://example.com"));
        assert!(q.wants_json());

        let q: AdminQuery = parse("u=%20&jsonp=json");
        assert_eq!(q.bookmarklet_url(), None);
        assert!(!q.wants_json());
    }

    #[test]
    fn test_admin_query_keeps_filter_fields() {
        let q = parse("search=abc&sort_by=clicks&page=2&bogus=1");
        assert_eq!(q.filter.search.as_deref(), Some("abc"));
        assert_eq!(q.filter.sort_by.as_deref(), Some("clicks"));
        assert_eq!(q.filter.page.as_deref(), Some("2"));
    }
}
