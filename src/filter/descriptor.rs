//! Raw request → validated filter descriptor

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::clause::{
    Clause, build_click_clause, build_date_clause, build_search_clause, parse_filter_date,
};
use super::pagination::{PageWindow, parse_positive};
use super::params::{ClickFilter, DateFilter, SearchIn, SortBy, SortOrder, normalize_enum};
use crate::i18n::{CatalogRegistry, DEFAULT_DOMAIN, sprintf};

/// 管理页面的原始查询参数，全部按字符串接收以保证宽松解析
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilterRequest {
    pub search: Option<String>,
    pub search_in: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
    pub page: Option<String>,
    pub perpage: Option<String>,
    pub click_limit: Option<String>,
    pub click_filter: Option<String>,
    pub date_filter: Option<String>,
    pub date_first: Option<String>,
    pub date_second: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ListingMode {
    Listing,
    /// 书签工具创建链接后只展示一行
    Bookmarklet,
}

/// 校验后的过滤描述
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterDescriptor {
    pub mode: ListingMode,
    pub search: Option<String>,
    pub search_in: SearchIn,
    pub sort_by: SortBy,
    pub sort_order: SortOrder,
    pub click_limit: Option<i64>,
    pub click_filter: ClickFilter,
    pub date_filter: Option<DateFilter>,
    pub date_first: Option<NaiveDate>,
    pub date_second: Option<NaiveDate>,
    pub clauses: Vec<Clause>,
    pub window: PageWindow,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

impl FilterDescriptor {
    pub fn build(request: &FilterRequest, mode: ListingMode, default_per_page: u64) -> Self {
        let search = non_empty(&request.search);
        let search_in = normalize_enum(request.search_in.as_deref(), SearchIn::default());
        let sort_by = normalize_enum(request.sort_by.as_deref(), SortBy::default());
        let sort_order = normalize_enum(request.sort_order.as_deref(), SortOrder::default());
        let click_filter = normalize_enum(request.click_filter.as_deref(), ClickFilter::default());
        let date_filter = DateFilter::parse(request.date_filter.as_deref());

        let mut clauses = Vec::new();

        if let Some(clause) = build_search_clause(search, search_in) {
            clauses.push(clause);
        }

        let click_clause = build_click_clause(request.click_limit.as_deref(), click_filter);
        let click_limit = click_clause.as_ref().and_then(|c| match c.value {
            super::ClauseValue::Integer(n) => Some(n),
            _ => None,
        });
        clauses.extend(click_clause);

        let date_clause = build_date_clause(
            date_filter,
            request.date_first.as_deref(),
            request.date_second.as_deref(),
        );
        // 只有成功生成子句时才保留日期信息，保证展示与实际过滤一致
        let (date_filter, date_first, date_second) = match date_clause {
            Some(clause) => {
                clauses.push(clause);
                let first = request.date_first.as_deref().and_then(parse_filter_date);
                let second = match date_filter {
                    Some(DateFilter::Between) => {
                        request.date_second.as_deref().and_then(parse_filter_date)
                    }
                    _ => None,
                };
                (date_filter, first, second)
            }
            None => (None, None, None),
        };

        let window = match mode {
            ListingMode::Listing => PageWindow::new(
                parse_positive(request.page.as_deref()).unwrap_or(1),
                parse_positive(request.perpage.as_deref()).unwrap_or(0),
                default_per_page,
            ),
            ListingMode::Bookmarklet => PageWindow::new(1, 1, 1),
        };

        Self {
            mode,
            search: search.map(str::to_string),
            search_in,
            sort_by,
            sort_order,
            click_limit,
            click_filter,
            date_filter,
            date_first,
            date_second,
            clauses,
            window,
        }
    }

    pub fn offset(&self) -> u64 {
        self.window.offset
    }

    pub fn limit(&self) -> u64 {
        self.window.limit
    }

    pub fn is_filtered(&self) -> bool {
        !self.clauses.is_empty()
    }

    /// 当前过滤条件的人类可读描述（仅用于展示）
    pub fn search_sentence(&self, i18n: &CatalogRegistry) -> Option<String> {
        let mut parts = Vec::new();

        if let Some(search) = &self.search {
            let column = i18n.translate(self.search_in.label(), DEFAULT_DOMAIN);
            parts.push(sprintf(
                &i18n.translate("Searching for \"%1$s\" in %2$s.", DEFAULT_DOMAIN),
                &[search.as_str(), column.as_str()],
            ));
        }

        if let Some(limit) = self.click_limit {
            let direction = match self.click_filter {
                ClickFilter::More => i18n.translate_with_context("more", "click filter", DEFAULT_DOMAIN),
                ClickFilter::Less => i18n.translate_with_context("less", "click filter", DEFAULT_DOMAIN),
            };
            let template = i18n.translate_plural(
                "Links with %1$s than %2$s click.",
                "Links with %1$s than %2$s clicks.",
                limit.unsigned_abs(),
                None,
                DEFAULT_DOMAIN,
            );
            parts.push(sprintf(&template, &[direction.as_str(), &limit.to_string()]));
        }

        let fmt_date = |d: NaiveDate| d.format("%Y-%m-%d").to_string();
        match (self.date_filter, self.date_first, self.date_second) {
            (Some(DateFilter::Before), Some(first), _) => parts.push(sprintf(
                &i18n.translate("Links created before %s.", DEFAULT_DOMAIN),
                &[&fmt_date(first)],
            )),
            (Some(DateFilter::After), Some(first), _) => parts.push(sprintf(
                &i18n.translate("Links created after %s.", DEFAULT_DOMAIN),
                &[&fmt_date(first)],
            )),
            (Some(DateFilter::Between), Some(first), Some(second)) => parts.push(sprintf(
                &i18n.translate("Links created between %1$s and %2$s.", DEFAULT_DOMAIN),
                &[&fmt_date(first), &fmt_date(second)],
            )),
            _ => {}
        }

        (!parts.is_empty()).then(|| parts.join(" "))
    }
}
