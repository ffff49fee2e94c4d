//! Pagination window arithmetic

use serde::Serialize;

use super::{DEFAULT_PER_PAGE, MAX_PER_PAGE};

/// 数据库驱动以 i64 绑定 OFFSET
const MAX_OFFSET: u64 = i64::MAX as u64;

/// 解析正整数参数；缺失、非数字或为 0 时返回 None
pub fn parse_positive(input: Option<&str>) -> Option<u64> {
    input
        .and_then(|s| s.trim().parse::<u64>().ok())
        .filter(|n| *n > 0)
}

/// 查询窗口（在总数未知时即可确定）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageWindow {
    pub page: u64,
    pub per_page: u64,
    pub offset: u64,
    pub limit: u64,
}

impl PageWindow {
    /// `page`、`per_page` 为 0 时分别回退到 1 与 `default_per_page`
    ///
    /// `per_page` 不超过 [`MAX_PER_PAGE`]，`offset` 不超过 `i64::MAX`。
    pub fn new(page: u64, per_page: u64, default_per_page: u64) -> Self {
        let page = page.max(1);
        let per_page = if per_page > 0 {
            per_page
        } else if default_per_page > 0 {
            default_per_page
        } else {
            DEFAULT_PER_PAGE
        }
        .min(MAX_PER_PAGE);
        Self {
            page,
            per_page,
            offset: (page - 1).saturating_mul(per_page).min(MAX_OFFSET),
            limit: per_page,
        }
    }
}

/// 完整分页信息
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub page: u64,
    pub per_page: u64,
    pub offset: u64,
    pub limit: u64,
    pub total_items: u64,
    pub total_pages: u64,
    /// 本页展示的条目序号（从 1 开始，闭区间）；超出范围时为 None
    pub displayed: Option<(u64, u64)>,
}

impl Pagination {
    pub fn from_window(window: PageWindow, total_items: u64) -> Self {
        let total_pages = total_items.div_ceil(window.per_page);
        let displayed = (window.offset < total_items).then(|| {
            let last = window.offset.saturating_add(window.per_page).min(total_items);
            (window.offset + 1, last)
        });

        Self {
            page: window.page,
            per_page: window.per_page,
            offset: window.offset,
            limit: window.limit,
            total_items,
            total_pages,
            displayed,
        }
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// 计算分页：page 缺省 1，per_page 缺省 50，不会出现除零
pub fn paginate(page: Option<u64>, per_page: Option<u64>, total_items: u64) -> Pagination {
    let window = PageWindow::new(
        page.unwrap_or(1),
        per_page.unwrap_or(DEFAULT_PER_PAGE),
        DEFAULT_PER_PAGE,
    );
    Pagination::from_window(window, total_items)
}
