use serde::Serialize;
use tracing::debug;

use crate::errors::Result;
use crate::filter::{FilterDescriptor, Pagination};
use crate::storage::{LinkRow, LinkStore, LinkTotals};

/// 一页列表数据
#[derive(Debug, Clone, Serialize)]
pub struct ListingResult {
    pub rows: Vec<LinkRow>,
    /// 匹配过滤条件的行数与点击数
    pub matching: LinkTotals,
    /// 全表统计
    pub overall: LinkTotals,
    pub pagination: Pagination,
}

/// 统计并取出当前页
pub async fn run_listing(store: &dyn LinkStore, descriptor: &FilterDescriptor) -> Result<ListingResult> {
    let matching = store.count(&descriptor.clauses).await?;
    let overall = if descriptor.is_filtered() {
        store.count(&[]).await?
    } else {
        matching
    };

    let rows = store
        .query(
            &descriptor.clauses,
            descriptor.sort_by,
            descriptor.sort_order,
            descriptor.offset(),
            descriptor.limit(),
        )
        .await?;

    debug!(
        "Listing: {} of {} matching row(s), page {}",
        rows.len(),
        matching.total_links,
        descriptor.window.page
    );

    Ok(ListingResult {
        rows,
        matching,
        overall,
        pagination: Pagination::from_window(descriptor.window, matching.total_links),
    })
}
