use async_trait::async_trait;

use crate::errors::Result;
use crate::filter::{Clause, SortBy, SortOrder};
use crate::storage::models::{LinkRow, LinkTotals};

/// 列表页使用的只读查询接口
///
/// 多个子句之间为 AND 关系，子句的值一律作为绑定参数传给数据库。
#[async_trait]
pub trait LinkStore: Send + Sync {
    async fn count(&self, clauses: &[Clause]) -> Result<LinkTotals>;

    /// 按 `(sort_by, sort_order)` 排序，同值时按 keyword 升序
    async fn query(
        &self,
        clauses: &[Clause],
        sort_by: SortBy,
        sort_order: SortOrder,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<LinkRow>>;
}

/// 链接创建使用的读写接口
#[async_trait]
pub trait LinkRepository: Send + Sync {
    async fn get(&self, keyword: &str) -> Result<Option<LinkRow>>;

    /// 最早创建的一条
    async fn find_by_url(&self, url: &str) -> Result<Option<LinkRow>>;

    /// keyword 已存在时返回 `KeywordTaken`
    async fn insert(&self, link: LinkRow) -> Result<()>;
}
