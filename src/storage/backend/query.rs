//! Query operations for SeaOrmStorage
//!
//! This module contains all read-only database operations.

use async_trait::async_trait;
use sea_orm::{
    ColumnTrait, Condition, EntityTrait, FromQueryResult, Order, QueryFilter, QueryOrder,
    QuerySelect,
};
use tracing::{debug, error};

use super::condition::{build_condition, sort_column};
use super::converters::model_to_row;
use super::{SeaOrmStorage, retry};
use crate::errors::{LinkboardError, Result};
use crate::filter::{Clause, SortBy, SortOrder};
use crate::storage::{LinkRow, LinkStore, LinkTotals};

use migration::entities::link;

/// 用于统计查询的结果结构体（DSL 聚合查询）
#[derive(Debug, FromQueryResult)]
struct TotalsResult {
    total_links: i64,
    total_clicks: Option<i64>,
}

impl From<TotalsResult> for LinkTotals {
    fn from(result: TotalsResult) -> Self {
        LinkTotals {
            total_links: result.total_links.max(0) as u64,
            total_clicks: result.total_clicks.unwrap_or(0).max(0) as u64,
        }
    }
}

impl SeaOrmStorage {
    pub async fn get_link(&self, keyword: &str) -> Result<Option<LinkRow>> {
        let db = &self.db;
        let keyword_owned = keyword.to_string();

        let model = retry::with_retry(&format!("get({})", keyword), self.retry_config, || async {
            link::Entity::find_by_id(keyword_owned.clone()).one(db).await
        })
        .await
        .map_err(|e| LinkboardError::database_operation(format!("查询链接失败: {}", e)))?;

        Ok(model.map(model_to_row))
    }

    pub async fn find_link_by_url(&self, url: &str) -> Result<Option<LinkRow>> {
        let db = &self.db;

        let model = retry::with_retry("find_by_url", self.retry_config, || async {
            link::Entity::find()
                .filter(link::Column::Url.eq(url))
                .order_by_asc(link::Column::Timestamp)
                .one(db)
                .await
        })
        .await
        .map_err(|e| LinkboardError::database_operation(format!("按 URL 查询失败: {}", e)))?;

        Ok(model.map(model_to_row))
    }

    /// COUNT(*) 与 SUM(clicks)
    async fn totals(&self, condition: Condition, operation: &str) -> Result<LinkTotals> {
        let db = &self.db;

        let result = retry::with_retry(operation, self.retry_config, || async {
            link::Entity::find()
                .select_only()
                .column_as(link::Column::Keyword.count(), "total_links")
                .column_as(link::Column::Clicks.sum(), "total_clicks")
                .filter(condition.clone())
                .into_model::<TotalsResult>()
                .one(db)
                .await
        })
        .await;

        match result {
            Ok(Some(totals)) => Ok(totals.into()),
            Ok(None) => {
                error!("统计查询返回空结果");
                Ok(LinkTotals::default())
            }
            Err(e) => Err(LinkboardError::database_operation(format!(
                "统计查询失败: {}",
                e
            ))),
        }
    }
}

#[async_trait]
impl LinkStore for SeaOrmStorage {
    async fn count(&self, clauses: &[Clause]) -> Result<LinkTotals> {
        self.totals(build_condition(clauses), "count").await
    }

    async fn query(
        &self,
        clauses: &[Clause],
        sort_by: SortBy,
        sort_order: SortOrder,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<LinkRow>> {
        let db = &self.db;
        let condition = build_condition(clauses);
        let order = match sort_order {
            SortOrder::Asc => Order::Asc,
            SortOrder::Desc => Order::Desc,
        };
        debug!(
            "query: {} clause(s), sort {} {}, offset {}, limit {}",
            clauses.len(),
            sort_by,
            sort_order,
            offset,
            limit
        );

        let models = retry::with_retry("query", self.retry_config, || async {
            link::Entity::find()
                .filter(condition.clone())
                .order_by(sort_column(sort_by), order.clone())
                .order_by_asc(link::Column::Keyword)
                .offset(offset)
                .limit(limit)
                .all(db)
                .await
        })
        .await
        .map_err(|e| LinkboardError::database_operation(format!("分页查询失败: {}", e)))?;

        Ok(models.into_iter().map(model_to_row).collect())
    }
}
