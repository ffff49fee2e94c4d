//! Mutation operations for SeaOrmStorage
//!
//! This module contains all write database operations.

use async_trait::async_trait;
use sea_orm::{EntityTrait, SqlErr};
use tracing::info;

use super::SeaOrmStorage;
use super::converters::row_to_active_model;
use super::retry;
use crate::errors::{LinkboardError, Result};
use crate::storage::{LinkRepository, LinkRow};

use migration::entities::link;

impl SeaOrmStorage {
    /// 插入新链接；keyword 冲突时返回 `KeywordTaken`，不会覆盖已有记录
    pub async fn insert_link(&self, row: &LinkRow) -> Result<()> {
        let db = &self.db;

        let result = retry::with_retry(
            &format!("insert({})", row.keyword),
            self.retry_config,
            || async { link::Entity::insert(row_to_active_model(row)).exec(db).await },
        )
        .await;

        match result {
            Ok(_) => {
                info!("Link created: {} -> {}", row.keyword, row.url);
                Ok(())
            }
            Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                Err(LinkboardError::keyword_taken(format!(
                    "Short URL {} already exists in database or is reserved",
                    row.keyword
                )))
            }
            Err(e) => Err(LinkboardError::database_operation(format!(
                "插入链接 '{}' 失败: {}",
                row.keyword, e
            ))),
        }
    }
}

#[async_trait]
impl LinkRepository for SeaOrmStorage {
    async fn get(&self, keyword: &str) -> Result<Option<LinkRow>> {
        self.get_link(keyword).await
    }

    async fn find_by_url(&self, url: &str) -> Result<Option<LinkRow>> {
        self.find_link_by_url(url).await
    }

    async fn insert(&self, link: LinkRow) -> Result<()> {
        self.insert_link(&link).await
    }
}
