use sea_orm_migration::prelude::*;

use crate::m20260301_000001_links_table::Link;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 默认排序列：创建时间
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_links_timestamp")
                    .table(Link::Table)
                    .col(Link::Timestamp)
                    .to_owned(),
            )
            .await?;

        // 点击数过滤 / 排序
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_links_clicks")
                    .table(Link::Table)
                    .col(Link::Clicks)
                    .to_owned(),
            )
            .await?;

        // 按 IP 搜索
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_links_ip")
                    .table(Link::Table)
                    .col(Link::Ip)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for name in ["idx_links_ip", "idx_links_clicks", "idx_links_timestamp"] {
            manager
                .drop_index(Index::drop().name(name).table(Link::Table).to_owned())
                .await?;
        }
        Ok(())
    }
}
