//! 管理首页：链接列表 / 书签工具

use std::sync::Arc;

use actix_web::{HttpRequest, Responder, Result as ActixResult, web};
use tracing::{error, info};

use crate::config::get_config;
use crate::filter::{FilterDescriptor, FilterRequest, ListingMode};
use crate::i18n::CatalogRegistry;
use crate::services::{CreateLinkRequest, LinkCreator, run_bookmarklet, run_listing};
use crate::storage::LinkStore;
use crate::utils::ip::client_ip;

use super::helpers::{bookmarklet_page, error_from_linkboard, html_response, link_view};
use super::types::{
    AdminQuery, AppliedFilters, BookmarkletJson, ListingResponse, PaginationInfo,
};

fn non_empty(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// GET {admin_prefix}/
///
/// `u` 存在时创建链接（书签工具），否则返回过滤后的链接列表。
pub async fn admin_index(
    req: HttpRequest,
    query: web::Query<AdminQuery>,
    store: web::Data<Arc<dyn LinkStore>>,
    creator: web::Data<Arc<dyn LinkCreator>>,
    i18n: web::Data<Arc<CatalogRegistry>>,
) -> ActixResult<impl Responder> {
    let query = query.into_inner();

    if let Some(url) = query.bookmarklet_url() {
        let request = CreateLinkRequest {
            url: url.to_string(),
            keyword: non_empty(&query.k),
            title: non_empty(&query.t),
            ip: client_ip(&req),
        };
        info!("Admin API: bookmarklet request for {}", request.url);
        return Ok(bookmarklet(
            request,
            query.wants_json(),
            &query.filter,
            store.get_ref().as_ref(),
            creator.get_ref().as_ref(),
            &i18n,
        )
        .await);
    }

    Ok(listing(&query.filter, store.get_ref().as_ref(), &i18n).await)
}

async fn listing(
    filter: &FilterRequest,
    store: &dyn LinkStore,
    i18n: &CatalogRegistry,
) -> actix_web::HttpResponse {
    let config = get_config();
    let descriptor = FilterDescriptor::build(filter, ListingMode::Listing, config.admin.per_page);

    match run_listing(store, &descriptor).await {
        Ok(result) => {
            let links = result
                .rows
                .iter()
                .map(|row| link_view(row, &config.admin.site_url, i18n))
                .collect();
            super::helpers::success_response(ListingResponse {
                links,
                pagination: PaginationInfo::from(&result.pagination),
                matching: result.matching,
                overall: result.overall,
                filters: AppliedFilters::from(&descriptor),
                search_sentence: descriptor.search_sentence(i18n),
                text_direction: i18n.text_direction(),
            })
        }
        Err(e) => {
            error!("Admin API: failed to list links: {}", e);
            error_from_linkboard(&e)
        }
    }
}

async fn bookmarklet(
    request: CreateLinkRequest,
    wants_json: bool,
    filter: &FilterRequest,
    store: &dyn LinkStore,
    creator: &dyn LinkCreator,
    i18n: &CatalogRegistry,
) -> actix_web::HttpResponse {
    let result = run_bookmarklet(creator, request).await;

    if wants_json {
        return actix_web::HttpResponse::Ok()
            .content_type("application/json")
            .json(BookmarkletJson {
                short_url: result.short_url.clone().unwrap_or_default(),
                message: result.message,
            });
    }

    // 确认页只展示最新的一行
    let config = get_config();
    let descriptor = FilterDescriptor::build(filter, ListingMode::Bookmarklet, 1);
    let latest = match run_listing(store, &descriptor).await {
        Ok(listing) => listing
            .rows
            .first()
            .map(|row| link_view(row, &config.admin.site_url, i18n)),
        Err(e) => {
            error!("Admin API: failed to load the latest link: {}", e);
            None
        }
    };

    html_response(bookmarklet_page(&result, latest.as_ref(), i18n))
}
