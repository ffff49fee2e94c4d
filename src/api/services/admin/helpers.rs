//! Admin API 帮助函数

use actix_web::HttpResponse;
use actix_web::http::StatusCode;
use serde::Serialize;

use crate::errors::LinkboardError;
use crate::i18n::{CatalogRegistry, DEFAULT_DOMAIN};
use crate::services::CreationResult;
use crate::storage::LinkRow;
use crate::utils::escape_html;

use super::error_code::ErrorCode;
use super::types::{ApiResponse, LinkView};

/// 列表中日期列的格式
pub const DATE_DISPLAY_MASK: &str = "M d, Y H:i";

/// 构建 JSON 响应
pub fn json_response<T: Serialize>(
    status: StatusCode,
    code: ErrorCode,
    message: impl Into<String>,
    data: Option<T>,
) -> HttpResponse {
    HttpResponse::build(status)
        .append_header(("Content-Type", "application/json; charset=utf-8"))
        .json(ApiResponse {
            code: code as i32,
            message: message.into(),
            data,
        })
}

/// 构建成功响应
pub fn success_response<T: Serialize>(data: T) -> HttpResponse {
    json_response(StatusCode::OK, ErrorCode::Success, "OK", Some(data))
}

/// 构建错误响应
pub fn error_response(status: StatusCode, error_code: ErrorCode, message: &str) -> HttpResponse {
    json_response::<()>(status, error_code, message, None)
}

/// 从 LinkboardError 构建错误响应（自动映射 HTTP 状态码和 ErrorCode）
pub fn error_from_linkboard(err: &LinkboardError) -> HttpResponse {
    error_response(err.http_status(), ErrorCode::from(err), err.message())
}

/// 短链接完整地址
pub fn short_url_for(site_url: &str, keyword: &str) -> String {
    format!("{}/{}", site_url.trim_end_matches('/'), keyword)
}

/// 数据库行 → 列表行，日期与点击数按当前语言格式化
pub fn link_view(row: &LinkRow, site_url: &str, i18n: &CatalogRegistry) -> LinkView {
    let timestamp = row.timestamp.timestamp();
    LinkView {
        keyword: row.keyword.clone(),
        short_url: short_url_for(site_url, &row.keyword),
        url: row.url.clone(),
        title: row.title.clone(),
        timestamp,
        date: i18n.format_date(DATE_DISPLAY_MASK, Some(timestamp), false),
        ip: row.ip.clone(),
        clicks: row.clicks,
        clicks_display: i18n.format_number(row.clicks as f64, 0),
    }
}

/// 书签工具的 HTML 确认页
///
/// 所有动态内容都经过 HTML 转义。
pub fn bookmarklet_page(
    result: &CreationResult,
    latest: Option<&LinkView>,
    i18n: &CatalogRegistry,
) -> String {
    let t = |text: &str| escape_html(&i18n.translate(text, DEFAULT_DOMAIN));

    let mut body = String::new();
    body.push_str(&format!(
        "<p class=\"{}\">{}</p>\n",
        if result.is_ok() { "success" } else { "error" },
        escape_html(&result.message)
    ));

    if let Some(short_url) = result.short_url.as_deref() {
        let short_url = escape_html(short_url);
        body.push_str(&format!(
            "<p>{}: <a href=\"{short_url}\">{short_url}</a></p>\n",
            t("Short URL")
        ));
    }
    if !result.url.is_empty() {
        body.push_str(&format!(
            "<p>{}: {}</p>\n",
            t("Long URL"),
            escape_html(&result.url)
        ));
    }

    if let Some(view) = latest {
        body.push_str(&format!(
            "<table>\n<tr><th>{}</th><th>{}</th><th>{}</th><th>{}</th><th>{}</th><th>{}</th></tr>\n",
            t("Short URL"),
            t("Original URL"),
            t("Title"),
            t("Date"),
            t("IP"),
            t("Clicks"),
        ));
        body.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n</table>\n",
            escape_html(&view.keyword),
            escape_html(&view.url),
            escape_html(view.title.as_deref().unwrap_or("")),
            escape_html(&view.date),
            escape_html(&view.ip),
            escape_html(&view.clicks_display),
        ));
    }

    format!(
        "<!DOCTYPE html>\n<html dir=\"{}\" lang=\"{}\">\n<head><meta charset=\"utf-8\"><title>{}</title></head>\n<body>\n{}</body>\n</html>\n",
        i18n.text_direction(),
        escape_html(&i18n.locale().replace('_', "-")),
        t("Add New Link"),
        body
    )
}

/// 构建 HTML 响应
pub fn html_response(html: String) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(html)
}
