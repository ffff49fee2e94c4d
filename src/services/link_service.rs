//! Link creation service
//!
//! Validates the URL and keyword, picks a random keyword when none is
//! given and inserts the row. Failures are reported in the result (status
//! `fail` plus a machine code) instead of as errors, which is what the
//! bookmarklet retry and the JSON response need.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::config::AdminConfig;
use crate::errors::LinkboardError;
use crate::i18n::{CatalogRegistry, DEFAULT_DOMAIN, sprintf};
use crate::storage::{LinkRepository, LinkRow};
use crate::utils::url_validator::{normalize_url, url_host};
use crate::utils::{generate_keyword, sanitize_keyword};

/// 关键字已被占用或为保留字
pub const CODE_KEYWORD_TAKEN: &str = "error:keyword";
/// `unique_urls` 模式下 URL 已存在
pub const CODE_URL_EXISTS: &str = "error:url";
/// URL 缺失或格式错误
pub const CODE_NO_URL: &str = "error:nourl";
/// 数据库写入失败
pub const CODE_DATABASE: &str = "error:db";

/// 随机关键字最多尝试次数
const MAX_KEYWORD_ATTEMPTS: usize = 10;

#[derive(Debug, Clone, Default)]
pub struct CreateLinkRequest {
    pub url: String,
    /// 为空时自动生成
    pub keyword: Option<String>,
    /// 为空时使用 URL 的主机名
    pub title: Option<String>,
    pub ip: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CreationStatus {
    Ok,
    Fail,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreationResult {
    pub status: CreationStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    pub message: String,
    /// 新建的行；`error:url` 时为已存在的行
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<LinkRow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_url: Option<String>,
    /// 规范化后的 URL
    pub url: String,
}

impl CreationResult {
    fn fail(code: &str, message: String, url: String) -> Self {
        Self {
            status: CreationStatus::Fail,
            code: Some(code.to_string()),
            message,
            link: None,
            short_url: None,
            url,
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == CreationStatus::Ok
    }

    pub fn is_keyword_conflict(&self) -> bool {
        self.status == CreationStatus::Fail && self.code.as_deref() == Some(CODE_KEYWORD_TAKEN)
    }
}

/// 书签工具依赖的创建接口
#[async_trait]
pub trait LinkCreator: Send + Sync {
    async fn create(&self, request: CreateLinkRequest) -> CreationResult;
}

pub struct LinkService {
    repository: Arc<dyn LinkRepository>,
    admin: AdminConfig,
    i18n: Arc<CatalogRegistry>,
}

impl LinkService {
    pub fn new(
        repository: Arc<dyn LinkRepository>,
        admin: AdminConfig,
        i18n: Arc<CatalogRegistry>,
    ) -> Self {
        Self {
            repository,
            admin,
            i18n,
        }
    }

    pub fn short_url(&self, keyword: &str) -> String {
        format!("{}/{}", self.admin.site_url.trim_end_matches('/'), keyword)
    }

    /// 配置的保留字与管理页前缀，忽略大小写
    pub fn is_reserved(&self, keyword: &str) -> bool {
        let prefix = self.admin.admin_prefix.trim_matches('/');
        keyword.eq_ignore_ascii_case(prefix)
            || self
                .admin
                .reserved_keywords
                .iter()
                .any(|reserved| keyword.eq_ignore_ascii_case(reserved))
    }

    fn t(&self, text: &str) -> String {
        self.i18n.translate(text, DEFAULT_DOMAIN)
    }

    fn keyword_taken(&self, keyword: &str, url: String) -> CreationResult {
        CreationResult::fail(
            CODE_KEYWORD_TAKEN,
            sprintf(
                &self.t("Short URL %s already exists in database or is reserved"),
                &[keyword],
            ),
            url,
        )
    }

    async fn is_free(&self, keyword: &str) -> Result<bool, LinkboardError> {
        if self.is_reserved(keyword) {
            return Ok(false);
        }
        Ok(self.repository.get(keyword).await?.is_none())
    }

    async fn random_free_keyword(&self) -> Result<Option<String>, LinkboardError> {
        for _ in 0..MAX_KEYWORD_ATTEMPTS {
            let candidate = generate_keyword(self.admin.keyword_length);
            if self.is_free(&candidate).await? {
                return Ok(Some(candidate));
            }
        }
        Ok(None)
    }

    fn database_failure(&self, e: LinkboardError, url: String) -> CreationResult {
        error!("Link creation failed: {}", e);
        CreationResult::fail(
            CODE_DATABASE,
            sprintf(&self.t("Error saving url to database: %s"), &[e.message()]),
            url,
        )
    }

    pub async fn create_link(&self, request: CreateLinkRequest) -> CreationResult {
        let url = match normalize_url(&request.url) {
            Ok(url) => url,
            Err(e) => {
                warn!("Rejected URL '{}': {}", request.url, e);
                return CreationResult::fail(
                    CODE_NO_URL,
                    self.t("Missing or malformed URL"),
                    request.url.trim().to_string(),
                );
            }
        };

        if self.admin.unique_urls {
            match self.repository.find_by_url(&url).await {
                Ok(Some(existing)) => {
                    let mut result = CreationResult::fail(
                        CODE_URL_EXISTS,
                        sprintf(&self.t("%s already exists in database"), &[&url]),
                        url,
                    );
                    result.short_url = Some(self.short_url(&existing.keyword));
                    result.link = Some(existing);
                    return result;
                }
                Ok(None) => {}
                Err(e) => return self.database_failure(e, url),
            }
        }

        let requested = request
            .keyword
            .as_deref()
            .map(sanitize_keyword)
            .filter(|k| !k.is_empty());

        let keyword = match requested {
            Some(keyword) => match self.is_free(&keyword).await {
                Ok(true) => keyword,
                Ok(false) => return self.keyword_taken(&keyword, url),
                Err(e) => return self.database_failure(e, url),
            },
            None => match self.random_free_keyword().await {
                Ok(Some(keyword)) => keyword,
                Ok(None) => {
                    return CreationResult::fail(
                        CODE_KEYWORD_TAKEN,
                        self.t("Could not find a free random keyword"),
                        url,
                    );
                }
                Err(e) => return self.database_failure(e, url),
            },
        };

        let title = request
            .title
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .or_else(|| url_host(&url));

        let row = LinkRow {
            keyword: keyword.clone(),
            url: url.clone(),
            title,
            timestamp: Utc::now(),
            ip: request.ip,
            clicks: 0,
        };

        match self.repository.insert(row.clone()).await {
            Ok(()) => {
                info!("LinkService: created '{}' -> '{}'", keyword, url);
                CreationResult {
                    status: CreationStatus::Ok,
                    code: None,
                    message: sprintf(&self.t("%s added to database"), &[&url]),
                    link: Some(row),
                    short_url: Some(self.short_url(&keyword)),
                    url,
                }
            }
            // 检查与插入之间被并发请求抢占
            Err(LinkboardError::KeywordTaken(_)) => self.keyword_taken(&keyword, url),
            Err(e) => self.database_failure(e, url),
        }
    }
}

#[async_trait]
impl LinkCreator for LinkService {
    async fn create(&self, request: CreateLinkRequest) -> CreationResult {
        self.create_link(request).await
    }
}
