//! URL 验证模块
//!
//! 验证待缩短的 URL，阻止危险协议

use url::Url;

#[derive(Debug, PartialEq, Eq)]
pub enum UrlValidationError {
    EmptyUrl,
    InvalidProtocol(String),
    DangerousProtocol(String),
    InvalidFormat(String),
}

impl std::fmt::Display for UrlValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyUrl => write!(f, "Missing or malformed URL"),
            Self::InvalidProtocol(proto) => write!(
                f,
                "Invalid protocol: {}. Only http:// and https:// are allowed",
                proto
            ),
            Self::DangerousProtocol(proto) => {
                write!(f, "Dangerous protocol blocked: {}", proto)
            }
            Self::InvalidFormat(msg) => write!(f, "Invalid URL format: {}", msg),
        }
    }
}

impl std::error::Error for UrlValidationError {}

const DANGEROUS_PROTOCOLS: &[&str] = &[
    "javascript:",
    "data:",
    "file:",
    "vbscript:",
    "about:",
    "blob:",
];

/// 验证并规范化 URL，返回实际存储的地址
///
/// - 去掉首尾空白
/// - 没有协议时补上 `http://`（`example.com/page`）
/// - 拒绝危险协议与非 http(s) 协议
pub fn normalize_url(url: &str) -> Result<String, UrlValidationError> {
    let url = url.trim();
    if url.is_empty() {
        return Err(UrlValidationError::EmptyUrl);
    }

    let lower = url.to_lowercase();
    if let Some(proto) = DANGEROUS_PROTOCOLS.iter().find(|p| lower.starts_with(**p)) {
        return Err(UrlValidationError::DangerousProtocol(proto.to_string()));
    }

    let candidate = if lower.contains("://") {
        if !lower.starts_with("http://") && !lower.starts_with("https://") {
            let proto = lower
                .split(':')
                .next()
                .map(|s| format!("{}:", s))
                .unwrap_or_default();
            return Err(UrlValidationError::InvalidProtocol(proto));
        }
        url.to_string()
    } else if lower.starts_with("mailto:") || lower.starts_with("tel:") {
        let proto = lower.split(':').next().unwrap_or_default();
        return Err(UrlValidationError::InvalidProtocol(format!("{}:", proto)));
    } else {
        format!("http://{}", url)
    };

    let parsed =
        Url::parse(&candidate).map_err(|e| UrlValidationError::InvalidFormat(e.to_string()))?;
    if parsed.host_str().is_none_or(str::is_empty) {
        return Err(UrlValidationError::InvalidFormat("missing host".to_string()));
    }

    Ok(candidate)
}

/// URL 的主机名，用作默认标题
pub fn url_host(url: &str) -> Option<String> {
    Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_string))
}
