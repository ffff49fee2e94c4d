use serde::{Deserialize, Serialize};

/// 静态配置（从 TOML 加载，启动时使用）
///
/// 包含：
/// - server: 服务器地址、端口、CPU 数量
/// - database: 数据库连接配置
/// - logging: 日志配置
/// - admin: 管理页面（分页、短链前缀、关键字策略）
/// - i18n: 语言、语言包目录、时区
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StaticConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub admin: AdminConfig,
    #[serde(default)]
    pub i18n: I18nConfig,
}

impl StaticConfig {
    /// 从 TOML 文件和环境变量加载配置
    ///
    /// 优先级：ENV > config.toml > 默认值
    /// ENV 前缀：LB，分隔符：__
    /// 示例：LB__SERVER__PORT=9999
    pub fn load(path: Option<&str>) -> Self {
        use config::{Config, Environment, File};

        let path = path.unwrap_or("config.toml");

        let builder = Config::builder()
            // 1. 从 TOML 文件加载（可选）
            .add_source(File::with_name(path).required(false))
            // 2. 从环境变量覆盖，前缀 LB，分隔符 __
            .add_source(
                Environment::with_prefix("LB")
                    .separator("__")
                    .try_parsing(true),
            );

        match builder.build() {
            Ok(settings) => match settings.try_deserialize::<StaticConfig>() {
                Ok(config) => {
                    if std::path::Path::new(path).exists() {
                        eprintln!("[INFO] Configuration loaded from: {}", path);
                    }
                    config
                }
                Err(e) => {
                    eprintln!("[ERROR] Failed to deserialize config: {}", e);
                    Self::default()
                }
            },
            Err(e) => {
                eprintln!("[ERROR] Failed to build config: {}", e);
                Self::default()
            }
        }
    }

    /// 生成示例 TOML 配置文件
    pub fn generate_sample_config() -> String {
        let sample_config = Self::default();
        toml::to_string_pretty(&sample_config)
            .unwrap_or_else(|e| format!("Error generating sample config: {}", e))
    }
}

/// 服务器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_server_host")]
    pub host: String,
    #[serde(default = "default_server_port")]
    pub port: u16,
    #[serde(default = "default_cpu_count")]
    pub cpu_count: usize,
}

/// 数据库连接配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_database_url")]
    pub database_url: String,
    #[serde(default = "default_database_pool_size")]
    pub pool_size: u32,
    #[serde(default = "default_database_timeout")]
    pub timeout: u64,
    #[serde(default = "default_retry_count")]
    pub retry_count: u32,
    #[serde(default = "default_retry_base_delay_ms")]
    pub retry_base_delay_ms: u64,
    #[serde(default = "default_retry_max_delay_ms")]
    pub retry_max_delay_ms: u64,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
    #[serde(default)]
    pub file: Option<String>,
    #[serde(default = "default_max_backups")]
    pub max_backups: u32,
    #[serde(default = "default_enable_rotation")]
    pub enable_rotation: bool,
}

/// 管理页面配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminConfig {
    /// 短链接对外访问的站点地址（不带末尾斜杠）
    #[serde(default = "default_site_url")]
    pub site_url: String,
    #[serde(default = "default_admin_prefix")]
    pub admin_prefix: String,
    /// 列表页默认每页条数
    #[serde(default = "default_per_page")]
    pub per_page: u64,
    /// 同一个 URL 只允许缩短一次
    #[serde(default = "default_unique_urls")]
    pub unique_urls: bool,
    /// 自动生成关键字的长度
    #[serde(default = "default_keyword_length")]
    pub keyword_length: usize,
    #[serde(default = "default_reserved_keywords")]
    pub reserved_keywords: Vec<String>,
}

/// 国际化配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct I18nConfig {
    /// 为空时使用 en_US
    #[serde(default)]
    pub locale: Option<String>,
    #[serde(default = "default_lang_dir")]
    pub lang_dir: String,
    /// IANA 时区名，例如 "Asia/Shanghai"；为空时使用系统本地时区
    #[serde(default)]
    pub timezone: Option<String>,
}

// ============================================================
// Default value functions for static config
// ============================================================

fn default_server_host() -> String {
    "127.0.0.1".to_string()
}

fn default_server_port() -> u16 {
    8080
}

fn default_cpu_count() -> usize {
    num_cpus::get()
}

fn default_database_url() -> String {
    "links.db".to_string()
}

fn default_database_pool_size() -> u32 {
    10
}

fn default_database_timeout() -> u64 {
    30
}

fn default_retry_count() -> u32 {
    3
}

fn default_retry_base_delay_ms() -> u64 {
    100
}

fn default_retry_max_delay_ms() -> u64 {
    2000
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

fn default_max_backups() -> u32 {
    5
}

fn default_enable_rotation() -> bool {
    true
}

fn default_site_url() -> String {
    "http://127.0.0.1:8080".to_string()
}

fn default_admin_prefix() -> String {
    "/admin".to_string()
}

fn default_per_page() -> u64 {
    crate::filter::DEFAULT_PER_PAGE
}

fn default_unique_urls() -> bool {
    true
}

fn default_keyword_length() -> usize {
    6
}

fn default_reserved_keywords() -> Vec<String> {
    ["admin", "api", "health", "static"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_lang_dir() -> String {
    "languages".to_string()
}

// ============================================================
// Default implementations
// ============================================================

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_server_host(),
            port: default_server_port(),
            cpu_count: default_cpu_count(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            database_url: default_database_url(),
            pool_size: default_database_pool_size(),
            timeout: default_database_timeout(),
            retry_count: default_retry_count(),
            retry_base_delay_ms: default_retry_base_delay_ms(),
            retry_max_delay_ms: default_retry_max_delay_ms(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            file: None,
            max_backups: default_max_backups(),
            enable_rotation: default_enable_rotation(),
        }
    }
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            site_url: default_site_url(),
            admin_prefix: default_admin_prefix(),
            per_page: default_per_page(),
            unique_urls: default_unique_urls(),
            keyword_length: default_keyword_length(),
            reserved_keywords: default_reserved_keywords(),
        }
    }
}

impl Default for I18nConfig {
    fn default() -> Self {
        Self {
            locale: None,
            lang_dir: default_lang_dir(),
            timezone: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_admin_config() {
        let config = AdminConfig::default();
        assert_eq!(config.per_page, 50);
        assert!(config.unique_urls);
        assert_eq!(config.keyword_length, 6);
        assert!(config.reserved_keywords.contains(&"admin".to_string()));
    }

    #[test]
    fn test_sample_config_round_trips_through_toml() {
        let sample = StaticConfig::generate_sample_config();
        assert!(sample.contains("[admin]"));
        let parsed: StaticConfig = toml::from_str(&sample).unwrap();
        assert_eq!(parsed.admin.per_page, 50);
        assert_eq!(parsed.i18n.lang_dir, "languages");
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let parsed: StaticConfig = toml::from_str(
            r#"
            [i18n]
            locale = "fr_FR"
            "#,
        )
        .unwrap();
        assert_eq!(parsed.i18n.locale.as_deref(), Some("fr_FR"));
        assert_eq!(parsed.server.port, 8080);
        assert_eq!(parsed.admin.admin_prefix, "/admin");
    }
}
