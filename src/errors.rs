use std::fmt;

use actix_web::http::StatusCode;

#[derive(Debug, Clone)]
pub enum LinkboardError {
    DatabaseConfig(String),
    DatabaseConnection(String),
    DatabaseOperation(String),
    FileOperation(String),
    CatalogLoad(String),
    KeywordTaken(String),
}

impl LinkboardError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            LinkboardError::DatabaseConfig(_) => "E001",
            LinkboardError::DatabaseConnection(_) => "E002",
            LinkboardError::DatabaseOperation(_) => "E003",
            LinkboardError::FileOperation(_) => "E004",
            LinkboardError::CatalogLoad(_) => "E005",
            LinkboardError::KeywordTaken(_) => "E006",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            LinkboardError::DatabaseConfig(_) => "Database Configuration Error",
            LinkboardError::DatabaseConnection(_) => "Database Connection Error",
            LinkboardError::DatabaseOperation(_) => "Database Operation Error",
            LinkboardError::FileOperation(_) => "File Operation Error",
            LinkboardError::CatalogLoad(_) => "Catalog Load Error",
            LinkboardError::KeywordTaken(_) => "Keyword Taken",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> &str {
        match self {
            LinkboardError::DatabaseConfig(msg)
            | LinkboardError::DatabaseConnection(msg)
            | LinkboardError::DatabaseOperation(msg)
            | LinkboardError::FileOperation(msg)
            | LinkboardError::CatalogLoad(msg)
            | LinkboardError::KeywordTaken(msg) => msg,
        }
    }

    /// 映射到 HTTP 状态码
    pub fn http_status(&self) -> StatusCode {
        match self {
            LinkboardError::DatabaseConfig(_) | LinkboardError::DatabaseConnection(_) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            LinkboardError::KeywordTaken(_) => StatusCode::CONFLICT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 格式化为彩色输出（用于 Server 模式）
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        format!(
            "{} {} {}\n  {}",
            "[ERROR]".red().bold(),
            self.code().yellow(),
            self.error_type().red(),
            self.message().white()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for LinkboardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for LinkboardError {}

// 便捷的构造函数
impl LinkboardError {
    pub fn database_config<T: Into<String>>(msg: T) -> Self {
        LinkboardError::DatabaseConfig(msg.into())
    }

    pub fn database_connection<T: Into<String>>(msg: T) -> Self {
        LinkboardError::DatabaseConnection(msg.into())
    }

    pub fn database_operation<T: Into<String>>(msg: T) -> Self {
        LinkboardError::DatabaseOperation(msg.into())
    }

    pub fn file_operation<T: Into<String>>(msg: T) -> Self {
        LinkboardError::FileOperation(msg.into())
    }

    pub fn catalog_load<T: Into<String>>(msg: T) -> Self {
        LinkboardError::CatalogLoad(msg.into())
    }

    pub fn keyword_taken<T: Into<String>>(msg: T) -> Self {
        LinkboardError::KeywordTaken(msg.into())
    }
}

impl From<sea_orm::DbErr> for LinkboardError {
    fn from(err: sea_orm::DbErr) -> Self {
        LinkboardError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for LinkboardError {
    fn from(err: std::io::Error) -> Self {
        LinkboardError::FileOperation(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, LinkboardError>;
