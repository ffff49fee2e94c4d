//! 统一 API 错误码定义

use serde_repr::{Deserialize_repr, Serialize_repr};

use crate::errors::LinkboardError;

/// API 错误码枚举
///
/// 使用 serde_repr 序列化为数字，按千位分域：
/// - 0: 成功
/// - 1000-1099: 通用错误
/// - 3000-3099: 链接错误
/// - 4000-4099: 国际化错误
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize_repr, Deserialize_repr)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    // 通用错误 1000-1099
    InternalServerError = 1005,
    ServiceUnavailable = 1030,

    // 链接错误 3000-3099
    LinkAlreadyExists = 3001,
    LinkDatabaseError = 3005,

    // 国际化错误 4000-4099
    CatalogLoadFailed = 4000,
}

impl From<&LinkboardError> for ErrorCode {
    fn from(err: &LinkboardError) -> Self {
        match err {
            LinkboardError::DatabaseConfig(_) | LinkboardError::DatabaseConnection(_) => {
                ErrorCode::ServiceUnavailable
            }
            LinkboardError::DatabaseOperation(_) => ErrorCode::LinkDatabaseError,
            LinkboardError::FileOperation(_) => ErrorCode::InternalServerError,
            LinkboardError::CatalogLoad(_) => ErrorCode::CatalogLoadFailed,
            LinkboardError::KeywordTaken(_) => ErrorCode::LinkAlreadyExists,
        }
    }
}

impl From<LinkboardError> for ErrorCode {
    fn from(err: LinkboardError) -> Self {
        ErrorCode::from(&err)
    }
}
