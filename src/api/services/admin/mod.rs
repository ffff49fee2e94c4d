//! Admin 服务模块
//!
//! 该模块包含管理页端点：
//! - 过滤、排序、分页的链接列表（JSON）
//! - 书签工具（JSON 或 HTML 确认页）

pub mod error_code;
mod helpers;
mod index;
pub mod routes;
mod types;

// 重新导出类型
pub use types::*;

// 重新导出帮助函数
pub use helpers::{
    bookmarklet_page, error_from_linkboard, error_response, link_view,
    short_url_for, success_response,
};

pub use error_code::ErrorCode;
pub use index::admin_index;
pub use routes::admin_routes;
