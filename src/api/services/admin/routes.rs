//! Admin 路由配置

use actix_web::web;

use super::index::admin_index;

/// 管理页路由，挂载在 `admin_prefix` 下
///
/// - GET {prefix} 与 {prefix}/ - 链接列表或书签工具
pub fn admin_routes(prefix: &str) -> actix_web::Scope {
    web::scope(prefix.trim_end_matches('/'))
        .route("", web::get().to(admin_index))
        .route("/", web::get().to(admin_index))
}
