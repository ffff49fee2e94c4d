use tracing::info;

use super::link_service::{CreateLinkRequest, CreationResult, LinkCreator};

/// 书签工具创建链接
///
/// 关键字冲突时清空关键字自动重试一次，并把第一次的失败信息附加在结果消息后。
/// 标题在重试时保留。
pub async fn run_bookmarklet(
    creator: &dyn LinkCreator,
    request: CreateLinkRequest,
) -> CreationResult {
    let first = creator.create(request.clone()).await;
    if !first.is_keyword_conflict() {
        return first;
    }

    info!(
        "Keyword {:?} unavailable, retrying with a random keyword",
        request.keyword
    );
    let retry = CreateLinkRequest {
        keyword: None,
        ..request
    };
    let mut result = creator.create(retry).await;
    result.message = format!("{} ({})", result.message, first.message);
    result
}
