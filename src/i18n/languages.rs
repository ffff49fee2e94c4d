use std::path::Path;

use tracing::debug;

/// 列出目录中可用的语言（`<dir>/<locale>.mo`），按名称排序
///
/// 目录不存在或不可读时返回空列表。
pub fn available_languages(dir: impl AsRef<Path>) -> Vec<String> {
    let dir = dir.as_ref();
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            debug!("Cannot list languages in {}: {}", dir.display(), e);
            return Vec::new();
        }
    };

    let mut locales: Vec<String> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .filter(|path| path.extension().is_some_and(|ext| ext == "mo"))
        .filter_map(|path| path.file_stem().and_then(|s| s.to_str()).map(str::to_string))
        .collect();
    locales.sort();
    locales
}
