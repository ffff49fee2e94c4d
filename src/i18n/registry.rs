//! Domain-scoped translation catalogs

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use gettext::Catalog;
use parking_lot::RwLock;
use tracing::{debug, info, warn};

use super::locale::LocaleTable;
use super::{DEFAULT_DOMAIN, DEFAULT_LOCALE};
use crate::config::I18nConfig;
use crate::errors::{LinkboardError, Result};

/// gettext 在找不到翻译时原样返回传入的切片，用指针比较区分"未翻译"
fn found<'a>(result: &'a str, keys: &[&str]) -> Option<&'a str> {
    if keys.iter().any(|key| std::ptr::eq(result, *key)) {
        None
    } else {
        Some(result)
    }
}

/// 一个文本域下按加载顺序排列的目录；先加载的优先
#[derive(Default)]
struct DomainCatalogs {
    layers: Vec<Catalog>,
}

impl DomainCatalogs {
    fn gettext<'a>(&'a self, text: &'a str) -> Option<&'a str> {
        self.layers
            .iter()
            .find_map(|layer| found(layer.gettext(text), &[text]))
    }

    fn pgettext<'a>(&'a self, context: &'a str, text: &'a str) -> Option<&'a str> {
        self.layers
            .iter()
            .find_map(|layer| found(layer.pgettext(context, text), &[text]))
    }

    fn ngettext<'a>(
        &'a self,
        singular: &'a str,
        plural: &'a str,
        count: u64,
        context: Option<&'a str>,
    ) -> Option<&'a str> {
        self.layers.iter().find_map(|layer| {
            let result = match context {
                Some(ctx) => layer.npgettext(ctx, singular, plural, count),
                None => layer.ngettext(singular, plural, count),
            };
            found(result, &[singular, plural])
        })
    }
}

/// Translation catalog registry
///
/// Owns the `domain → catalogs` map and the resolved locale. Handlers get
/// it through `web::Data`, tests build their own, so nothing leaks between
/// test cases.
///
/// Catalogs loaded into a domain that already has one are layered behind
/// it: on a key present in both, the earlier catalog answers.
pub struct CatalogRegistry {
    domains: RwLock<HashMap<String, DomainCatalogs>>,
    configured_locale: Option<String>,
    locale: RwLock<Option<String>>,
    lang_dir: PathBuf,
    timezone: Option<chrono_tz::Tz>,
    table: RwLock<Option<Arc<LocaleTable>>>,
}

impl Default for CatalogRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogRegistry {
    /// 空注册表：en_US，无目录，系统本地时区
    pub fn new() -> Self {
        Self {
            domains: RwLock::new(HashMap::new()),
            configured_locale: None,
            locale: RwLock::new(None),
            lang_dir: PathBuf::from("languages"),
            timezone: None,
            table: RwLock::new(None),
        }
    }

    pub fn from_config(config: &I18nConfig) -> Self {
        let timezone = config.timezone.as_deref().and_then(|name| {
            match name.parse::<chrono_tz::Tz>() {
                Ok(tz) => Some(tz),
                Err(e) => {
                    warn!("Ignoring unknown timezone '{}': {}", name, e);
                    None
                }
            }
        });

        Self {
            configured_locale: config
                .locale
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
            lang_dir: PathBuf::from(&config.lang_dir),
            timezone,
            ..Self::new()
        }
    }

    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.configured_locale = Some(locale.into());
        self
    }

    pub fn with_timezone(mut self, timezone: chrono_tz::Tz) -> Self {
        self.timezone = Some(timezone);
        self
    }

    /// 当前语言；首次解析后缓存
    pub fn locale(&self) -> String {
        if let Some(locale) = self.locale.read().as_ref() {
            return locale.clone();
        }
        let mut cached = self.locale.write();
        cached
            .get_or_insert_with(|| {
                let resolved = self
                    .configured_locale
                    .clone()
                    .unwrap_or_else(|| DEFAULT_LOCALE.to_string());
                debug!("Resolved locale: {}", resolved);
                resolved
            })
            .clone()
    }

    /// 切换语言；已加载的目录保持不变，调用方自行重新加载
    pub fn set_locale(&self, locale: &str) {
        *self.locale.write() = Some(locale.to_string());
        self.invalidate_table();
    }

    pub fn lang_dir(&self) -> &Path {
        &self.lang_dir
    }

    pub fn timezone(&self) -> Option<chrono_tz::Tz> {
        self.timezone
    }

    // ========== lookups ==========

    pub fn translate(&self, text: &str, domain: &str) -> String {
        let domains = self.domains.read();
        domains
            .get(domain)
            .and_then(|catalogs| catalogs.gettext(text))
            .unwrap_or(text)
            .to_string()
    }

    pub fn translate_with_context(&self, text: &str, context: &str, domain: &str) -> String {
        let domains = self.domains.read();
        domains
            .get(domain)
            .and_then(|catalogs| catalogs.pgettext(context, text))
            .unwrap_or(text)
            .to_string()
    }

    /// 复数形式由目录自身的 Plural-Forms 规则选择；无目录或无翻译时按 `count == 1`
    pub fn translate_plural(
        &self,
        singular: &str,
        plural: &str,
        count: u64,
        context: Option<&str>,
        domain: &str,
    ) -> String {
        let domains = self.domains.read();
        domains
            .get(domain)
            .and_then(|catalogs| catalogs.ngettext(singular, plural, count, context))
            .unwrap_or(if count == 1 { singular } else { plural })
            .to_string()
    }

    // ========== catalog lifecycle ==========

    /// 从文件加载目录；失败时记录日志并返回 false
    pub fn load_catalog(&self, domain: &str, path: impl AsRef<Path>) -> bool {
        match self.try_load_catalog(domain, path.as_ref()) {
            Ok(()) => true,
            Err(e) => {
                warn!("{}", e);
                false
            }
        }
    }

    pub fn try_load_catalog(&self, domain: &str, path: &Path) -> Result<()> {
        let file = File::open(path).map_err(|e| {
            LinkboardError::catalog_load(format!("Cannot open {}: {}", path.display(), e))
        })?;
        self.install(domain, BufReader::new(file), &path.display().to_string())
    }

    /// 从内存中的 `.mo` 数据加载目录
    pub fn load_catalog_bytes(&self, domain: &str, bytes: &[u8]) -> bool {
        match self.install(domain, bytes, "<memory>") {
            Ok(()) => true,
            Err(e) => {
                warn!("{}", e);
                false
            }
        }
    }

    fn install<R: Read>(&self, domain: &str, reader: R, source: &str) -> Result<()> {
        let catalog = Catalog::parse(reader).map_err(|e| {
            LinkboardError::catalog_load(format!("Malformed catalog {}: {}", source, e))
        })?;

        let layers = {
            let mut domains = self.domains.write();
            let entry = domains.entry(domain.to_string()).or_default();
            entry.layers.push(catalog);
            entry.layers.len()
        };
        self.invalidate_table();

        if layers > 1 {
            info!(
                "Merged catalog {} into domain '{}' ({} layers)",
                source, domain, layers
            );
        } else {
            info!("Loaded catalog {} for domain '{}'", source, domain);
        }
        Ok(())
    }

    /// 卸载文本域；返回之前是否已加载
    pub fn unload_catalog(&self, domain: &str) -> bool {
        let removed = self.domains.write().remove(domain).is_some();
        if removed {
            self.invalidate_table();
            debug!("Unloaded domain '{}'", domain);
        }
        removed
    }

    pub fn is_loaded(&self, domain: &str) -> bool {
        self.domains.read().contains_key(domain)
    }

    /// 加载 `<lang_dir>/<locale>.mo` 到 default 文本域
    ///
    /// en_US 没有目录文件是正常情况，不记录警告。
    pub fn load_default_textdomain(&self) -> bool {
        let locale = self.locale();
        let path = self.lang_dir.join(format!("{}.mo", locale));
        if !path.exists() && locale == DEFAULT_LOCALE {
            return false;
        }
        self.load_catalog(DEFAULT_DOMAIN, path)
    }

    // ========== locale table ==========

    /// 当前语言的日历名称与数字格式表（按需构建并缓存）
    pub fn locale_table(&self) -> Arc<LocaleTable> {
        if let Some(table) = self.table.read().as_ref() {
            return Arc::clone(table);
        }
        let table = Arc::new(LocaleTable::from_registry(self));
        *self.table.write() = Some(Arc::clone(&table));
        table
    }

    fn invalidate_table(&self) {
        *self.table.write() = None;
    }

    pub fn is_rtl(&self) -> bool {
        self.locale_table().direction.is_rtl()
    }

    pub fn text_direction(&self) -> &'static str {
        self.locale_table().direction.as_html_dir()
    }

    /// 使用当前语言的分隔符格式化数字
    pub fn format_number(&self, value: f64, decimals: i32) -> String {
        super::format_number(value, decimals, &self.locale_table())
    }

    /// 使用当前语言与配置的时区格式化日期
    pub fn format_date(&self, mask: &str, timestamp: Option<i64>, use_utc: bool) -> String {
        super::format_date(
            mask,
            timestamp,
            use_utc,
            self.timezone,
            &self.locale_table(),
        )
    }
}


#[cfg(test)]
mod tests {
    use super::testing::{Entry, build_mo};
    use super::*;

    const TWO_FORMS: &str = "nplurals=2; plural=(n != 1);";

    fn french() -> Vec<u8> {
        build_mo(
            &[
                Entry::simple("Hello", &["Bonjour"]),
                Entry::simple("URL", &["Adresse"]),
                Entry {
                    context: Some("May abbreviation"),
                    id: "May",
                    plural: None,
                    translations: &["mai"],
                },
                Entry {
                    context: None,
                    id: "1 item",
                    plural: Some("%d items"),
                    translations: &["%d élément", "%d éléments"],
                },
            ],
            // 法语中 0 也用单数
            "nplurals=2; plural=(n > 1);",
        )
    }

    #[test]
    fn test_unknown_domain_echoes_input() {
        let registry = CatalogRegistry::new();
        assert_eq!(registry.translate("Hello", "unknown_domain"), "Hello");
        assert_eq!(
            registry.translate_with_context("May", "May abbreviation", "unknown_domain"),
            "May"
        );
        assert!(!registry.is_loaded("unknown_domain"));
    }

    #[test]
    fn test_plural_fallback_without_catalog() {
        let registry = CatalogRegistry::new();
        assert_eq!(
            registry.translate_plural("1 item", "%d items", 1, None, DEFAULT_DOMAIN),
            "1 item"
        );
        assert_eq!(
            registry.translate_plural("1 item", "%d items", 5, None, DEFAULT_DOMAIN),
            "%d items"
        );
        assert_eq!(
            registry.translate_plural("1 item", "%d items", 0, None, DEFAULT_DOMAIN),
            "%d items"
        );
    }

    #[test]
    fn test_loaded_catalog_translates() {
        let registry = CatalogRegistry::new();
        assert!(registry.load_catalog_bytes(DEFAULT_DOMAIN, &french()));
        assert!(registry.is_loaded(DEFAULT_DOMAIN));

        assert_eq!(registry.translate("Hello", DEFAULT_DOMAIN), "Bonjour");
        assert_eq!(registry.translate("Goodbye", DEFAULT_DOMAIN), "Goodbye");
        assert_eq!(
            registry.translate_with_context("May", "May abbreviation", DEFAULT_DOMAIN),
            "mai"
        );
        // 无上下文的 "May" 不受影响
        assert_eq!(registry.translate("May", DEFAULT_DOMAIN), "May");
    }

    #[test]
    fn test_plural_uses_catalog_rule() {
        let registry = CatalogRegistry::new();
        registry.load_catalog_bytes(DEFAULT_DOMAIN, &french());
        assert_eq!(
            registry.translate_plural("1 item", "%d items", 0, None, DEFAULT_DOMAIN),
            "%d élément"
        );
        assert_eq!(
            registry.translate_plural("1 item", "%d items", 2, None, DEFAULT_DOMAIN),
            "%d éléments"
        );
    }

    #[test]
    fn test_merge_keeps_existing_translation() {
        let registry = CatalogRegistry::new();
        let first = build_mo(&[Entry::simple("Hello", &["Bonjour"])], TWO_FORMS);
        let second = build_mo(
            &[
                Entry::simple("Hello", &["Salut"]),
                Entry::simple("Search", &["Rechercher"]),
            ],
            TWO_FORMS,
        );

        assert!(registry.load_catalog_bytes(DEFAULT_DOMAIN, &first));
        assert!(registry.load_catalog_bytes(DEFAULT_DOMAIN, &second));

        assert_eq!(registry.translate("Hello", DEFAULT_DOMAIN), "Bonjour");
        assert_eq!(registry.translate("Search", DEFAULT_DOMAIN), "Rechercher");
    }

    #[test]
    fn test_malformed_catalog_is_rejected() {
        let registry = CatalogRegistry::new();
        assert!(!registry.load_catalog_bytes(DEFAULT_DOMAIN, b"definitely not a catalog"));
        assert!(!registry.is_loaded(DEFAULT_DOMAIN));
        assert!(!registry.load_catalog(DEFAULT_DOMAIN, "/nonexistent/path/fr_FR.mo"));
        assert_eq!(registry.translate("Hello", DEFAULT_DOMAIN), "Hello");
    }

    #[test]
    fn test_unload_reports_previous_state() {
        let registry = CatalogRegistry::new();
        assert!(!registry.unload_catalog("plugin"));
        registry.load_catalog_bytes("plugin", &french());
        assert_eq!(registry.translate("Hello", "plugin"), "Bonjour");
        assert!(registry.unload_catalog("plugin"));
        assert_eq!(registry.translate("Hello", "plugin"), "Hello");
    }

    #[test]
    fn test_domains_are_isolated() {
        let registry = CatalogRegistry::new();
        registry.load_catalog_bytes("plugin", &french());
        assert_eq!(registry.translate("Hello", DEFAULT_DOMAIN), "Hello");
    }

    #[test]
    fn test_locale_defaults_and_caches() {
        let registry = CatalogRegistry::new();
        assert_eq!(registry.locale(), "en_US");

        let registry = CatalogRegistry::new().with_locale("fr_FR");
        assert_eq!(registry.locale(), "fr_FR");
        registry.set_locale("de_DE");
        assert_eq!(registry.locale(), "de_DE");
    }

    #[test]
    fn test_from_config_ignores_blank_locale_and_bad_timezone() {
        let config = I18nConfig {
            locale: Some("  ".to_string()),
            lang_dir: "lang".to_string(),
            timezone: Some("Mars/Olympus_Mons".to_string()),
        };
        let registry = CatalogRegistry::from_config(&config);
        assert_eq!(registry.locale(), "en_US");
        assert!(registry.timezone().is_none());
        assert_eq!(registry.lang_dir(), Path::new("lang"));
    }

    #[test]
    fn test_load_default_textdomain_from_lang_dir() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::write(dir.path().join("fr_FR.mo"), french()).unwrap();

        let config = I18nConfig {
            locale: Some("fr_FR".to_string()),
            lang_dir: dir.path().to_string_lossy().to_string(),
            timezone: None,
        };
        let registry = CatalogRegistry::from_config(&config);
        assert!(registry.load_default_textdomain());
        assert_eq!(registry.translate("Hello", DEFAULT_DOMAIN), "Bonjour");

        let english = CatalogRegistry::from_config(&I18nConfig {
            locale: None,
            ..config
        });
        assert!(!english.load_default_textdomain());
    }

    #[test]
    fn test_locale_table_refreshes_after_load() {
        let registry = CatalogRegistry::new();
        assert!(!registry.is_rtl());
        let hebrew = build_mo(
            &[Entry {
                context: Some("text direction"),
                id: "ltr",
                plural: None,
                translations: &["rtl"],
            }],
            TWO_FORMS,
        );
        registry.load_catalog_bytes(DEFAULT_DOMAIN, &hebrew);
        assert!(registry.is_rtl());
        assert_eq!(registry.text_direction(), "rtl");
    }
}
