//! Internationalization (i18n) support
//!
//! A reduced gettext-style translation layer:
//!
//! - [`CatalogRegistry`]: domain-scoped `.mo` catalogs with singular,
//!   plural and context lookups; untranslated strings are echoed back.
//! - [`LocaleTable`]: weekday/month names, meridiems and number
//!   separators, each resolved through the `default` domain so a locale
//!   can override them.
//! - [`format_number`] / [`format_date`]: locale-aware number grouping and
//!   PHP-style date masks.
//!
//! # Example
//!
//! ```
//! use linkboard::i18n::{CatalogRegistry, DEFAULT_DOMAIN};
//!
//! let i18n = CatalogRegistry::new();
//! assert_eq!(i18n.translate("Hello", "unknown_domain"), "Hello");
//! assert_eq!(i18n.translate_plural("1 item", "%d items", 5, None, DEFAULT_DOMAIN), "%d items");
//! ```

mod format;
mod languages;
mod locale;
mod registry;
mod sprintf;

pub use format::{format_date, format_number};
pub use languages::available_languages;
pub use locale::{Direction, LocaleTable};
pub use registry::CatalogRegistry;
pub use sprintf::sprintf;

/// 默认文本域
pub const DEFAULT_DOMAIN: &str = "default";

/// 未配置语言时使用的语言
pub const DEFAULT_LOCALE: &str = "en_US";
