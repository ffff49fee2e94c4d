//! Translation catalog tests
//!
//! Catalogs are written to temporary `.mo` files and loaded through the
//! public registry API.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use linkboard::config::I18nConfig;
use linkboard::i18n::{CatalogRegistry, DEFAULT_DOMAIN, available_languages, sprintf};
use tempfile::TempDir;

const FRENCH_PLURALS: &str = "nplurals=2; plural=(n > 1);";

/// 2021-03-04 05:06:07 UTC，星期四
const TS: i64 = 1_614_834_367;

/// `(context, msgid, msgid_plural, translations)`
type Entry<'a> = (Option<&'a str>, &'a str, Option<&'a str>, &'a [&'a str]);

/// 生成小端序 `.mo` 数据
fn mo_bytes(entries: &[Entry<'_>], plural_forms: &str) -> Vec<u8> {
    let header = format!(
        "Content-Type: text/plain; charset=UTF-8\nPlural-Forms: {}\n",
        plural_forms
    );
    let mut pairs: Vec<(Vec<u8>, Vec<u8>)> = vec![(Vec::new(), header.into_bytes())];
    for (context, id, plural, translations) in entries {
        let mut key = Vec::new();
        if let Some(ctx) = context {
            key.extend_from_slice(ctx.as_bytes());
            key.push(0x04);
        }
        key.extend_from_slice(id.as_bytes());
        if let Some(plural) = plural {
            key.push(0);
            key.extend_from_slice(plural.as_bytes());
        }
        pairs.push((key, translations.join("\0").into_bytes()));
    }
    pairs.sort_by(|a, b| a.0.cmp(&b.0));

    let count = pairs.len() as u32;
    let originals = 28u32;
    let translations = originals + count * 8;
    let mut offset = translations + count * 8;

    let mut out = Vec::new();
    for word in [0x950412de_u32, 0, count, originals, translations, 0, 0] {
        out.extend_from_slice(&word.to_le_bytes());
    }
    let mut table = Vec::new();
    let mut blob = Vec::new();
    for bytes in pairs.iter().map(|p| &p.0).chain(pairs.iter().map(|p| &p.1)) {
        table.push((bytes.len() as u32, offset));
        blob.extend_from_slice(bytes);
        blob.push(0);
        offset += bytes.len() as u32 + 1;
    }
    for (len, off) in table {
        out.extend_from_slice(&len.to_le_bytes());
        out.extend_from_slice(&off.to_le_bytes());
    }
    out.extend_from_slice(&blob);
    out
}

fn entry<'a>(
    context: Option<&'a str>,
    id: &'a str,
    plural: Option<&'a str>,
    translations: &'a [&'a str],
) -> Entry<'a> {
    (context, id, plural, translations)
}

fn write_catalog(dir: &Path, name: &str, entries: &[Entry<'_>]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, mo_bytes(entries, FRENCH_PLURALS)).unwrap();
    path
}

fn french_entries() -> Vec<Entry<'static>> {
    vec![
        entry(None, "Hello", None, &["Bonjour"]),
        entry(Some("verb"), "Post", None, &["Publier"]),
        entry(None, "%d link", Some("%d links"), &["%d lien", "%d liens"]),
        entry(None, "March", None, &["mars"]),
        entry(Some("March abbreviation"), "Mar", None, &["mars"]),
        entry(None, "Thursday", None, &["jeudi"]),
        entry(None, "Thu", None, &["jeu."]),
        entry(
            Some("decimal point"),
            "number_format_decimal_point",
            None,
            &[","],
        ),
        entry(
            Some("thousands separator"),
            "number_format_thousands_sep",
            None,
            &["\u{a0}"],
        ),
    ]
}

#[test]
fn test_unknown_domain_echoes() {
    let i18n = CatalogRegistry::new();
    assert_eq!(i18n.translate("Hello", "unknown_domain"), "Hello");
    assert_eq!(
        i18n.translate_with_context("Post", "verb", "unknown_domain"),
        "Post"
    );
    assert_eq!(
        i18n.translate_plural("%d link", "%d links", 1, None, "unknown_domain"),
        "%d link"
    );
    assert_eq!(
        i18n.translate_plural("%d link", "%d links", 0, None, "unknown_domain"),
        "%d links"
    );
}

#[test]
fn test_load_catalog_and_lookup() {
    let dir = TempDir::new().unwrap();
    let path = write_catalog(dir.path(), "fr_FR.mo", &french_entries());

    let i18n = CatalogRegistry::new();
    assert!(i18n.load_catalog("shop", &path));
    assert!(i18n.is_loaded("shop"));

    assert_eq!(i18n.translate("Hello", "shop"), "Bonjour");
    assert_eq!(i18n.translate("Goodbye", "shop"), "Goodbye");
    assert_eq!(i18n.translate_with_context("Post", "verb", "shop"), "Publier");
    assert_eq!(i18n.translate("Post", "shop"), "Post");

    // French: 0 and 1 are singular
    let one = i18n.translate_plural("%d link", "%d links", 0, None, "shop");
    assert_eq!(sprintf(&one, &["0"]), "0 lien");
    let many = i18n.translate_plural("%d link", "%d links", 3, None, "shop");
    assert_eq!(sprintf(&many, &["3"]), "3 liens");

    // other domains are untouched
    assert_eq!(i18n.translate("Hello", DEFAULT_DOMAIN), "Hello");
}

#[test]
fn test_merge_keeps_existing_translation() {
    let dir = TempDir::new().unwrap();
    let first = write_catalog(dir.path(), "a.mo", &[entry(None, "Hello", None, &["Bonjour"])]);
    let second = write_catalog(
        dir.path(),
        "b.mo",
        &[
            entry(None, "Hello", None, &["Salut"]),
            entry(None, "Goodbye", None, &["Au revoir"]),
        ],
    );

    let i18n = CatalogRegistry::new();
    assert!(i18n.load_catalog("app", &first));
    assert!(i18n.load_catalog("app", &second));

    assert_eq!(i18n.translate("Hello", "app"), "Bonjour");
    assert_eq!(i18n.translate("Goodbye", "app"), "Au revoir");
}

#[test]
fn test_bad_catalogs_leave_registry_unchanged() {
    let dir = TempDir::new().unwrap();
    let good = write_catalog(dir.path(), "good.mo", &[entry(None, "Hello", None, &["Bonjour"])]);
    let garbage = dir.path().join("garbage.mo");
    std::fs::write(&garbage, b"definitely not a catalog").unwrap();

    let i18n = CatalogRegistry::new();
    assert!(!i18n.load_catalog("app", dir.path().join("missing.mo")));
    assert!(!i18n.load_catalog("app", &garbage));
    assert!(!i18n.is_loaded("app"));

    assert!(i18n.load_catalog("app", &good));
    assert!(!i18n.load_catalog("app", &garbage));
    assert_eq!(i18n.translate("Hello", "app"), "Bonjour");
}

#[test]
fn test_unload_catalog() {
    let dir = TempDir::new().unwrap();
    let path = write_catalog(dir.path(), "fr_FR.mo", &french_entries());

    let i18n = CatalogRegistry::new();
    assert!(!i18n.unload_catalog("app"));
    assert!(i18n.load_catalog("app", &path));
    assert!(i18n.unload_catalog("app"));
    assert_eq!(i18n.translate("Hello", "app"), "Hello");
}

#[test]
fn test_default_textdomain_drives_locale_formatting() {
    let dir = TempDir::new().unwrap();
    write_catalog(dir.path(), "fr_FR.mo", &french_entries());

    let config = I18nConfig {
        locale: Some("fr_FR".to_string()),
        lang_dir: dir.path().to_string_lossy().into_owned(),
        timezone: None,
    };
    let i18n = CatalogRegistry::from_config(&config);
    assert_eq!(i18n.locale(), "fr_FR");
    assert!(i18n.load_default_textdomain());

    assert_eq!(i18n.format_date("l j F Y", Some(TS), true), "jeudi 4 mars 2021");
    assert_eq!(i18n.format_date("D, \\d\\e H:i", Some(TS), true), "jeu., de 05:06");
    assert_eq!(i18n.format_number(1234567.891, 2), "1\u{a0}234\u{a0}567,89");
    assert!(!i18n.is_rtl());
}

#[test]
fn test_english_formatting_without_catalog() {
    let i18n = CatalogRegistry::new();
    assert!(!i18n.load_default_textdomain());
    assert_eq!(
        i18n.format_date("l, F jS Y g:i a", Some(TS), true),
        "Thursday, March 4th 2021 5:06 am"
    );
    assert_eq!(i18n.format_number(1234.5, 1), "1,234.5");
    assert_eq!(i18n.format_number(1234.6, -2), "1,235");
    assert_eq!(i18n.text_direction(), "ltr");
}

#[test]
fn test_rtl_catalog() {
    let dir = TempDir::new().unwrap();
    let path = write_catalog(
        dir.path(),
        "ar.mo",
        &[entry(Some("text direction"), "ltr", None, &["rtl"])],
    );
    let i18n = CatalogRegistry::new();
    assert!(!i18n.is_rtl());
    assert!(i18n.load_catalog(DEFAULT_DOMAIN, &path));
    assert!(i18n.is_rtl());
    assert_eq!(i18n.text_direction(), "rtl");
}

#[test]
fn test_available_languages() {
    let dir = TempDir::new().unwrap();
    write_catalog(dir.path(), "fr_FR.mo", &french_entries());
    write_catalog(dir.path(), "de_DE.mo", &[]);
    std::fs::write(dir.path().join("notes.txt"), b"").unwrap();

    assert_eq!(available_languages(dir.path()), vec!["de_DE", "fr_FR"]);
    assert!(available_languages(dir.path().join("nope")).is_empty());
}

#[test]
fn test_concurrent_lookups_during_load() {
    let dir = TempDir::new().unwrap();
    let path = write_catalog(dir.path(), "fr_FR.mo", &french_entries());
    let i18n = Arc::new(CatalogRegistry::new());

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let i18n = Arc::clone(&i18n);
            std::thread::spawn(move || {
                for _ in 0..200 {
                    let value = i18n.translate("Hello", "app");
                    assert!(value == "Hello" || value == "Bonjour");
                }
            })
        })
        .collect();

    assert!(i18n.load_catalog("app", &path));
    for reader in readers {
        reader.join().unwrap();
    }
    assert_eq!(i18n.translate("Hello", "app"), "Bonjour");
}
