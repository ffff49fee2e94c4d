//! Calendar names, meridiems and number separators for the current locale

use serde::Serialize;

use super::DEFAULT_DOMAIN;
use super::registry::CatalogRegistry;

/// Text direction for a locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Ltr,
    Rtl,
}

impl Direction {
    /// Returns the HTML `dir` attribute value.
    pub fn as_html_dir(&self) -> &'static str {
        match self {
            Direction::Ltr => "ltr",
            Direction::Rtl => "rtl",
        }
    }

    pub fn is_rtl(&self) -> bool {
        matches!(self, Direction::Rtl)
    }
}

const WEEKDAYS: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// 首字母存在重复（Tuesday/Thursday），用上下文区分
const WEEKDAY_INITIALS: [(&str, &str); 7] = [
    ("S", "Sunday initial"),
    ("M", "Monday initial"),
    ("T", "Tuesday initial"),
    ("W", "Wednesday initial"),
    ("T", "Thursday initial"),
    ("F", "Friday initial"),
    ("S", "Saturday initial"),
];

const WEEKDAY_ABBREVS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// "May" 的全称和缩写相同，缩写带上下文
const MONTH_ABBREVS: [(&str, &str); 12] = [
    ("Jan", "January abbreviation"),
    ("Feb", "February abbreviation"),
    ("Mar", "March abbreviation"),
    ("Apr", "April abbreviation"),
    ("May", "May abbreviation"),
    ("Jun", "June abbreviation"),
    ("Jul", "July abbreviation"),
    ("Aug", "August abbreviation"),
    ("Sep", "September abbreviation"),
    ("Oct", "October abbreviation"),
    ("Nov", "November abbreviation"),
    ("Dec", "December abbreviation"),
];

/// 未翻译时目录会原样返回这些键，此时使用英文默认值
const DECIMAL_POINT_KEY: &str = "number_format_decimal_point";
const THOUSANDS_SEP_KEY: &str = "number_format_thousands_sep";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Meridiem {
    pub am: String,
    pub pm: String,
    pub am_upper: String,
    pub pm_upper: String,
}

/// 一个语言的日历与数字格式数据
///
/// 星期从 Sunday 开始（索引 0），月份从 January 开始（索引 0）。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocaleTable {
    pub weekday: [String; 7],
    pub weekday_initial: [String; 7],
    pub weekday_abbrev: [String; 7],
    pub month: [String; 12],
    pub month_abbrev: [String; 12],
    pub meridiem: Meridiem,
    pub decimal_point: String,
    pub thousands_sep: String,
    pub direction: Direction,
}

impl Default for LocaleTable {
    /// 未经翻译的英文表
    fn default() -> Self {
        Self {
            weekday: WEEKDAYS.map(str::to_string),
            weekday_initial: WEEKDAY_INITIALS.map(|(initial, _)| initial.to_string()),
            weekday_abbrev: WEEKDAY_ABBREVS.map(str::to_string),
            month: MONTHS.map(str::to_string),
            month_abbrev: MONTH_ABBREVS.map(|(abbrev, _)| abbrev.to_string()),
            meridiem: Meridiem {
                am: "am".to_string(),
                pm: "pm".to_string(),
                am_upper: "AM".to_string(),
                pm_upper: "PM".to_string(),
            },
            decimal_point: ".".to_string(),
            thousands_sep: ",".to_string(),
            direction: Direction::Ltr,
        }
    }
}

impl LocaleTable {
    /// 通过 default 文本域翻译每一项
    pub fn from_registry(i18n: &CatalogRegistry) -> Self {
        let t = |text: &str| i18n.translate(text, DEFAULT_DOMAIN);
        let tx = |text: &str, ctx: &str| i18n.translate_with_context(text, ctx, DEFAULT_DOMAIN);

        let separator = |key: &str, ctx: &str, fallback: &str| {
            let value = tx(key, ctx);
            if value == key {
                fallback.to_string()
            } else {
                value
            }
        };

        let direction = if tx("ltr", "text direction") == "rtl" {
            Direction::Rtl
        } else {
            Direction::Ltr
        };

        Self {
            weekday: WEEKDAYS.map(t),
            weekday_initial: WEEKDAY_INITIALS.map(|(initial, ctx)| tx(initial, ctx)),
            weekday_abbrev: WEEKDAY_ABBREVS.map(t),
            month: MONTHS.map(t),
            month_abbrev: MONTH_ABBREVS.map(|(abbrev, ctx)| tx(abbrev, ctx)),
            meridiem: Meridiem {
                am: t("am"),
                pm: t("pm"),
                am_upper: t("AM"),
                pm_upper: t("PM"),
            },
            decimal_point: separator(DECIMAL_POINT_KEY, "decimal point", "."),
            thousands_sep: separator(THOUSANDS_SEP_KEY, "thousands separator", ","),
            direction,
        }
    }

    /// 按月份序号（1-12）取全称
    pub fn month_name(&self, month: u32) -> &str {
        self.month
            .get(month.wrapping_sub(1) as usize)
            .map(String::as_str)
            .unwrap_or_default()
    }

    pub fn month_abbrev_name(&self, month: u32) -> &str {
        self.month_abbrev
            .get(month.wrapping_sub(1) as usize)
            .map(String::as_str)
            .unwrap_or_default()
    }

    /// 按星期序号（0 = Sunday）取全称
    pub fn weekday_name(&self, weekday: u32) -> &str {
        self.weekday
            .get(weekday as usize)
            .map(String::as_str)
            .unwrap_or_default()
    }

    pub fn weekday_abbrev_name(&self, weekday: u32) -> &str {
        self.weekday_abbrev
            .get(weekday as usize)
            .map(String::as_str)
            .unwrap_or_default()
    }

    pub fn weekday_initial_name(&self, weekday: u32) -> &str {
        self.weekday_initial
            .get(weekday as usize)
            .map(String::as_str)
            .unwrap_or_default()
    }

    /// `upper` 为 true 时返回 AM/PM
    pub fn meridiem(&self, hour: u32, upper: bool) -> &str {
        match (hour < 12, upper) {
            (true, false) => &self.meridiem.am,
            (false, false) => &self.meridiem.pm,
            (true, true) => &self.meridiem.am_upper,
            (false, true) => &self.meridiem.pm_upper,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::registry::testing::{Entry, build_mo};

    #[test]
    fn test_untranslated_table_is_english() {
        let table = LocaleTable::from_registry(&CatalogRegistry::new());
        assert_eq!(table, LocaleTable::default());
        assert_eq!(table.month_name(5), "May");
        assert_eq!(table.weekday_initial_name(4), "T");
        assert_eq!(table.decimal_point, ".");
        assert_eq!(table.thousands_sep, ",");
    }

    #[test]
    fn test_out_of_range_lookups_are_empty() {
        let table = LocaleTable::default();
        assert_eq!(table.month_name(0), "");
        assert_eq!(table.month_name(13), "");
        assert_eq!(table.weekday_name(7), "");
    }

    #[test]
    fn test_translated_table() {
        let registry = CatalogRegistry::new();
        let mo = build_mo(
            &[
                Entry::simple("May", &["Mai"]),
                Entry {
                    context: Some("May abbreviation"),
                    id: "May",
                    plural: None,
                    translations: &["mai"],
                },
                Entry {
                    context: Some("Thursday initial"),
                    id: "T",
                    plural: None,
                    translations: &["J"],
                },
                Entry {
                    context: Some("decimal point"),
                    id: DECIMAL_POINT_KEY,
                    plural: None,
                    translations: &[","],
                },
                Entry {
                    context: Some("thousands separator"),
                    id: THOUSANDS_SEP_KEY,
                    plural: None,
                    translations: &[" "],
                },
            ],
            "nplurals=2; plural=(n > 1);",
        );
        registry.load_catalog_bytes(DEFAULT_DOMAIN, &mo);

        let table = LocaleTable::from_registry(&registry);
        assert_eq!(table.month_name(5), "Mai");
        assert_eq!(table.month_abbrev_name(5), "mai");
        assert_eq!(table.weekday_initial_name(2), "T");
        assert_eq!(table.weekday_initial_name(4), "J");
        assert_eq!(table.decimal_point, ",");
        assert_eq!(table.thousands_sep, " ");
    }

    #[test]
    fn test_meridiem_selection() {
        let table = LocaleTable::default();
        assert_eq!(table.meridiem(0, false), "am");
        assert_eq!(table.meridiem(11, true), "AM");
        assert_eq!(table.meridiem(12, false), "pm");
        assert_eq!(table.meridiem(23, true), "PM");
    }
}
