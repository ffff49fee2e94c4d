//! Admin listing filter builder
//!
//! Turns the raw query string of the admin page into a validated
//! [`FilterDescriptor`]: closed enums for every choice field, a list of
//! structured [`Clause`]s (column + operator + bound value) and the
//! pagination window. Nothing in here ever rejects input; unknown values
//! fall back to their defaults so stale bookmarked URLs keep working.

mod clause;
mod descriptor;
mod pagination;
mod params;

pub use clause::{
    Clause, ClauseValue, Column, LIKE_ESCAPE, Operator, build_click_clause, build_date_clause,
    build_search_clause, escape_like, parse_filter_date, search_pattern,
};
pub use descriptor::{FilterDescriptor, FilterRequest, ListingMode};
pub use pagination::{PageWindow, Pagination, paginate, parse_positive};
pub use params::{ClickFilter, DateFilter, SearchIn, SortBy, SortOrder, normalize_enum};

/// 列表模式下的默认每页条数
pub const DEFAULT_PER_PAGE: u64 = 50;

/// 每页条数上限
pub const MAX_PER_PAGE: u64 = 1000;
