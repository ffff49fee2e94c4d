//! Storage backend tests
//!
//! Filtering, ordering and pagination against temporary SQLite databases.

use chrono::{DateTime, TimeZone, Utc};
use linkboard::errors::LinkboardError;
use linkboard::filter::{
    ClickFilter, FilterDescriptor, FilterRequest, ListingMode, SearchIn, SortBy, SortOrder,
    build_click_clause, build_date_clause, build_search_clause,
};
use linkboard::filter::DateFilter;
use linkboard::services::run_listing;
use linkboard::storage::{LinkRepository, LinkRow, LinkStore, SeaOrmStorage};
use tempfile::TempDir;

fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, s).unwrap()
}

fn row(keyword: &str, url: &str, title: &str, timestamp: DateTime<Utc>, clicks: i64) -> LinkRow {
    LinkRow {
        keyword: keyword.to_string(),
        url: url.to_string(),
        title: Some(title.to_string()),
        timestamp,
        ip: "10.0.0.1".to_string(),
        clicks,
    }
}

/// 创建临时 SQLite 数据库的存储实例
async fn create_temp_storage() -> (SeaOrmStorage, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());

    let storage = SeaOrmStorage::new(&db_url, "sqlite")
        .await
        .expect("Failed to create storage");

    (storage, temp_dir)
}

/// 五条固定数据
async fn seeded_storage() -> (SeaOrmStorage, TempDir) {
    let (storage, dir) = create_temp_storage().await;
    let rows = [
        row("alpha", "https://example.com/a", "Alpha page", at(2020, 1, 1, 0, 0, 0), 5),
        row("bravo", "https://example.com/b", "Bravo 100% real", at(2020, 1, 15, 12, 0, 0), 50),
        row("charlie", "https://rust-lang.org/", "Rust", at(2020, 1, 31, 23, 59, 59), 0),
        row("delta", "https://example.org/x_y", "Delta", at(2020, 2, 1, 0, 0, 0), 500),
        row("echo", "https://xaybz.net/", "Echo", at(2021, 6, 1, 8, 30, 0), 50),
    ];
    for r in rows {
        storage.insert(r).await.expect("insert failed");
    }
    (storage, dir)
}

fn keywords(rows: &[LinkRow]) -> Vec<&str> {
    rows.iter().map(|r| r.keyword.as_str()).collect()
}

#[tokio::test]
async fn test_insert_and_get() {
    let (storage, _dir) = create_temp_storage().await;
    let link = row("abc", "https://example.com", "Example", at(2021, 3, 4, 5, 6, 7), 3);
    storage.insert(link.clone()).await.unwrap();

    let loaded = storage.get("abc").await.unwrap().unwrap();
    assert_eq!(loaded, link);
    assert!(storage.get("missing").await.unwrap().is_none());
}

#[tokio::test]
async fn test_insert_duplicate_keyword_is_keyword_taken() {
    let (storage, _dir) = create_temp_storage().await;
    let link = row("abc", "https://example.com", "Example", at(2021, 3, 4, 5, 6, 7), 0);
    storage.insert(link.clone()).await.unwrap();

    let err = storage.insert(link).await.unwrap_err();
    assert!(matches!(err, LinkboardError::KeywordTaken(_)), "{err:?}");
}

#[tokio::test]
async fn test_find_by_url_returns_earliest() {
    let (storage, _dir) = create_temp_storage().await;
    storage
        .insert(row("late", "https://dup.example", "t", at(2021, 1, 2, 0, 0, 0), 0))
        .await
        .unwrap();
    storage
        .insert(row("early", "https://dup.example", "t", at(2021, 1, 1, 0, 0, 0), 0))
        .await
        .unwrap();

    let found = storage.find_by_url("https://dup.example").await.unwrap().unwrap();
    assert_eq!(found.keyword, "early");
    assert!(storage.find_by_url("https://other.example").await.unwrap().is_none());
}

#[tokio::test]
async fn test_count_all() {
    let (storage, _dir) = seeded_storage().await;
    let totals = storage.count(&[]).await.unwrap();
    assert_eq!(totals.total_links, 5);
    assert_eq!(totals.total_clicks, 605);
}

#[tokio::test]
async fn test_count_empty_table() {
    let (storage, _dir) = create_temp_storage().await;
    let totals = storage.count(&[]).await.unwrap();
    assert_eq!((totals.total_links, totals.total_clicks), (0, 0));
}

#[tokio::test]
async fn test_search_wildcard_matches_inside_value() {
    let (storage, _dir) = seeded_storage().await;
    let clause = build_search_clause(Some("a*b"), SearchIn::Url).unwrap();
    let rows = storage
        .query(&[clause], SortBy::Keyword, SortOrder::Asc, 0, 50)
        .await
        .unwrap();
    // "xaybz" 以及 example.com/b
    assert_eq!(keywords(&rows), vec!["bravo", "echo"]);
}

#[tokio::test]
async fn test_search_percent_is_literal() {
    let (storage, _dir) = seeded_storage().await;
    let clause = build_search_clause(Some("100%"), SearchIn::Title).unwrap();
    let rows = storage
        .query(&[clause], SortBy::Keyword, SortOrder::Asc, 0, 50)
        .await
        .unwrap();
    assert_eq!(keywords(&rows), vec!["bravo"]);

    let clause = build_search_clause(Some("x_y"), SearchIn::Url).unwrap();
    let rows = storage
        .query(&[clause], SortBy::Keyword, SortOrder::Asc, 0, 50)
        .await
        .unwrap();
    assert_eq!(keywords(&rows), vec!["delta"]);
}

#[tokio::test]
async fn test_search_with_quotes_matches_nothing() {
    let (storage, _dir) = seeded_storage().await;
    let clause = build_search_clause(Some("' OR '1'='1"), SearchIn::Keyword).unwrap();
    let totals = storage.count(&[clause]).await.unwrap();
    assert_eq!(totals.total_links, 0);
}

#[tokio::test]
async fn test_click_filters() {
    let (storage, _dir) = seeded_storage().await;

    let more = build_click_clause(Some("10"), ClickFilter::More).unwrap();
    let totals = storage.count(&[more]).await.unwrap();
    assert_eq!(totals.total_links, 3);
    assert_eq!(totals.total_clicks, 600);

    let less = build_click_clause(Some("10"), ClickFilter::Less).unwrap();
    let rows = storage
        .query(&[less], SortBy::Keyword, SortOrder::Asc, 0, 50)
        .await
        .unwrap();
    assert_eq!(keywords(&rows), vec!["alpha", "charlie"]);
}

#[tokio::test]
async fn test_date_between_is_inclusive() {
    let (storage, _dir) = seeded_storage().await;
    let clause =
        build_date_clause(Some(DateFilter::Between), Some("2020-01-01"), Some("2020-01-31"))
            .unwrap();
    let rows = storage
        .query(&[clause], SortBy::Timestamp, SortOrder::Asc, 0, 50)
        .await
        .unwrap();
    assert_eq!(keywords(&rows), vec!["alpha", "bravo", "charlie"]);
}

#[tokio::test]
async fn test_date_between_includes_sub_second_end_of_day() {
    let (storage, _dir) = seeded_storage().await;
    let late = at(2020, 1, 31, 23, 59, 59) + chrono::Duration::milliseconds(500);
    storage
        .insert(row("foxtrot", "https://example.net/late", "Late", late, 1))
        .await
        .unwrap();

    let clause =
        build_date_clause(Some(DateFilter::Between), Some("2020-01-31"), Some("2020-01-31"))
            .unwrap();
    let rows = storage
        .query(&[clause], SortBy::Timestamp, SortOrder::Asc, 0, 50)
        .await
        .unwrap();
    assert_eq!(keywords(&rows), vec!["charlie", "foxtrot"]);
}

#[tokio::test]
async fn test_date_before_and_after() {
    let (storage, _dir) = seeded_storage().await;

    let before = build_date_clause(Some(DateFilter::Before), Some("2020-01-15"), None).unwrap();
    let rows = storage
        .query(&[before], SortBy::Keyword, SortOrder::Asc, 0, 50)
        .await
        .unwrap();
    assert_eq!(keywords(&rows), vec!["alpha"]);

    let after = build_date_clause(Some(DateFilter::After), Some("02/01/2020"), None).unwrap();
    let rows = storage
        .query(&[after], SortBy::Keyword, SortOrder::Asc, 0, 50)
        .await
        .unwrap();
    // 严格大于当天零点
    assert_eq!(keywords(&rows), vec!["echo"]);
}

#[tokio::test]
async fn test_order_ties_break_on_keyword() {
    let (storage, _dir) = seeded_storage().await;
    let rows = storage
        .query(&[], SortBy::Clicks, SortOrder::Desc, 0, 50)
        .await
        .unwrap();
    assert_eq!(keywords(&rows), vec!["delta", "bravo", "echo", "alpha", "charlie"]);
}

#[tokio::test]
async fn test_offset_and_limit() {
    let (storage, _dir) = seeded_storage().await;
    let rows = storage
        .query(&[], SortBy::Keyword, SortOrder::Asc, 2, 2)
        .await
        .unwrap();
    assert_eq!(keywords(&rows), vec!["charlie", "delta"]);

    let rows = storage
        .query(&[], SortBy::Keyword, SortOrder::Asc, 10, 2)
        .await
        .unwrap();
    assert!(rows.is_empty());
}

#[tokio::test]
async fn test_run_listing_end_to_end() {
    let (storage, _dir) = seeded_storage().await;
    let request = FilterRequest {
        search: Some("example".to_string()),
        sort_by: Some("clicks".to_string()),
        sort_order: Some("asc".to_string()),
        perpage: Some("2".to_string()),
        page: Some("2".to_string()),
        ..Default::default()
    };
    let descriptor = FilterDescriptor::build(&request, ListingMode::Listing, 50);
    let listing = run_listing(&storage, &descriptor).await.unwrap();

    assert_eq!(listing.matching.total_links, 3);
    assert_eq!(listing.matching.total_clicks, 555);
    assert_eq!(listing.overall.total_links, 5);
    assert_eq!(listing.pagination.total_pages, 2);
    assert_eq!(listing.pagination.displayed, Some((3, 3)));
    assert_eq!(keywords(&listing.rows), vec!["delta"]);
}

#[tokio::test]
async fn test_run_listing_bookmarklet_mode_returns_newest() {
    let (storage, _dir) = seeded_storage().await;
    let descriptor = FilterDescriptor::build(
        &FilterRequest {
            perpage: Some("20".to_string()),
            ..Default::default()
        },
        ListingMode::Bookmarklet,
        50,
    );
    let listing = run_listing(&storage, &descriptor).await.unwrap();
    assert_eq!(keywords(&listing.rows), vec!["echo"]);
    assert_eq!(listing.pagination.per_page, 1);
}

#[tokio::test]
async fn test_run_listing_with_enormous_page_and_per_page() {
    let (storage, _dir) = seeded_storage().await;
    let request = FilterRequest {
        page: Some(u64::MAX.to_string()),
        perpage: Some(u64::MAX.to_string()),
        ..Default::default()
    };
    let descriptor = FilterDescriptor::build(&request, ListingMode::Listing, 50);
    let listing = run_listing(&storage, &descriptor).await.unwrap();

    assert!(listing.rows.is_empty());
    assert_eq!(listing.matching.total_links, 5);
    assert_eq!(listing.pagination.per_page, 1000);
    assert_eq!(listing.pagination.offset, i64::MAX as u64);
    assert_eq!(listing.pagination.displayed, None);
}
