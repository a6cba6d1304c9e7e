//! Integration tests against the DuckDB-backed store

use keyset_pager::store::{DuckDbStore, TableQuery};
use keyset_pager::{
    CursorPagination, JsonValue, KeysetProvider, PageConfig, Record, RequestParams, UrlBuilder,
};

fn seeded_store() -> DuckDbStore {
    let store = DuckDbStore::open_in_memory().unwrap();
    store
        .execute_batch(
            "CREATE TABLE messages AS
             SELECT i AS id, 'message ' || i AS body FROM range(1, 26) t(i);",
        )
        .unwrap();
    store
}

fn provider(store: DuckDbStore, pairs: &[(&str, &str)]) -> KeysetProvider<DuckDbStore> {
    let params = RequestParams::from_pairs(pairs.iter().copied());
    let config = PageConfig::from_params("id", "/messages", &params);
    let pagination = CursorPagination::new(config, params, UrlBuilder::new()).unwrap();
    let query = TableQuery::new("messages").unwrap();
    KeysetProvider::new(store, query, pagination)
}

fn ids(records: &[Record]) -> Vec<i64> {
    records
        .iter()
        .map(|r| r.get("id").and_then(JsonValue::as_i64).unwrap())
        .collect()
}

#[test]
fn test_first_page_from_duckdb() {
    let mut provider = provider(seeded_store(), &[("limit", "5")]);
    let records = provider.fetch_page().unwrap();

    assert_eq!(ids(&records), vec![25, 24, 23, 22, 21]);
    assert_eq!(provider.pagination().more_data_exists(), Some(true));
    assert_eq!(
        records[0].get("body"),
        Some(&JsonValue::String("message 25".to_string()))
    );

    let links = provider.links(false).unwrap();
    assert_eq!(links.prev, None);
    assert_eq!(links.next, Some("/messages?limit=5&next=21".to_string()));
}

#[test]
fn test_walk_entire_table_forward() {
    let mut seen = Vec::new();
    let mut cursor = String::new();

    loop {
        let pairs: Vec<(&str, &str)> = if cursor.is_empty() {
            vec![("limit", "4")]
        } else {
            vec![("limit", "4"), ("next", &cursor)]
        };
        let mut provider = provider(seeded_store(), &pairs);
        let records = provider.fetch_page().unwrap();
        seen.extend(ids(&records));

        if provider.pagination().more_data_exists() != Some(true) {
            break;
        }
        cursor = provider
            .pagination()
            .params()
            .get("next")
            .unwrap()
            .to_string();
    }

    assert_eq!(seen, (1..=25).rev().collect::<Vec<i64>>());
}

#[test]
fn test_prev_direction_against_duckdb() {
    let mut provider = provider(seeded_store(), &[("limit", "5"), ("prev", "20")]);
    let records = provider.fetch_page().unwrap();

    assert_eq!(ids(&records), vec![25, 24, 23, 22, 21]);
    assert_eq!(provider.pagination().more_data_exists(), Some(false));
    assert!(provider.links(false).unwrap().prev.is_none());
}

#[test]
fn test_next_beyond_edge_against_duckdb() {
    let mut provider = provider(seeded_store(), &[("limit", "5"), ("next", "1")]);
    let records = provider.fetch_page().unwrap();

    assert!(records.is_empty());
    assert_eq!(provider.pagination().more_data_exists(), Some(false));
}

#[test]
fn test_file_backed_database() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pages.duckdb");

    {
        let store = DuckDbStore::open(&path).unwrap();
        store
            .execute_batch(
                "CREATE TABLE messages AS
                 SELECT i AS id, 'message ' || i AS body FROM range(1, 8) t(i);",
            )
            .unwrap();
    }

    let store = DuckDbStore::open(&path).unwrap();
    let mut provider = provider(store, &[("limit", "3")]);
    let records = provider.fetch_page().unwrap();

    assert_eq!(ids(&records), vec![7, 6, 5]);
    assert_eq!(provider.pagination().more_data_exists(), Some(true));
}

#[test]
fn test_string_keys_paginate() {
    let store = DuckDbStore::open_in_memory().unwrap();
    store
        .execute_batch(
            "CREATE TABLE docs (slug VARCHAR);
             INSERT INTO docs VALUES ('alpha'), ('bravo'), ('charlie'), ('delta');",
        )
        .unwrap();

    let params = RequestParams::from_pairs([("limit", "2"), ("next", "delta")]);
    let config = PageConfig::from_params("slug", "/docs", &params);
    let pagination = CursorPagination::new(config, params, UrlBuilder::new()).unwrap();
    let query = TableQuery::new("docs").unwrap();
    let mut provider = KeysetProvider::new(store, query, pagination);

    let records = provider.fetch_page().unwrap();
    let slugs: Vec<&str> = records
        .iter()
        .map(|r| r.get("slug").and_then(JsonValue::as_str).unwrap())
        .collect();
    assert_eq!(slugs, vec!["charlie", "bravo"]);
    assert_eq!(provider.pagination().more_data_exists(), Some(true));
    assert_eq!(provider.pagination().params().get("next"), Some("bravo"));
}
