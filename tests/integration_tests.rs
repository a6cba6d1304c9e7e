//! Integration tests for the full pagination cycle
//!
//! Exercises the end-to-end flow over the in-memory store: request parameters
//! → pagination state → provider fetch → navigation links.

use keyset_pager::store::{MemoryQuery, MemoryStore};
use keyset_pager::{
    CursorPagination, JsonValue, KeysetProvider, PageConfig, Record, RequestParams, UrlBuilder,
};
use serde_json::json;

fn store() -> MemoryStore {
    MemoryStore::from_values(
        (1..=10)
            .map(|i| json!({"id": i, "name": format!("item {i}")}))
            .collect(),
    )
    .unwrap()
}

fn ids(records: &[Record]) -> Vec<i64> {
    records
        .iter()
        .map(|r| r.get("id").and_then(JsonValue::as_i64).unwrap())
        .collect()
}

/// Build a provider the way an HTTP layer would: everything derived from the
/// raw request query parameters.
fn provider_for_request(pairs: &[(&str, &str)]) -> KeysetProvider<MemoryStore> {
    let params = RequestParams::from_pairs(pairs.iter().copied());
    let config = PageConfig::from_params("id", "/items", &params);
    let pagination = CursorPagination::new(config, params, UrlBuilder::new()).unwrap();
    KeysetProvider::new(store(), MemoryQuery::new(), pagination)
}

/// Extract the query-string value of `key` from a relative link.
fn link_param(link: &str, key: &str) -> Option<String> {
    let query = link.split_once('?')?.1;
    query.split('&').find_map(|pair| {
        let (k, v) = pair.split_once('=')?;
        (k == key).then(|| v.to_string())
    })
}

// ============================================================================
// Full Paging Walk
// ============================================================================

#[test]
fn test_walk_entire_dataset_forward_via_links() {
    let mut provider = provider_for_request(&[("limit", "3")]);
    let mut seen = Vec::new();

    let records = provider.fetch_page().unwrap();
    seen.extend(ids(&records));
    let mut links = provider.links(false).unwrap();
    assert!(links.prev.is_none());

    while let Some(next_link) = links.next {
        let cursor = link_param(&next_link, "next").unwrap();
        let mut provider = provider_for_request(&[("limit", "3"), ("next", &cursor)]);
        let records = provider.fetch_page().unwrap();
        seen.extend(ids(&records));
        links = provider.links(false).unwrap();
    }

    // Every key exactly once, descending.
    assert_eq!(seen, (1..=10).rev().collect::<Vec<i64>>());
}

#[test]
fn test_walk_back_from_last_page() {
    // Land on the last page, then follow prev links back to the newest page.
    let mut provider = provider_for_request(&[("limit", "4"), ("next", "5")]);
    let records = provider.fetch_page().unwrap();
    assert_eq!(ids(&records), vec![4, 3, 2, 1]);

    let links = provider.links(false).unwrap();
    assert!(links.next.is_none());
    let prev_link = links.prev.unwrap();
    let cursor = link_param(&prev_link, "prev").unwrap();
    assert_eq!(cursor, "4");

    let mut provider = provider_for_request(&[("limit", "4"), ("prev", &cursor)]);
    let records = provider.fetch_page().unwrap();
    assert_eq!(ids(&records), vec![8, 7, 6, 5]);

    let links = provider.links(false).unwrap();
    let prev_link = links.prev.unwrap();
    let cursor = link_param(&prev_link, "prev").unwrap();

    let mut provider = provider_for_request(&[("limit", "4"), ("prev", &cursor)]);
    let records = provider.fetch_page().unwrap();
    assert_eq!(ids(&records), vec![10, 9]);
    // Only two newer records exist, so no further prev link.
    assert!(provider.links(false).unwrap().prev.is_none());
}

// ============================================================================
// Link Shape
// ============================================================================

#[test]
fn test_links_carry_non_default_page_size_and_strip_legacy_param() {
    let mut provider =
        provider_for_request(&[("limit", "3"), ("per-page", "50"), ("tag", "x")]);
    provider.fetch_page().unwrap();

    let links = provider.links(false).unwrap();
    let next = links.next.unwrap();
    assert_eq!(next, "/items?limit=3&tag=x&next=8");
}

#[test]
fn test_links_omit_default_page_size() {
    // Default page size 20 swallows the whole 10-row dataset; a 5-row page
    // with an explicit default-sized link would be wrong, so page with the
    // default and check the limit param is absent.
    let mut provider = provider_for_request(&[]);
    let records = provider.fetch_page().unwrap();
    assert_eq!(records.len(), 10);
    assert_eq!(provider.links(false).unwrap(), Default::default());
}

#[test]
fn test_absolute_links() {
    let params = RequestParams::from_pairs([("limit", "3")]);
    let config = PageConfig::from_params("id", "/v2/items", &params);
    let urls = UrlBuilder::with_base("https://api.example.com").unwrap();
    let pagination = CursorPagination::new(config, params, urls).unwrap();
    let mut provider = KeysetProvider::new(store(), MemoryQuery::new(), pagination);

    provider.fetch_page().unwrap();
    let links = provider.links(true).unwrap();
    assert_eq!(
        links.next.unwrap(),
        "https://api.example.com/v2/items?limit=3&next=8"
    );
}

// ============================================================================
// Idempotence
// ============================================================================

#[test]
fn test_repeating_a_request_yields_the_same_page_and_links() {
    let run = || {
        let mut provider = provider_for_request(&[("limit", "3"), ("next", "8")]);
        let records = provider.fetch_page().unwrap();
        let links = provider.links(false).unwrap();
        (ids(&records), links)
    };

    let (first_ids, first_links) = run();
    let (second_ids, second_links) = run();
    assert_eq!(first_ids, second_ids);
    assert_eq!(first_links, second_links);
}
