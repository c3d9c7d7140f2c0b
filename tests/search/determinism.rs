//! Same inputs, same outputs, regardless of scheduling or chunking.

use super::common::{indexed_engine, indexed_engine_with, sample_records};
use issue_rank::{RankingConfig, RecordId};

#[test]
fn test_repeated_search_is_identical() {
    let store = sample_records();
    let engine = indexed_engine(&store);
    let first = engine.search("login crash safari", &store, &store.ids());
    for _ in 0..10 {
        let again = engine.search("login crash safari", &store, &store.ids());
        assert_eq!(first, again);
        assert_eq!(first.ranked(), again.ranked());
    }
}

#[test]
fn test_chunk_size_does_not_change_scores() {
    let store = sample_records();
    let small = indexed_engine_with(
        RankingConfig {
            index_chunk_size: 1,
            ..RankingConfig::default()
        },
        &store,
    );
    let large = indexed_engine_with(
        RankingConfig {
            index_chunk_size: 32,
            ..RankingConfig::default()
        },
        &store,
    );
    let a = small.search("dark mode sidebar", &store, &store.ids());
    let b = large.search("dark mode sidebar", &store, &store.ids());
    assert_eq!(a, b);
}

#[test]
fn test_request_order_does_not_matter() {
    let store = sample_records();
    let engine = indexed_engine(&store);
    let mut ids = store.ids();
    let forward = engine.search("bug", &store, &ids);
    ids.reverse();
    let backward = engine.search("bug", &store, &ids);
    assert_eq!(forward, backward);
    assert!(forward.get(RecordId(1)).unwrap().visible);
}
