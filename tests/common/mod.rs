//! Shared test utilities and fixtures.

#![allow(dead_code)]

use issue_rank::{RankingConfig, RecordSet, RelevanceEngine, SearchResults};

// Re-export canonical test utilities from issue_rank::testing
pub use issue_rank::testing::{
    make_record, make_record_with_body, make_record_with_labels, sample_records,
};

/// Default config with the hash encoder, every sample record embedded.
pub fn indexed_engine(store: &RecordSet) -> RelevanceEngine {
    indexed_engine_with(RankingConfig::default(), store)
}

pub fn indexed_engine_with(config: RankingConfig, store: &RecordSet) -> RelevanceEngine {
    let engine = RelevanceEngine::with_hash_encoder(config).unwrap();
    engine.index_records(store, &store.ids()).unwrap();
    engine
}

/// Config with only lexical signals, for exact-score assertions.
pub fn lexical_config() -> RankingConfig {
    RankingConfig {
        vector_weight: 0.0,
        ..RankingConfig::default()
    }
}

/// Issue numbers of the visible results, best first.
pub fn ranked_numbers(results: &SearchResults, store: &RecordSet) -> Vec<u64> {
    use issue_rank::RecordStore;
    results
        .ranked()
        .iter()
        .filter_map(|(id, _)| store.get(*id).map(|r| r.number))
        .collect()
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}
