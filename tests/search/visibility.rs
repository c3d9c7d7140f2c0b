//! Visibility rules: positive score or exact issue number.

use super::common::{lexical_config, make_record, make_record_with_labels, sample_records};
use issue_rank::{
    RankingConfig, RecordId, RecordSet, RelevanceEngine, ResultKind, BROWSE_SCORE,
};

#[test]
fn test_blank_query_shows_everything() {
    let store = sample_records();
    let engine = RelevanceEngine::new(RankingConfig::default()).unwrap();
    for query in ["", "   ", "\t\n"] {
        let results = engine.search(query, &store, &store.ids());
        assert_eq!(results.visible_count(), store.len());
        for (_, result) in results.iter() {
            assert_eq!(result.kind, ResultKind::Browse);
            assert_eq!(result.score, BROWSE_SCORE);
            assert!(result.evidence.is_empty());
        }
    }
}

#[test]
fn test_non_matching_records_are_hidden_with_zero_score() {
    let store = sample_records();
    let engine = RelevanceEngine::new(lexical_config()).unwrap();
    let results = engine.search("zzzqqq", &store, &store.ids());
    assert_eq!(results.visible_count(), 0);
    for (_, result) in results.iter() {
        assert!(!result.visible);
        assert_eq!(result.score, 0.0);
        assert_eq!(result.kind, ResultKind::Scored);
    }
}

#[test]
fn test_number_match_visible_even_with_zero_weights() {
    let config = RankingConfig {
        title_weight: 0.0,
        body_weight: 0.0,
        fuzzy_weight: 0.0,
        metadata_weight: 0.0,
        vector_weight: 0.0,
        ..RankingConfig::default()
    };
    let engine = RelevanceEngine::new(config).unwrap();
    let store = RecordSet::new(vec![
        make_record(1, 314, "Anything"),
        make_record(2, 315, "Anything"),
    ]);
    let results = engine.search("314", &store, &store.ids());
    let hit = results.get(RecordId(1)).unwrap();
    assert!(hit.visible);
    assert!(hit.evidence.number_match);
    assert!(!results.get(RecordId(2)).unwrap().visible);
}

#[test]
fn test_zero_weight_signal_still_records_evidence() {
    let config = RankingConfig {
        metadata_weight: 0.0,
        ..lexical_config()
    };
    let engine = RelevanceEngine::new(config).unwrap();
    let store = RecordSet::new(vec![make_record_with_labels(1, 1, "Untitled", &["xyzlabel"])]);
    let results = engine.search("xyzlabel", &store, &store.ids());
    let result = results.get(RecordId(1)).unwrap();
    assert!(result.evidence.label_matches.contains("xyzlabel"));
    // fuzzy still sees the label word
    assert!(result.visible);
}

#[test]
fn test_only_requested_ids_are_scored() {
    let store = sample_records();
    let engine = RelevanceEngine::new(lexical_config()).unwrap();
    let results = engine.search("safari", &store, &[RecordId(4)]);
    assert_eq!(results.len(), 1);
    assert!(results.get(RecordId(1)).is_none());
}
