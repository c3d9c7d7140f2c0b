//! Ranking order and exact scores on the sample tracker.

use super::common::{
    assert_close, indexed_engine, lexical_config, make_record, make_record_with_body,
    ranked_numbers, sample_records,
};
use issue_rank::{RankingConfig, RecordId, RecordSet, RelevanceEngine};

fn lexical_engine() -> RelevanceEngine {
    RelevanceEngine::new(lexical_config()).unwrap()
}

#[test]
fn test_title_hit_outranks_body_hit() {
    let store = sample_records();
    let results = lexical_engine().search("safari", &store, &store.ids());

    // #101: title 1.0, body 1 occurrence 0.5, fuzzy exact 0.5
    // → 1.0 + 0.5·0.5 + 0.3·0.5 = 1.4
    assert_close(results.get(RecordId(1)).unwrap().score, 1.4);
    // #104: body and fuzzy only → 0.25 + 0.15
    assert_close(results.get(RecordId(4)).unwrap().score, 0.4);
    assert_eq!(ranked_numbers(&results, &store), vec![101, 104]);
}

#[test]
fn test_issue_number_query_finds_record() {
    let store = sample_records();
    let results = lexical_engine().search("42", &store, &store.ids());

    let hit = results.get(RecordId(3)).unwrap();
    assert!(hit.evidence.number_match);
    // 2.0 number score × 0.8 metadata weight
    assert_close(hit.score, 1.6);
    assert_eq!(ranked_numbers(&results, &store), vec![42]);
}

#[test]
fn test_label_match_contributes() {
    let store = sample_records();
    let results = lexical_engine().search("auth", &store, &store.ids());

    let hit = results.get(RecordId(5)).unwrap();
    assert!(hit.evidence.label_matches.contains("auth"));
    // label 0.5 × 0.8 + fuzzy exact "auth" 0.5 × 0.3
    assert_close(hit.score, 0.55);
}

#[test]
fn test_typo_is_caught_by_fuzzy_signal() {
    let store = sample_records();
    let results = lexical_engine().search("safary", &store, &store.ids());

    let hit = results.get(RecordId(1)).unwrap();
    assert!(hit.visible);
    assert!(hit.evidence.title_matches.is_empty());
    assert_eq!(hit.evidence.fuzzy_matches.len(), 1);
    assert_eq!(hit.evidence.fuzzy_matches[0].word, "safari");
}

#[test]
fn test_accents_are_significant_by_default() {
    let store = RecordSet::new(vec![make_record(1, 1, "Caf\u{e9} crashes")]);
    let results = lexical_engine().search("cafe", &store, &store.ids());
    let hit = results.get(RecordId(1)).unwrap();
    assert!(hit.evidence.title_matches.is_empty());
    // only the fuzzy signal sees it: 0.75 similarity × 0.5 × 0.3
    assert_close(hit.score, 0.1125);

    let results = lexical_engine().search("CAF\u{c9}", &store, &store.ids());
    let hit = results.get(RecordId(1)).unwrap();
    assert!(hit.evidence.title_matches.contains("caf\u{e9}"));
}

#[cfg(feature = "unicode-normalization")]
#[test]
fn test_diacritic_folding_matches_both_directions() {
    let config = RankingConfig {
        fold_diacritics: true,
        ..lexical_config()
    };
    let engine = RelevanceEngine::new(config).unwrap();

    let store = RecordSet::new(vec![make_record(1, 1, "Caf\u{e9} crashes")]);
    let results = engine.search("cafe", &store, &store.ids());
    let hit = results.get(RecordId(1)).unwrap();
    assert!(hit.evidence.title_matches.contains("cafe"));
    // title 1.0 + prefix 0.5, fuzzy exact 0.5 × 0.3
    assert_close(hit.score, 1.65);

    let store = RecordSet::new(vec![make_record(1, 1, "Cafe crashes")]);
    let results = engine.search("caf\u{e9}", &store, &store.ids());
    assert!(results.get(RecordId(1)).unwrap().evidence.title_matches.contains("cafe"));
}

#[test]
fn test_fuzzy_threshold_is_strict() {
    let config = RankingConfig {
        fuzzy_threshold: 0.75,
        ..lexical_config()
    };
    let engine = RelevanceEngine::new(config).unwrap();

    // One edit in four characters is exactly 0.75: not above the threshold
    let store = RecordSet::new(vec![make_record(1, 1, "abce")]);
    let results = engine.search("abcd", &store, &store.ids());
    let result = results.get(RecordId(1)).unwrap();
    assert!(result.evidence.fuzzy_matches.is_empty());
    assert!(!result.visible);
    assert_eq!(result.score, 0.0);

    // One edit in five is 0.8
    let store = RecordSet::new(vec![make_record(1, 1, "abcdf")]);
    let results = engine.search("abcde", &store, &store.ids());
    let result = results.get(RecordId(1)).unwrap();
    assert_eq!(result.evidence.fuzzy_matches.len(), 1);
    assert_close(result.evidence.fuzzy_matches[0].score, 0.8);
    assert!(result.visible);
}

#[test]
fn test_ties_break_by_ascending_id() {
    let store = RecordSet::new(vec![
        make_record(9, 1, "duplicate title"),
        make_record(3, 2, "duplicate title"),
        make_record(5, 3, "duplicate title"),
    ]);
    let results = lexical_engine().search("duplicate", &store, &store.ids());
    let ids: Vec<RecordId> = results.ranked().iter().map(|(id, _)| *id).collect();
    assert_eq!(ids, vec![RecordId(3), RecordId(5), RecordId(9)]);
}

#[test]
fn test_body_signal_is_capped() {
    let body = "leak ".repeat(50);
    let store = RecordSet::new(vec![make_record_with_body(1, 1, "Memory", &body)]);
    let config = RankingConfig {
        title_weight: 0.0,
        fuzzy_weight: 0.0,
        metadata_weight: 0.0,
        vector_weight: 0.0,
        body_weight: 1.0,
        ..RankingConfig::default()
    };
    let engine = RelevanceEngine::new(config).unwrap();
    let results = engine.search("leak", &store, &store.ids());
    assert_close(results.get(RecordId(1)).unwrap().score, 1.0);
}

#[test]
fn test_vector_signal_reorders_with_weight() {
    let store = sample_records();
    let engine = indexed_engine(&store);
    let results = engine.search("session login", &store, &store.ids());
    let ranked = results.ranked();
    assert!(!ranked.is_empty());
    let top = ranked[0].1;
    assert!(top.evidence.vector_similarity > 0.0);
    assert!(top.evidence.vector_similarity <= 1.0);
}
