//! Missing data degrades one signal, never the batch.

use super::common::{lexical_config, make_record, sample_records};
use issue_rank::{
    EmbeddingIndex, Encoder, EncoderState, RankError, RankingConfig, RecordId, RecordSet,
    RelevanceEngine, ResultKind,
};
use std::sync::Arc;

#[test]
fn test_unknown_ids_are_unresolved() {
    let store = sample_records();
    let engine = RelevanceEngine::new(lexical_config()).unwrap();
    let ids = vec![RecordId(1), RecordId(77), RecordId(4)];
    let results = engine.search("safari", &store, &ids);
    assert_eq!(results.len(), 3);
    let missing = results.get(RecordId(77)).unwrap();
    assert_eq!(missing.kind, ResultKind::Unresolved);
    assert!(!missing.visible);
    assert_eq!(missing.score, 0.0);
    assert_eq!(results.visible_count(), 2);
}

#[test]
fn test_failed_encoder_zeroes_vector_signal() {
    let store = sample_records();
    let index = Arc::new(EmbeddingIndex::new(8));
    let err = index
        .encoder_slot()
        .initialize_with(|| {
            Err(RankError::EncoderFailed {
                reason: "model file missing".to_string(),
            })
        })
        .unwrap_err();
    assert!(matches!(err, RankError::EncoderFailed { .. }));
    assert!(matches!(index.encoder_slot().state(), EncoderState::Failed(_)));

    let engine = RelevanceEngine::with_index(RankingConfig::default(), index).unwrap();
    let results = engine.search("safari", &store, &store.ids());
    assert!(results.visible_count() > 0);
    for (_, result) in results.iter() {
        assert_eq!(result.evidence.vector_similarity, 0.0);
    }
}

#[test]
fn test_unindexed_record_scores_zero_vector() {
    let store = RecordSet::new(vec![
        make_record(1, 1, "Sidebar flickers"),
        make_record(2, 2, "Sidebar flickers"),
    ]);
    let engine = RelevanceEngine::with_hash_encoder(RankingConfig::default()).unwrap();
    engine.index_records(&store, &[RecordId(1)]).unwrap();

    let results = engine.search("sidebar", &store, &store.ids());
    assert!(results.get(RecordId(1)).unwrap().evidence.vector_similarity > 0.0);
    assert_eq!(results.get(RecordId(2)).unwrap().evidence.vector_similarity, 0.0);

    assert!(matches!(
        engine.index().similarity_score(RecordId(2), "sidebar"),
        Err(RankError::DocumentNotIndexed { id: RecordId(2) })
    ));
    assert_eq!(
        engine
            .index()
            .similarity_to(RecordId(2), &["sidebar".to_string()])
            .unwrap(),
        0.0
    );
}

struct WrongWidth;

impl Encoder for WrongWidth {
    fn dim(&self) -> usize {
        4
    }

    fn encode(&self, _text: &str) -> issue_rank::Result<Vec<f32>> {
        Ok(vec![1.0; 3])
    }
}

#[test]
fn test_dimension_mismatch_is_reported() {
    let index = EmbeddingIndex::with_encoder(Arc::new(WrongWidth), 4);
    let inputs = vec![issue_rank::IndexInput::new(1, "anything")];
    assert!(matches!(
        index.index_batch(&inputs),
        Err(RankError::DimensionMismatch {
            expected: 4,
            got: 3
        })
    ));
    assert!(index.is_empty());
}
