//! Queries keep running while the encoder comes up on another thread.

use super::common::sample_records;
use issue_rank::{
    EmbeddingIndex, Encoder, HashEncoder, RankingConfig, RecordId, RelevanceEngine,
};
use std::sync::{Arc, Barrier};
use std::thread;

#[test]
fn test_search_during_background_init() {
    let store = Arc::new(sample_records());
    let index = Arc::new(EmbeddingIndex::new(2));
    let engine = Arc::new(
        RelevanceEngine::with_index(RankingConfig::default(), Arc::clone(&index)).unwrap(),
    );

    let barrier = Arc::new(Barrier::new(2));
    let init = {
        let index = Arc::clone(&index);
        let store = Arc::clone(&store);
        let barrier = Arc::clone(&barrier);
        thread::spawn(move || {
            barrier.wait();
            index
                .encoder_slot()
                .initialize_with(|| Ok(Arc::new(HashEncoder::new(64)) as Arc<dyn Encoder>))
                .unwrap();
            let inputs = issue_rank::index_inputs(store.as_ref(), &store.ids());
            index.index_batch(&inputs).unwrap();
        })
    };

    barrier.wait();
    for _ in 0..20 {
        let results = engine.search("safari", store.as_ref(), &store.ids());
        // Lexical signals are there whatever the encoder is doing
        assert!(results.get(RecordId(1)).unwrap().visible);
    }
    init.join().unwrap();

    assert!(index.is_ready());
    assert_eq!(index.len(), store.len());
    let results = engine.search("safari", store.as_ref(), &store.ids());
    assert!(results.get(RecordId(1)).unwrap().evidence.vector_similarity > 0.0);
}

#[test]
fn test_parallel_index_batches_all_land() {
    let index = Arc::new(EmbeddingIndex::with_encoder(Arc::new(HashEncoder::new(32)), 3));
    let handles: Vec<_> = (0..4u64)
        .map(|t| {
            let index = Arc::clone(&index);
            thread::spawn(move || {
                let inputs: Vec<_> = (0..10u64)
                    .map(|i| issue_rank::IndexInput::new(t * 100 + i, format!("record {t} {i}")))
                    .collect();
                index.index_batch(&inputs).unwrap()
            })
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), 10);
    }
    assert_eq!(index.len(), 40);
}

#[test]
fn test_second_initializer_is_refused_while_first_runs() {
    let index = EmbeddingIndex::new(4);
    assert!(index.encoder_slot().begin_init());
    assert!(index
        .encoder_slot()
        .initialize_with(|| Ok(Arc::new(HashEncoder::new(8)) as Arc<dyn Encoder>))
        .is_err());
    assert!(index.encoder_slot().complete(Arc::new(HashEncoder::new(8))));
    assert!(index.is_ready());
}

#[test]
fn test_stored_vectors_survive_late_encoder_swap() {
    let index = EmbeddingIndex::with_encoder(Arc::new(HashEncoder::new(32)), 4);
    let inputs = [issue_rank::IndexInput::new(1, "login fails on safari")];
    index.index_batch(&inputs).unwrap();

    assert!(!index.encoder_slot().complete(Arc::new(HashEncoder::new(64))));
    assert_eq!(index.encoder_slot().encoder().unwrap().dim(), 32);
    let terms = vec!["safari".to_string()];
    assert!(index.similarity_to(RecordId(1), &terms).unwrap() > 0.0);
}
