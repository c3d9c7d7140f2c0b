// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The id → vector store and the queries that run against it.
//!
//! # Concurrency
//!
//! - The map sits behind a `parking_lot::RwLock`. Queries take read locks and
//!   run concurrently with each other.
//! - `index_batch` encodes each chunk *outside* the lock, then writes the whole
//!   chunk under one write-lock acquisition. Readers see either the old vector
//!   or the new one for an id, never a half-written one.
//! - A separate write gate serializes whole batches, so two concurrent
//!   re-indexes cannot interleave their chunks.
//! - Cancellation is checked between chunks. Chunks already written stay.
//!
//! # Missing vectors
//!
//! `similarity_to` treats an unindexed id as similarity 0: the engine scores
//! records before their embeddings exist and must not fail for it.
//! `similarity_score` is the strict boundary and returns `DocumentNotIndexed`,
//! for callers that expect the document to be indexed already.

use super::encoder::{Encoder, EncoderSlot};
use super::vector::{add_assign, cosine_unit, l2_normalize};
use crate::config::DEFAULT_CHUNK_SIZE;
use crate::error::{RankError, Result};
use crate::types::RecordId;
use crate::util::normalize::Folding;
use parking_lot::{Mutex, RwLock};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info};

/// One record's id and its searchable text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexInput {
    pub id: RecordId,
    pub content: String,
}

impl IndexInput {
    pub fn new(id: u64, content: impl Into<String>) -> Self {
        Self {
            id: RecordId(id),
            content: content.into(),
        }
    }
}

/// A `top_k` hit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoredId {
    pub id: RecordId,
    pub score: f64,
}

#[derive(Debug)]
pub struct EmbeddingIndex {
    encoder: EncoderSlot,
    vectors: RwLock<HashMap<RecordId, Vec<f32>>>,
    write_gate: Mutex<()>,
    chunk_size: usize,
    folding: Folding,
}

impl Default for EmbeddingIndex {
    fn default() -> Self {
        Self::new(DEFAULT_CHUNK_SIZE)
    }
}

impl EmbeddingIndex {
    /// An index whose encoder has not been initialized yet.
    pub fn new(chunk_size: usize) -> Self {
        Self::from_slot(EncoderSlot::new(), chunk_size)
    }

    /// An index with a ready encoder.
    pub fn with_encoder(encoder: Arc<dyn Encoder>, chunk_size: usize) -> Self {
        Self::from_slot(EncoderSlot::ready(encoder), chunk_size)
    }

    fn from_slot(encoder: EncoderSlot, chunk_size: usize) -> Self {
        Self {
            encoder,
            vectors: RwLock::new(HashMap::new()),
            write_gate: Mutex::new(()),
            chunk_size: chunk_size.max(1),
            folding: Folding::default(),
        }
    }

    /// Fold indexed content and query text with `folding` instead of plain
    /// lowercasing.
    pub fn with_folding(mut self, folding: Folding) -> Self {
        self.folding = folding;
        self
    }

    pub fn folding(&self) -> Folding {
        self.folding
    }

    /// The encoder slot, for driving initialization.
    pub fn encoder_slot(&self) -> &EncoderSlot {
        &self.encoder
    }

    /// True once the encoder can serve queries.
    pub fn is_ready(&self) -> bool {
        self.encoder.is_ready()
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    pub fn len(&self) -> usize {
        self.vectors.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.read().is_empty()
    }

    pub fn contains(&self, id: RecordId) -> bool {
        self.vectors.read().contains_key(&id)
    }

    /// Copy of the stored unit vector.
    pub fn vector(&self, id: RecordId) -> Option<Vec<f32>> {
        self.vectors.read().get(&id).cloned()
    }

    pub fn remove(&self, id: RecordId) -> bool {
        let _gate = self.write_gate.lock();
        self.vectors.write().remove(&id).is_some()
    }

    pub fn clear(&self) {
        let _gate = self.write_gate.lock();
        self.vectors.write().clear();
    }

    // =========================================================================
    // INDEXING
    // =========================================================================

    /// Encode, normalize and store every record, overwriting earlier vectors.
    ///
    /// Returns the number of records written.
    pub fn index_batch(&self, records: &[IndexInput]) -> Result<usize> {
        let never = AtomicBool::new(false);
        self.index_batch_with(records, self.chunk_size, &never, |_, _| {})
    }

    /// `index_batch` with an explicit chunk size, a cancellation flag checked
    /// before every chunk, and a progress callback `(done, total)`.
    ///
    /// Chunking never changes the stored vectors: each text is encoded and
    /// normalized independently.
    pub fn index_batch_with<P>(
        &self,
        records: &[IndexInput],
        chunk_size: usize,
        cancel: &AtomicBool,
        mut progress: P,
    ) -> Result<usize>
    where
        P: FnMut(usize, usize),
    {
        if records.is_empty() {
            return Ok(0);
        }
        let encoder = self.encoder.encoder()?;
        let dim = encoder.dim();
        let total = records.len();
        let mut completed = 0;

        let _gate = self.write_gate.lock();
        for chunk in records.chunks(chunk_size.max(1)) {
            if cancel.load(Ordering::Relaxed) {
                debug!(completed, total, "index batch cancelled");
                return Err(RankError::Cancelled { completed, total });
            }

            let texts: Vec<String> = chunk.iter().map(|r| self.folding.apply(&r.content)).collect();
            let encoded = encoder.encode_batch(&texts)?;
            if encoded.len() != chunk.len() {
                return Err(RankError::EncoderFailed {
                    reason: format!(
                        "{} returned {} vectors for {} inputs",
                        encoder.name(),
                        encoded.len(),
                        chunk.len()
                    ),
                });
            }

            let mut normalized = Vec::with_capacity(encoded.len());
            for mut v in encoded {
                if v.len() != dim {
                    return Err(RankError::DimensionMismatch {
                        expected: dim,
                        got: v.len(),
                    });
                }
                l2_normalize(&mut v);
                normalized.push(v);
            }

            {
                let mut map = self.vectors.write();
                for (record, v) in chunk.iter().zip(normalized) {
                    map.insert(record.id, v);
                }
            }

            completed += chunk.len();
            progress(completed, total);
            debug!(completed, total, "indexed embedding chunk");
        }

        info!(records = total, encoder = encoder.name(), "embedding index updated");
        Ok(total)
    }

    // =========================================================================
    // QUERIES
    // =========================================================================

    /// Sum of the per-term encodings, normalized.
    ///
    /// Each term is encoded on its own so a multi-term query accumulates the
    /// meaning of its parts instead of asking the encoder to parse a phrase.
    pub fn encode_terms(&self, terms: &[String]) -> Result<Vec<f32>> {
        let encoder = self.encoder.encoder()?;
        let dim = encoder.dim();
        let mut sum = vec![0.0f32; dim];
        for term in terms {
            let v = encoder.encode(term)?;
            if v.len() != dim {
                return Err(RankError::DimensionMismatch {
                    expected: dim,
                    got: v.len(),
                });
            }
            add_assign(&mut sum, &v);
        }
        l2_normalize(&mut sum);
        Ok(sum)
    }

    /// Clamped cosine between a stored vector and an already-normalized query
    /// vector. 0.0 when `id` has no vector.
    pub fn similarity_to_vector(&self, id: RecordId, query: &[f32]) -> f64 {
        self.vectors
            .read()
            .get(&id)
            .map_or(0.0, |stored| cosine_unit(stored, query))
    }

    /// Similarity between a record and the query terms, in `[0, 1]`.
    ///
    /// Returns 0 without touching the encoder when `id` is not indexed or
    /// `terms` is empty. Fails with `EncoderNotReady` otherwise if the encoder
    /// is not up.
    pub fn similarity_to(&self, id: RecordId, terms: &[String]) -> Result<f64> {
        if terms.is_empty() || !self.contains(id) {
            return Ok(0.0);
        }
        let query = self.encode_terms(terms)?;
        Ok(self.similarity_to_vector(id, &query))
    }

    /// Strict variant of `similarity_to` over raw query text.
    ///
    /// Unlike `similarity_to`, an unindexed id is an error here.
    pub fn similarity_score(&self, id: RecordId, query_text: &str) -> Result<f64> {
        if !self.contains(id) {
            return Err(RankError::DocumentNotIndexed { id });
        }
        let terms = self.folding.terms(query_text);
        if terms.is_empty() {
            return Ok(0.0);
        }
        let query = self.encode_terms(&terms)?;
        Ok(self.similarity_to_vector(id, &query))
    }

    /// The `k` most similar records to the whole query text, best first.
    ///
    /// Ties break by ascending id. A blank query or `k == 0` returns nothing
    /// without touching the encoder.
    pub fn top_k(&self, query_text: &str, k: usize) -> Result<Vec<ScoredId>> {
        let text = self.folding.apply(query_text.trim());
        if k == 0 || text.is_empty() {
            return Ok(Vec::new());
        }
        let encoder = self.encoder.encoder()?;
        let mut query = encoder.encode(&text)?;
        if query.len() != encoder.dim() {
            return Err(RankError::DimensionMismatch {
                expected: encoder.dim(),
                got: query.len(),
            });
        }
        l2_normalize(&mut query);

        let mut scored: Vec<ScoredId> = self
            .vectors
            .read()
            .iter()
            .map(|(&id, stored)| ScoredId {
                id,
                score: cosine_unit(stored, &query),
            })
            .collect();
        scored.sort_by(|a, b| b.score.total_cmp(&a.score).then_with(|| a.id.cmp(&b.id)));
        scored.truncate(k);
        Ok(scored)
    }
}
