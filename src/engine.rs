// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The relevance engine: one query in, one result per requested record out.
//!
//! ```text
//! query text ──parse──▶ Query ─┬─▶ lexical signals (per record) ─┐
//!                              │                                  ├─▶ Σ wᵢ·sᵢ ─▶ SearchResult
//!                              └─▶ encode once ─▶ cosine (per id)─┘
//! ```
//!
//! Every record is scored independently from shared read-only inputs (query,
//! config, embedding store), so the batch runs on rayon when the `parallel`
//! feature is on and in a plain loop otherwise, with identical output. The
//! whole batch is joined before `search` returns: callers never see a
//! partially filled result map.
//!
//! # Degradation
//!
//! - Unknown ids get an invisible `Unresolved` result; the rest of the batch
//!   is still scored.
//! - An encoder that is not ready (or failed) contributes 0 to every vector
//!   score instead of failing the query.

use crate::config::RankingConfig;
use crate::embedding::{EmbeddingIndex, HashEncoder, IndexInput};
use crate::error::{RankError, Result};
use crate::scoring::lexical_signals;
use crate::scoring::ranking::{compare_results, ndcg};
use crate::types::{MatchEvidence, Query, Record, RecordId, ResultKind, SearchResult};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tracing::{debug, warn};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

// =============================================================================
// RECORD STORE
// =============================================================================

/// Read access to the caller's records. The engine borrows, never copies.
pub trait RecordStore: Sync {
    fn get(&self, id: RecordId) -> Option<&Record>;
}

impl RecordStore for HashMap<RecordId, Record> {
    fn get(&self, id: RecordId) -> Option<&Record> {
        HashMap::get(self, &id)
    }
}

impl RecordStore for BTreeMap<RecordId, Record> {
    fn get(&self, id: RecordId) -> Option<&Record> {
        BTreeMap::get(self, &id)
    }
}

/// Records in load order with an id lookup.
#[derive(Debug, Clone, Default)]
pub struct RecordSet {
    records: Vec<Record>,
    positions: HashMap<RecordId, usize>,
}

impl RecordSet {
    /// Build from records. A later record with a duplicate id replaces the
    /// earlier one in lookups.
    pub fn new(records: Vec<Record>) -> Self {
        let positions = records
            .iter()
            .enumerate()
            .map(|(i, r)| (r.id, i))
            .collect();
        Self { records, positions }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Ids in load order.
    pub fn ids(&self) -> Vec<RecordId> {
        self.records.iter().map(|r| r.id).collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl RecordStore for RecordSet {
    fn get(&self, id: RecordId) -> Option<&Record> {
        self.positions.get(&id).map(|&i| &self.records[i])
    }
}

impl FromIterator<Record> for RecordSet {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

// =============================================================================
// RESULTS
// =============================================================================

/// The completed result map for one query.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SearchResults {
    results: HashMap<RecordId, SearchResult>,
    ndcg: Option<f64>,
}

impl SearchResults {
    pub fn get(&self, id: RecordId) -> Option<&SearchResult> {
        self.results.get(&id)
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (RecordId, &SearchResult)> {
        self.results.iter().map(|(&id, r)| (id, r))
    }

    pub fn visible_count(&self) -> usize {
        self.results.values().filter(|r| r.visible).count()
    }

    /// Visible results, best first, ties by ascending id.
    pub fn ranked(&self) -> Vec<(RecordId, &SearchResult)> {
        let mut ranked: Vec<(RecordId, &SearchResult)> =
            self.iter().filter(|(_, r)| r.visible).collect();
        ranked.sort_by(|a, b| compare_results(*a, *b));
        ranked
    }

    /// NDCG over the visible scores, when diagnostics were enabled.
    pub fn ndcg(&self) -> Option<f64> {
        self.ndcg
    }

    pub fn into_map(self) -> HashMap<RecordId, SearchResult> {
        self.results
    }
}

// =============================================================================
// ENGINE
// =============================================================================

/// Scores records against queries with fixed weights.
#[derive(Debug)]
pub struct RelevanceEngine {
    config: RankingConfig,
    index: Arc<EmbeddingIndex>,
    diagnostics: bool,
}

impl RelevanceEngine {
    /// Engine with an empty index whose encoder is not initialized yet.
    pub fn new(config: RankingConfig) -> Result<Self> {
        let index =
            Arc::new(EmbeddingIndex::new(config.index_chunk_size).with_folding(config.folding()));
        Self::with_index(config, index)
    }

    /// Engine sharing an existing index.
    ///
    /// The index keeps its own folding; build it with
    /// `with_folding(config.folding())` when `fold_diacritics` is set.
    pub fn with_index(config: RankingConfig, index: Arc<EmbeddingIndex>) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            index,
            diagnostics: false,
        })
    }

    /// Engine with the deterministic `HashEncoder` ready to go.
    pub fn with_hash_encoder(config: RankingConfig) -> Result<Self> {
        let encoder = Arc::new(HashEncoder::new(config.embedding_dim));
        let index = Arc::new(
            EmbeddingIndex::with_encoder(encoder, config.index_chunk_size)
                .with_folding(config.folding()),
        );
        Self::with_index(config, index)
    }

    /// Compute the NDCG diagnostic on every search.
    pub fn diagnostics(mut self, enabled: bool) -> Self {
        self.diagnostics = enabled;
        self
    }

    pub fn config(&self) -> &RankingConfig {
        &self.config
    }

    pub fn index(&self) -> &Arc<EmbeddingIndex> {
        &self.index
    }

    /// Embed the given records. Ids missing from the store are skipped.
    pub fn index_records<S>(&self, store: &S, ids: &[RecordId]) -> Result<usize>
    where
        S: RecordStore + ?Sized,
    {
        let inputs = index_inputs(store, ids);
        self.index.index_batch(&inputs)
    }

    /// Score every requested id against `query_text`.
    pub fn search<S>(&self, query_text: &str, store: &S, ids: &[RecordId]) -> SearchResults
    where
        S: RecordStore + ?Sized,
    {
        let query = Query::parse_with(query_text, self.config.folding());
        if query.is_empty() {
            let results = ids.iter().map(|&id| (id, SearchResult::browse())).collect();
            return self.finish(results);
        }

        let query_vector = self.query_vector(&query);
        let query_vector = query_vector.as_deref();

        let score_one = |&id: &RecordId| -> (RecordId, SearchResult) {
            let result = match store.get(id) {
                Some(record) => self.score_record(record, &query, query_vector),
                None => SearchResult::unresolved(),
            };
            (id, result)
        };

        #[cfg(feature = "parallel")]
        let scored: Vec<(RecordId, SearchResult)> = ids.par_iter().map(score_one).collect();
        #[cfg(not(feature = "parallel"))]
        let scored: Vec<(RecordId, SearchResult)> = ids.iter().map(score_one).collect();

        let unresolved = scored
            .iter()
            .filter(|(_, r)| r.kind == ResultKind::Unresolved)
            .count();
        if unresolved > 0 {
            warn!(unresolved, requested = ids.len(), "record ids not found in store");
        }

        let results: HashMap<RecordId, SearchResult> = scored.into_iter().collect();
        debug!(
            terms = query.len(),
            requested = ids.len(),
            visible = results.values().filter(|r| r.visible).count(),
            "search complete"
        );
        self.finish(results)
    }

    /// Score one resolved record.
    ///
    /// `query_vector` is the normalized per-term query embedding, or `None`
    /// when the vector signal is unavailable.
    pub fn score_record(
        &self,
        record: &Record,
        query: &Query,
        query_vector: Option<&[f32]>,
    ) -> SearchResult {
        let mut evidence = MatchEvidence::default();
        let mut signals = lexical_signals(record, query, &self.config, &mut evidence);

        signals.vector = query_vector
            .map_or(0.0, |q| self.index.similarity_to_vector(record.id, q));
        evidence.vector_similarity = signals.vector;

        SearchResult::scored(signals.weighted(&self.config), evidence)
    }

    /// Score a single id, failing instead of degrading when it is missing.
    pub fn score_id<S>(&self, query_text: &str, store: &S, id: RecordId) -> Result<SearchResult>
    where
        S: RecordStore + ?Sized,
    {
        let record = store.get(id).ok_or(RankError::RecordNotFound { id })?;
        let query = Query::parse_with(query_text, self.config.folding());
        if query.is_empty() {
            return Ok(SearchResult::browse());
        }
        let query_vector = self.query_vector(&query);
        Ok(self.score_record(record, &query, query_vector.as_deref()))
    }

    /// Encode the query once for the whole batch.
    ///
    /// Computed even when `vector_weight` is 0 so the evidence still reports
    /// the similarity; the weight alone decides its contribution.
    fn query_vector(&self, query: &Query) -> Option<Vec<f32>> {
        if self.index.is_empty() {
            return None;
        }
        match self.index.encode_terms(query.terms()) {
            Ok(v) => Some(v),
            Err(e) => {
                debug!(error = %e, "vector signal unavailable for this query");
                None
            }
        }
    }

    fn finish(&self, results: HashMap<RecordId, SearchResult>) -> SearchResults {
        let mut out = SearchResults { results, ndcg: None };
        if self.diagnostics {
            let scores: Vec<f64> = out.ranked().iter().map(|(_, r)| r.score).collect();
            out.ndcg = Some(ndcg(&scores));
        }
        out
    }
}

/// `{id, content}` pairs for the records that resolve.
pub fn index_inputs<S>(store: &S, ids: &[RecordId]) -> Vec<IndexInput>
where
    S: RecordStore + ?Sized,
{
    ids.iter()
        .filter_map(|&id| store.get(id))
        .map(|record| IndexInput {
            id: record.id,
            content: record.searchable_content(),
        })
        .collect()
}
