//! Hybrid relevance ranking for issue-tracker records.
//!
//! Four independent signals score each record against a free-text query, and
//! a fixed set of weights folds them into one number:
//!
//! - **Lexical**: substring hits in title and body, fenced code block hits
//! - **Fuzzy**: best edit-distance match per term across all content words
//! - **Metadata**: exact issue number, label substrings
//! - **Vector**: cosine similarity against per-record embeddings
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌──────────────┐     ┌──────────────┐
//! │  fuzzy      │────▶│  scoring     │────▶│   engine     │
//! │ (similarity)│     │ (title, body,│     │ (search,     │
//! └─────────────┘     │  fuzzy, meta)│     │  visibility) │
//!                     └──────────────┘     └──────────────┘
//! ┌─────────────┐     ┌──────────────┐            ▲
//! │  encoder    │────▶│  embedding   │────────────┘
//! │ (state mach)│     │  index       │
//! └─────────────┘     └──────────────┘
//! ```
//!
//! Any signal can be missing without breaking the others: no body scores zero
//! body, no embeddings score zero vector, an unknown id gets an invisible
//! result while the rest of the batch is scored.
//!
//! # Usage
//!
//! ```ignore
//! use issue_rank::{RankingConfig, RecordSet, RelevanceEngine};
//!
//! let store = RecordSet::new(records);
//! let engine = RelevanceEngine::with_hash_encoder(RankingConfig::default())?;
//! engine.index_records(&store, &store.ids())?;
//!
//! let results = engine.search("login safari", &store, &store.ids());
//! for (id, result) in results.ranked() {
//!     println!("{id} {:.3}", result.score);
//! }
//! ```

pub mod config;
pub mod embedding;
pub mod engine;
pub mod error;
pub mod fuzzy;
pub mod scoring;
pub mod testing;
pub mod types;
pub mod util;

pub use config::RankingConfig;
pub use embedding::{
    EmbeddingIndex, Encoder, EncoderSlot, EncoderState, HashEncoder, IndexInput, ScoredId,
};
pub use engine::{index_inputs, RecordSet, RecordStore, RelevanceEngine, SearchResults};
pub use error::{RankError, Result};
pub use fuzzy::{levenshtein_distance, levenshtein_within, similarity};
pub use scoring::ranking::{compare_results, dcg, ndcg};
pub use scoring::{
    body_score, fuzzy_score, lexical_signals, metadata_score, title_score, SignalScores,
};
pub use types::{
    FuzzyMatch, MatchEvidence, Query, Record, RecordId, ResultKind, SearchResult, BROWSE_SCORE,
};
pub use util::normalize::{normalize, Folding};
