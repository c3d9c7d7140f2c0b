// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Everything that can go wrong while indexing or ranking.
//!
//! Most failures here are contained. A missing record or an unindexed document
//! degrades to a zero score inside the engine, and an encoder that never came up
//! only switches off the vector signal. The variants still exist so the direct
//! boundaries (`EmbeddingIndex::similarity_score`, `EncoderSlot::encoder`) can
//! say precisely what was missing.

use crate::types::RecordId;
use thiserror::Error;

/// Error type for ranking, indexing and configuration.
#[derive(Error, Debug)]
pub enum RankError {
    /// The embedding encoder has not finished initializing.
    #[error("embedding encoder is not ready")]
    EncoderNotReady,

    /// Encoder initialization failed; the vector signal stays at zero.
    #[error("embedding encoder failed to initialize: {reason}")]
    EncoderFailed { reason: String },

    /// The requested id is absent from the record store.
    #[error("record {id} not found")]
    RecordNotFound { id: RecordId },

    /// No embedding is stored for this id.
    #[error("record {id} has no embedding")]
    DocumentNotIndexed { id: RecordId },

    /// The encoder produced a vector of the wrong length.
    #[error("embedding dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    /// A configuration value is out of range.
    #[error("invalid config `{field}`: {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    /// `index_batch` was abandoned between chunks.
    #[error("indexing cancelled after {completed} of {total} records")]
    Cancelled { completed: usize, total: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, RankError>;
