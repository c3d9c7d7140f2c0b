// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Weights and thresholds, fixed for the lifetime of an engine.
//!
//! The engine takes a `RankingConfig` by value at construction and never hands
//! out a mutable reference, so a running engine's scoring cannot drift. Weights
//! are deliberately not required to sum to 1.0: the absolute scale of `score`
//! is the caller's choice.
//!
//! JSON keys are camelCase and every key is optional:
//!
//! ```json
//! { "titleWeight": 1.0, "vectorWeight": 0.0, "fuzzyThreshold": 0.8 }
//! ```

use crate::error::{RankError, Result};
use crate::util::normalize::Folding;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default number of records encoded per `index_batch` chunk.
pub const DEFAULT_CHUNK_SIZE: usize = 32;

/// Default embedding width.
pub const DEFAULT_EMBEDDING_DIM: usize = 384;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RankingConfig {
    pub title_weight: f64,
    pub body_weight: f64,
    pub fuzzy_weight: f64,
    pub metadata_weight: f64,
    pub vector_weight: f64,
    /// A fuzzy candidate counts only when its similarity is strictly above this.
    pub fuzzy_threshold: f64,
    /// Added per query term found in the title.
    pub exact_match_bonus: f64,
    /// Multiplier on each term's best fuzzy similarity.
    pub fuzzy_match_weight: f64,
    pub index_chunk_size: usize,
    pub embedding_dim: usize,
    /// Strip diacritics as well as case before matching ("café" = "cafe").
    pub fold_diacritics: bool,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            title_weight: 1.0,
            body_weight: 0.5,
            fuzzy_weight: 0.3,
            metadata_weight: 0.8,
            vector_weight: 0.6,
            fuzzy_threshold: 0.7,
            exact_match_bonus: 1.0,
            fuzzy_match_weight: 0.5,
            index_chunk_size: DEFAULT_CHUNK_SIZE,
            embedding_dim: DEFAULT_EMBEDDING_DIM,
            fold_diacritics: false,
        }
    }
}

impl RankingConfig {
    /// The text folding every comparison uses under this config.
    pub fn folding(&self) -> Folding {
        Folding::from_diacritics(self.fold_diacritics)
    }

    /// Parse from JSON, then validate.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: RankingConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read a JSON config file, then validate.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Reject values that would make scores meaningless.
    pub fn validate(&self) -> Result<()> {
        let weights = [
            ("titleWeight", self.title_weight),
            ("bodyWeight", self.body_weight),
            ("fuzzyWeight", self.fuzzy_weight),
            ("metadataWeight", self.metadata_weight),
            ("vectorWeight", self.vector_weight),
            ("exactMatchBonus", self.exact_match_bonus),
            ("fuzzyMatchWeight", self.fuzzy_match_weight),
        ];
        for (field, value) in weights {
            if !value.is_finite() || value < 0.0 {
                return Err(RankError::InvalidConfig {
                    field,
                    reason: format!("must be a finite value >= 0, got {}", value),
                });
            }
        }

        if !(0.0..=1.0).contains(&self.fuzzy_threshold) {
            return Err(RankError::InvalidConfig {
                field: "fuzzyThreshold",
                reason: format!("must be within [0, 1], got {}", self.fuzzy_threshold),
            });
        }
        if self.index_chunk_size == 0 {
            return Err(RankError::InvalidConfig {
                field: "indexChunkSize",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.embedding_dim == 0 {
            return Err(RankError::InvalidConfig {
                field: "embeddingDim",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}
