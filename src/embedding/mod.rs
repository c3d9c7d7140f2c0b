// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Semantic signal: dense vectors per record and cosine similarity against
//! query text.
//!
//! ```text
//! ┌──────────────┐   encode    ┌─────────────────┐  read-locked   ┌──────────────┐
//! │ EncoderSlot  │────────────▶│ EmbeddingIndex  │───────────────▶│ similarity_to│
//! │ (state mach.)│  per chunk  │ id → unit vector│  dot products  │ top_k        │
//! └──────────────┘             └─────────────────┘                └──────────────┘
//! ```
//!
//! Vectors are normalized once at storage time, so every similarity is a dot
//! product clamped to `[0, 1]`.

pub mod encoder;
pub mod index;
pub mod vector;

pub use encoder::{Encoder, EncoderSlot, EncoderState, HashEncoder};
pub use index::{EmbeddingIndex, IndexInput, ScoredId};
