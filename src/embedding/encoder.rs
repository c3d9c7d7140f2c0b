// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Text encoders and the readiness state machine around them.
//!
//! A real encoder is usually a model that takes a while to load and may fail
//! to. Scoring must never wait for it, so the encoder lives in an `EncoderSlot`
//! that callers check instead of block on:
//!
//! ```text
//! Uninitialized ──begin_init──▶ Initializing ──complete──▶ Ready
//!       ▲                            │
//!       │                            └────fail────▶ Failed ──begin_init──┐
//!       └────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `HashEncoder` is the deterministic fallback: FNV-1a feature hashing of word
//! unigrams and character trigrams into signed buckets. No model, no I/O, and
//! the same text always lands on the same vector.

use crate::error::{RankError, Result};
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::{info, warn};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Maps text to a raw (not normalized) dense vector.
pub trait Encoder: Send + Sync {
    /// Length of every vector this encoder returns.
    fn dim(&self) -> usize;

    fn encode(&self, text: &str) -> Result<Vec<f32>>;

    /// Encode several texts in one call. Output order matches input order.
    ///
    /// Model-backed encoders override this to amortize inference overhead.
    fn encode_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        texts.iter().map(|text| self.encode(text)).collect()
    }

    /// Short name for logs.
    fn name(&self) -> &str {
        "encoder"
    }
}

// =============================================================================
// HASH ENCODER
// =============================================================================

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

const WORD_WEIGHT: f32 = 1.0;
const TRIGRAM_WEIGHT: f32 = 0.5;

fn fnv1a(namespace: u8, bytes: &[u8]) -> u64 {
    let mut hash = FNV_OFFSET;
    for &b in std::iter::once(&namespace).chain(bytes) {
        hash ^= u64::from(b);
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash
}

/// Feature-hashing encoder with no external model.
#[derive(Debug, Clone)]
pub struct HashEncoder {
    dim: usize,
}

impl HashEncoder {
    pub fn new(dim: usize) -> Self {
        Self { dim: dim.max(1) }
    }

    fn bump(&self, v: &mut [f32], namespace: u8, token: &str, weight: f32) {
        let hash = fnv1a(namespace, token.as_bytes());
        let bucket = (hash % self.dim as u64) as usize;
        // Top bit picks the sign so collisions tend to cancel rather than pile up
        let sign = if hash >> 63 == 0 { 1.0 } else { -1.0 };
        v[bucket] += sign * weight;
    }
}

impl Default for HashEncoder {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_EMBEDDING_DIM)
    }
}

impl Encoder for HashEncoder {
    fn dim(&self) -> usize {
        self.dim
    }

    fn encode(&self, text: &str) -> Result<Vec<f32>> {
        let mut v = vec![0.0f32; self.dim];
        for word in text
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
        {
            let word = word.to_lowercase();
            self.bump(&mut v, b'w', &word, WORD_WEIGHT);

            let padded: Vec<char> = std::iter::once('^')
                .chain(word.chars())
                .chain(std::iter::once('$'))
                .collect();
            for window in padded.windows(3) {
                let trigram: String = window.iter().collect();
                self.bump(&mut v, b't', &trigram, TRIGRAM_WEIGHT);
            }
        }
        Ok(v)
    }

    #[cfg(feature = "parallel")]
    fn encode_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        texts.par_iter().map(|text| self.encode(text)).collect()
    }

    fn name(&self) -> &str {
        "hash"
    }
}

// =============================================================================
// READINESS STATE MACHINE
// =============================================================================

/// Observable encoder state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncoderState {
    Uninitialized,
    Initializing,
    Ready,
    Failed(String),
}

enum Slot {
    Uninitialized,
    Initializing,
    Ready(Arc<dyn Encoder>),
    Failed(String),
}

/// Holds an encoder that may not exist yet. Never blocks on initialization.
pub struct EncoderSlot {
    slot: RwLock<Slot>,
}

impl Default for EncoderSlot {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EncoderSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EncoderSlot")
            .field("state", &self.state())
            .finish()
    }
}

impl EncoderSlot {
    /// An empty slot waiting for `begin_init`.
    pub fn new() -> Self {
        Self {
            slot: RwLock::new(Slot::Uninitialized),
        }
    }

    /// A slot that is ready from the start.
    pub fn ready(encoder: Arc<dyn Encoder>) -> Self {
        Self {
            slot: RwLock::new(Slot::Ready(encoder)),
        }
    }

    pub fn state(&self) -> EncoderState {
        match &*self.slot.read() {
            Slot::Uninitialized => EncoderState::Uninitialized,
            Slot::Initializing => EncoderState::Initializing,
            Slot::Ready(_) => EncoderState::Ready,
            Slot::Failed(reason) => EncoderState::Failed(reason.clone()),
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(&*self.slot.read(), Slot::Ready(_))
    }

    /// Move to `Initializing`. Only allowed from `Uninitialized` or `Failed`
    /// (a retry); returns false if initialization is already underway or done.
    pub fn begin_init(&self) -> bool {
        let mut slot = self.slot.write();
        match &*slot {
            Slot::Uninitialized | Slot::Failed(_) => {
                *slot = Slot::Initializing;
                true
            }
            Slot::Initializing | Slot::Ready(_) => false,
        }
    }

    /// Install the encoder and become `Ready`.
    ///
    /// Only valid while `Initializing`: a ready encoder is never swapped, so
    /// vectors already stored keep matching its dimension. Returns false and
    /// leaves the slot untouched otherwise.
    pub fn complete(&self, encoder: Arc<dyn Encoder>) -> bool {
        let mut slot = self.slot.write();
        if !matches!(&*slot, Slot::Initializing) {
            warn!(encoder = encoder.name(), "encoder completion ignored outside initialization");
            return false;
        }
        info!(encoder = encoder.name(), dim = encoder.dim(), "embedding encoder ready");
        *slot = Slot::Ready(encoder);
        true
    }

    /// Record a failed initialization. The vector signal stays at zero until
    /// a retry succeeds. Only valid while `Initializing`.
    pub fn fail(&self, reason: impl Into<String>) -> bool {
        let reason = reason.into();
        let mut slot = self.slot.write();
        if !matches!(&*slot, Slot::Initializing) {
            warn!(%reason, "encoder failure ignored outside initialization");
            return false;
        }
        warn!(%reason, "embedding encoder failed to initialize; vector scores disabled");
        *slot = Slot::Failed(reason);
        true
    }

    /// The encoder, if ready.
    pub fn encoder(&self) -> Result<Arc<dyn Encoder>> {
        match &*self.slot.read() {
            Slot::Ready(encoder) => Ok(Arc::clone(encoder)),
            Slot::Failed(reason) => Err(RankError::EncoderFailed {
                reason: reason.clone(),
            }),
            Slot::Uninitialized | Slot::Initializing => Err(RankError::EncoderNotReady),
        }
    }

    /// Drive the whole transition with a fallible constructor.
    ///
    /// Safe to call from a background thread while queries run; they simply
    /// see `EncoderNotReady` until this returns. A second caller racing the
    /// first gets `Ok` if the encoder is already ready and `EncoderNotReady`
    /// while it is still initializing.
    pub fn initialize_with<F>(&self, init: F) -> Result<()>
    where
        F: FnOnce() -> Result<Arc<dyn Encoder>>,
    {
        if !self.begin_init() {
            return if self.is_ready() {
                Ok(())
            } else {
                Err(RankError::EncoderNotReady)
            };
        }
        match init() {
            Ok(encoder) => {
                if self.complete(encoder) || self.is_ready() {
                    Ok(())
                } else {
                    Err(RankError::EncoderNotReady)
                }
            }
            Err(e) => {
                let reason = e.to_string();
                self.fail(reason.clone());
                Err(RankError::EncoderFailed { reason })
            }
        }
    }
}
