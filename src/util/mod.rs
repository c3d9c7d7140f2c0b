// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! String helpers shared by the scorers and the embedding index.
//!
//! Text normalization for accent- and case-insensitive matching, query term
//! splitting, and the content tokenizer the fuzzy signal runs over.

pub mod normalize;
