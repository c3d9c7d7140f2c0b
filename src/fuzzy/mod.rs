// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzzy matching: typo tolerance via edit distance.
//!
//! A normalized similarity in `[0, 1]` for ranking, plus a bounded Levenshtein
//! check the fuzzy scorer uses to skip hopeless candidates before paying for
//! the full DP.

mod levenshtein;

pub use levenshtein::*;
