// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Result ranking: how finished results get sorted.
//!
//! The engine returns an unordered map; consumers that want a list sort it with
//! `compare_results`. Score decides, and ties fall back to ascending record id
//! so two runs over the same data always produce the same order.
//!
//! # NDCG
//!
//! `ndcg` compares a ranking's discounted cumulative gain against the ideal
//! ordering of the same scores. Applied to a list that is already sorted by
//! score, the two are equal and the result is 1.0. It only says something about
//! ranking quality when the order being evaluated comes from somewhere else
//! (a reference ranking, a presenter that reorders, a different engine).

use crate::types::{RecordId, SearchResult};
use std::cmp::Ordering;

/// Compare two results for ranking.
///
/// Sort order:
/// 1. **Score** - descending
/// 2. **Record ID** - ascending, for absolute determinism
pub fn compare_results(a: (RecordId, &SearchResult), b: (RecordId, &SearchResult)) -> Ordering {
    b.1.score.total_cmp(&a.1.score).then_with(|| a.0.cmp(&b.0))
}

/// Gain of one result: `2^score - 1`.
pub fn gain(score: f64) -> f64 {
    score.exp2() - 1.0
}

/// Discounted cumulative gain of scores in the given order.
///
/// Rank `i` (0-based) is discounted by `log2(i + 2)`.
pub fn dcg(scores: &[f64]) -> f64 {
    scores
        .iter()
        .enumerate()
        .map(|(rank, &score)| gain(score) / (rank as f64 + 2.0).log2())
        .sum()
}

/// DCG of `ranked` divided by the DCG of the same scores sorted descending.
///
/// Returns 0.0 when the ideal DCG is zero (empty list, or every score 0).
///
/// Every gain is scaled by `2^-max` before summing. The factor cancels in the
/// ratio and keeps `2^score` from overflowing for scores past ~1024.
pub fn ndcg(ranked: &[f64]) -> f64 {
    let max = ranked.iter().copied().fold(0.0, f64::max);
    let mut ideal = ranked.to_vec();
    ideal.sort_by(|a, b| b.total_cmp(a));
    let idcg = scaled_dcg(&ideal, max);
    if !idcg.is_finite() || idcg <= 0.0 {
        return 0.0;
    }
    scaled_dcg(ranked, max) / idcg
}

/// `dcg(scores) * 2^-shift`, computed without forming `2^score`.
fn scaled_dcg(scores: &[f64], shift: f64) -> f64 {
    let floor = (-shift).exp2();
    scores
        .iter()
        .enumerate()
        .map(|(rank, &score)| ((score - shift).exp2() - floor) / (rank as f64 + 2.0).log2())
        .sum()
}
