// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Edit distance and the similarity metric built on it.
//!
//! `similarity(a, b) = 1 - distance(a, b) / max(len(a), len(b))`, measured in
//! characters after lowercasing. Symmetric, exactly 1.0 only for equal strings,
//! and 0.0 when every position has to change.
//!
//! The key insight for the bounded check: `|len(a) - len(b)|` is a lower bound
//! on edit distance. If two strings differ in length by more than the budget,
//! skip the O(nm) DP entirely.

/// Are these strings within `max` edits of each other?
///
/// Bounded Levenshtein with two early-exit paths:
/// 1. If length difference exceeds `max`, return false immediately
/// 2. If minimum row value exceeds `max`, abandon the DP early
///
/// Both are sound: neither ever rejects a pair whose distance is `<= max`.
pub fn levenshtein_within(a: &str, b: &str, max: usize) -> bool {
    // Use character counts, not byte lengths, for Unicode correctness
    let a_len = a.chars().count();
    let b_len = b.chars().count();

    if a_len.abs_diff(b_len) > max {
        return false;
    }

    let b_chars: Vec<char> = b.chars().collect();
    let mut dp: Vec<usize> = (0..=b_len).collect();
    for (i, ac) in a.chars().enumerate() {
        let mut prev = dp[0];
        dp[0] = i + 1;
        let mut min_row = dp[0];

        for (j, &bc) in b_chars.iter().enumerate() {
            let temp = dp[j + 1];
            let cost = usize::from(ac != bc);
            dp[j + 1] = (dp[j + 1] + 1).min(dp[j] + 1).min(prev + cost);
            prev = temp;
            min_row = min_row.min(dp[j + 1]);
        }

        if min_row > max {
            return false;
        }
    }

    dp[b_len] <= max
}

/// Full Levenshtein distance in characters (insert, delete, substitute).
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    let b_chars: Vec<char> = b.chars().collect();
    let mut dp: Vec<usize> = (0..=b_chars.len()).collect();

    for (i, ac) in a.chars().enumerate() {
        let mut prev = dp[0];
        dp[0] = i + 1;
        for (j, &bc) in b_chars.iter().enumerate() {
            let temp = dp[j + 1];
            let cost = usize::from(ac != bc);
            dp[j + 1] = (dp[j + 1] + 1).min(dp[j] + 1).min(prev + cost);
            prev = temp;
        }
    }

    dp[b_chars.len()]
}

/// Normalized similarity in `[0, 1]`, case-insensitive.
///
/// Pure and deterministic; safe to call from any number of threads.
pub fn similarity(a: &str, b: &str) -> f64 {
    let a = a.to_lowercase();
    let b = b.to_lowercase();
    if a == b {
        return 1.0;
    }
    similarity_folded(&a, &b)
}

/// `similarity` for inputs that are already lowercase.
pub(crate) fn similarity_folded(a: &str, b: &str) -> f64 {
    if a == b {
        return 1.0;
    }
    let max_len = a.chars().count().max(b.chars().count());
    // max_len > 0 here: two empty strings are equal
    1.0 - levenshtein_distance(a, b) as f64 / max_len as f64
}

/// Largest edit budget that could still put `similarity` strictly above
/// `threshold` for strings whose longer side has `max_len` characters.
///
/// `similarity > t` means `distance < (1 - t) * max_len`, so any distance above
/// the ceiling of that bound can be rejected without computing it.
pub fn max_edits_above(threshold: f64, max_len: usize) -> usize {
    let bound = (1.0 - threshold.clamp(0.0, 1.0)) * max_len as f64;
    bound.ceil() as usize
}
