// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The four lexical signals and the math that combines them.
//!
//! Each scorer reads one record and the shared query, writes what it matched
//! into the record's own `MatchEvidence`, and returns a capped sub-score. None
//! of them can fail: a missing body is an empty body, no labels means no label
//! matches.
//!
//! # Caps
//!
//! | Signal   | Per-term contribution                               | Cap  |
//! |----------|-----------------------------------------------------|------|
//! | Title    | bonus per substring hit, +0.5 prefix, +1 phrase     | 3.0  |
//! | Body     | `min(count / 2, 1)`, +0.5 per code block hit        | 2.0  |
//! | Metadata | 2.0 for exact issue number, 0.5 per (term, label)   | none |
//! | Fuzzy    | best similarity above threshold × fuzzy weight      | 2.0  |
//!
//! The caps keep any single signal from drowning out the others: a body that
//! repeats the term fifty times still tops out at 2.0.

use crate::config::RankingConfig;
use crate::fuzzy::{levenshtein_within, max_edits_above, similarity_folded};
use crate::types::{FuzzyMatch, MatchEvidence, Query, Record};
use crate::util::normalize::{content_words, is_numeric_term};

// =============================================================================
// SCORING CONSTANTS
// =============================================================================

/// Extra title credit when the title starts with the term.
pub const TITLE_PREFIX_BONUS: f64 = 0.5;

/// Extra title credit when a multi-term query appears verbatim.
pub const TITLE_PHRASE_BONUS: f64 = 1.0;

pub const MAX_TITLE_SCORE: f64 = 3.0;

/// Credit per fenced code block containing the term.
pub const CODE_BLOCK_BONUS: f64 = 0.5;

pub const MAX_BODY_SCORE: f64 = 2.0;

/// Credit for a query term equal to the issue number.
pub const NUMBER_MATCH_SCORE: f64 = 2.0;

/// Credit per (term, label) substring hit.
pub const LABEL_MATCH_SCORE: f64 = 0.5;

pub const MAX_FUZZY_SCORE: f64 = 2.0;

const CODE_FENCE: &str = "```";

// =============================================================================
// SIGNALS
// =============================================================================

/// Unweighted sub-scores for one record.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SignalScores {
    pub title: f64,
    pub body: f64,
    pub fuzzy: f64,
    pub metadata: f64,
    pub vector: f64,
}

impl SignalScores {
    /// `Σ weight_i * score_i`, always summed in the same order.
    pub fn weighted(&self, config: &RankingConfig) -> f64 {
        config.title_weight * self.title
            + config.body_weight * self.body
            + config.fuzzy_weight * self.fuzzy
            + config.metadata_weight * self.metadata
            + config.vector_weight * self.vector
    }
}

/// Run all four lexical scorers. The vector signal is left at 0.
pub fn lexical_signals(
    record: &Record,
    query: &Query,
    config: &RankingConfig,
    evidence: &mut MatchEvidence,
) -> SignalScores {
    SignalScores {
        title: title_score(record, query, config, evidence),
        body: body_score(record, query, evidence),
        fuzzy: fuzzy_score(record, query, config, evidence),
        metadata: metadata_score(record, query, evidence),
        vector: 0.0,
    }
}

/// Substring hits in the title, with prefix and phrase bonuses.
///
/// Matching is containment, not token-boundary: "log" hits "Login fails".
pub fn title_score(
    record: &Record,
    query: &Query,
    config: &RankingConfig,
    evidence: &mut MatchEvidence,
) -> f64 {
    if query.is_empty() {
        return 0.0;
    }
    let title = query.folding().apply(&record.title);
    let mut score = 0.0;

    for term in query.terms() {
        if title.contains(term.as_str()) {
            score += config.exact_match_bonus;
            evidence.title_matches.insert(term.clone());
            if title.starts_with(term.as_str()) {
                score += TITLE_PREFIX_BONUS;
            }
        }
    }

    if query.len() >= 2 && title.contains(query.phrase()) {
        score += TITLE_PHRASE_BONUS;
    }

    score.min(MAX_TITLE_SCORE)
}

/// Occurrence counts in the body plus credit for fenced code blocks.
pub fn body_score(record: &Record, query: &Query, evidence: &mut MatchEvidence) -> f64 {
    let body = query.folding().apply(record.body_text());
    if body.is_empty() || query.is_empty() {
        return 0.0;
    }
    let blocks = code_blocks(&body);
    let mut score = 0.0;

    for term in query.terms() {
        let count = body.matches(term.as_str()).count();
        if count > 0 {
            score += (count as f64 / 2.0).min(1.0);
            evidence.body_matches.insert(term.clone());
        }
        for block in &blocks {
            if block.contains(term.as_str()) {
                score += CODE_BLOCK_BONUS;
            }
        }
    }

    score.min(MAX_BODY_SCORE)
}

/// Exact issue-number hits and label substring hits.
pub fn metadata_score(record: &Record, query: &Query, evidence: &mut MatchEvidence) -> f64 {
    let mut score = 0.0;
    let number = record.number.to_string();

    if query
        .terms()
        .iter()
        .any(|term| is_numeric_term(term) && *term == number)
    {
        evidence.number_match = true;
        score += NUMBER_MATCH_SCORE;
    }

    for label in &record.labels {
        let folded = query.folding().apply(label);
        for term in query.terms() {
            if folded.contains(term.as_str()) {
                score += LABEL_MATCH_SCORE;
                evidence.label_matches.insert(label.clone());
            }
        }
    }

    score
}

/// Best fuzzy word per term across the whole searchable content.
///
/// Only the single strongest candidate above the threshold counts for each
/// term, so several weak near-misses never outscore one strong match. Ties
/// keep the first word in content order.
pub fn fuzzy_score(
    record: &Record,
    query: &Query,
    config: &RankingConfig,
    evidence: &mut MatchEvidence,
) -> f64 {
    if query.is_empty() {
        return 0.0;
    }
    let words = content_words(&record.searchable_content_with(query.folding()));
    if words.is_empty() {
        return 0.0;
    }
    let threshold = config.fuzzy_threshold;
    let mut score = 0.0;

    for term in query.terms() {
        let term_len = term.chars().count();
        let mut best: Option<(&str, f64)> = None;

        for word in &words {
            let max_len = term_len.max(word.chars().count());
            // Cheap rejection: too many edits to ever clear the threshold
            if !levenshtein_within(term, word, max_edits_above(threshold, max_len)) {
                continue;
            }
            let candidate = similarity_folded(term, word);
            if candidate > threshold && best.map_or(true, |(_, s)| candidate > s) {
                best = Some((word.as_str(), candidate));
            }
        }

        if let Some((word, best_score)) = best {
            score += best_score * config.fuzzy_match_weight;
            evidence.fuzzy_matches.push(FuzzyMatch {
                term: term.clone(),
                word: word.to_string(),
                score: best_score,
            });
        }
    }

    score.min(MAX_FUZZY_SCORE)
}

/// Contents of closed ``` fenced blocks, in order. An unclosed trailing fence
/// is not a block.
pub fn code_blocks(body: &str) -> Vec<&str> {
    let parts: Vec<&str> = body.split(CODE_FENCE).collect();
    parts
        .iter()
        .enumerate()
        .filter(|(i, _)| i % 2 == 1 && *i + 1 < parts.len())
        .map(|(_, part)| *part)
        .collect()
}
