// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The data that flows through a query.
//!
//! Records come in from the caller's store and are only ever borrowed. Queries
//! are parsed once and shared read-only by every per-record computation. Each
//! record's `MatchEvidence` is owned by the computation that scores it, so no
//! locking is needed anywhere on the scoring path.
//!
//! # Invariants
//!
//! - **SearchResult**: `!visible → score == 0.0`. Enforced by the constructors;
//!   the fields are public for reading, but results are built through
//!   `SearchResult::scored`, `browse` or `unresolved`.
//! - **Query**: terms are non-empty, lowercased, diacritic-folded and in the
//!   order they were typed. An empty term list is the explicit "no filter" state.

use crate::util::normalize::Folding;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

// =============================================================================
// RECORDS
// =============================================================================

/// Unique record identifier (distinct from the human-facing issue `number`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct RecordId(pub u64);

impl RecordId {
    #[inline]
    pub fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for RecordId {
    fn from(id: u64) -> Self {
        RecordId(id)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An issue-like entity to rank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub id: RecordId,
    pub number: u64,
    pub title: String,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub labels: Vec<String>,
}

impl Record {
    /// Body text, or the empty string when the record has none.
    pub fn body_text(&self) -> &str {
        self.body.as_deref().unwrap_or("")
    }

    /// Title, body and label names joined and folded to lowercase.
    ///
    /// This is the text the fuzzy scorer tokenizes and the embedding index encodes.
    pub fn searchable_content(&self) -> String {
        self.searchable_content_with(Folding::default())
    }

    /// `searchable_content` under an explicit folding mode.
    pub fn searchable_content_with(&self, folding: Folding) -> String {
        let mut content = String::with_capacity(
            self.title.len() + self.body_text().len() + self.labels.len() * 8 + 2,
        );
        content.push_str(&self.title);
        content.push(' ');
        content.push_str(self.body_text());
        for label in &self.labels {
            content.push(' ');
            content.push_str(label);
        }
        folding.apply(&content)
    }
}

// =============================================================================
// QUERY
// =============================================================================

/// A normalized, tokenized query.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Query {
    terms: Vec<String>,
    phrase: String,
    folding: Folding,
}

impl Query {
    /// Lowercase, trim and split the raw query text.
    pub fn parse(text: &str) -> Self {
        Self::parse_with(text, Folding::default())
    }

    /// `parse` under an explicit folding mode. Record text compared against
    /// this query is folded the same way.
    pub fn parse_with(text: &str, folding: Folding) -> Self {
        let terms = folding.terms(text);
        let phrase = terms.join(" ");
        Query {
            terms,
            phrase,
            folding,
        }
    }

    pub fn folding(&self) -> Folding {
        self.folding
    }

    /// Terms in typed order.
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    /// The terms joined by single spaces.
    pub fn phrase(&self) -> &str {
        &self.phrase
    }

    /// True for the unfiltered browse state.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }
}

// =============================================================================
// EVIDENCE
// =============================================================================

/// One fuzzy hit: the query term, the content word it matched, and how well.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FuzzyMatch {
    pub term: String,
    pub word: String,
    pub score: f64,
}

/// Why a record scored what it did. Informational only.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchEvidence {
    pub title_matches: BTreeSet<String>,
    pub body_matches: BTreeSet<String>,
    /// Label names (as stored on the record) that contained a query term.
    pub label_matches: BTreeSet<String>,
    pub number_match: bool,
    pub vector_similarity: f64,
    pub fuzzy_matches: Vec<FuzzyMatch>,
}

impl MatchEvidence {
    /// True when no signal recorded anything.
    pub fn is_empty(&self) -> bool {
        self.title_matches.is_empty()
            && self.body_matches.is_empty()
            && self.label_matches.is_empty()
            && !self.number_match
            && self.vector_similarity == 0.0
            && self.fuzzy_matches.is_empty()
    }
}

// =============================================================================
// RESULTS
// =============================================================================

/// How a result came to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ResultKind {
    /// The record was scored against a non-empty query.
    Scored,
    /// Empty query: every record is shown with the neutral score.
    Browse,
    /// The id could not be resolved in the record store.
    Unresolved,
}

/// Per-record outcome of one query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub visible: bool,
    pub score: f64,
    pub kind: ResultKind,
    pub evidence: MatchEvidence,
}

/// Score every record receives in the browse state.
pub const BROWSE_SCORE: f64 = 1.0;

impl SearchResult {
    /// Build from a weighted total.
    ///
    /// Visible when the total is positive or the issue number matched exactly.
    /// Invisible results always carry score 0, whatever partial signal they had.
    pub fn scored(total: f64, evidence: MatchEvidence) -> Self {
        let visible = total > 0.0 || evidence.number_match;
        SearchResult {
            visible,
            score: if visible { total } else { 0.0 },
            kind: ResultKind::Scored,
            evidence,
        }
    }

    /// The neutral "no filter" result.
    pub fn browse() -> Self {
        SearchResult {
            visible: true,
            score: BROWSE_SCORE,
            kind: ResultKind::Browse,
            evidence: MatchEvidence::default(),
        }
    }

    /// Result for an id the store could not resolve.
    pub fn unresolved() -> Self {
        SearchResult {
            visible: false,
            score: 0.0,
            kind: ResultKind::Unresolved,
            evidence: MatchEvidence::default(),
        }
    }
}
