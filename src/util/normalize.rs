// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Case and accent folding.
//!
//! Matching is lowercase-only by default: "Café" and "cafe" are different
//! words. `Folding::Diacritics` also strips combining marks so the two meet
//! in the middle. Whichever mode is chosen, the query and the record text go
//! through the same one. Rust's `to_lowercase` is locale independent, which
//! keeps scores identical across machines.

#[cfg(feature = "unicode-normalization")]
use unicode_normalization::UnicodeNormalization;

/// Content words shorter than this are ignored by the fuzzy signal.
pub const MIN_CONTENT_WORD_CHARS: usize = 3;

/// Lowercase and strip diacritics, keeping whitespace as-is.
///
/// Whitespace is preserved so fenced code blocks and line structure in bodies
/// survive folding.
#[cfg(feature = "unicode-normalization")]
pub fn fold(value: &str) -> String {
    value
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
}

/// Lowercase only (input assumed ASCII or pre-normalized).
#[cfg(not(feature = "unicode-normalization"))]
pub fn fold(value: &str) -> String {
    value.to_lowercase()
}

/// How text is folded before any comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Folding {
    /// Lowercase only.
    #[default]
    Lowercase,
    /// Lowercase and strip diacritics.
    Diacritics,
}

impl Folding {
    pub fn from_diacritics(strip: bool) -> Self {
        if strip {
            Folding::Diacritics
        } else {
            Folding::Lowercase
        }
    }

    /// Fold `value`, keeping whitespace as-is.
    pub fn apply(self, value: &str) -> String {
        match self {
            Folding::Lowercase => value.to_lowercase(),
            Folding::Diacritics => fold(value),
        }
    }

    /// Fold and collapse whitespace runs to single spaces.
    pub fn normalize(self, value: &str) -> String {
        self.apply(value)
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Split a raw query into ordered, non-empty folded terms.
    pub fn terms(self, query: &str) -> Vec<String> {
        self.apply(query)
            .split_whitespace()
            .map(|s| s.to_string())
            .collect()
    }
}

/// Lowercase and collapse whitespace runs to single spaces.
///
/// - "  Login   FAILS " → "login fails"
/// - "Café" → "café"
pub fn normalize(value: &str) -> String {
    Folding::Lowercase.normalize(value)
}

/// Split a raw query into ordered, non-empty lowercase terms.
///
/// ```ignore
/// assert_eq!(parse_query(" Hello  World "), vec!["hello", "world"]);
/// ```
pub fn parse_query(query: &str) -> Vec<String> {
    Folding::Lowercase.terms(query)
}

/// Tokenize already-folded content into words for fuzzy matching.
///
/// Punctuation is dropped from inside each whitespace-separated chunk
/// ("don't" → "dont", "crash." → "crash"), then words of fewer than
/// `MIN_CONTENT_WORD_CHARS` characters are discarded.
pub fn content_words(content: &str) -> Vec<String> {
    content
        .split_whitespace()
        .map(|chunk| {
            chunk
                .chars()
                .filter(|c| c.is_alphanumeric() || *c == '_')
                .collect::<String>()
        })
        .filter(|word| word.chars().count() >= MIN_CONTENT_WORD_CHARS)
        .collect()
}

/// True when the term is a non-empty run of ASCII digits.
pub fn is_numeric_term(term: &str) -> bool {
    !term.is_empty() && term.bytes().all(|b| b.is_ascii_digit())
}

/// Check if a character is a combining mark (diacritic).
#[cfg(feature = "unicode-normalization")]
fn is_combining_mark(c: char) -> bool {
    matches!(c,
        '\u{0300}'..='\u{036F}' |  // Combining Diacritical Marks
        '\u{1AB0}'..='\u{1AFF}' |  // Combining Diacritical Marks Extended
        '\u{1DC0}'..='\u{1DFF}' |  // Combining Diacritical Marks Supplement
        '\u{20D0}'..='\u{20FF}' |  // Combining Diacritical Marks for Symbols
        '\u{FE20}'..='\u{FE2F}'    // Combining Half Marks
    )
}
