//! Properties of the string similarity metric.

use proptest::prelude::*;
use issue_rank::{levenshtein_distance, levenshtein_within, similarity};

fn word_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-zA-Z0-9]{0,10}").unwrap()
}

proptest! {
    #[test]
    fn prop_similarity_in_unit_range(a in word_strategy(), b in word_strategy()) {
        let s = similarity(&a, &b);
        prop_assert!((0.0..=1.0).contains(&s), "similarity({a:?}, {b:?}) = {s}");
    }

    #[test]
    fn prop_similarity_symmetric(a in word_strategy(), b in word_strategy()) {
        prop_assert_eq!(similarity(&a, &b), similarity(&b, &a));
    }

    #[test]
    fn prop_identical_is_one(a in word_strategy()) {
        prop_assert_eq!(similarity(&a, &a), 1.0);
        prop_assert_eq!(similarity(&a, &a.to_uppercase()), 1.0);
    }

    #[test]
    fn prop_within_agrees_with_distance(
        a in word_strategy(),
        b in word_strategy(),
        max in 0usize..4,
    ) {
        let d = levenshtein_distance(&a, &b);
        prop_assert_eq!(levenshtein_within(&a, &b, max), d <= max);
    }
}
