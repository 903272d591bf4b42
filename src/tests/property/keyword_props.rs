//! Property-based tests for keyword parsing
//!
//! Tests invariants:
//! - Parsed keywords are never empty and carry no surrounding whitespace
//! - Joining clean keywords with commas parses back to the same list

use proptest::prelude::*;

use crate::core::wizard::parse_keywords;

proptest! {
    #[test]
    fn keywords_are_trimmed_and_non_empty(raw in "[a-z ,]{0,64}") {
        for keyword in parse_keywords(&raw) {
            prop_assert!(!keyword.is_empty());
            prop_assert_eq!(keyword.trim(), keyword.as_str());
            prop_assert!(!keyword.contains(','));
        }
    }

    #[test]
    fn joined_keywords_parse_back(words in prop::collection::vec("[a-z]{1,10}", 0..8)) {
        let raw = words.join(" , ");
        prop_assert_eq!(parse_keywords(&raw), words);
    }
}
