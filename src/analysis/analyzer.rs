use crate::models::{AnalysisRecord, StringProperties};
use chrono::Utc;
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;

/// Compute the derived metrics for `input`
///
/// Total over all strings, including the empty one. The only impure input is
/// the clock read for `created_at`.
pub fn analyze(input: &str) -> AnalysisRecord {
    let character_frequency_map = character_frequency(input);
    let length = character_frequency_map.values().sum();
    let sha256_hash = sha256_hex(input);

    AnalysisRecord {
        id: sha256_hash.clone(),
        value: input.to_string(),
        properties: StringProperties {
            length,
            is_palindrome: is_palindrome(input),
            unique_characters: character_frequency_map.len(),
            word_count: input.split_whitespace().count(),
            sha256_hash,
            character_frequency_map,
        },
        created_at: Utc::now(),
    }
}

/// Palindrome test, case-insensitive and ignoring U+0020 only
///
/// Each code point is lower-cased on its own, without the final-sigma rule.
/// Tabs, newlines and punctuation are significant.
pub fn is_palindrome(input: &str) -> bool {
    let cleaned: Vec<char> = input
        .chars()
        .flat_map(char::to_lowercase)
        .filter(|&c| c != ' ')
        .collect();
    let n = cleaned.len();

    (0..n / 2).all(|i| cleaned[i] == cleaned[n - 1 - i])
}

/// Occurrences of each code point in the raw input
pub fn character_frequency(input: &str) -> BTreeMap<String, usize> {
    let mut frequency = BTreeMap::new();
    for c in input.chars() {
        *frequency.entry(c.to_string()).or_insert(0) += 1;
    }
    frequency
}

/// Lowercase hex SHA-256 digest of the UTF-8 bytes
pub fn sha256_hex(input: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const HELLO_SHA256: &str = "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824";
    const EMPTY_SHA256: &str = "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";

    #[test]
    fn test_analyze_hello() {
        let record = analyze("hello");

        assert_eq!(record.value, "hello");
        assert_eq!(record.properties.length, 5);
        assert_eq!(record.properties.word_count, 1);
        assert!(!record.properties.is_palindrome);
        assert_eq!(record.properties.unique_characters, 4);
        assert_eq!(record.properties.sha256_hash, HELLO_SHA256);
        assert_eq!(record.id, HELLO_SHA256);

        let expected = BTreeMap::from([
            ("h".to_string(), 1),
            ("e".to_string(), 1),
            ("l".to_string(), 2),
            ("o".to_string(), 1),
        ]);
        assert_eq!(record.properties.character_frequency_map, expected);
    }

    #[test]
    fn test_analyze_empty_string() {
        let record = analyze("");

        assert_eq!(record.properties.length, 0);
        assert_eq!(record.properties.word_count, 0);
        assert!(record.properties.is_palindrome);
        assert_eq!(record.properties.unique_characters, 0);
        assert!(record.properties.character_frequency_map.is_empty());
        assert_eq!(record.properties.sha256_hash, EMPTY_SHA256);
    }

    #[test]
    fn test_palindromes() {
        assert!(is_palindrome("racecar"));
        assert!(is_palindrome("madam"));
        assert!(is_palindrome("A man a plan a canal Panama"));
        assert!(is_palindrome("Never odd or even"));
        assert!(is_palindrome("x"));
        assert!(is_palindrome("   "));
        assert!(!is_palindrome("hello"));
    }

    #[test]
    fn test_palindrome_lowers_each_code_point() {
        assert!(is_palindrome("ΣΑΣ"));
        assert!(is_palindrome("Ésé"));
        assert!(is_palindrome("Ангна"));
        assert!(analyze("ΣΑΣ").properties.is_palindrome);
        assert!(!is_palindrome("ΣΑΒ"));
    }

    #[test]
    fn test_palindrome_keeps_punctuation_and_other_whitespace() {
        assert!(!is_palindrome("race car!"));
        assert!(!is_palindrome("ab\tba\n"));
        assert!(is_palindrome("ab\tba"));
    }

    #[test]
    fn test_length_counts_code_points_not_bytes() {
        let record = analyze("héllo wörld");
        assert_eq!(record.properties.length, 11);
        assert_eq!(record.properties.word_count, 2);

        let record = analyze("日本日");
        assert_eq!(record.properties.length, 3);
        assert_eq!(record.properties.unique_characters, 2);
        assert!(record.properties.is_palindrome);
    }

    #[test]
    fn test_word_count_ignores_extra_whitespace() {
        assert_eq!(analyze("  the quick\n\tbrown   fox  ").properties.word_count, 4);
        assert_eq!(analyze(" \t\n ").properties.word_count, 0);
    }

    #[test]
    fn test_frequency_uses_original_input() {
        let record = analyze("Aa a");
        let map = &record.properties.character_frequency_map;

        assert_eq!(map.get("A"), Some(&1));
        assert_eq!(map.get("a"), Some(&2));
        assert_eq!(map.get(" "), Some(&1));
        assert!(record.properties.is_palindrome);
    }

    #[test]
    fn test_analyze_is_deterministic() {
        let first = analyze("stable input");
        let second = analyze("stable input");

        assert_eq!(first.id, second.id);
        assert_eq!(first.value, second.value);
        assert_eq!(first.properties, second.properties);
    }

    proptest! {
        #[test]
        fn prop_length_is_code_point_count(s in ".*") {
            prop_assert_eq!(analyze(&s).properties.length, s.chars().count());
        }

        #[test]
        fn prop_frequencies_sum_to_length(s in ".*") {
            let record = analyze(&s);
            let total: usize = record.properties.character_frequency_map.values().sum();
            prop_assert_eq!(total, record.properties.length);
            prop_assert_eq!(
                record.properties.unique_characters,
                record.properties.character_frequency_map.len()
            );
        }

        #[test]
        fn prop_id_equals_hash(s in ".*") {
            let record = analyze(&s);
            prop_assert_eq!(&record.id, &record.properties.sha256_hash);
            prop_assert_eq!(record.id.len(), 64);
        }

        #[test]
        fn prop_palindrome_matches_reversal(s in "[a-zA-Z ]{0,24}") {
            let cleaned: String = s.to_lowercase().chars().filter(|&c| c != ' ').collect();
            let reversed: String = cleaned.chars().rev().collect();
            prop_assert_eq!(is_palindrome(&s), cleaned == reversed);
        }
    }
}
