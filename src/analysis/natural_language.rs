use crate::models::FilterCriteria;
use once_cell::sync::Lazy;
use regex::Regex;

/// First run of ASCII digits anywhere in the query
static NUMBER_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[0-9]+").expect("number pattern is valid"));

/// A phrase rule: any of `phrases` present yields `value`
struct Rule<T: 'static> {
    phrases: &'static [&'static str],
    value: T,
}

const PALINDROME_PHRASES: &[&str] = &["palindrom"];

const WORD_COUNT_RULES: &[Rule<i64>] = &[
    Rule { phrases: &["single word", "one word"], value: 1 },
    Rule { phrases: &["two words", "2 words"], value: 2 },
    Rule { phrases: &["three words", "3 words"], value: 3 },
];

const MIN_LENGTH_PHRASES: &[&str] = &["longer than", "more than", "at least"];

const MAX_LENGTH_PHRASES: &[&str] = &["shorter than", "less than", "at most"];

/// Character rules only apply when the query mentions containment
const CONTAINS_TRIGGERS: &[&str] = &["contain", "with", "having"];

// Order matters: a bare "z" anywhere wins over the letter-a/letter-e rules.
const CHARACTER_RULES: &[Rule<char>] = &[
    Rule { phrases: &["first vowel", "vowel a"], value: 'a' },
    Rule { phrases: &["vowel e"], value: 'e' },
    Rule { phrases: &["vowel i"], value: 'i' },
    Rule { phrases: &["vowel o"], value: 'o' },
    Rule { phrases: &["vowel u"], value: 'u' },
    Rule { phrases: &["letter z", "z"], value: 'z' },
    Rule { phrases: &["letter a", " a "], value: 'a' },
    Rule { phrases: &["letter e", " e "], value: 'e' },
];

fn contains_any(query: &str, phrases: &[&str]) -> bool {
    phrases.iter().any(|phrase| query.contains(phrase))
}

fn first_match<T: Copy>(query: &str, rules: &[Rule<T>]) -> Option<T> {
    rules
        .iter()
        .find(|rule| contains_any(query, rule.phrases))
        .map(|rule| rule.value)
}

/// Both length bounds read this same number; it is not scoped to the phrase.
fn first_number(query: &str) -> Option<i64> {
    NUMBER_PATTERN
        .find(query)
        .and_then(|m| m.as_str().parse().ok())
}

/// Interpret a free-text query as filter criteria
///
/// Matching is case-insensitive substring search over a fixed vocabulary,
/// evaluated independently per dimension. Phrases outside the vocabulary are
/// ignored. The result is not checked for contradictory bounds; callers do
/// that with [`FilterCriteria::check_bounds`].
pub fn parse_natural_language(query: &str) -> FilterCriteria {
    let query = query.to_lowercase();

    let is_palindrome = contains_any(&query, PALINDROME_PHRASES).then_some(true);

    let word_count = first_match(&query, WORD_COUNT_RULES);

    let min_length = if contains_any(&query, MIN_LENGTH_PHRASES) {
        first_number(&query)
    } else {
        None
    };

    let max_length = if contains_any(&query, MAX_LENGTH_PHRASES) {
        first_number(&query)
    } else {
        None
    };

    let contains_character = if contains_any(&query, CONTAINS_TRIGGERS) {
        first_match(&query, CHARACTER_RULES)
    } else {
        None
    };

    let criteria = FilterCriteria {
        is_palindrome,
        min_length,
        max_length,
        word_count,
        contains_character,
    };

    tracing::debug!(query = %query, criteria = ?criteria, "Interpreted natural language query");

    criteria
}
