use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Derived metrics for one analyzed string
///
/// Records are immutable once created. The `id` is the SHA-256 of the value,
/// so analyzing the same value twice yields the same identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisRecord {
    /// Content-derived identifier (equal to `properties.sha256_hash`)
    pub id: String,

    /// Original input, unique key in the store
    pub value: String,

    /// Computed properties
    pub properties: StringProperties,

    /// Analysis timestamp
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StringProperties {
    /// Number of code points
    pub length: usize,

    /// Case-insensitive, ignoring spaces
    pub is_palindrome: bool,

    /// Number of distinct code points
    pub unique_characters: usize,

    /// Number of whitespace-delimited tokens
    pub word_count: usize,

    /// Lowercase hex SHA-256 of the UTF-8 bytes
    pub sha256_hash: String,

    /// Occurrences per code point, keyed by a one-character string
    pub character_frequency_map: BTreeMap<String, usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> AnalysisRecord {
        AnalysisRecord {
            id: "abc".to_string(),
            value: "aab".to_string(),
            properties: StringProperties {
                length: 3,
                is_palindrome: false,
                unique_characters: 2,
                word_count: 1,
                sha256_hash: "abc".to_string(),
                character_frequency_map: BTreeMap::from([
                    ("a".to_string(), 2),
                    ("b".to_string(), 1),
                ]),
            },
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_frequency_map_serializes_as_flat_object() {
        let record = sample_record();
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(
            json["properties"]["character_frequency_map"],
            serde_json::json!({"a": 2, "b": 1})
        );
    }

    #[test]
    fn test_record_json_round_trip() {
        let record = sample_record();
        let bytes = serde_json::to_vec(&record).unwrap();
        let decoded: AnalysisRecord = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(decoded, record);
    }
}
