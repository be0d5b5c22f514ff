use crate::models::{AnalysisRecord, FilterCriteria};

/// Decide whether `record` satisfies every constraint set in `criteria`
///
/// Used by both the structured query path and the natural-language path.
/// Character containment is case-sensitive.
pub fn matches(record: &AnalysisRecord, criteria: &FilterCriteria) -> bool {
    let props = &record.properties;
    let length = signed(props.length);

    if let Some(wanted) = criteria.is_palindrome {
        if props.is_palindrome != wanted {
            return false;
        }
    }

    if let Some(min) = criteria.min_length {
        if length < min {
            return false;
        }
    }

    if let Some(max) = criteria.max_length {
        if length > max {
            return false;
        }
    }

    if let Some(count) = criteria.word_count {
        if signed(props.word_count) != count {
            return false;
        }
    }

    if let Some(c) = criteria.contains_character {
        if !record.value.contains(c) {
            return false;
        }
    }

    true
}

/// Bounds may be negative, so record counts compare as i64
fn signed(n: usize) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}

impl FilterCriteria {
    pub fn matches(&self, record: &AnalysisRecord) -> bool {
        matches(record, self)
    }

    /// Keep only the records this criteria admits
    pub fn apply(&self, records: Vec<AnalysisRecord>) -> Vec<AnalysisRecord> {
        records.into_iter().filter(|r| self.matches(r)).collect()
    }
}
