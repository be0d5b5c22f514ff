use crate::error::{AppError, Result};
use serde::{Deserialize, Serialize};

/// Optional constraints selecting a subset of analysis records
///
/// Built fresh for every query, either from structured query parameters or
/// from the natural-language parser. An unset field places no constraint on
/// that dimension.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_palindrome: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub word_count: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contains_character: Option<char>,
}

impl FilterCriteria {
    /// True when no dimension is constrained
    pub fn is_empty(&self) -> bool {
        self.is_palindrome.is_none()
            && self.min_length.is_none()
            && self.max_length.is_none()
            && self.word_count.is_none()
            && self.contains_character.is_none()
    }

    /// Reject a length window that no record can fall into
    pub fn check_bounds(&self) -> Result<()> {
        match (self.min_length, self.max_length) {
            (Some(min), Some(max)) if min > max => Err(AppError::ContradictoryFilter(format!(
                "min_length ({}) cannot be greater than max_length ({})",
                min, max
            ))),
            _ => Ok(()),
        }
    }
}
