//! String analysis and filtering
//!
//! Three pure pieces with no shared state:
//! - [`analyze`] turns a string into an [`AnalysisRecord`](crate::models::AnalysisRecord)
//! - [`matches`] decides whether a record satisfies a [`FilterCriteria`](crate::models::FilterCriteria)
//! - [`parse_natural_language`] turns a free-text query into a `FilterCriteria`

pub mod analyzer;
pub mod filter;
pub mod natural_language;

pub use analyzer::analyze;
pub use filter::matches;
pub use natural_language::parse_natural_language;
