pub mod store;
pub mod sled_store;
pub mod factory;

pub use store::*;
pub use sled_store::SledStore;
pub use factory::{create_store, create_in_memory_store};

use crate::error::Result;
use crate::models::AnalysisRecord;
use async_trait::async_trait;

/// Trait for analysis record storage, keyed by the analyzed value
#[async_trait]
pub trait StringStore: Send + Sync {
    /// Check whether a value has been analyzed
    async fn exists(&self, value: &str) -> Result<bool>;

    /// Get a record by its value
    async fn get(&self, value: &str) -> Result<Option<AnalysisRecord>>;

    /// All stored records, in no particular order
    async fn get_all(&self) -> Result<Vec<AnalysisRecord>>;

    /// Insert a record unless its value is already present
    ///
    /// The check and the write are a single atomic step; a duplicate yields
    /// [`AppError::Conflict`](crate::error::AppError::Conflict).
    async fn insert(&self, record: &AnalysisRecord) -> Result<()>;

    /// Delete a record by value, returning whether one was removed
    async fn delete(&self, value: &str) -> Result<bool>;

    /// Number of stored records
    async fn count(&self) -> Result<u64>;
}
