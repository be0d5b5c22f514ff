use crate::error::{AppError, Result};
use crate::models::AnalysisRecord;
use crate::state::StringStore;
use async_trait::async_trait;
use sled::Db;
use std::path::Path;
use std::sync::Arc;

/// Persistent record store using Sled embedded database
///
/// Records are keyed by the UTF-8 bytes of the analyzed value and stored as
/// JSON, so the frequency map persists as a flat object of one-character keys.
#[derive(Clone)]
pub struct SledStore {
    db: Arc<Db>,
    records_tree: sled::Tree,
}

impl SledStore {
    /// Create a new Sled store at the specified path
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_str = path.as_ref();
        let db = sled::open(path_str).map_err(|e| {
            AppError::Database(format!("Failed to open Sled database: {}", e))
        })?;

        let records_tree = db.open_tree("analyzed_strings").map_err(|e| {
            AppError::Database(format!("Failed to open records tree: {}", e))
        })?;

        tracing::info!("Initialized Sled store at {:?}", path_str);

        Ok(Self {
            db: Arc::new(db),
            records_tree,
        })
    }

    /// Serialize record to bytes
    fn serialize_record(record: &AnalysisRecord) -> Result<Vec<u8>> {
        serde_json::to_vec(record).map_err(|e| {
            AppError::Serialization(format!("Failed to serialize record: {}", e))
        })
    }

    /// Deserialize record from bytes
    fn deserialize_record(bytes: &[u8]) -> Result<AnalysisRecord> {
        serde_json::from_slice(bytes).map_err(|e| {
            AppError::Serialization(format!("Failed to deserialize record: {}", e))
        })
    }

    /// Flush pending writes to disk
    pub async fn flush(&self) -> Result<()> {
        self.db.flush_async().await.map_err(|e| {
            AppError::Database(format!("Failed to flush database: {}", e))
        })?;
        Ok(())
    }
}

#[async_trait]
impl StringStore for SledStore {
    async fn exists(&self, value: &str) -> Result<bool> {
        self.records_tree.contains_key(value.as_bytes()).map_err(|e| {
            AppError::Database(format!("Failed to check record existence: {}", e))
        })
    }

    async fn get(&self, value: &str) -> Result<Option<AnalysisRecord>> {
        match self.records_tree.get(value.as_bytes()) {
            Ok(Some(bytes)) => Ok(Some(Self::deserialize_record(&bytes)?)),
            Ok(None) => Ok(None),
            Err(e) => Err(AppError::Database(format!("Failed to get record: {}", e))),
        }
    }

    async fn get_all(&self) -> Result<Vec<AnalysisRecord>> {
        let mut records = Vec::new();

        for item in self.records_tree.iter() {
            let (_key, bytes) = item.map_err(|e| {
                AppError::Database(format!("Failed to iterate records: {}", e))
            })?;
            records.push(Self::deserialize_record(&bytes)?);
        }

        Ok(records)
    }

    async fn insert(&self, record: &AnalysisRecord) -> Result<()> {
        let value = Self::serialize_record(record)?;

        // Only succeeds when the key is currently absent
        let swapped = self
            .records_tree
            .compare_and_swap(record.value.as_bytes(), None as Option<&[u8]>, Some(value))
            .map_err(|e| AppError::Database(format!("Failed to save record: {}", e)))?;

        if swapped.is_err() {
            return Err(AppError::Conflict(
                "String already exists in the system".to_string(),
            ));
        }

        // Flush to ensure durability
        self.records_tree.flush().map_err(|e| {
            AppError::Database(format!("Failed to flush records tree: {}", e))
        })?;

        tracing::debug!(id = %record.id, "Record saved to Sled");
        Ok(())
    }

    async fn delete(&self, value: &str) -> Result<bool> {
        let removed = self
            .records_tree
            .remove(value.as_bytes())
            .map_err(|e| AppError::Database(format!("Failed to delete record: {}", e)))?;

        if removed.is_some() {
            self.records_tree.flush().map_err(|e| {
                AppError::Database(format!("Failed to flush records tree: {}", e))
            })?;
            tracing::debug!(value_len = value.len(), "Record deleted from Sled");
        }

        Ok(removed.is_some())
    }

    async fn count(&self) -> Result<u64> {
        Ok(self.records_tree.len() as u64)
    }
}
