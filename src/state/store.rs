use crate::error::{AppError, Result};
use crate::models::AnalysisRecord;
use crate::state::StringStore;
use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::Arc;

/// In-memory record store (default backend and for tests)
#[derive(Clone)]
pub struct InMemoryStore {
    records: Arc<DashMap<String, AnalysisRecord>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            records: Arc::new(DashMap::new()),
        }
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StringStore for InMemoryStore {
    async fn exists(&self, value: &str) -> Result<bool> {
        Ok(self.records.contains_key(value))
    }

    async fn get(&self, value: &str) -> Result<Option<AnalysisRecord>> {
        Ok(self.records.get(value).map(|entry| entry.clone()))
    }

    async fn get_all(&self) -> Result<Vec<AnalysisRecord>> {
        Ok(self
            .records
            .iter()
            .map(|entry| entry.value().clone())
            .collect())
    }

    async fn insert(&self, record: &AnalysisRecord) -> Result<()> {
        // The shard stays write-locked for the lifetime of the entry
        match self.records.entry(record.value.clone()) {
            Entry::Occupied(_) => Err(AppError::Conflict(
                "String already exists in the system".to_string(),
            )),
            Entry::Vacant(slot) => {
                slot.insert(record.clone());
                tracing::debug!(id = %record.id, "Record saved");
                Ok(())
            }
        }
    }

    async fn delete(&self, value: &str) -> Result<bool> {
        let removed = self.records.remove(value);
        if let Some((_, ref record)) = removed {
            tracing::debug!(id = %record.id, "Record deleted");
        }
        Ok(removed.is_some())
    }

    async fn count(&self) -> Result<u64> {
        Ok(self.records.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyze;

    #[tokio::test]
    async fn test_insert_and_get() {
        let store = InMemoryStore::new();
        let record = analyze("hello");

        store.insert(&record).await.unwrap();

        assert!(store.exists("hello").await.unwrap());
        let retrieved = store.get("hello").await.unwrap();
        assert_eq!(retrieved, Some(record));
        assert_eq!(store.get("missing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_duplicate_insert_is_conflict() {
        let store = InMemoryStore::new();
        let record = analyze("hello");

        store.insert(&record).await.unwrap();
        let result = store.insert(&analyze("hello")).await;

        assert!(matches!(result, Err(AppError::Conflict(_))));
        assert_eq!(store.count().await.unwrap(), 1);
        // the original record is untouched
        assert_eq!(store.get("hello").await.unwrap(), Some(record));
    }

    #[tokio::test]
    async fn test_delete() {
        let store = InMemoryStore::new();
        store.insert(&analyze("bye")).await.unwrap();

        assert!(store.delete("bye").await.unwrap());
        assert!(!store.delete("bye").await.unwrap());
        assert!(!store.exists("bye").await.unwrap());
    }

    #[tokio::test]
    async fn test_concurrent_identical_inserts_admit_one() {
        let store = InMemoryStore::new();
        let mut handles = Vec::new();

        for _ in 0..16 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store.insert(&analyze("racecar")).await.is_ok()
            }));
        }

        let mut successes = 0;
        for handle in handles {
            if handle.await.unwrap() {
                successes += 1;
            }
        }

        assert_eq!(successes, 1);
        assert_eq!(store.count().await.unwrap(), 1);
    }
}
