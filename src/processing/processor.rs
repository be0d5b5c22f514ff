use crate::analysis::{analyze, parse_natural_language};
use crate::error::{AppError, Result};
use crate::metrics::{FILTER_QUERIES_TOTAL, STRINGS_ANALYZED_TOTAL, STRINGS_DELETED_TOTAL, STRINGS_STORED};
use crate::models::{AnalysisRecord, FilterCriteria};
use crate::state::StringStore;
use std::sync::Arc;

/// Ties the analyzer, the filter interpreter and the store together
pub struct StringProcessor {
    store: Arc<dyn StringStore>,
}

impl StringProcessor {
    pub fn new(store: Arc<dyn StringStore>) -> Self {
        Self { store }
    }

    /// Analyze a new value and persist the result
    ///
    /// Fails with `Conflict` when the value was analyzed before; the store
    /// decides this atomically, so concurrent identical submissions yield
    /// exactly one record.
    pub async fn create(&self, value: String) -> Result<AnalysisRecord> {
        let record = analyze(&value);

        self.store.insert(&record).await?;

        STRINGS_ANALYZED_TOTAL.inc();
        self.refresh_stored_gauge().await;

        tracing::info!(
            id = %record.id,
            length = record.properties.length,
            is_palindrome = record.properties.is_palindrome,
            "Analyzed string"
        );

        Ok(record)
    }

    /// Look up a record by its value
    pub async fn get(&self, value: &str) -> Result<AnalysisRecord> {
        self.store
            .get(value)
            .await?
            .ok_or_else(|| AppError::NotFound("String does not exist in the system".to_string()))
    }

    /// All records admitted by structured `criteria`, newest first
    pub async fn list(&self, criteria: &FilterCriteria) -> Result<Vec<AnalysisRecord>> {
        let records = self.select(criteria).await?;
        FILTER_QUERIES_TOTAL.with_label_values(&["structured"]).inc();
        Ok(records)
    }

    /// Interpret a free-text query and return the criteria with its matches
    pub async fn filter_natural_language(
        &self,
        query: &str,
    ) -> Result<(FilterCriteria, Vec<AnalysisRecord>)> {
        let criteria = parse_natural_language(query);
        let records = self.select(&criteria).await?;
        FILTER_QUERIES_TOTAL
            .with_label_values(&["natural_language"])
            .inc();

        Ok((criteria, records))
    }

    async fn select(&self, criteria: &FilterCriteria) -> Result<Vec<AnalysisRecord>> {
        // Rejected before touching the store
        criteria.check_bounds()?;

        let mut records = criteria.apply(self.store.get_all().await?);
        records.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| a.value.cmp(&b.value))
        });

        tracing::debug!(criteria = ?criteria, matched = records.len(), "Filtered records");
        Ok(records)
    }

    /// Delete a record by its value
    pub async fn delete(&self, value: &str) -> Result<()> {
        if !self.store.delete(value).await? {
            return Err(AppError::NotFound(
                "String does not exist in the system".to_string(),
            ));
        }

        STRINGS_DELETED_TOTAL.inc();
        self.refresh_stored_gauge().await;
        tracing::info!("Deleted string");

        Ok(())
    }

    /// Bring the stored-records gauge in line with the backend
    pub async fn refresh_stored_gauge(&self) {
        match self.store.count().await {
            Ok(count) => STRINGS_STORED.set(count as i64),
            Err(e) => tracing::warn!("Failed to count stored records: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::InMemoryStore;

    fn processor() -> StringProcessor {
        StringProcessor::new(Arc::new(InMemoryStore::new()))
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let processor = processor();

        let created = processor.create("hello".to_string()).await.unwrap();
        let fetched = processor.get("hello").await.unwrap();

        assert_eq!(created, fetched);
        assert_eq!(fetched.properties.length, 5);
    }

    #[tokio::test]
    async fn test_create_duplicate_is_conflict() {
        let processor = processor();

        processor.create("hello".to_string()).await.unwrap();
        let result = processor.create("hello".to_string()).await;

        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_empty_string_is_accepted() {
        let processor = processor();

        let record = processor.create(String::new()).await.unwrap();
        assert_eq!(record.properties.length, 0);
        assert!(record.properties.is_palindrome);
    }

    #[tokio::test]
    async fn test_get_missing_is_not_found() {
        let result = processor().get("nothing here").await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete() {
        let processor = processor();
        processor.create("gone soon".to_string()).await.unwrap();

        processor.delete("gone soon").await.unwrap();

        assert!(matches!(
            processor.get("gone soon").await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            processor.delete("gone soon").await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_list_with_criteria() {
        let processor = processor();
        for value in ["level", "hello", "a toyota", "never odd or even"] {
            processor.create(value.to_string()).await.unwrap();
        }

        let criteria = FilterCriteria {
            is_palindrome: Some(true),
            min_length: Some(6),
            ..Default::default()
        };

        let mut values: Vec<String> = processor
            .list(&criteria)
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.value)
            .collect();
        values.sort();

        assert_eq!(values, vec!["a toyota".to_string(), "never odd or even".to_string()]);
    }

    #[tokio::test]
    async fn test_list_rejects_contradictory_bounds() {
        let processor = processor();
        let criteria = FilterCriteria {
            min_length: Some(10),
            max_length: Some(2),
            ..Default::default()
        };

        let result = processor.list(&criteria).await;
        assert!(matches!(result, Err(AppError::ContradictoryFilter(_))));
    }

    #[tokio::test]
    async fn test_natural_language_filter() {
        let processor = processor();
        for value in ["racecar", "noon", "hello", "step on no pets"] {
            processor.create(value.to_string()).await.unwrap();
        }

        let (criteria, records) = processor
            .filter_natural_language("single word palindromic strings")
            .await
            .unwrap();

        assert_eq!(criteria.word_count, Some(1));
        assert_eq!(criteria.is_palindrome, Some(true));

        let mut values: Vec<String> = records.into_iter().map(|r| r.value).collect();
        values.sort();
        assert_eq!(values, vec!["noon".to_string(), "racecar".to_string()]);
    }

    #[tokio::test]
    async fn test_natural_language_and_structured_paths_agree() {
        let processor = processor();
        for value in ["abc", "abcdef", "abcdefghijk"] {
            processor.create(value.to_string()).await.unwrap();
        }

        let (criteria, nl_records) = processor
            .filter_natural_language("strings longer than 5 characters")
            .await
            .unwrap();
        let structured = processor.list(&criteria).await.unwrap();

        assert_eq!(nl_records, structured);
        assert_eq!(nl_records.len(), 2);
    }
}
