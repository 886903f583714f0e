//! Customer ingestion and listing service.

use std::collections::HashSet;
use std::sync::Arc;

use crate::domain::entities::{Customer, NewCustomer, SourceSystem};
use crate::domain::repositories::CustomerRepository;
use crate::error::AppError;
use serde_json::json;

/// Service for ingesting, listing and clearing customer records.
///
/// Ingestion is an upsert keyed by `(customer_id, source)`: re-sending a
/// record replaces its attributes instead of adding a second one.
pub struct CustomerService<R: CustomerRepository + ?Sized> {
    repository: Arc<R>,
    max_batch_size: usize,
}

impl<R: CustomerRepository + ?Sized> CustomerService<R> {
    /// Creates a new customer service.
    ///
    /// `max_batch_size` bounds a single bulk upload.
    pub fn new(repository: Arc<R>, max_batch_size: usize) -> Self {
        Self {
            repository,
            max_batch_size,
        }
    }

    /// Ingests a single record.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn create_customer(&self, customer: NewCustomer) -> Result<Customer, AppError> {
        let stored = self.repository.upsert(customer).await?;
        metrics::counter!("customers_upserted_total").increment(1);

        tracing::info!(
            customer_id = stored.customer_id,
            source = %stored.source,
            "Customer record stored"
        );
        Ok(stored)
    }

    /// Ingests a batch atomically.
    ///
    /// When the same `(customer_id, source)` appears more than once in the
    /// batch, the last occurrence wins.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the batch is empty or larger than
    /// the configured maximum.
    /// Returns [`AppError::Internal`] on storage errors; nothing is written.
    pub async fn bulk_upload(&self, batch: Vec<NewCustomer>) -> Result<Vec<Customer>, AppError> {
        let batch = self.prepare_batch(batch)?;

        let stored = self.repository.upsert_batch(batch).await?;
        metrics::counter!("customers_upserted_total").increment(stored.len() as u64);

        tracing::info!(count = stored.len(), "Bulk upload stored");
        Ok(stored)
    }

    /// Replaces every stored record with `batch` in one atomic write.
    ///
    /// Readers see either the old contents or the new ones, never an empty
    /// store in between. Batch rules are those of [`Self::bulk_upload`].
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the batch is empty or larger than
    /// the configured maximum.
    /// Returns [`AppError::Internal`] on storage errors; the old contents are kept.
    pub async fn replace_customers(
        &self,
        batch: Vec<NewCustomer>,
    ) -> Result<Vec<Customer>, AppError> {
        let batch = self.prepare_batch(batch)?;

        let stored = self.repository.replace(batch).await?;
        metrics::counter!("customers_upserted_total").increment(stored.len() as u64);

        tracing::info!(count = stored.len(), "Customer store replaced");
        Ok(stored)
    }

    fn prepare_batch(&self, batch: Vec<NewCustomer>) -> Result<Vec<NewCustomer>, AppError> {
        if batch.is_empty() {
            return Err(AppError::bad_request(
                "Bulk upload must contain at least one customer",
                json!({}),
            ));
        }

        if batch.len() > self.max_batch_size {
            return Err(AppError::bad_request(
                "Too many customers in one upload",
                json!({ "max": self.max_batch_size, "received": batch.len() }),
            ));
        }

        let received = batch.len();
        let batch = collapse_repeated_keys(batch);
        if batch.len() < received {
            tracing::debug!(
                received,
                distinct = batch.len(),
                "Collapsed repeated (customer_id, source) pairs"
            );
        }

        Ok(batch)
    }

    /// Lists every record ordered by surrogate id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn list_customers(&self) -> Result<Vec<Customer>, AppError> {
        self.repository.snapshot().await
    }

    /// Lists the records of one source.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn list_by_source(&self, source: SourceSystem) -> Result<Vec<Customer>, AppError> {
        self.repository.find_by_source(source).await
    }

    /// Deletes every record and returns how many were removed.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn clear_customers(&self) -> Result<u64, AppError> {
        let deleted = self.repository.clear().await?;
        metrics::counter!("customers_cleared_total").increment(deleted);

        tracing::info!(deleted, "Customer store cleared");
        Ok(deleted)
    }

    /// Counts stored records.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn count_customers(&self) -> Result<i64, AppError> {
        self.repository.count().await
    }
}

/// Keeps the last occurrence of every `(customer_id, source)` pair, in the
/// order those last occurrences appear.
fn collapse_repeated_keys(batch: Vec<NewCustomer>) -> Vec<NewCustomer> {
    let mut seen = HashSet::with_capacity(batch.len());
    let mut kept: Vec<NewCustomer> = batch
        .into_iter()
        .rev()
        .filter(|customer| seen.insert(customer.key()))
        .collect();
    kept.reverse();
    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockCustomerRepository;
    use chrono::Utc;

    fn new_customer(customer_id: i64, name: &str, source: SourceSystem) -> NewCustomer {
        NewCustomer {
            customer_id,
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase().replace(' ', ".")),
            source,
        }
    }

    fn stored(id: i64, customer: &NewCustomer) -> Customer {
        Customer::new(
            id,
            customer.customer_id,
            customer.name.clone(),
            customer.email.clone(),
            customer.source,
            Utc::now(),
            None,
        )
    }

    #[tokio::test]
    async fn test_create_customer_success() {
        let mut mock_repo = MockCustomerRepository::new();

        mock_repo
            .expect_upsert()
            .withf(|c| c.customer_id == 999 && c.source == SourceSystem::Salesforce)
            .times(1)
            .returning(|c| Ok(stored(1, &c)));

        let service = CustomerService::new(Arc::new(mock_repo), 100);

        let result = service
            .create_customer(new_customer(999, "Test User", SourceSystem::Salesforce))
            .await;

        let customer = result.unwrap();
        assert_eq!(customer.customer_id, 999);
        assert_eq!(customer.name, "Test User");
    }

    #[tokio::test]
    async fn test_bulk_upload_success() {
        let mut mock_repo = MockCustomerRepository::new();

        mock_repo
            .expect_upsert_batch()
            .withf(|batch| batch.len() == 3)
            .times(1)
            .returning(|batch| {
                Ok(batch
                    .iter()
                    .enumerate()
                    .map(|(i, c)| stored(i as i64 + 1, c))
                    .collect())
            });

        let service = CustomerService::new(Arc::new(mock_repo), 100);

        let batch = vec![
            new_customer(101, "John Doe", SourceSystem::Salesforce),
            new_customer(101, "John Doe", SourceSystem::Hubspot),
            new_customer(102, "Jane Smith", SourceSystem::Internal),
        ];

        let result = service.bulk_upload(batch).await;

        assert_eq!(result.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_bulk_upload_last_occurrence_wins() {
        let mut mock_repo = MockCustomerRepository::new();

        mock_repo
            .expect_upsert_batch()
            .withf(|batch| {
                batch.len() == 2
                    && batch[0].customer_id == 102
                    && batch[1].customer_id == 101
                    && batch[1].name == "Johnny Doe"
            })
            .times(1)
            .returning(|batch| Ok(batch.iter().map(|c| stored(1, c)).collect()));

        let service = CustomerService::new(Arc::new(mock_repo), 100);

        let batch = vec![
            new_customer(101, "John Doe", SourceSystem::Salesforce),
            new_customer(102, "Jane Smith", SourceSystem::Salesforce),
            new_customer(101, "Johnny Doe", SourceSystem::Salesforce),
        ];

        assert!(service.bulk_upload(batch).await.is_ok());
    }

    #[tokio::test]
    async fn test_bulk_upload_empty_rejected() {
        let mock_repo = MockCustomerRepository::new();
        let service = CustomerService::new(Arc::new(mock_repo), 100);

        let result = service.bulk_upload(vec![]).await;

        assert!(matches!(result.unwrap_err(), AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_bulk_upload_too_large_rejected() {
        let mock_repo = MockCustomerRepository::new();
        let service = CustomerService::new(Arc::new(mock_repo), 2);

        let batch = (1..=3)
            .map(|id| new_customer(id, "User", SourceSystem::Internal))
            .collect();

        let result = service.bulk_upload(batch).await;

        assert!(matches!(result.unwrap_err(), AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_bulk_upload_storage_failure_propagates() {
        let mut mock_repo = MockCustomerRepository::new();

        mock_repo
            .expect_upsert_batch()
            .times(1)
            .returning(|_| Err(AppError::internal("Database error", json!({}))));

        let service = CustomerService::new(Arc::new(mock_repo), 100);

        let result = service
            .bulk_upload(vec![new_customer(1, "User", SourceSystem::Hubspot)])
            .await;

        assert!(matches!(result.unwrap_err(), AppError::Internal { .. }));
    }

    #[tokio::test]
    async fn test_list_by_source() {
        let mut mock_repo = MockCustomerRepository::new();

        let hubspot = stored(2, &new_customer(103, "Bob Johnson", SourceSystem::Hubspot));
        mock_repo
            .expect_find_by_source()
            .withf(|source| *source == SourceSystem::Hubspot)
            .times(1)
            .returning(move |_| Ok(vec![hubspot.clone()]));

        let service = CustomerService::new(Arc::new(mock_repo), 100);

        let list = service.list_by_source(SourceSystem::Hubspot).await.unwrap();

        assert_eq!(list.len(), 1);
        assert_eq!(list[0].source, SourceSystem::Hubspot);
    }

    #[tokio::test]
    async fn test_clear_customers() {
        let mut mock_repo = MockCustomerRepository::new();

        mock_repo.expect_clear().times(1).returning(|| Ok(9));

        let service = CustomerService::new(Arc::new(mock_repo), 100);

        assert_eq!(service.clear_customers().await.unwrap(), 9);
    }

    #[tokio::test]
    async fn test_replace_customers_single_store_write() {
        let mut mock_repo = MockCustomerRepository::new();

        mock_repo.expect_clear().times(0);
        mock_repo.expect_upsert_batch().times(0);
        mock_repo
            .expect_replace()
            .withf(|batch| batch.len() == 2)
            .times(1)
            .returning(|batch| {
                Ok(batch
                    .iter()
                    .enumerate()
                    .map(|(i, c)| stored(i as i64 + 1, c))
                    .collect())
            });

        let service = CustomerService::new(Arc::new(mock_repo), 100);

        let result = service
            .replace_customers(vec![
                new_customer(101, "John Doe", SourceSystem::Salesforce),
                new_customer(101, "John Doe", SourceSystem::Hubspot),
            ])
            .await;

        assert_eq!(result.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_replace_customers_failure_clears_nothing() {
        let mut mock_repo = MockCustomerRepository::new();

        mock_repo.expect_clear().times(0);
        mock_repo
            .expect_replace()
            .times(1)
            .returning(|_| Err(AppError::internal("Database error", json!({}))));

        let service = CustomerService::new(Arc::new(mock_repo), 100);

        let result = service
            .replace_customers(vec![new_customer(7, "Jane", SourceSystem::Internal)])
            .await;

        assert!(matches!(result.unwrap_err(), AppError::Internal { .. }));
    }

    #[tokio::test]
    async fn test_replace_customers_empty_rejected() {
        let mut mock_repo = MockCustomerRepository::new();

        mock_repo.expect_replace().times(0);

        let service = CustomerService::new(Arc::new(mock_repo), 100);

        let result = service.replace_customers(vec![]).await;

        assert!(matches!(result.unwrap_err(), AppError::Validation { .. }));
    }

    #[test]
    fn test_collapse_repeated_keys_keeps_distinct_sources() {
        let batch = vec![
            new_customer(103, "Bob", SourceSystem::Salesforce),
            new_customer(103, "Bob", SourceSystem::Hubspot),
            new_customer(103, "Robert", SourceSystem::Salesforce),
        ];

        let kept = collapse_repeated_keys(batch);

        assert_eq!(kept.len(), 2);
        assert_eq!(kept[0].source, SourceSystem::Hubspot);
        assert_eq!(kept[1].name, "Robert");
    }
}
