//! Repository trait for customer record storage.

use crate::domain::entities::{Customer, NewCustomer, SourceSystem};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for the customer record store.
///
/// Reads return a consistent snapshot: a read racing a write observes the
/// store either entirely before or entirely after that write.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgCustomerRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::InMemoryCustomerRepository`] - Process-local implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_customer.rs`, `tests/repository_memory.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    /// Inserts a record, or replaces name and email of the record with the
    /// same `(customer_id, source)`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn upsert(&self, customer: NewCustomer) -> Result<Customer, AppError>;

    /// Upserts a batch atomically: either every record is written or none.
    ///
    /// Callers must not pass the same `(customer_id, source)` twice.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn upsert_batch(&self, customers: Vec<NewCustomer>) -> Result<Vec<Customer>, AppError>;

    /// Deletes every record and stores `customers` in one atomic write.
    ///
    /// If the write fails the previous contents are kept. Callers must not
    /// pass the same `(customer_id, source)` twice.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn replace(&self, customers: Vec<NewCustomer>) -> Result<Vec<Customer>, AppError>;

    /// Returns every stored record ordered by surrogate id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Integrity`] if a stored row has an unknown source.
    /// Returns [`AppError::Internal`] on storage errors.
    async fn snapshot(&self) -> Result<Vec<Customer>, AppError>;

    /// Returns the records of one source ordered by surrogate id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn find_by_source(&self, source: SourceSystem) -> Result<Vec<Customer>, AppError>;

    /// Deletes every record and returns how many were removed.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn clear(&self) -> Result<u64, AppError>;

    /// Counts stored records.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn count(&self) -> Result<i64, AppError>;
}
