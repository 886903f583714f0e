//! Process-local implementation of customer repository.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::{BTreeMap, HashMap};
use tokio::sync::RwLock;

use crate::domain::entities::{Customer, NewCustomer, SourceSystem};
use crate::domain::reconciliation::filter_by_source;
use crate::domain::repositories::CustomerRepository;
use crate::error::AppError;

#[derive(Debug, Default)]
struct StoreState {
    last_id: i64,
    /// Records by surrogate id; iteration order is snapshot order.
    rows: BTreeMap<i64, Customer>,
    keys: HashMap<(i64, SourceSystem), i64>,
}

impl StoreState {
    fn upsert(&mut self, customer: NewCustomer) -> Customer {
        if let Some(id) = self.keys.get(&customer.key())
            && let Some(existing) = self.rows.get_mut(id)
        {
            existing.name = customer.name;
            existing.email = customer.email;
            existing.updated_at = Some(Utc::now());
            return existing.clone();
        }

        self.last_id += 1;
        let stored = Customer::new(
            self.last_id,
            customer.customer_id,
            customer.name,
            customer.email,
            customer.source,
            Utc::now(),
            None,
        );
        self.keys.insert(stored.key(), stored.id);
        self.rows.insert(stored.id, stored.clone());
        stored
    }
}

/// In-memory customer store for local runs and tests.
///
/// All state sits behind one lock: readers clone a snapshot under the read
/// guard and a batch is applied under a single write guard, so no reader can
/// observe half a batch. Surrogate ids keep increasing across clears, like a
/// database sequence.
#[derive(Debug, Default)]
pub struct InMemoryCustomerRepository {
    state: RwLock<StoreState>,
}

impl InMemoryCustomerRepository {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CustomerRepository for InMemoryCustomerRepository {
    async fn upsert(&self, customer: NewCustomer) -> Result<Customer, AppError> {
        Ok(self.state.write().await.upsert(customer))
    }

    async fn upsert_batch(&self, customers: Vec<NewCustomer>) -> Result<Vec<Customer>, AppError> {
        let mut state = self.state.write().await;
        Ok(customers
            .into_iter()
            .map(|customer| state.upsert(customer))
            .collect())
    }

    async fn replace(&self, customers: Vec<NewCustomer>) -> Result<Vec<Customer>, AppError> {
        let mut state = self.state.write().await;
        state.rows.clear();
        state.keys.clear();
        Ok(customers
            .into_iter()
            .map(|customer| state.upsert(customer))
            .collect())
    }

    async fn snapshot(&self) -> Result<Vec<Customer>, AppError> {
        Ok(self.state.read().await.rows.values().cloned().collect())
    }

    async fn find_by_source(&self, source: SourceSystem) -> Result<Vec<Customer>, AppError> {
        Ok(filter_by_source(self.state.read().await.rows.values(), source))
    }

    async fn clear(&self) -> Result<u64, AppError> {
        let mut state = self.state.write().await;
        let deleted = state.rows.len() as u64;
        state.rows.clear();
        state.keys.clear();
        Ok(deleted)
    }

    async fn count(&self) -> Result<i64, AppError> {
        Ok(self.state.read().await.rows.len() as i64)
    }
}
