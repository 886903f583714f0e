//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::{CustomerService, ReconciliationService};
use crate::domain::repositories::CustomerRepository;

/// Services shared across requests.
///
/// Both services read and write the same record store, so an analysis
/// always reflects every upload acknowledged before it.
#[derive(Clone)]
pub struct AppState {
    pub customer_service: Arc<CustomerService<dyn CustomerRepository>>,
    pub reconciliation_service: Arc<ReconciliationService<dyn CustomerRepository>>,
}

impl AppState {
    /// Builds the services on top of one record store.
    pub fn new(repository: Arc<dyn CustomerRepository>, max_bulk_records: usize) -> Self {
        Self {
            customer_service: Arc::new(CustomerService::new(
                repository.clone(),
                max_bulk_records,
            )),
            reconciliation_service: Arc::new(ReconciliationService::new(repository)),
        }
    }
}
