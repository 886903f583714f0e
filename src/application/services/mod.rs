//! Business logic services for the application layer.

pub mod customer_service;
pub mod reconciliation_service;

pub use customer_service::CustomerService;
pub use reconciliation_service::ReconciliationService;
