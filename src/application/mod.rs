//! Application layer services implementing business logic.
//!
//! This layer orchestrates domain operations by coordinating repository calls,
//! validation, and the reconciliation engine. Services consume repository
//! traits and provide a clean API for HTTP handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::customer_service::CustomerService`] - Record ingestion, listing and reset
//! - [`services::reconciliation_service::ReconciliationService`] - Deduplication analysis and source comparison

pub mod services;
