//! Repository trait definitions for the domain layer.
//!
//! This module defines the repository interfaces (traits) that abstract data access
//! operations following the Repository pattern. These traits are implemented by
//! concrete repositories in the infrastructure layer.
//!
//! # Architecture
//!
//! - Traits define the contract for data operations
//! - Implementations live in `crate::infrastructure::persistence`
//! - Mock implementations are auto-generated via `mockall` for testing
//!
//! # Available Repositories
//!
//! - [`CustomerRepository`] - Customer record storage with atomic snapshots

pub mod customer_repository;

pub use customer_repository::CustomerRepository;

#[cfg(test)]
pub use customer_repository::MockCustomerRepository;
