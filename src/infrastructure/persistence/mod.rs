//! Customer store implementations.
//!
//! # Repositories
//!
//! - [`PgCustomerRepository`] - PostgreSQL storage via SQLx, used in production
//! - [`InMemoryCustomerRepository`] - Lock-protected process memory, for local runs and tests

pub mod memory_customer_repository;
pub mod pg_customer_repository;

pub use memory_customer_repository::InMemoryCustomerRepository;
pub use pg_customer_repository::PgCustomerRepository;
