//! Core domain entities representing the business data model.
//!
//! # Entity Types
//!
//! - [`Customer`] - A customer record as stored, keyed by `(customer_id, source)`
//! - [`SourceSystem`] - The closed set of systems records come from
//!
//! # Design Pattern
//!
//! Stored entities have a separate struct for ingestion input:
//! - `NewCustomer` - For inserting or replacing a record

pub mod customer;
pub mod source;

pub use customer::{Customer, NewCustomer};
pub use source::SourceSystem;
