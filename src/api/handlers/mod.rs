//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod customers;
pub mod deduplication;
pub mod health;

pub use customers::{
    bulk_upload_handler, clear_customers_handler, create_customer_handler,
    list_by_source_handler, list_customers_handler,
};
pub use deduplication::{analyze_handler, compare_sources_handler};
pub use health::{health_handler, root_handler};
