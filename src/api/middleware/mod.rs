//! HTTP middleware for request processing and protection.
//!
//! Provides rate limiting and observability middleware.

pub mod rate_limit;
pub mod tracing;
