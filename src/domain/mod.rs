//! Domain layer containing business entities and logic.
//!
//! It defines entities, repository interfaces, and the reconciliation engine
//! independent of infrastructure concerns.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//! - [`reconciliation`] - Pure set arithmetic over record snapshots
//!
//! # Design Principles
//!
//! - Domain layer has no dependencies on infrastructure or presentation layers
//! - Repository traits define contracts implemented by infrastructure layer
//! - Orchestration lives in services (see [`crate::application::services`])
//!
//! # Reconciliation Flow
//!
//! 1. A service reads one snapshot via [`repositories::CustomerRepository::snapshot`]
//! 2. [`reconciliation::SourceSets::build`] groups it into per-source id sets
//! 3. [`reconciliation::analyze`] / [`reconciliation::compare`] produce the reports

pub mod entities;
pub mod reconciliation;
pub mod repositories;
