//! Identifier-level reconciliation of customer records across sources.
//!
//! Everything here is a pure function of one snapshot: no I/O, no shared
//! state, no suspension points. Callers fetch a snapshot from a
//! [`crate::domain::repositories::CustomerRepository`] and hand it over.
//!
//! # Flow
//!
//! 1. [`SourceSets::build`] groups the snapshot into one id set per source
//! 2. [`analyze`] computes the union and duplicate counts
//! 3. [`compare`] computes intersection, exclusivity and partial overlap
//!
//! All id lists in the reports are sorted ascending so repeated runs over
//! the same snapshot produce identical output.

pub mod analysis;
pub mod comparison;
pub mod error;
pub mod source_sets;

pub use analysis::{AnalysisReport, analyze};
pub use comparison::{ComparisonReport, SourceBreakdown, compare};
pub use error::ReconciliationError;
pub use source_sets::{SourceSets, filter_by_source};

#[cfg(test)]
pub(crate) mod fixtures {
    use chrono::Utc;

    use crate::domain::entities::{Customer, SourceSystem};

    pub fn customer(id: i64, customer_id: i64, source: SourceSystem) -> Customer {
        Customer::new(
            id,
            customer_id,
            format!("Customer {customer_id}"),
            format!("customer{customer_id}@example.com"),
            source,
            Utc::now(),
            None,
        )
    }

    /// Builds a snapshot with sequential surrogate ids.
    pub fn records(layout: &[(SourceSystem, &[i64])]) -> Vec<Customer> {
        layout
            .iter()
            .flat_map(|(source, ids)| ids.iter().map(move |id| (*source, *id)))
            .enumerate()
            .map(|(i, (source, customer_id))| customer(i as i64 + 1, customer_id, source))
            .collect()
    }

    /// Twelve records, eight customers, nobody in all three sources.
    pub fn scenario() -> Vec<Customer> {
        records(&[
            (SourceSystem::Salesforce, &[101, 102, 103, 104]),
            (SourceSystem::Hubspot, &[103, 104, 105, 106]),
            (SourceSystem::Internal, &[102, 105, 107, 108]),
        ])
    }
}
