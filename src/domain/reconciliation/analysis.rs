//! Union and duplicate analysis.

use std::collections::BTreeSet;

use super::SourceSets;

/// How many distinct customers exist and how much duplication there is.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AnalysisReport {
    pub total_records: usize,
    pub unique_customers: usize,
    pub duplicates_found: usize,
    /// Ascending, no repeats.
    pub unique_customer_ids: Vec<i64>,
}

/// Computes the union of every source set in one pass.
///
/// An id present in two sources is two records but one unique customer, so
/// it adds one to `duplicates_found`.
pub fn analyze(sets: &SourceSets) -> AnalysisReport {
    let union: BTreeSet<i64> = sets
        .iter()
        .flat_map(|(_, ids)| ids.iter().copied())
        .collect();

    let total_records = sets.total_records();
    let unique_customers = union.len();

    AnalysisReport {
        total_records,
        unique_customers,
        // every union member came from at least one record
        duplicates_found: total_records - unique_customers,
        unique_customer_ids: union.into_iter().collect(),
    }
}
