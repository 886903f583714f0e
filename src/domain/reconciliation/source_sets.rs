//! Grouping of a record snapshot into per-source identifier sets.

use std::collections::{BTreeMap, BTreeSet};

use super::ReconciliationError;
use crate::domain::entities::{Customer, SourceSystem};

/// Distinct customer ids per configured source, built from one snapshot.
///
/// Every configured source has an entry, possibly empty. Only identifiers
/// take part in set membership; names and emails never do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceSets {
    sets: BTreeMap<SourceSystem, BTreeSet<i64>>,
    total_records: usize,
}

impl SourceSets {
    /// Builds sets for every known [`SourceSystem`].
    ///
    /// # Errors
    ///
    /// Cannot fail for well-formed records; see [`Self::build_for`].
    pub fn build<'a, I>(records: I) -> Result<Self, ReconciliationError>
    where
        I: IntoIterator<Item = &'a Customer>,
    {
        Self::build_for(&SourceSystem::ALL, records)
    }

    /// Builds sets for an explicit list of configured sources.
    ///
    /// Repeated sources in `configured` count once.
    ///
    /// # Errors
    ///
    /// - [`ReconciliationError::TooFewSources`] if fewer than two distinct
    ///   sources are configured
    /// - [`ReconciliationError::UnconfiguredSource`] on the first record whose
    ///   source is not configured
    pub fn build_for<'a, I>(
        configured: &[SourceSystem],
        records: I,
    ) -> Result<Self, ReconciliationError>
    where
        I: IntoIterator<Item = &'a Customer>,
    {
        let mut sets: BTreeMap<SourceSystem, BTreeSet<i64>> = configured
            .iter()
            .map(|source| (*source, BTreeSet::new()))
            .collect();

        if sets.len() < 2 {
            return Err(ReconciliationError::TooFewSources(sets.len()));
        }

        let mut total_records = 0;
        for record in records {
            let set = sets.get_mut(&record.source).ok_or(
                ReconciliationError::UnconfiguredSource {
                    customer_id: record.customer_id,
                    system: record.source,
                },
            )?;
            set.insert(record.customer_id);
            total_records += 1;
        }

        Ok(Self {
            sets,
            total_records,
        })
    }

    /// Number of records the sets were built from.
    pub fn total_records(&self) -> usize {
        self.total_records
    }

    /// Number of configured sources.
    pub fn source_count(&self) -> usize {
        self.sets.len()
    }

    /// Identifier set of one source, `None` if the source is not configured.
    pub fn get(&self, source: SourceSystem) -> Option<&BTreeSet<i64>> {
        self.sets.get(&source)
    }

    /// Iterates sources in report order with their identifier sets.
    pub fn iter(&self) -> impl Iterator<Item = (SourceSystem, &BTreeSet<i64>)> {
        self.sets.iter().map(|(source, ids)| (*source, ids))
    }
}

/// Returns the records of one source, preserving snapshot order.
pub fn filter_by_source<'a, I>(records: I, source: SourceSystem) -> Vec<Customer>
where
    I: IntoIterator<Item = &'a Customer>,
{
    records
        .into_iter()
        .filter(|record| record.source == source)
        .cloned()
        .collect()
}
