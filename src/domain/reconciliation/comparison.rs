//! N-way overlap and exclusivity across sources.

use std::collections::BTreeMap;

use super::SourceSets;
use crate::domain::entities::SourceSystem;

/// Per-source part of a [`ComparisonReport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceBreakdown {
    pub source: SourceSystem,
    /// Ids found in this source and in no other configured source.
    pub only_in: Vec<i64>,
    /// Distinct ids in this source before any comparison.
    pub count: usize,
}

/// Overlap of every configured source with every other.
///
/// `in_all_sources`, `partially_shared` and all `only_in` lists are pairwise
/// disjoint and together make up the union of all sources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonReport {
    pub in_all_sources: Vec<i64>,
    /// Ids in at least two sources but not in all of them.
    pub partially_shared: Vec<i64>,
    /// One entry per configured source, in report order.
    pub per_source: Vec<SourceBreakdown>,
}

impl ComparisonReport {
    pub fn source(&self, source: SourceSystem) -> Option<&SourceBreakdown> {
        self.per_source.iter().find(|b| b.source == source)
    }
}

/// Classifies every id by how many sources contain it.
///
/// One source means exclusive, all sources means shared everywhere, anything
/// in between is partially shared. With exactly two sources nothing can be
/// partially shared.
pub fn compare(sets: &SourceSets) -> ComparisonReport {
    let source_count = sets.source_count();

    let mut membership: BTreeMap<i64, usize> = BTreeMap::new();
    for (_, ids) in sets.iter() {
        for id in ids {
            *membership.entry(*id).or_default() += 1;
        }
    }

    let mut in_all_sources = Vec::new();
    let mut partially_shared = Vec::new();
    for (id, seen_in) in &membership {
        if *seen_in == source_count {
            in_all_sources.push(*id);
        } else if *seen_in > 1 {
            partially_shared.push(*id);
        }
    }

    let per_source = sets
        .iter()
        .map(|(source, ids)| SourceBreakdown {
            source,
            only_in: ids
                .iter()
                .copied()
                .filter(|id| membership.get(id) == Some(&1))
                .collect(),
            count: ids.len(),
        })
        .collect();

    ComparisonReport {
        in_all_sources,
        partially_shared,
        per_source,
    }
}
