use thiserror::Error;

use crate::domain::entities::SourceSystem;

/// Integrity faults detected while reconciling a snapshot.
///
/// None of these is recoverable inside the engine: a report computed after
/// skipping the offending record would have wrong counts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReconciliationError {
    /// A record carries a source that is not part of the comparison.
    #[error("customer {customer_id} comes from '{system}', which is not a configured source")]
    UnconfiguredSource {
        customer_id: i64,
        system: SourceSystem,
    },

    /// A stored source tag does not name any known source system.
    #[error("unknown source system '{0}'")]
    UnknownSource(String),

    /// Set comparison needs at least two sources.
    #[error("at least two sources must be configured, got {0}")]
    TooFewSources(usize),
}
