//! Closed enumeration of the systems customer records originate from.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::reconciliation::ReconciliationError;

/// Originating system of a customer record.
///
/// Variant order is the order sources appear in every report.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum SourceSystem {
    Salesforce,
    Hubspot,
    Internal,
}

impl SourceSystem {
    /// Every known source, in report order.
    pub const ALL: [SourceSystem; 3] = [Self::Salesforce, Self::Hubspot, Self::Internal];

    /// Wire and storage representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Salesforce => "salesforce",
            Self::Hubspot => "hubspot",
            Self::Internal => "internal",
        }
    }
}

impl fmt::Display for SourceSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SourceSystem {
    type Err = ReconciliationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|source| source.as_str() == s)
            .ok_or_else(|| ReconciliationError::UnknownSource(s.to_string()))
    }
}
