//! DTOs for deduplication analysis and source comparison.

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

use crate::domain::reconciliation::{AnalysisReport, ComparisonReport};

/// Result of the union analysis over all sources.
#[derive(Debug, Serialize)]
pub struct DeduplicationResponse {
    pub total_records: usize,
    pub unique_customers: usize,
    pub duplicates_found: usize,
    pub unique_customer_ids: Vec<i64>,
}

impl From<AnalysisReport> for DeduplicationResponse {
    fn from(report: AnalysisReport) -> Self {
        DeduplicationResponse {
            total_records: report.total_records,
            unique_customers: report.unique_customers,
            duplicates_found: report.duplicates_found,
            unique_customer_ids: report.unique_customer_ids,
        }
    }
}

/// Cross-source comparison, serialized with one flat key per source.
///
/// ```json
/// {
///   "in_all_sources": [],
///   "only_in_salesforce": [101],
///   "only_in_hubspot": [106],
///   "only_in_internal": [107, 108],
///   "salesforce_count": 4,
///   "hubspot_count": 4,
///   "internal_count": 4,
///   "partially_shared": [102, 103, 104, 105]
/// }
/// ```
#[derive(Debug)]
pub struct SourceComparisonResponse(pub ComparisonReport);

impl From<ComparisonReport> for SourceComparisonResponse {
    fn from(report: ComparisonReport) -> Self {
        Self(report)
    }
}

impl Serialize for SourceComparisonResponse {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let report = &self.0;
        let mut map = serializer.serialize_map(Some(2 + 2 * report.per_source.len()))?;

        map.serialize_entry("in_all_sources", &report.in_all_sources)?;
        for breakdown in &report.per_source {
            map.serialize_entry(&format!("only_in_{}", breakdown.source), &breakdown.only_in)?;
        }
        for breakdown in &report.per_source {
            map.serialize_entry(&format!("{}_count", breakdown.source), &breakdown.count)?;
        }
        map.serialize_entry("partially_shared", &report.partially_shared)?;

        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::SourceSystem;
    use crate::domain::reconciliation::SourceBreakdown;
    use serde_json::json;

    #[test]
    fn test_comparison_flat_keys() {
        let report = ComparisonReport {
            in_all_sources: vec![3],
            partially_shared: vec![],
            per_source: vec![
                SourceBreakdown {
                    source: SourceSystem::Salesforce,
                    only_in: vec![1],
                    count: 2,
                },
                SourceBreakdown {
                    source: SourceSystem::Internal,
                    only_in: vec![],
                    count: 1,
                },
            ],
        };

        let value = serde_json::to_value(SourceComparisonResponse(report)).unwrap();

        assert_eq!(
            value,
            json!({
                "in_all_sources": [3],
                "only_in_salesforce": [1],
                "only_in_internal": [],
                "salesforce_count": 2,
                "internal_count": 1,
                "partially_shared": []
            })
        );
    }

    #[test]
    fn test_comparison_key_order() {
        let report = ComparisonReport {
            in_all_sources: vec![],
            partially_shared: vec![],
            per_source: vec![
                SourceBreakdown {
                    source: SourceSystem::Salesforce,
                    only_in: vec![],
                    count: 0,
                },
                SourceBreakdown {
                    source: SourceSystem::Hubspot,
                    only_in: vec![],
                    count: 0,
                },
            ],
        };

        let text = serde_json::to_string(&SourceComparisonResponse(report)).unwrap();

        let position = |key: &str| text.find(key).unwrap();
        assert!(position("in_all_sources") < position("only_in_salesforce"));
        assert!(position("only_in_hubspot") < position("salesforce_count"));
        assert!(position("hubspot_count") < position("partially_shared"));
    }
}
