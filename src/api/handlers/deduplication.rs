//! Handlers for deduplication analysis endpoints.

use axum::{Json, extract::State};

use crate::api::dto::deduplication::{DeduplicationResponse, SourceComparisonResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Counts unique customers and duplicates across all sources.
///
/// # Endpoint
///
/// `GET /api/v1/deduplication/analyze`
///
/// # Response
///
/// ```json
/// {
///   "total_records": 12,
///   "unique_customers": 8,
///   "duplicates_found": 4,
///   "unique_customer_ids": [101, 102, 103, 104, 105, 106, 107, 108]
/// }
/// ```
///
/// An empty store yields all zeros and an empty id list.
///
/// # Errors
///
/// Returns 500 `integrity_error` if stored data cannot be reconciled.
pub async fn analyze_handler(
    State(state): State<AppState>,
) -> Result<Json<DeduplicationResponse>, AppError> {
    let report = state.reconciliation_service.analyze().await?;

    Ok(Json(report.into()))
}

/// Compares customer ids across sources.
///
/// # Endpoint
///
/// `GET /api/v1/deduplication/compare-sources`
///
/// # Response
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
///
/// # Errors
///
/// Returns 500 `integrity_error` if stored data cannot be reconciled.
pub async fn compare_sources_handler(
    State(state): State<AppState>,
) -> Result<Json<SourceComparisonResponse>, AppError> {
    let report = state.reconciliation_service.compare().await?;

    Ok(Json(report.into()))
}
