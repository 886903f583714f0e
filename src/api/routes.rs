//! API route configuration, nested under `/api/v1`.

use crate::api::handlers::{
    analyze_handler, bulk_upload_handler, clear_customers_handler, compare_sources_handler,
    create_customer_handler, list_by_source_handler, list_customers_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// All versioned API routes.
///
/// # Endpoints
///
/// - `POST   /customers`                   - Create or replace one record
/// - `GET    /customers`                   - List all records
/// - `DELETE /customers`                   - Delete all records
/// - `POST   /customers/bulk`              - Upload a batch of records
/// - `GET    /customers/source/{source}`   - List records of one source
/// - `GET    /deduplication/analyze`       - Unique customers and duplicates
/// - `GET    /deduplication/compare-sources` - Cross-source comparison
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/customers",
            post(create_customer_handler)
                .get(list_customers_handler)
                .delete(clear_customers_handler),
        )
        .route("/customers/bulk", post(bulk_upload_handler))
        .route("/customers/source/{source}", get(list_by_source_handler))
        .route("/deduplication/analyze", get(analyze_handler))
        .route("/deduplication/compare-sources", get(compare_sources_handler))
}
