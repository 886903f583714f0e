//! Handlers for customer ingestion, listing and reset endpoints.

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use serde_json::json;
use validator::Validate;

use crate::api::dto::customer::{
    BulkUploadRequest, CreateCustomerRequest, CustomerResponse, MessageResponse,
};
use crate::domain::entities::{NewCustomer, SourceSystem};
use crate::error::AppError;
use crate::state::AppState;

/// Creates or replaces a single customer record.
///
/// # Endpoint
///
/// `POST /api/v1/customers`
///
/// # Request Body
///
/// ```json
/// {
///   "customer_id": 999,
///   "name": "Test User",
///   "email": "test@example.com",
///   "source": "salesforce"
/// }
/// ```
///
/// # Errors
///
/// Returns 400 if the body is not a valid record (e.g. unknown source) or
/// name or email fail validation.
pub async fn create_customer_handler(
    State(state): State<AppState>,
    payload: Result<Json<CreateCustomerRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CustomerResponse>), AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let customer = state
        .customer_service
        .create_customer(payload.into())
        .await?;

    Ok((StatusCode::CREATED, Json(customer.into())))
}

/// Uploads a batch of customer records in one atomic write.
///
/// # Endpoint
///
/// `POST /api/v1/customers/bulk`
///
/// # Request Body
///
/// ```json
/// {
///   "customers": [
///     { "customer_id": 101, "name": "John Doe", "email": "john@example.com", "source": "salesforce" },
///     { "customer_id": 101, "name": "John Doe", "email": "john@example.com", "source": "hubspot" }
///   ]
/// }
/// ```
///
/// # Response
///
/// ```json
/// {
///   "message": "Successfully uploaded 2 customer records",
///   "details": { "count": 2 }
/// }
/// ```
///
/// # Errors
///
/// Returns 400 if the body is malformed, any record fails validation, the
/// batch is empty, or it exceeds the configured maximum. Nothing is stored
/// in that case.
pub async fn bulk_upload_handler(
    State(state): State<AppState>,
    payload: Result<Json<BulkUploadRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<MessageResponse>), AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let batch: Vec<NewCustomer> = payload.customers.into_iter().map(Into::into).collect();
    let stored = state.customer_service.bulk_upload(batch).await?;
    let count = stored.len();

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: format!("Successfully uploaded {count} customer records"),
            details: Some(json!({ "count": count })),
        }),
    ))
}

/// Lists every stored record from all sources.
///
/// # Endpoint
///
/// `GET /api/v1/customers`
pub async fn list_customers_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<CustomerResponse>>, AppError> {
    let customers = state.customer_service.list_customers().await?;

    Ok(Json(customers.into_iter().map(Into::into).collect()))
}

/// Lists the records of one source.
///
/// # Endpoint
///
/// `GET /api/v1/customers/source/{source}`
///
/// # Errors
///
/// Returns 400 if `source` is not a known source system.
pub async fn list_by_source_handler(
    Path(source): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Vec<CustomerResponse>>, AppError> {
    let source: SourceSystem = source.parse().map_err(|_| {
        AppError::bad_request(
            "Unknown source system",
            json!({
                "source": source,
                "allowed": SourceSystem::ALL.map(SourceSystem::as_str),
            }),
        )
    })?;

    let customers = state.customer_service.list_by_source(source).await?;

    Ok(Json(customers.into_iter().map(Into::into).collect()))
}

/// Deletes every stored record.
///
/// # Endpoint
///
/// `DELETE /api/v1/customers`
///
/// # Response
///
/// ```json
/// {
///   "message": "Successfully deleted all customer records",
///   "details": { "deleted_count": 9 }
/// }
/// ```
pub async fn clear_customers_handler(
    State(state): State<AppState>,
) -> Result<Json<MessageResponse>, AppError> {
    let deleted = state.customer_service.clear_customers().await?;

    Ok(Json(MessageResponse {
        message: "Successfully deleted all customer records".to_string(),
        details: Some(json!({ "deleted_count": deleted })),
    }))
}
