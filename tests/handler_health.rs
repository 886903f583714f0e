mod common;

use async_trait::async_trait;
use axum::{Router, http::StatusCode, routing::get};
use axum_test::TestServer;
use customer_dedup::api::handlers::{health_handler, root_handler};
use customer_dedup::domain::entities::{Customer, NewCustomer, SourceSystem};
use customer_dedup::domain::repositories::CustomerRepository;
use customer_dedup::error::AppError;
use customer_dedup::state::AppState;
use std::sync::Arc;

fn make_server(state: AppState) -> TestServer {
    let app = Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .with_state(state);
    TestServer::new(app).unwrap()
}

/// Store whose every call fails, as when the database is unreachable.
struct UnavailableRepository;

#[async_trait]
impl CustomerRepository for UnavailableRepository {
    async fn upsert(&self, _customer: NewCustomer) -> Result<Customer, AppError> {
        Err(AppError::internal("Database error", serde_json::json!({})))
    }

    async fn upsert_batch(&self, _batch: Vec<NewCustomer>) -> Result<Vec<Customer>, AppError> {
        Err(AppError::internal("Database error", serde_json::json!({})))
    }

    async fn replace(&self, _batch: Vec<NewCustomer>) -> Result<Vec<Customer>, AppError> {
        Err(AppError::internal("Database error", serde_json::json!({})))
    }

    async fn snapshot(&self) -> Result<Vec<Customer>, AppError> {
        Err(AppError::internal("Database error", serde_json::json!({})))
    }

    async fn find_by_source(&self, _source: SourceSystem) -> Result<Vec<Customer>, AppError> {
        Err(AppError::internal("Database error", serde_json::json!({})))
    }

    async fn clear(&self) -> Result<u64, AppError> {
        Err(AppError::internal("Database error", serde_json::json!({})))
    }

    async fn count(&self) -> Result<i64, AppError> {
        Err(AppError::internal("Database error", serde_json::json!({})))
    }
}

#[tokio::test]
async fn test_root_endpoint() {
    let server = make_server(common::create_test_state());

    let response = server.get("/").await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["message"], "Customer Deduplication API");
    assert_eq!(json["status"], "running");
    assert!(json.get("version").is_some());
}

#[tokio::test]
async fn test_health_endpoint_success() {
    let server = make_server(common::create_test_state());

    let response = server.get("/health").await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["checks"]["store"]["status"], "ok");
}

#[tokio::test]
async fn test_health_endpoint_degraded() {
    let state = AppState::new(Arc::new(UnavailableRepository), 10);
    let server = make_server(state);

    let response = server.get("/health").await;

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["checks"]["store"]["status"], "error");
}

#[tokio::test]
async fn test_unavailable_store_on_api() {
    let state = AppState::new(Arc::new(UnavailableRepository), 10);
    let app = Router::new()
        .nest("/api/v1", customer_dedup::api::routes::api_routes())
        .with_state(state);
    let server = TestServer::new(app).unwrap();

    let response = server.get("/api/v1/deduplication/analyze").await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response.json::<serde_json::Value>()["error"]["code"],
        "internal_error"
    );
}
