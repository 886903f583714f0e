#![allow(dead_code)]

use axum_test::TestServer;
use customer_dedup::api::routes::api_routes;
use customer_dedup::domain::entities::{NewCustomer, SourceSystem};
use customer_dedup::infrastructure::persistence::InMemoryCustomerRepository;
use customer_dedup::state::AppState;
use serde_json::{Value, json};
use std::sync::Arc;

pub const MAX_BULK_RECORDS: usize = 100;

pub fn create_test_state() -> AppState {
    AppState::new(
        Arc::new(InMemoryCustomerRepository::new()),
        MAX_BULK_RECORDS,
    )
}

/// Serves the versioned API under `/api/v1`, without rate limiting.
pub fn make_server() -> TestServer {
    let app = axum::Router::new()
        .nest("/api/v1", api_routes())
        .with_state(create_test_state());
    TestServer::new(app).unwrap()
}

pub fn new_customer(customer_id: i64, name: &str, source: SourceSystem) -> NewCustomer {
    NewCustomer {
        customer_id,
        name: name.to_string(),
        email: format!("{}@example.com", name.to_lowercase().replace(' ', ".")),
        source,
    }
}

pub fn customer_json(customer_id: i64, name: &str, source: &str) -> Value {
    json!({
        "customer_id": customer_id,
        "name": name,
        "email": format!("{}@example.com", name.to_lowercase().replace(' ', ".")),
        "source": source,
    })
}

/// Twelve records: salesforce 101-104, hubspot 103-106, internal 102/105/107/108.
pub fn scenario_payload() -> Value {
    let mut customers = Vec::new();
    for id in [101, 102, 103, 104] {
        customers.push(customer_json(id, &format!("Customer {id}"), "salesforce"));
    }
    for id in [103, 104, 105, 106] {
        customers.push(customer_json(id, &format!("Customer {id}"), "hubspot"));
    }
    for id in [102, 105, 107, 108] {
        customers.push(customer_json(id, &format!("Customer {id}"), "internal"));
    }
    json!({ "customers": customers })
}

pub async fn upload_scenario(server: &TestServer) {
    server
        .post("/api/v1/customers/bulk")
        .json(&scenario_payload())
        .await
        .assert_status(axum::http::StatusCode::CREATED);
}
