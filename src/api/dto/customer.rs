//! DTOs for customer ingestion and listing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

use crate::domain::entities::{Customer, NewCustomer, SourceSystem};

/// A customer record as sent by a source system.
///
/// Unknown `source` values are rejected during deserialization.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCustomerRequest {
    /// Customer id in the source system.
    pub customer_id: i64,

    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    pub source: SourceSystem,
}

impl From<CreateCustomerRequest> for NewCustomer {
    fn from(request: CreateCustomerRequest) -> Self {
        NewCustomer {
            customer_id: request.customer_id,
            name: request.name,
            email: request.email,
            source: request.source,
        }
    }
}

/// Batch of customer records from one or more sources.
///
/// Also the format of seed files loaded by the `admin` binary.
#[derive(Debug, Deserialize, Validate)]
pub struct BulkUploadRequest {
    #[validate(nested)]
    pub customers: Vec<CreateCustomerRequest>,
}

/// A stored customer record.
#[derive(Debug, Serialize)]
pub struct CustomerResponse {
    pub id: i64,
    pub customer_id: i64,
    pub name: String,
    pub email: String,
    pub source: SourceSystem,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<Customer> for CustomerResponse {
    fn from(customer: Customer) -> Self {
        CustomerResponse {
            id: customer.id,
            customer_id: customer.customer_id,
            name: customer.name,
            email: customer.email,
            source: customer.source,
            created_at: customer.created_at,
            updated_at: customer.updated_at,
        }
    }
}

/// Human-readable outcome of a bulk mutation.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}
