//! Customer entity representing one record ingested from a source system.

use chrono::{DateTime, Utc};

use super::SourceSystem;

/// A stored customer record.
///
/// `customer_id` is only unique within a single source: the same id coming
/// from two sources is two records. The store keys records by
/// `(customer_id, source)`; `id` is its surrogate key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    pub id: i64,
    pub customer_id: i64,
    pub name: String,
    pub email: String,
    pub source: SourceSystem,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Customer {
    /// Creates a new Customer instance.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: i64,
        customer_id: i64,
        name: String,
        email: String,
        source: SourceSystem,
        created_at: DateTime<Utc>,
        updated_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            id,
            customer_id,
            name,
            email,
            source,
            created_at,
            updated_at,
        }
    }

    /// Store key of this record.
    pub fn key(&self) -> (i64, SourceSystem) {
        (self.customer_id, self.source)
    }
}

/// Input data for ingesting a customer record.
///
/// Ingesting a `(customer_id, source)` pair that already exists replaces the
/// stored name and email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCustomer {
    pub customer_id: i64,
    pub name: String,
    pub email: String,
    pub source: SourceSystem,
}

impl NewCustomer {
    pub fn key(&self) -> (i64, SourceSystem) {
        (self.customer_id, self.source)
    }
}
