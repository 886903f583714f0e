//! PostgreSQL implementation of customer repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgExecutor, PgPool};
use std::sync::Arc;

use crate::domain::entities::{Customer, NewCustomer, SourceSystem};
use crate::domain::reconciliation::ReconciliationError;
use crate::domain::repositories::CustomerRepository;
use crate::error::AppError;

const RETURNING_COLUMNS: &str = "id, customer_id, name, email, source, created_at, updated_at";

#[derive(Debug, sqlx::FromRow)]
struct CustomerRow {
    id: i64,
    customer_id: i64,
    name: String,
    email: String,
    source: String,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
}

impl TryFrom<CustomerRow> for Customer {
    type Error = ReconciliationError;

    fn try_from(row: CustomerRow) -> Result<Self, Self::Error> {
        Ok(Customer::new(
            row.id,
            row.customer_id,
            row.name,
            row.email,
            row.source.parse()?,
            row.created_at,
            row.updated_at,
        ))
    }
}

fn into_customers(rows: Vec<CustomerRow>) -> Result<Vec<Customer>, AppError> {
    let customers = rows
        .into_iter()
        .map(Customer::try_from)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(customers)
}

/// Upserts all `customers` with one `INSERT ... SELECT FROM UNNEST` statement.
async fn upsert_rows<'e, E>(
    executor: E,
    customers: Vec<NewCustomer>,
) -> Result<Vec<CustomerRow>, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    let len = customers.len();
    let mut customer_ids = Vec::with_capacity(len);
    let mut names = Vec::with_capacity(len);
    let mut emails = Vec::with_capacity(len);
    let mut sources = Vec::with_capacity(len);

    for customer in customers {
        customer_ids.push(customer.customer_id);
        names.push(customer.name);
        emails.push(customer.email);
        sources.push(customer.source.as_str().to_string());
    }

    let mut rows = sqlx::query_as::<_, CustomerRow>(&format!(
        r#"
        INSERT INTO customers (customer_id, name, email, source)
        SELECT * FROM UNNEST($1::BIGINT[], $2::TEXT[], $3::TEXT[], $4::TEXT[])
        ON CONFLICT (customer_id, source) DO UPDATE SET
            name       = EXCLUDED.name,
            email      = EXCLUDED.email,
            updated_at = NOW()
        RETURNING {RETURNING_COLUMNS}
        "#
    ))
    .bind(customer_ids)
    .bind(names)
    .bind(emails)
    .bind(sources)
    .fetch_all(executor)
    .await?;

    // RETURNING order is unspecified
    rows.sort_by_key(|row| row.id);
    Ok(rows)
}

/// PostgreSQL repository for customer records.
///
/// Each read is a single statement, so it sees one consistent snapshot.
/// Batch upserts go through one `INSERT ... SELECT FROM UNNEST` statement and
/// are atomic for the same reason. `replace` runs the delete and the upsert
/// in one transaction.
pub struct PgCustomerRepository {
    pool: Arc<PgPool>,
}

impl PgCustomerRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CustomerRepository for PgCustomerRepository {
    async fn upsert(&self, customer: NewCustomer) -> Result<Customer, AppError> {
        let row = sqlx::query_as::<_, CustomerRow>(&format!(
            r#"
            INSERT INTO customers (customer_id, name, email, source)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (customer_id, source) DO UPDATE SET
                name       = EXCLUDED.name,
                email      = EXCLUDED.email,
                updated_at = NOW()
            RETURNING {RETURNING_COLUMNS}
            "#
        ))
        .bind(customer.customer_id)
        .bind(customer.name)
        .bind(customer.email)
        .bind(customer.source.as_str())
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(Customer::try_from(row)?)
    }

    async fn upsert_batch(&self, customers: Vec<NewCustomer>) -> Result<Vec<Customer>, AppError> {
        let rows = upsert_rows(self.pool.as_ref(), customers).await?;
        into_customers(rows)
    }

    async fn replace(&self, customers: Vec<NewCustomer>) -> Result<Vec<Customer>, AppError> {
        let mut tx = self.pool.begin().await?;

        let deleted = sqlx::query("DELETE FROM customers")
            .execute(&mut *tx)
            .await?
            .rows_affected();
        let rows = upsert_rows(&mut *tx, customers).await?;

        tx.commit().await?;

        tracing::debug!(deleted, stored = rows.len(), "Replaced customer table");
        into_customers(rows)
    }

    async fn snapshot(&self) -> Result<Vec<Customer>, AppError> {
        let rows = sqlx::query_as::<_, CustomerRow>(&format!(
            "SELECT {RETURNING_COLUMNS} FROM customers ORDER BY id"
        ))
        .fetch_all(self.pool.as_ref())
        .await?;

        into_customers(rows)
    }

    async fn find_by_source(&self, source: SourceSystem) -> Result<Vec<Customer>, AppError> {
        let rows = sqlx::query_as::<_, CustomerRow>(&format!(
            "SELECT {RETURNING_COLUMNS} FROM customers WHERE source = $1 ORDER BY id"
        ))
        .bind(source.as_str())
        .fetch_all(self.pool.as_ref())
        .await?;

        into_customers(rows)
    }

    async fn clear(&self) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM customers")
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected())
    }

    async fn count(&self) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM customers")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }
}
