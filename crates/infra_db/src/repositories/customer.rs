//! Customer repository implementation
//!
//! This module provides database access for customer records. The customer
//! table is flat: the resolved address is stored in nullable columns next
//! to the record, and a record without a resolved address simply leaves
//! them NULL.
//!
//! Queries use the runtime `query_as` API so the crate builds without a
//! live database.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::error::DatabaseError;

/// Repository for managing customer data
///
/// The CustomerRepository handles all database operations for customer
/// records. Identifiers are caller-assigned, so persistence is an upsert
/// keyed on the id column.
#[derive(Debug, Clone)]
pub struct CustomerRepository {
    pool: PgPool,
}

impl CustomerRepository {
    /// Creates a new CustomerRepository with the given connection pool
    ///
    /// # Arguments
    ///
    /// * `pool` - The PostgreSQL connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Retrieves a customer by identifier
    ///
    /// # Arguments
    ///
    /// * `id` - The customer identifier
    ///
    /// # Returns
    ///
    /// The matching row, or `None` when no record exists
    pub async fn find_by_id(&self, id: &str) -> Result<Option<CustomerRow>, DatabaseError> {
        let row = sqlx::query_as::<_, CustomerRow>(
            r#"
            SELECT
                id, name, tax_id, postal_code,
                street, city, region, address_postal_code,
                created_at, updated_at
            FROM customers
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DatabaseError::from(&e))?;

        Ok(row)
    }

    /// Inserts a customer, or replaces the record with the same identifier
    ///
    /// On conflict the stored `created_at` is preserved and `updated_at` is
    /// stamped by the database.
    ///
    /// # Arguments
    ///
    /// * `customer` - The record to persist
    ///
    /// # Returns
    ///
    /// The row as persisted, including database-maintained timestamps
    pub async fn upsert(&self, customer: NewCustomer) -> Result<CustomerRow, DatabaseError> {
        let row = sqlx::query_as::<_, CustomerRow>(
            r#"
            INSERT INTO customers (
                id, name, tax_id, postal_code,
                street, city, region, address_postal_code,
                created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $9)
            ON CONFLICT (id) DO UPDATE SET
                name = EXCLUDED.name,
                tax_id = EXCLUDED.tax_id,
                postal_code = EXCLUDED.postal_code,
                street = EXCLUDED.street,
                city = EXCLUDED.city,
                region = EXCLUDED.region,
                address_postal_code = EXCLUDED.address_postal_code,
                updated_at = now()
            RETURNING
                id, name, tax_id, postal_code,
                street, city, region, address_postal_code,
                created_at, updated_at
            "#,
        )
        .bind(&customer.id)
        .bind(&customer.name)
        .bind(&customer.tax_id)
        .bind(&customer.postal_code)
        .bind(&customer.street)
        .bind(&customer.city)
        .bind(&customer.region)
        .bind(&customer.address_postal_code)
        .bind(customer.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DatabaseError::from(&e))?;

        Ok(row)
    }
}

// =============================================================================
// Row Types
// =============================================================================

/// A customer row as stored in the customers table
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CustomerRow {
    pub id: String,
    pub name: String,
    pub tax_id: String,
    pub postal_code: String,
    pub street: Option<String>,
    pub city: Option<String>,
    pub region: Option<String>,
    pub address_postal_code: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insert payload for a customer record
#[derive(Debug, Clone)]
pub struct NewCustomer {
    pub id: String,
    pub name: String,
    pub tax_id: String,
    pub postal_code: String,
    pub street: Option<String>,
    pub city: Option<String>,
    pub region: Option<String>,
    pub address_postal_code: Option<String>,
    pub created_at: DateTime<Utc>,
}
