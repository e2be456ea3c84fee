//! PostgreSQL Customer Adapter
//!
//! This module provides the internal (database) adapter for the customer
//! domain, implementing the `CustomerStorePort` trait using PostgreSQL via
//! the `CustomerRepository`.
//!
//! # Overview
//!
//! The `PostgresCustomerAdapter` serves as the bridge between the domain
//! layer's port interface and the database layer. It:
//!
//! - Translates domain requests into repository operations
//! - Converts database row types back to domain models
//! - Handles error translation between database and port errors
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::adapters::PostgresCustomerAdapter;
//! use domain_customer::CustomerStorePort;
//! use std::sync::Arc;
//!
//! // Create the adapter with a database pool
//! let adapter = PostgresCustomerAdapter::new(pool);
//!
//! // Use it through the port trait
//! let store: Arc<dyn CustomerStorePort> = Arc::new(adapter);
//! let customer = store.find(&"cust-001".into(), None).await?;
//! ```

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use tracing::{debug, instrument};

use core_kernel::{
    AdapterHealth, CustomerId, DomainPort, HealthCheckResult, HealthCheckable,
    OperationMetadata, PortError,
};
use domain_customer::address::Address;
use domain_customer::customer::Customer;
use domain_customer::ports::CustomerStorePort;

use crate::error::DatabaseError;
use crate::repositories::customer::{CustomerRepository, CustomerRow, NewCustomer};

/// PostgreSQL-backed implementation of the CustomerStorePort trait
///
/// This adapter uses the `CustomerRepository` for all database operations
/// and provides the standard internal (database) implementation of the
/// customer store port.
///
/// # Health Checking
///
/// The adapter implements `HealthCheckable` to verify database connectivity.
/// Health checks perform a simple query to ensure the connection pool is
/// operational.
///
/// # Error Handling
///
/// Database errors are translated to `PortError` variants:
/// - `DatabaseError::NotFound` -> `PortError::NotFound`
/// - `DatabaseError::DuplicateEntry` -> `PortError::Conflict`
/// - `DatabaseError::ConstraintViolation` -> `PortError::Validation`
/// - Connection problems -> `PortError::Connection`
/// - Other errors -> `PortError::Internal`
#[derive(Debug, Clone)]
pub struct PostgresCustomerAdapter {
    repository: CustomerRepository,
    pool: PgPool,
}

impl PostgresCustomerAdapter {
    /// Creates a new PostgreSQL customer adapter
    ///
    /// # Arguments
    ///
    /// * `pool` - The PostgreSQL connection pool
    ///
    /// # Returns
    ///
    /// A new adapter instance
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: CustomerRepository::new(pool.clone()),
            pool,
        }
    }

    /// Returns a reference to the underlying repository
    ///
    /// This is useful for operations that aren't exposed through the port
    /// trait, such as direct queries in maintenance tooling.
    pub fn repository(&self) -> &CustomerRepository {
        &self.repository
    }
}

// Mark as a domain port
impl DomainPort for PostgresCustomerAdapter {}

#[async_trait]
impl HealthCheckable for PostgresCustomerAdapter {
    /// Checks database connectivity
    ///
    /// Performs a simple SELECT 1 query to verify the connection pool
    /// is operational and the database is responsive.
    async fn health_check(&self) -> HealthCheckResult {
        let start = std::time::Instant::now();

        let result = sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await;

        let latency_ms = start.elapsed().as_millis() as u64;

        match result {
            Ok(_) => HealthCheckResult {
                adapter_id: "postgres-customer-adapter".to_string(),
                status: AdapterHealth::Healthy,
                latency_ms,
                message: None,
                checked_at: Utc::now(),
            },
            Err(e) => HealthCheckResult {
                adapter_id: "postgres-customer-adapter".to_string(),
                status: AdapterHealth::Unhealthy,
                latency_ms,
                message: Some(format!("Database error: {}", e)),
                checked_at: Utc::now(),
            },
        }
    }
}

#[async_trait]
impl CustomerStorePort for PostgresCustomerAdapter {
    #[instrument(skip_all, fields(customer_id = %id))]
    async fn find(
        &self,
        id: &CustomerId,
        _metadata: Option<OperationMetadata>,
    ) -> Result<Option<Customer>, PortError> {
        debug!("Fetching customer by id");

        let row = self
            .repository
            .find_by_id(id.as_str())
            .await
            .map_err(db_to_port_error)?;

        Ok(row.map(row_to_customer))
    }

    #[instrument(skip_all, fields(customer_id = %customer.id))]
    async fn save(
        &self,
        customer: Customer,
        _metadata: Option<OperationMetadata>,
    ) -> Result<Customer, PortError> {
        debug!("Saving customer");

        let row = self
            .repository
            .upsert(customer_to_new(customer))
            .await
            .map_err(db_to_port_error)?;

        Ok(row_to_customer(row))
    }
}

// =============================================================================
// Conversion Functions
// =============================================================================

/// Converts a database error to a port error
fn db_to_port_error(e: DatabaseError) -> PortError {
    match e {
        DatabaseError::NotFound { entity, id } => PortError::not_found(entity, id),
        DatabaseError::DuplicateEntry(msg) => PortError::Conflict { message: msg },
        DatabaseError::ConstraintViolation(msg) => PortError::validation(msg),
        DatabaseError::ConnectionFailed(msg) => PortError::Connection {
            message: msg,
            source: None,
        },
        DatabaseError::PoolExhausted => PortError::Connection {
            message: "Connection pool exhausted".to_string(),
            source: None,
        },
        _ => PortError::internal(e.to_string()),
    }
}

/// Converts a customer row to the domain model
///
/// The address is present only when every address column is populated;
/// a half-written address is treated as unresolved.
fn row_to_customer(row: CustomerRow) -> Customer {
    let address = match (row.street, row.city, row.region, row.address_postal_code) {
        (Some(street), Some(city), Some(region), Some(postal_code)) => {
            Some(Address::new(street, city, region, postal_code))
        }
        _ => None,
    };

    Customer {
        id: CustomerId::new(row.id),
        name: row.name,
        tax_id: row.tax_id,
        postal_code: row.postal_code,
        address,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }
}

/// Converts a domain customer into the insert payload
fn customer_to_new(customer: Customer) -> NewCustomer {
    let (street, city, region, address_postal_code) = match customer.address {
        Some(address) => (
            Some(address.street),
            Some(address.city),
            Some(address.region),
            Some(address.postal_code),
        ),
        None => (None, None, None, None),
    };

    NewCustomer {
        id: customer.id.into(),
        name: customer.name,
        tax_id: customer.tax_id,
        postal_code: customer.postal_code,
        street,
        city,
        region,
        address_postal_code,
        created_at: customer.created_at,
    }
}
