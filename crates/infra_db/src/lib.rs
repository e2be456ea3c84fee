//! Infrastructure Database Layer
//!
//! This crate provides the database infrastructure for the customer service,
//! implementing the customer store port on PostgreSQL using SQLx.
//!
//! # Architecture
//!
//! The crate follows the repository pattern, providing data access
//! abstractions that hide the database implementation details from the
//! domain layer. The `PostgresCustomerAdapter` wraps the repository and
//! exposes it through the domain's `CustomerStorePort` trait.
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::{create_pool, ensure_schema, DatabaseConfig};
//! use infra_db::adapters::PostgresCustomerAdapter;
//!
//! let pool = create_pool(DatabaseConfig::new("postgres://localhost/customers")).await?;
//! ensure_schema(&pool).await?;
//! let store = PostgresCustomerAdapter::new(pool);
//! ```

pub mod adapters;
pub mod error;
pub mod pool;
pub mod repositories;

pub use adapters::PostgresCustomerAdapter;
pub use error::DatabaseError;
pub use pool::{create_pool, create_pool_from_url, ensure_schema, DatabaseConfig, DatabasePool};
pub use repositories::CustomerRepository;
