//! Domain Adapters
//!
//! This module provides adapter implementations for domain ports,
//! connecting domain interfaces to the PostgreSQL database layer.
//!
//! # Architecture
//!
//! Each adapter:
//! - Implements the domain's port trait
//! - Translates between domain models and database row types
//! - Uses the repository layer for database operations
//!
//! # Usage
//!
//! ```rust,ignore
//! use infra_db::adapters::PostgresCustomerAdapter;
//! use domain_customer::CustomerStorePort;
//!
//! let adapter = PostgresCustomerAdapter::new(pool);
//! let customer = adapter.find(&"cust-001".into(), None).await?;
//! ```

pub mod customer;

pub use customer::PostgresCustomerAdapter;
