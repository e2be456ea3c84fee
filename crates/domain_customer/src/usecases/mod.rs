//! Customer use cases
//!
//! Each use case exposes an input-port trait, so callers (REST handlers,
//! other use cases) depend on the operation rather than on a concrete type.
//! `UpdateCustomerUseCase` consumes `FindCustomerById` the same way, which
//! keeps its existence check swappable in tests.
//!
//! # Orchestration
//!
//! Every use case is a sequential pipeline over the outbound ports with no
//! retries and no local recovery. Persistence is always the final step, so
//! a failure anywhere in the pipeline leaves the store untouched.

mod find_customer;
mod insert_customer;
mod update_customer;

pub use find_customer::FindCustomerByIdUseCase;
pub use insert_customer::InsertCustomerUseCase;
pub use update_customer::UpdateCustomerUseCase;

use async_trait::async_trait;

use core_kernel::{CustomerId, OperationMetadata};

use crate::customer::Customer;
use crate::error::CustomerError;

/// Input port for retrieving a single customer
#[async_trait]
pub trait FindCustomerById: Send + Sync {
    /// Retrieves the customer with the given identifier
    ///
    /// # Errors
    ///
    /// `CustomerError::NotFound` when no record matches; store failures
    /// pass through unchanged.
    async fn find(
        &self,
        id: &CustomerId,
        metadata: Option<OperationMetadata>,
    ) -> Result<Customer, CustomerError>;
}

/// Input port for inserting a new customer
#[async_trait]
pub trait InsertCustomer: Send + Sync {
    /// Enriches, validates, and persists a new customer
    ///
    /// # Errors
    ///
    /// `CustomerError::AddressResolutionFailed` when the postal code cannot
    /// be resolved, `CustomerError::TaxIdValidationFailed` when the tax id
    /// is rejected; store failures pass through unchanged.
    async fn insert(
        &self,
        customer: Customer,
        metadata: Option<OperationMetadata>,
    ) -> Result<Customer, CustomerError>;
}

/// Input port for updating an existing customer
#[async_trait]
pub trait UpdateCustomer: Send + Sync {
    /// Re-enriches and persists a customer that already exists
    ///
    /// # Errors
    ///
    /// `CustomerError::NotFound` when the identifier has no record,
    /// `CustomerError::AddressResolutionFailed` when the postal code cannot
    /// be resolved; store failures pass through unchanged.
    async fn update(
        &self,
        customer: Customer,
        metadata: Option<OperationMetadata>,
    ) -> Result<Customer, CustomerError>;
}
