//! Customer Domain Ports
//!
//! This module defines the port interfaces the customer domain depends on,
//! enabling swappable implementations (internal database, external lookup
//! services, mocks).
//!
//! # Architecture
//!
//! Three ports cover everything the use cases need from the outside world:
//!
//! - **CustomerStorePort**: persistence, implemented by the PostgreSQL
//!   adapter in `infra_db`
//! - **AddressLookupPort**: postal-code resolution, implemented by the
//!   address service adapter in [`crate::adapters`]
//! - **TaxIdValidationPort**: tax-id checks, implemented by the tax
//!   authority adapter in [`crate::adapters`]
//!
//! # Usage
//!
//! ```rust,ignore
//! use domain_customer::ports::CustomerStorePort;
//! use std::sync::Arc;
//!
//! // Use cases receive the port traits
//! pub struct FindCustomerByIdUseCase {
//!     store: Arc<dyn CustomerStorePort>,
//! }
//! ```
//!
//! # Configuration
//!
//! Adapters are wired at application startup; the choice of adapter can be
//! driven by environment configuration:
//!
//! ```rust,ignore
//! let store: Arc<dyn CustomerStorePort> = Arc::new(PostgresCustomerAdapter::new(pool));
//! let lookup: Arc<dyn AddressLookupPort> = Arc::new(AddressServiceAdapter::new(config));
//! ```

use async_trait::async_trait;

use core_kernel::{
    CustomerId, DomainPort, HealthCheckResult, HealthCheckable, OperationMetadata, PortError,
};

use crate::address::Address;
use crate::customer::Customer;

/// Port for persisting and retrieving customer records
///
/// A missing record is reported as `Ok(None)`, never as an error; raising
/// the not-found condition is the use-case layer's job.
#[async_trait]
pub trait CustomerStorePort: DomainPort + HealthCheckable {
    /// Retrieves a customer by identifier
    ///
    /// # Arguments
    ///
    /// * `id` - The customer identifier
    /// * `metadata` - Optional operation metadata for tracing/auditing
    ///
    /// # Returns
    ///
    /// The customer when a record matches, `None` when nothing does
    async fn find(
        &self,
        id: &CustomerId,
        metadata: Option<OperationMetadata>,
    ) -> Result<Option<Customer>, PortError>;

    /// Inserts or updates a customer record by identifier
    ///
    /// # Arguments
    ///
    /// * `customer` - The record to persist
    /// * `metadata` - Optional operation metadata
    ///
    /// # Returns
    ///
    /// The persisted representation, including store-maintained timestamps
    async fn save(
        &self,
        customer: Customer,
        metadata: Option<OperationMetadata>,
    ) -> Result<Customer, PortError>;
}

/// Port for resolving postal codes to addresses
#[async_trait]
pub trait AddressLookupPort: DomainPort + HealthCheckable {
    /// Resolves a postal code to a full address
    ///
    /// # Arguments
    ///
    /// * `postal_code` - The postal code to resolve
    /// * `metadata` - Optional operation metadata
    ///
    /// # Returns
    ///
    /// The resolved address, or `PortError::NotFound` when the postal code
    /// is unknown to the upstream service
    async fn find(
        &self,
        postal_code: &str,
        metadata: Option<OperationMetadata>,
    ) -> Result<Address, PortError>;
}

/// Port for validating tax identifiers against the external authority
#[async_trait]
pub trait TaxIdValidationPort: DomainPort + HealthCheckable {
    /// Validates a tax identifier
    ///
    /// # Arguments
    ///
    /// * `tax_id` - The tax identifier to validate
    /// * `metadata` - Optional operation metadata
    ///
    /// # Returns
    ///
    /// `Ok(())` when the authority accepts the identifier, or
    /// `PortError::Validation` when it rejects it
    async fn validate(
        &self,
        tax_id: &str,
        metadata: Option<OperationMetadata>,
    ) -> Result<(), PortError>;
}

/// Mock implementations of the customer ports for testing
///
/// These adapters store data in memory and count their calls, so
/// orchestration tests can assert which ports ran and how often, without
/// database or network dependencies.
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use chrono::Utc;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::Arc;
    use tokio::sync::RwLock;

    use core_kernel::AdapterHealth;

    fn mock_health(adapter_id: &str) -> HealthCheckResult {
        HealthCheckResult {
            adapter_id: adapter_id.to_string(),
            status: AdapterHealth::Healthy,
            latency_ms: 0,
            message: Some("Mock adapter always healthy".to_string()),
            checked_at: Utc::now(),
        }
    }

    /// In-memory mock implementation of CustomerStorePort
    #[derive(Debug, Default)]
    pub struct MockCustomerStore {
        customers: Arc<RwLock<HashMap<CustomerId, Customer>>>,
        find_calls: AtomicU64,
        save_calls: AtomicU64,
        fail_connection: bool,
    }

    impl MockCustomerStore {
        /// Creates an empty mock store
        pub fn new() -> Self {
            Self::default()
        }

        /// Pre-populates the store with customers for testing
        pub async fn with_customers(customers: Vec<Customer>) -> Self {
            let store = Self::new();
            for customer in customers {
                store
                    .customers
                    .write()
                    .await
                    .insert(customer.id.clone(), customer);
            }
            store
        }

        /// Creates a store whose every call fails with a connection error
        pub fn failing() -> Self {
            Self {
                fail_connection: true,
                ..Default::default()
            }
        }

        /// Number of times `find` was called
        pub fn find_calls(&self) -> u64 {
            self.find_calls.load(Ordering::SeqCst)
        }

        /// Number of times `save` was called
        pub fn save_calls(&self) -> u64 {
            self.save_calls.load(Ordering::SeqCst)
        }

        /// Returns the stored record for an identifier, if any
        pub async fn stored(&self, id: &CustomerId) -> Option<Customer> {
            self.customers.read().await.get(id).cloned()
        }

        /// Returns true when a record exists for the identifier
        pub async fn contains(&self, id: &CustomerId) -> bool {
            self.customers.read().await.contains_key(id)
        }
    }

    impl DomainPort for MockCustomerStore {}

    #[async_trait]
    impl HealthCheckable for MockCustomerStore {
        async fn health_check(&self) -> HealthCheckResult {
            mock_health("mock-customer-store")
        }
    }

    #[async_trait]
    impl CustomerStorePort for MockCustomerStore {
        async fn find(
            &self,
            id: &CustomerId,
            _metadata: Option<OperationMetadata>,
        ) -> Result<Option<Customer>, PortError> {
            self.find_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_connection {
                return Err(PortError::connection("mock store offline"));
            }
            Ok(self.customers.read().await.get(id).cloned())
        }

        async fn save(
            &self,
            customer: Customer,
            _metadata: Option<OperationMetadata>,
        ) -> Result<Customer, PortError> {
            self.save_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_connection {
                return Err(PortError::connection("mock store offline"));
            }
            let mut stored = customer;
            stored.updated_at = Utc::now();
            self.customers
                .write()
                .await
                .insert(stored.id.clone(), stored.clone());
            Ok(stored)
        }
    }

    /// In-memory mock implementation of AddressLookupPort
    #[derive(Debug, Default)]
    pub struct MockAddressLookup {
        resolutions: Arc<RwLock<HashMap<String, Address>>>,
        calls: AtomicU64,
        fail_connection: bool,
    }

    impl MockAddressLookup {
        /// Creates a lookup that resolves nothing
        pub fn new() -> Self {
            Self::default()
        }

        /// Creates a lookup that resolves a single postal code
        pub async fn with_resolution(postal_code: impl Into<String>, address: Address) -> Self {
            Self::with_resolutions(vec![(postal_code.into(), address)]).await
        }

        /// Pre-populates the lookup with postal-code resolutions
        pub async fn with_resolutions(resolutions: Vec<(String, Address)>) -> Self {
            let lookup = Self::new();
            for (postal_code, address) in resolutions {
                lookup.resolutions.write().await.insert(postal_code, address);
            }
            lookup
        }

        /// Creates a lookup whose every call fails with a connection error
        pub fn failing() -> Self {
            Self {
                fail_connection: true,
                ..Default::default()
            }
        }

        /// Number of times `find` was called
        pub fn calls(&self) -> u64 {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl DomainPort for MockAddressLookup {}

    #[async_trait]
    impl HealthCheckable for MockAddressLookup {
        async fn health_check(&self) -> HealthCheckResult {
            mock_health("mock-address-lookup")
        }
    }

    #[async_trait]
    impl AddressLookupPort for MockAddressLookup {
        async fn find(
            &self,
            postal_code: &str,
            _metadata: Option<OperationMetadata>,
        ) -> Result<Address, PortError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_connection {
                return Err(PortError::connection("mock lookup offline"));
            }
            self.resolutions
                .read()
                .await
                .get(postal_code)
                .cloned()
                .ok_or_else(|| PortError::not_found("Address", postal_code))
        }
    }

    /// In-memory mock implementation of TaxIdValidationPort
    #[derive(Debug, Default)]
    pub struct MockTaxIdValidator {
        calls: AtomicU64,
        reject: bool,
        fail_connection: bool,
    }

    impl MockTaxIdValidator {
        /// Creates a validator that accepts every tax id
        pub fn new() -> Self {
            Self::default()
        }

        /// Creates a validator that rejects every tax id
        pub fn rejecting() -> Self {
            Self {
                reject: true,
                ..Default::default()
            }
        }

        /// Creates a validator whose every call fails with a connection error
        pub fn failing() -> Self {
            Self {
                fail_connection: true,
                ..Default::default()
            }
        }

        /// Number of times `validate` was called
        pub fn calls(&self) -> u64 {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl DomainPort for MockTaxIdValidator {}

    #[async_trait]
    impl HealthCheckable for MockTaxIdValidator {
        async fn health_check(&self) -> HealthCheckResult {
            mock_health("mock-tax-id-validator")
        }
    }

    #[async_trait]
    impl TaxIdValidationPort for MockTaxIdValidator {
        async fn validate(
            &self,
            tax_id: &str,
            _metadata: Option<OperationMetadata>,
        ) -> Result<(), PortError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_connection {
                return Err(PortError::connection("mock validator offline"));
            }
            if self.reject {
                return Err(PortError::validation_field(
                    format!("Tax id {} rejected", tax_id),
                    "tax_id",
                ));
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::mock::{MockAddressLookup, MockCustomerStore, MockTaxIdValidator};
    use super::*;
    use core_kernel::AdapterHealth;

    fn create_test_customer() -> Customer {
        Customer::new("1", "Ana", "111", "00000")
    }

    #[tokio::test]
    async fn test_mock_store_save_and_find() {
        let store = MockCustomerStore::new();

        let saved = store.save(create_test_customer(), None).await.unwrap();
        let found = store.find(&saved.id, None).await.unwrap();

        assert_eq!(found.unwrap().name, "Ana");
        assert_eq!(store.find_calls(), 1);
        assert_eq!(store.save_calls(), 1);
    }

    #[tokio::test]
    async fn test_mock_store_missing_record_is_none() {
        let store = MockCustomerStore::new();
        let found = store.find(&CustomerId::new("999"), None).await.unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_mock_store_failing() {
        let store = MockCustomerStore::failing();
        let result = store.find(&CustomerId::new("1"), None).await;
        assert!(result.unwrap_err().is_transient());
        assert_eq!(store.find_calls(), 1);
    }

    #[tokio::test]
    async fn test_mock_lookup_resolves_known_postal_code() {
        let address = Address::new("Main St", "Springfield", "IL", "00000");
        let lookup = MockAddressLookup::with_resolution("00000", address.clone()).await;

        let resolved = lookup.find("00000", None).await.unwrap();
        assert_eq!(resolved, address);
        assert_eq!(lookup.calls(), 1);
    }

    #[tokio::test]
    async fn test_mock_lookup_unknown_postal_code_is_not_found() {
        let lookup = MockAddressLookup::new();
        let result = lookup.find("99999", None).await;
        assert!(result.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_mock_validator_rejecting() {
        let validator = MockTaxIdValidator::rejecting();
        let result = validator.validate("111", None).await;
        assert!(matches!(
            result.unwrap_err(),
            PortError::Validation { .. }
        ));
        assert_eq!(validator.calls(), 1);
    }

    #[tokio::test]
    async fn test_mock_validator_accepts_by_default() {
        let validator = MockTaxIdValidator::new();
        assert!(validator.validate("111", None).await.is_ok());
    }

    #[tokio::test]
    async fn test_mock_health_check() {
        let store = MockCustomerStore::new();
        let result = store.health_check().await;
        assert_eq!(result.status, AdapterHealth::Healthy);
    }
}
