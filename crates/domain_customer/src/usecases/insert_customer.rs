//! Insert-customer use case

use async_trait::async_trait;
use std::sync::Arc;

use core_kernel::OperationMetadata;

use super::InsertCustomer;
use crate::customer::Customer;
use crate::error::CustomerError;
use crate::ports::{AddressLookupPort, CustomerStorePort, TaxIdValidationPort};

/// Enriches, validates, and persists a new customer
///
/// The pipeline is fixed: address enrichment, then tax-id validation, then
/// persistence. Each port is called exactly once and a failing step aborts
/// the steps after it, so nothing is written unless both lookups succeeded.
///
/// The tax-id validation step can be switched off for deployments without
/// an authority connection; the pipeline then goes straight from enrichment
/// to persistence.
pub struct InsertCustomerUseCase {
    address_lookup: Arc<dyn AddressLookupPort>,
    tax_id_validator: Arc<dyn TaxIdValidationPort>,
    store: Arc<dyn CustomerStorePort>,
    validate_tax_id: bool,
}

impl InsertCustomerUseCase {
    /// Creates the use case with tax-id validation enabled
    pub fn new(
        address_lookup: Arc<dyn AddressLookupPort>,
        tax_id_validator: Arc<dyn TaxIdValidationPort>,
        store: Arc<dyn CustomerStorePort>,
    ) -> Self {
        Self {
            address_lookup,
            tax_id_validator,
            store,
            validate_tax_id: true,
        }
    }

    /// Toggles the tax-id validation step
    pub fn with_tax_id_validation(mut self, enabled: bool) -> Self {
        self.validate_tax_id = enabled;
        self
    }
}

#[async_trait]
impl InsertCustomer for InsertCustomerUseCase {
    async fn insert(
        &self,
        customer: Customer,
        metadata: Option<OperationMetadata>,
    ) -> Result<Customer, CustomerError> {
        // Resolve the address before anything else
        let address = self
            .address_lookup
            .find(&customer.postal_code, metadata.clone())
            .await
            .map_err(|source| CustomerError::AddressResolutionFailed {
                postal_code: customer.postal_code.clone(),
                source,
            })?;
        let customer = customer.with_address(address);

        // Validate the tax id when the step is enabled
        if self.validate_tax_id {
            self.tax_id_validator
                .validate(&customer.tax_id, metadata.clone())
                .await
                .map_err(|source| CustomerError::TaxIdValidationFailed {
                    tax_id: customer.tax_id.clone(),
                    source,
                })?;
        }

        // Persistence is always the final step
        Ok(self.store.save(customer, metadata).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address::Address;
    use crate::ports::mock::{MockAddressLookup, MockCustomerStore, MockTaxIdValidator};
    use core_kernel::{CustomerId, PortError};

    fn create_test_customer() -> Customer {
        Customer::new("1", "Ana", "111", "00000")
    }

    fn main_st() -> Address {
        Address::new("Main St", "Springfield", "IL", "00000")
    }

    fn create_usecase(
        lookup: Arc<MockAddressLookup>,
        validator: Arc<MockTaxIdValidator>,
        store: Arc<MockCustomerStore>,
    ) -> InsertCustomerUseCase {
        InsertCustomerUseCase::new(lookup, validator, store)
    }

    #[tokio::test]
    async fn test_insert_enriches_validates_and_saves() {
        let lookup = Arc::new(MockAddressLookup::with_resolution("00000", main_st()).await);
        let validator = Arc::new(MockTaxIdValidator::new());
        let store = Arc::new(MockCustomerStore::new());
        let usecase = create_usecase(lookup.clone(), validator.clone(), store.clone());

        let inserted = usecase.insert(create_test_customer(), None).await.unwrap();

        assert_eq!(inserted.address, Some(main_st()));
        let stored = store.stored(&CustomerId::new("1")).await.unwrap();
        assert_eq!(stored.address, Some(main_st()));

        // Each port runs exactly once
        assert_eq!(lookup.calls(), 1);
        assert_eq!(validator.calls(), 1);
        assert_eq!(store.save_calls(), 1);
    }

    #[tokio::test]
    async fn test_unresolvable_postal_code_aborts_pipeline() {
        let lookup = Arc::new(MockAddressLookup::new());
        let validator = Arc::new(MockTaxIdValidator::new());
        let store = Arc::new(MockCustomerStore::new());
        let usecase = create_usecase(lookup, validator.clone(), store.clone());

        let err = usecase
            .insert(create_test_customer(), None)
            .await
            .unwrap_err();

        match err {
            CustomerError::AddressResolutionFailed {
                postal_code,
                source,
            } => {
                assert_eq!(postal_code, "00000");
                assert!(source.is_not_found());
            }
            other => panic!("expected address resolution failure, got {:?}", other),
        }
        assert_eq!(validator.calls(), 0);
        assert_eq!(store.save_calls(), 0);
    }

    #[tokio::test]
    async fn test_lookup_outage_aborts_pipeline() {
        let lookup = Arc::new(MockAddressLookup::failing());
        let validator = Arc::new(MockTaxIdValidator::new());
        let store = Arc::new(MockCustomerStore::new());
        let usecase = create_usecase(lookup, validator.clone(), store.clone());

        let err = usecase
            .insert(create_test_customer(), None)
            .await
            .unwrap_err();

        // Transport failures during enrichment map the same way
        match err {
            CustomerError::AddressResolutionFailed { source, .. } => {
                assert!(source.is_transient());
            }
            other => panic!("expected address resolution failure, got {:?}", other),
        }
        assert_eq!(validator.calls(), 0);
        assert_eq!(store.save_calls(), 0);
    }

    #[tokio::test]
    async fn test_rejected_tax_id_never_persists() {
        let lookup = Arc::new(MockAddressLookup::with_resolution("00000", main_st()).await);
        let validator = Arc::new(MockTaxIdValidator::rejecting());
        let store = Arc::new(MockCustomerStore::new());
        let usecase = create_usecase(lookup.clone(), validator.clone(), store.clone());

        let err = usecase
            .insert(create_test_customer(), None)
            .await
            .unwrap_err();

        match err {
            CustomerError::TaxIdValidationFailed { tax_id, .. } => assert_eq!(tax_id, "111"),
            other => panic!("expected tax id validation failure, got {:?}", other),
        }
        // Enrichment ran first; persistence never did
        assert_eq!(lookup.calls(), 1);
        assert_eq!(validator.calls(), 1);
        assert_eq!(store.save_calls(), 0);
        assert!(!store.contains(&CustomerId::new("1")).await);
    }

    #[tokio::test]
    async fn test_validation_step_can_be_disabled() {
        let lookup = Arc::new(MockAddressLookup::with_resolution("00000", main_st()).await);
        let validator = Arc::new(MockTaxIdValidator::rejecting());
        let store = Arc::new(MockCustomerStore::new());
        let usecase = create_usecase(lookup, validator.clone(), store.clone())
            .with_tax_id_validation(false);

        let inserted = usecase.insert(create_test_customer(), None).await.unwrap();

        assert_eq!(inserted.address, Some(main_st()));
        assert_eq!(validator.calls(), 0);
        assert_eq!(store.save_calls(), 1);
    }

    #[tokio::test]
    async fn test_store_failure_passes_through_after_both_lookups() {
        let lookup = Arc::new(MockAddressLookup::with_resolution("00000", main_st()).await);
        let validator = Arc::new(MockTaxIdValidator::new());
        let store = Arc::new(MockCustomerStore::failing());
        let usecase = create_usecase(lookup.clone(), validator.clone(), store.clone());

        let err = usecase
            .insert(create_test_customer(), None)
            .await
            .unwrap_err();

        match err {
            CustomerError::Port(PortError::Connection { .. }) => {}
            other => panic!("expected pass-through connection error, got {:?}", other),
        }
        assert_eq!(lookup.calls(), 1);
        assert_eq!(validator.calls(), 1);
        assert_eq!(store.save_calls(), 1);
    }
}
