//! Update-customer use case

use async_trait::async_trait;
use std::sync::Arc;

use core_kernel::OperationMetadata;

use super::{FindCustomerById, UpdateCustomer};
use crate::customer::Customer;
use crate::error::CustomerError;
use crate::ports::{AddressLookupPort, CustomerStorePort};

/// Re-enriches and persists an existing customer
///
/// The existence check goes through the `FindCustomerById` input port and
/// its result is discarded: the caller-supplied record is what gets saved,
/// with only the address replaced by a fresh lookup. Fields missing from
/// the caller's record are not carried over from the stored one, so callers
/// must supply the full record.
///
/// Concurrent updates to the same identifier are not coordinated here; the
/// last save to complete wins.
pub struct UpdateCustomerUseCase {
    finder: Arc<dyn FindCustomerById>,
    address_lookup: Arc<dyn AddressLookupPort>,
    store: Arc<dyn CustomerStorePort>,
}

impl UpdateCustomerUseCase {
    /// Creates the use case with its collaborators
    pub fn new(
        finder: Arc<dyn FindCustomerById>,
        address_lookup: Arc<dyn AddressLookupPort>,
        store: Arc<dyn CustomerStorePort>,
    ) -> Self {
        Self {
            finder,
            address_lookup,
            store,
        }
    }
}

#[async_trait]
impl UpdateCustomer for UpdateCustomerUseCase {
    async fn update(
        &self,
        customer: Customer,
        metadata: Option<OperationMetadata>,
    ) -> Result<Customer, CustomerError> {
        // Confirm the record exists; the fetched value is discarded
        self.finder.find(&customer.id, metadata.clone()).await?;

        // Re-resolve the address for the supplied postal code
        let address = self
            .address_lookup
            .find(&customer.postal_code, metadata.clone())
            .await
            .map_err(|source| CustomerError::AddressResolutionFailed {
                postal_code: customer.postal_code.clone(),
                source,
            })?;
        let customer = customer.with_address(address);

        // Save the caller-supplied record as given
        Ok(self.store.save(customer, metadata).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address::Address;
    use crate::ports::mock::{MockAddressLookup, MockCustomerStore};
    use crate::usecases::FindCustomerByIdUseCase;
    use core_kernel::CustomerId;

    fn ana() -> Customer {
        Customer::new("1", "Ana", "111", "00000")
    }

    fn main_st() -> Address {
        Address::new("Main St", "Springfield", "IL", "00000")
    }

    fn create_usecase(
        lookup: Arc<MockAddressLookup>,
        store: Arc<MockCustomerStore>,
    ) -> UpdateCustomerUseCase {
        let finder = Arc::new(FindCustomerByIdUseCase::new(store.clone()));
        UpdateCustomerUseCase::new(finder, lookup, store)
    }

    #[tokio::test]
    async fn test_update_enriches_and_saves_supplied_record() {
        let store = Arc::new(MockCustomerStore::with_customers(vec![ana()]).await);
        let lookup = Arc::new(MockAddressLookup::with_resolution("00000", main_st()).await);
        let usecase = create_usecase(lookup.clone(), store.clone());

        let updated = usecase.update(ana(), None).await.unwrap();

        assert_eq!(updated.address, Some(main_st()));
        let stored = store.stored(&CustomerId::new("1")).await.unwrap();
        assert_eq!(stored.name, "Ana");
        assert_eq!(stored.address, Some(main_st()));
        assert_eq!(lookup.calls(), 1);
        assert_eq!(store.save_calls(), 1);
    }

    #[tokio::test]
    async fn test_update_missing_customer_aborts_everything() {
        let store = Arc::new(MockCustomerStore::new());
        let lookup = Arc::new(MockAddressLookup::with_resolution("00000", main_st()).await);
        let usecase = create_usecase(lookup.clone(), store.clone());

        let err = usecase.update(ana(), None).await.unwrap_err();

        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Customer not found");
        assert_eq!(lookup.calls(), 0);
        assert_eq!(store.save_calls(), 0);
    }

    #[tokio::test]
    async fn test_update_lookup_failure_aborts_before_save() {
        let store = Arc::new(MockCustomerStore::with_customers(vec![ana()]).await);
        let lookup = Arc::new(MockAddressLookup::failing());
        let usecase = create_usecase(lookup, store.clone());

        let err = usecase.update(ana(), None).await.unwrap_err();

        assert!(matches!(
            err,
            CustomerError::AddressResolutionFailed { .. }
        ));
        assert_eq!(store.save_calls(), 0);
        // The seeded record is untouched
        let stored = store.stored(&CustomerId::new("1")).await.unwrap();
        assert!(stored.address.is_none());
    }

    #[tokio::test]
    async fn test_update_does_not_merge_stored_fields() {
        let seeded = ana().with_address(Address::new("Old St", "Shelbyville", "IL", "00000"));
        let store = Arc::new(MockCustomerStore::with_customers(vec![seeded]).await);
        let lookup = Arc::new(MockAddressLookup::with_resolution("00000", main_st()).await);
        let usecase = create_usecase(lookup, store.clone());

        // Caller renames the customer and supplies no address
        let mut supplied = ana();
        supplied.name = "Ana Maria".to_string();

        let updated = usecase.update(supplied, None).await.unwrap();

        // The saved record is the caller's, enriched; nothing from the
        // stored record survives
        assert_eq!(updated.name, "Ana Maria");
        assert_eq!(updated.address, Some(main_st()));
        let stored = store.stored(&CustomerId::new("1")).await.unwrap();
        assert_eq!(stored.name, "Ana Maria");
        assert_eq!(stored.address, Some(main_st()));
    }
}
