//! Find-customer-by-id use case

use async_trait::async_trait;
use std::sync::Arc;

use core_kernel::{CustomerId, OperationMetadata};

use super::FindCustomerById;
use crate::customer::Customer;
use crate::error::CustomerError;
use crate::ports::CustomerStorePort;

/// Retrieves a customer from the store, surfacing absence as NotFound
///
/// The store reports a missing record as `Ok(None)`; this use case is the
/// single place that turns absence into `CustomerError::NotFound`. Store
/// failures are not translated.
pub struct FindCustomerByIdUseCase {
    store: Arc<dyn CustomerStorePort>,
}

impl FindCustomerByIdUseCase {
    /// Creates the use case with its store port
    pub fn new(store: Arc<dyn CustomerStorePort>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl FindCustomerById for FindCustomerByIdUseCase {
    async fn find(
        &self,
        id: &CustomerId,
        metadata: Option<OperationMetadata>,
    ) -> Result<Customer, CustomerError> {
        match self.store.find(id, metadata).await? {
            Some(customer) => Ok(customer),
            None => Err(CustomerError::NotFound),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::mock::MockCustomerStore;
    use core_kernel::PortError;

    fn create_test_customer() -> Customer {
        Customer::new("1", "Ana", "111", "00000")
    }

    #[tokio::test]
    async fn test_find_returns_stored_customer_unchanged() {
        let store = Arc::new(MockCustomerStore::with_customers(vec![create_test_customer()]).await);
        let usecase = FindCustomerByIdUseCase::new(store.clone());

        let found = usecase.find(&CustomerId::new("1"), None).await.unwrap();

        assert_eq!(found.id.as_str(), "1");
        assert_eq!(found.name, "Ana");
        assert_eq!(found.tax_id, "111");
        assert_eq!(store.find_calls(), 1);
    }

    #[tokio::test]
    async fn test_find_missing_id_fails_with_not_found() {
        let store = Arc::new(MockCustomerStore::new());
        let usecase = FindCustomerByIdUseCase::new(store);

        let err = usecase
            .find(&CustomerId::new("999"), None)
            .await
            .unwrap_err();

        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Customer not found");
    }

    #[tokio::test]
    async fn test_store_failure_passes_through_untranslated() {
        let store = Arc::new(MockCustomerStore::failing());
        let usecase = FindCustomerByIdUseCase::new(store);

        let err = usecase.find(&CustomerId::new("1"), None).await.unwrap_err();

        match err {
            CustomerError::Port(PortError::Connection { .. }) => {}
            other => panic!("expected pass-through connection error, got {:?}", other),
        }
    }
}
