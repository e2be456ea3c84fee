//! Customer Management Domain
//!
//! This crate is the hexagon of the customer service: the `Customer` model,
//! the outbound ports it depends on, and the use cases that orchestrate them.
//! Adapters for the external lookup services live under [`adapters`]; the
//! database adapter lives in `infra_db`.
//!
//! # Use Cases
//!
//! - **FindCustomerById**: retrieves a customer or fails with a not-found
//!   condition
//! - **InsertCustomer**: resolves the postal code to an address, validates
//!   the tax id against the external authority, then persists
//! - **UpdateCustomer**: confirms the record exists, re-resolves the address,
//!   then persists the caller-supplied record as given
//!
//! # Examples
//!
//! ```rust
//! use domain_customer::customer::Customer;
//!
//! let customer = Customer::new("1", "Ana", "111", "00000");
//! assert_eq!(customer.id.as_str(), "1");
//! assert!(customer.address.is_none());
//! ```

pub mod customer;
pub mod address;
pub mod error;
pub mod validation;
pub mod ports;
pub mod usecases;
pub mod adapters;

pub use customer::Customer;
pub use address::Address;
pub use error::CustomerError;
pub use validation::{CustomerValidator, ValidationResult};
pub use ports::{AddressLookupPort, CustomerStorePort, TaxIdValidationPort};
#[cfg(any(test, feature = "mock"))]
pub use ports::mock::{MockAddressLookup, MockCustomerStore, MockTaxIdValidator};
pub use usecases::{
    FindCustomerById, FindCustomerByIdUseCase, InsertCustomer, InsertCustomerUseCase,
    UpdateCustomer, UpdateCustomerUseCase,
};
pub use adapters::{
    AddressServiceAdapter, AddressServiceConfig, TaxAuthorityAdapter, TaxAuthorityConfig,
};
