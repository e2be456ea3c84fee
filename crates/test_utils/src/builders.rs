//! Test Data Builders
//!
//! Provides builder patterns for constructing test data with sensible defaults.
//! These builders allow tests to specify only the relevant fields while using
//! defaults for everything else.

use domain_customer::{Address, Customer};

/// Builder for constructing test customer data
pub struct TestCustomerBuilder {
    id: String,
    name: String,
    tax_id: String,
    postal_code: String,
    address: Option<Address>,
}

impl Default for TestCustomerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestCustomerBuilder {
    /// Creates a new builder with default values
    pub fn new() -> Self {
        Self {
            id: "1".to_string(),
            name: "Ana".to_string(),
            tax_id: "111".to_string(),
            postal_code: "00000".to_string(),
            address: None,
        }
    }

    /// Sets the customer id
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Sets the display name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the tax id
    pub fn with_tax_id(mut self, tax_id: impl Into<String>) -> Self {
        self.tax_id = tax_id.into();
        self
    }

    /// Sets the postal code
    pub fn with_postal_code(mut self, postal_code: impl Into<String>) -> Self {
        self.postal_code = postal_code.into();
        self
    }

    /// Sets a resolved address
    pub fn with_address(mut self, address: Address) -> Self {
        self.address = Some(address);
        self
    }

    /// Builds the customer
    pub fn build(self) -> Customer {
        let customer = Customer::new(self.id, self.name, self.tax_id, self.postal_code);
        match self.address {
            Some(address) => customer.with_address(address),
            None => customer,
        }
    }
}
