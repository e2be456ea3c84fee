//! Customer DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use domain_customer::{Address, Customer};

#[derive(Debug, Deserialize, Validate)]
pub struct CreateCustomerRequest {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub id: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub name: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub tax_id: String,
    #[validate(length(min = 4, max = 11, message = "must be 4-11 characters"))]
    pub postal_code: String,
}

impl CreateCustomerRequest {
    /// Builds the domain record from the request
    pub fn into_customer(self) -> Customer {
        Customer::new(self.id, self.name, self.tax_id, self.postal_code)
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateCustomerRequest {
    /// Ignored when present; the path identifier is authoritative
    pub id: Option<String>,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub name: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub tax_id: String,
    #[validate(length(min = 4, max = 11, message = "must be 4-11 characters"))]
    pub postal_code: String,
}

impl UpdateCustomerRequest {
    /// Builds the domain record from the request, keyed by the path id
    pub fn into_customer(self, id: String) -> Customer {
        Customer::new(id, self.name, self.tax_id, self.postal_code)
    }
}

#[derive(Debug, Serialize)]
pub struct CustomerResponse {
    pub id: String,
    pub name: String,
    pub tax_id: String,
    pub postal_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<AddressResponse>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct AddressResponse {
    pub street: String,
    pub city: String,
    pub region: String,
    pub postal_code: String,
}

impl From<Customer> for CustomerResponse {
    fn from(customer: Customer) -> Self {
        Self {
            id: customer.id.into(),
            name: customer.name,
            tax_id: customer.tax_id,
            postal_code: customer.postal_code,
            address: customer.address.map(AddressResponse::from),
            created_at: customer.created_at,
            updated_at: customer.updated_at,
        }
    }
}

impl From<Address> for AddressResponse {
    fn from(address: Address) -> Self {
        Self {
            street: address.street,
            city: address.city,
            region: address.region,
            postal_code: address.postal_code,
        }
    }
}
