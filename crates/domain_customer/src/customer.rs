//! Customer entity
//!
//! This module defines the Customer aggregate, the single entity this service
//! manages. Callers create a customer with its identity, name, tax id, and
//! postal code set; the address stays empty until an insert or update
//! enriches it through the address lookup port.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::CustomerId;

use crate::address::Address;

/// A customer record
///
/// The identifier is assigned externally; this service never mints one.
/// After a successful insert or update, `address` holds the most recent
/// lookup result for `postal_code`.
///
/// # Examples
///
/// ```rust
/// use domain_customer::customer::Customer;
///
/// let customer = Customer::new("1", "Ana", "111", "00000");
/// assert_eq!(customer.name, "Ana");
/// assert!(customer.address.is_none());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    /// Unique customer identifier, assigned by the caller
    pub id: CustomerId,
    /// Full display name
    pub name: String,
    /// National tax identification number
    pub tax_id: String,
    /// Postal code used for address enrichment
    pub postal_code: String,
    /// Resolved address, populated by enrichment
    pub address: Option<Address>,
    /// When this customer was created
    pub created_at: DateTime<Utc>,
    /// When this customer was last updated
    pub updated_at: DateTime<Utc>,
}

impl Customer {
    /// Creates a new customer with an unresolved address
    ///
    /// # Arguments
    ///
    /// * `id` - Externally assigned identifier
    /// * `name` - Full display name
    /// * `tax_id` - National tax identification number
    /// * `postal_code` - Postal code for address enrichment
    pub fn new(
        id: impl Into<CustomerId>,
        name: impl Into<String>,
        tax_id: impl Into<String>,
        postal_code: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            name: name.into(),
            tax_id: tax_id.into(),
            postal_code: postal_code.into(),
            address: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replaces the resolved address with a fresh lookup result
    pub fn with_address(mut self, address: Address) -> Self {
        self.address = Some(address);
        self
    }

    /// Returns true once the address has been resolved
    pub fn has_address(&self) -> bool {
        self.address.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_customer_has_no_address() {
        let customer = Customer::new("1", "Ana", "111", "00000");
        assert_eq!(customer.id.as_str(), "1");
        assert_eq!(customer.tax_id, "111");
        assert!(!customer.has_address());
        assert_eq!(customer.created_at, customer.updated_at);
    }

    #[test]
    fn test_with_address_replaces_resolution() {
        let first = Address::new("Main St", "Springfield", "IL", "00000");
        let second = Address::new("Second St", "Springfield", "IL", "00000");

        let customer = Customer::new("1", "Ana", "111", "00000")
            .with_address(first)
            .with_address(second.clone());

        assert_eq!(customer.address, Some(second));
    }
}
