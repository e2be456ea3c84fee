//! Pre-built Test Fixtures
//!
//! Provides ready-to-use test data for common entities across the customer
//! service. These fixtures are designed to be consistent and predictable
//! for unit tests.

use domain_customer::{Address, Customer};

/// Fixture for customer test data
pub struct CustomerFixtures;

impl CustomerFixtures {
    /// The canonical test customer with an unresolved address
    pub fn ana() -> Customer {
        Customer::new("1", "Ana", "111", "00000")
    }

    /// The canonical test customer after address enrichment
    pub fn ana_enriched() -> Customer {
        Self::ana().with_address(AddressFixtures::main_st())
    }

    /// A second customer with a well-formed tax id and postal code
    pub fn bruno() -> Customer {
        Customer::new("2", "Bruno", "52998224725", "01310-100")
    }
}

/// Fixture for address test data
pub struct AddressFixtures;

impl AddressFixtures {
    /// The address the lookup service resolves for postal code 00000
    pub fn main_st() -> Address {
        Address::new("Main St", "Springfield", "IL", "00000")
    }

    /// A second resolvable address for multi-customer tests
    pub fn paulista() -> Address {
        Address::new("Avenida Paulista", "Sao Paulo", "SP", "01310-100")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ana_is_unenriched() {
        let ana = CustomerFixtures::ana();
        assert_eq!(ana.id.as_str(), "1");
        assert!(ana.address.is_none());
    }

    #[test]
    fn test_ana_enriched_carries_main_st() {
        let ana = CustomerFixtures::ana_enriched();
        assert_eq!(ana.address, Some(AddressFixtures::main_st()));
    }
}
