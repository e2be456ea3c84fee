//! Comprehensive tests for domain_customer
//!
//! Covers the public surface of the crate that does not require live
//! collaborators: the customer entity, the address value object, the
//! error contract exposed to callers, and the shape validator.
//!
//! # Test Organization
//!
//! - `customer_entity` - Construction and address enrichment
//! - `address_value` - Formatting and equality
//! - `error_contract` - Display strings and source chaining
//! - `validation_rules` - Validator error and warning behavior
//! - `property_tests` - Postal code shapes

use core_kernel::PortError;
use proptest::prelude::*;

use domain_customer::address::Address;
use domain_customer::customer::Customer;
use domain_customer::error::CustomerError;
use domain_customer::validation::CustomerValidator;

// ============================================================================
// TEST FIXTURES
// ============================================================================

/// Creates the customer used across the happy-path tests
fn create_test_customer() -> Customer {
    Customer::new("1", "Ana", "111", "00000")
}

/// Creates the address the lookup service resolves for the test customer
fn create_main_st() -> Address {
    Address::new("Main St", "Springfield", "IL", "00000")
}

// ============================================================================
// Customer Entity Tests
// ============================================================================

mod customer_entity {
    use super::*;

    #[test]
    fn test_new_customer_fields() {
        let customer = create_test_customer();

        assert_eq!(customer.id.as_str(), "1");
        assert_eq!(customer.name, "Ana");
        assert_eq!(customer.tax_id, "111");
        assert_eq!(customer.postal_code, "00000");
        assert!(customer.address.is_none());
    }

    #[test]
    fn test_new_customer_timestamps_match() {
        let customer = create_test_customer();
        assert_eq!(customer.created_at, customer.updated_at);
    }

    #[test]
    fn test_with_address_marks_resolved() {
        let customer = create_test_customer().with_address(create_main_st());

        assert!(customer.has_address());
        assert_eq!(customer.address, Some(create_main_st()));
    }

    #[test]
    fn test_customer_serialization_shape() {
        let customer = create_test_customer().with_address(create_main_st());
        let json = serde_json::to_value(&customer).unwrap();

        assert_eq!(json["id"], "1");
        assert_eq!(json["name"], "Ana");
        assert_eq!(json["tax_id"], "111");
        assert_eq!(json["postal_code"], "00000");
        assert_eq!(json["address"]["street"], "Main St");
    }

    #[test]
    fn test_customer_deserialization_roundtrip() {
        let original = create_test_customer().with_address(create_main_st());
        let json = serde_json::to_string(&original).unwrap();
        let restored: Customer = serde_json::from_str(&json).unwrap();

        assert_eq!(restored.id, original.id);
        assert_eq!(restored.name, original.name);
        assert_eq!(restored.address, original.address);
        assert_eq!(restored.created_at, original.created_at);
    }
}

// ============================================================================
// Address Value Object Tests
// ============================================================================

mod address_value {
    use super::*;

    #[test]
    fn test_address_format() {
        let address = Address::new("Avenida Paulista", "Sao Paulo", "SP", "01310-100");
        assert_eq!(
            address.format(),
            "Avenida Paulista, Sao Paulo - SP, 01310-100"
        );
    }

    #[test]
    fn test_address_equality() {
        assert_eq!(create_main_st(), create_main_st());
        assert_ne!(
            create_main_st(),
            Address::new("Second St", "Springfield", "IL", "00000")
        );
    }
}

// ============================================================================
// Error Contract Tests
// ============================================================================

mod error_contract {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_not_found_message_is_stable() {
        // Callers match on this string; it must not change
        assert_eq!(CustomerError::NotFound.to_string(), "Customer not found");
        assert!(CustomerError::NotFound.is_not_found());
    }

    #[test]
    fn test_address_resolution_carries_postal_code_and_source() {
        let err =
            CustomerError::address_resolution("00000", PortError::not_found("Address", "00000"));

        assert_eq!(
            err.to_string(),
            "Address resolution failed for postal code 00000: Not found: Address with id 00000"
        );
        assert!(err.source().is_some());
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_tax_id_validation_carries_source() {
        let err = CustomerError::tax_id_validation(
            "111",
            PortError::validation_field("Tax id 111 rejected", "tax_id"),
        );

        assert_eq!(
            err.to_string(),
            "Tax id validation failed for 111: Validation error: Tax id 111 rejected"
        );
        assert!(err.source().is_some());
    }

    #[test]
    fn test_port_errors_pass_through_unchanged() {
        let port_err = PortError::ServiceUnavailable {
            service: "customer-store".to_string(),
        };
        let expected = port_err.to_string();

        let err: CustomerError = port_err.into();

        // Transparent wrapping: the caller sees the port's own message
        assert_eq!(err.to_string(), expected);
        assert!(matches!(err, CustomerError::Port(_)));
    }
}

// ============================================================================
// Validation Rule Tests
// ============================================================================

mod validation_rules {
    use super::*;

    #[test]
    fn test_formatted_tax_id_passes_clean() {
        let customer = Customer::new("1", "Ana", "529.982.247-25", "01310-100");
        let result = CustomerValidator::validate(&customer);

        assert!(result.is_valid);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_short_tax_id_is_warning_only() {
        let result = CustomerValidator::validate(&create_test_customer());

        assert!(result.is_valid);
        assert_eq!(result.warnings.len(), 1);
    }

    #[test]
    fn test_postal_code_length_bounds() {
        let mut customer = create_test_customer();

        customer.postal_code = "0123".to_string();
        assert!(CustomerValidator::validate(&customer).is_valid);

        customer.postal_code = "0123456789".to_string();
        assert!(CustomerValidator::validate(&customer).is_valid);

        customer.postal_code = "01234567891".to_string();
        assert!(!CustomerValidator::validate(&customer).is_valid);
    }

    #[test]
    fn test_errors_and_warnings_accumulate_independently() {
        let customer = Customer::new("1", "", "123", "ab");
        let result = CustomerValidator::validate(&customer);

        assert!(!result.is_valid);
        // Empty name and malformed postal code
        assert_eq!(result.errors.len(), 2);
        // Short tax id
        assert_eq!(result.warnings.len(), 1);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

proptest! {
    #[test]
    fn prop_plain_digit_postal_codes_validate(code in "[0-9]{4,10}") {
        let customer = Customer::new("1", "Ana", "52998224725", code);
        prop_assert!(CustomerValidator::validate(&customer).is_valid);
    }

    #[test]
    fn prop_hyphenated_postal_codes_validate(head in "[0-9]{2,5}", tail in "[0-9]{2,5}") {
        let code = format!("{}-{}", head, tail);
        let customer = Customer::new("1", "Ana", "52998224725", code);
        prop_assert!(CustomerValidator::validate(&customer).is_valid);
    }

    #[test]
    fn prop_alphabetic_postal_codes_rejected(code in "[a-zA-Z]{1,10}") {
        let customer = Customer::new("1", "Ana", "52998224725", code);
        prop_assert!(!CustomerValidator::validate(&customer).is_valid);
    }
}
