//! Customer validation rules
//!
//! This module provides shape validation for customer records before a use
//! case runs. The use cases themselves do not re-validate; callers (or the
//! API layer) are expected to submit well-formed records.
//!
//! # Validation Rules
//!
//! - Identifier must be non-empty
//! - Name must be non-empty
//! - Tax id must be non-empty and contain only digits once separators
//!   (`.` and `-`) are removed; a non-standard length is a warning, not an
//!   error, since formats differ by country
//! - Postal code must be 4-10 digits with at most one hyphen

use crate::customer::Customer;

/// Result of customer validation
#[derive(Debug, Clone)]
pub struct ValidationResult {
    /// Whether the customer is valid
    pub is_valid: bool,
    /// List of validation errors
    pub errors: Vec<String>,
    /// List of validation warnings (non-fatal issues)
    pub warnings: Vec<String>,
}

impl ValidationResult {
    /// Creates a successful validation result
    pub fn ok() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Creates a failed validation result with errors
    pub fn fail(errors: Vec<String>) -> Self {
        Self {
            is_valid: false,
            errors,
            warnings: Vec::new(),
        }
    }

    /// Adds an error to the result
    pub fn add_error(&mut self, error: impl Into<String>) {
        self.errors.push(error.into());
        self.is_valid = false;
    }

    /// Adds a warning to the result
    pub fn add_warning(&mut self, warning: impl Into<String>) {
        self.warnings.push(warning.into());
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::ok()
    }
}

/// Validator for customer records
///
/// # Examples
///
/// ```rust
/// use domain_customer::customer::Customer;
/// use domain_customer::validation::CustomerValidator;
///
/// let customer = Customer::new("1", "Ana", "111", "00000");
/// let result = CustomerValidator::validate(&customer);
/// assert!(result.is_valid);
/// ```
pub struct CustomerValidator;

impl CustomerValidator {
    /// Validates a customer record
    ///
    /// # Arguments
    ///
    /// * `customer` - The customer to validate
    ///
    /// # Returns
    ///
    /// A `ValidationResult` containing any errors or warnings
    pub fn validate(customer: &Customer) -> ValidationResult {
        let mut result = ValidationResult::ok();

        if customer.id.is_empty() {
            result.add_error("Customer id must not be empty");
        }

        if customer.name.trim().is_empty() {
            result.add_error("Customer name must not be empty");
        }

        Self::validate_tax_id(&customer.tax_id, &mut result);
        Self::validate_postal_code(&customer.postal_code, &mut result);

        result
    }

    fn validate_tax_id(tax_id: &str, result: &mut ValidationResult) {
        if tax_id.trim().is_empty() {
            result.add_error("Tax id must not be empty");
            return;
        }

        let digits: String = tax_id.chars().filter(|c| !matches!(c, '.' | '-')).collect();
        if !digits.chars().all(|c| c.is_ascii_digit()) {
            result.add_error(format!("Tax id contains invalid characters: {}", tax_id));
            return;
        }

        if digits.len() != 11 {
            result.add_warning(format!(
                "Tax id {} does not have the standard 11 digits",
                tax_id
            ));
        }
    }

    fn validate_postal_code(postal_code: &str, result: &mut ValidationResult) {
        if postal_code.trim().is_empty() {
            result.add_error("Postal code must not be empty");
            return;
        }

        let hyphens = postal_code.chars().filter(|c| *c == '-').count();
        let digits: String = postal_code.chars().filter(|c| *c != '-').collect();

        if hyphens > 1 || !digits.chars().all(|c| c.is_ascii_digit()) {
            result.add_error(format!("Invalid postal code format: {}", postal_code));
            return;
        }

        if digits.len() < 4 || digits.len() > 10 {
            result.add_error(format!(
                "Postal code must have 4-10 digits, got {}",
                digits.len()
            ));
        }
    }
}
