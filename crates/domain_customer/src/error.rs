//! Customer domain errors
//!
//! This module defines the failure kinds a use case can surface. Port
//! transport failures pass through unchanged; only the step-specific
//! conditions (missing record, unresolvable postal code, rejected tax id)
//! get their own variants.

use thiserror::Error;

use core_kernel::PortError;

/// Errors that can occur in the customer domain
#[derive(Debug, Error)]
pub enum CustomerError {
    /// No record matches the requested identifier
    #[error("Customer not found")]
    NotFound,

    /// The postal code could not be resolved to an address
    #[error("Address resolution failed for postal code {postal_code}: {source}")]
    AddressResolutionFailed {
        postal_code: String,
        #[source]
        source: PortError,
    },

    /// The tax identifier was rejected or could not be validated
    #[error("Tax id validation failed for {tax_id}: {source}")]
    TaxIdValidationFailed {
        tax_id: String,
        #[source]
        source: PortError,
    },

    /// An outbound port failed; the underlying error passes through unchanged
    #[error(transparent)]
    Port(#[from] PortError),
}

impl CustomerError {
    /// Creates an AddressResolutionFailed error
    pub fn address_resolution(postal_code: impl Into<String>, source: PortError) -> Self {
        CustomerError::AddressResolutionFailed {
            postal_code: postal_code.into(),
            source,
        }
    }

    /// Creates a TaxIdValidationFailed error
    pub fn tax_id_validation(tax_id: impl Into<String>, source: PortError) -> Self {
        CustomerError::TaxIdValidationFailed {
            tax_id: tax_id.into(),
            source,
        }
    }

    /// Returns true if this error is the missing-record condition
    pub fn is_not_found(&self) -> bool {
        matches!(self, CustomerError::NotFound)
    }
}
