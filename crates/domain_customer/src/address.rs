//! Address types

use serde::{Deserialize, Serialize};

/// A resolved postal address
///
/// Produced by the address lookup port from a postal code. Callers never
/// enter address fields directly; enrichment overwrites whatever was there.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub street: String,
    pub city: String,
    pub region: String,
    pub postal_code: String,
}

impl Address {
    /// Creates a new address
    pub fn new(
        street: impl Into<String>,
        city: impl Into<String>,
        region: impl Into<String>,
        postal_code: impl Into<String>,
    ) -> Self {
        Self {
            street: street.into(),
            city: city.into(),
            region: region.into(),
            postal_code: postal_code.into(),
        }
    }

    /// Formats address for display
    pub fn format(&self) -> String {
        format!(
            "{}, {} - {}, {}",
            self.street, self.city, self.region, self.postal_code
        )
    }
}
