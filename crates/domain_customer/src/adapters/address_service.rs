//! Address Service Adapter
//!
//! HTTP client adapter for the external postal-code lookup service,
//! implementing the [`AddressLookupPort`] trait. The service resolves a
//! postal code to street, city, and region data, which the insert and
//! update use cases attach to the customer before persistence.
//!
//! # Error Handling
//!
//! External API errors are mapped to `PortError` variants:
//! - 404 Not Found -> `PortError::NotFound` (no address for that code)
//! - 401/403 -> `PortError::Unauthorized`
//! - 429 -> `PortError::RateLimited`
//! - 5xx -> `PortError::ServiceUnavailable`
//! - Request timeout -> `PortError::Timeout`
//! - Undecodable body -> `PortError::Transformation`

use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use serde::Deserialize;
use std::sync::Arc;
use std::time::{Duration, Instant};

use core_kernel::{
    AdapterHealth, CircuitBreakerConfig, DomainPort, HealthCheckResult, HealthCheckable,
    OperationMetadata, PortError,
};

use super::{status_to_port_error, transport_to_port_error, CircuitBreaker};
use crate::address::Address;
use crate::ports::AddressLookupPort;

/// Configuration for the address service adapter
#[derive(Debug, Clone)]
pub struct AddressServiceConfig {
    /// Base URL of the lookup API (e.g., "https://lookup.example.com/addresses")
    pub base_url: String,

    /// Optional API key, sent as the X-Api-Key header
    pub api_key: Option<String>,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Circuit breaker configuration
    pub circuit_breaker: Option<CircuitBreakerConfig>,
}

impl Default for AddressServiceConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            api_key: None,
            timeout_secs: 30,
            circuit_breaker: Some(CircuitBreakerConfig {
                failure_threshold: 5,
                success_threshold: 3,
                reset_timeout_secs: 60,
            }),
        }
    }
}

/// Address service adapter implementing the AddressLookupPort trait
///
/// Resolves postal codes through `GET {base_url}/{postal_code}`. A circuit
/// breaker guards the upstream service; while the circuit is open every
/// lookup fails fast with `PortError::ServiceUnavailable`.
///
/// # Example
///
/// ```rust,ignore
/// use domain_customer::adapters::{AddressServiceAdapter, AddressServiceConfig};
///
/// let adapter = AddressServiceAdapter::new(AddressServiceConfig {
///     base_url: "https://lookup.example.com/addresses".to_string(),
///     ..Default::default()
/// });
///
/// let address = adapter.find("01310-100", None).await?;
/// ```
#[derive(Debug)]
pub struct AddressServiceAdapter {
    config: AddressServiceConfig,
    client: Client,
    circuit_breaker: Option<Arc<CircuitBreaker>>,
}

impl AddressServiceAdapter {
    /// Creates a new address service adapter with the given configuration
    pub fn new(config: AddressServiceConfig) -> Self {
        let circuit_breaker = config
            .circuit_breaker
            .clone()
            .map(|cb| Arc::new(CircuitBreaker::new(cb)));

        Self {
            config,
            client: Client::new(),
            circuit_breaker,
        }
    }

    /// Returns the base URL of the lookup service
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Checks if the circuit breaker is open (blocking requests)
    pub async fn is_circuit_open(&self) -> bool {
        if let Some(ref cb) = self.circuit_breaker {
            !cb.is_available().await
        } else {
            false
        }
    }

    async fn ensure_available(&self) -> Result<(), PortError> {
        if self.is_circuit_open().await {
            return Err(PortError::ServiceUnavailable {
                service: "address-service circuit breaker is open".to_string(),
            });
        }
        Ok(())
    }

    fn record_success(&self) {
        if let Some(ref cb) = self.circuit_breaker {
            cb.record_success();
        }
    }

    async fn record_failure(&self) {
        if let Some(ref cb) = self.circuit_breaker {
            cb.record_failure().await;
        }
    }

    fn lookup_url(&self, postal_code: &str) -> String {
        format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            postal_code
        )
    }
}

impl DomainPort for AddressServiceAdapter {}

#[async_trait]
impl AddressLookupPort for AddressServiceAdapter {
    async fn find(
        &self,
        postal_code: &str,
        _metadata: Option<OperationMetadata>,
    ) -> Result<Address, PortError> {
        self.ensure_available().await?;

        let mut request = self
            .client
            .get(self.lookup_url(postal_code))
            .timeout(Duration::from_secs(self.config.timeout_secs));
        if let Some(ref key) = self.config.api_key {
            request = request.header("X-Api-Key", key);
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(err) => {
                self.record_failure().await;
                return Err(transport_to_port_error(
                    "address-service",
                    "find_address",
                    self.config.timeout_secs,
                    err,
                ));
            }
        };

        let status = response.status();
        if !status.is_success() {
            // Only server-side failures count toward the breaker
            if status.is_server_error() {
                self.record_failure().await;
            } else {
                self.record_success();
            }
            return Err(status_to_port_error(
                "address-service",
                "Address",
                postal_code,
                status,
            ));
        }

        let body: AddressResponse = match response.json().await {
            Ok(body) => body,
            Err(err) => {
                self.record_failure().await;
                return Err(transport_to_port_error(
                    "address-service",
                    "find_address",
                    self.config.timeout_secs,
                    err,
                ));
            }
        };

        self.record_success();
        // Some deployments omit the code in the body; echo the queried one
        let resolved_code = body
            .postal_code
            .unwrap_or_else(|| postal_code.to_string());
        Ok(Address::new(body.street, body.city, body.region, resolved_code))
    }
}

#[async_trait]
impl HealthCheckable for AddressServiceAdapter {
    /// Probes the lookup service base URL for reachability
    async fn health_check(&self) -> HealthCheckResult {
        let start = Instant::now();

        if self.is_circuit_open().await {
            return HealthCheckResult {
                adapter_id: "address-service-adapter".to_string(),
                status: AdapterHealth::Degraded,
                latency_ms: 0,
                message: Some("Circuit breaker is open".to_string()),
                checked_at: Utc::now(),
            };
        }

        let probe = self
            .client
            .get(&self.config.base_url)
            .timeout(Duration::from_secs(self.config.timeout_secs))
            .send()
            .await;
        let latency_ms = start.elapsed().as_millis() as u64;

        match probe {
            // Any HTTP response means the service is reachable
            Ok(_) => HealthCheckResult {
                adapter_id: "address-service-adapter".to_string(),
                status: AdapterHealth::Healthy,
                latency_ms,
                message: None,
                checked_at: Utc::now(),
            },
            Err(err) => HealthCheckResult {
                adapter_id: "address-service-adapter".to_string(),
                status: AdapterHealth::Unhealthy,
                latency_ms,
                message: Some(err.to_string()),
                checked_at: Utc::now(),
            },
        }
    }
}

// =============================================================================
// External API Data Transfer Objects
// =============================================================================

/// Response body of the lookup service's postal-code endpoint
#[derive(Debug, Clone, Deserialize)]
struct AddressResponse {
    #[serde(rename = "postalCode")]
    postal_code: Option<String>,
    street: String,
    city: String,
    region: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = AddressServiceConfig::default();

        assert_eq!(config.timeout_secs, 30);
        assert!(config.api_key.is_none());
        assert!(config.circuit_breaker.is_some());
    }

    #[test]
    fn test_lookup_url_joins_cleanly() {
        let adapter = AddressServiceAdapter::new(AddressServiceConfig {
            base_url: "https://lookup.example.com/addresses/".to_string(),
            ..Default::default()
        });

        assert_eq!(
            adapter.lookup_url("01310-100"),
            "https://lookup.example.com/addresses/01310-100"
        );
    }

    #[tokio::test]
    async fn test_circuit_breaker_initially_closed() {
        let adapter = AddressServiceAdapter::new(AddressServiceConfig::default());
        assert!(!adapter.is_circuit_open().await);
    }

    #[test]
    fn test_address_response_deserialization() {
        let body = r#"{
            "postalCode": "01310-100",
            "street": "Avenida Paulista",
            "city": "Sao Paulo",
            "region": "SP"
        }"#;

        let response: AddressResponse = serde_json::from_str(body).unwrap();

        assert_eq!(response.postal_code.as_deref(), Some("01310-100"));
        assert_eq!(response.street, "Avenida Paulista");
        assert_eq!(response.city, "Sao Paulo");
        assert_eq!(response.region, "SP");
    }

    #[test]
    fn test_address_response_without_postal_code_echo() {
        let body = r#"{"street": "Main St", "city": "Springfield", "region": "IL"}"#;

        let response: AddressResponse = serde_json::from_str(body).unwrap();

        assert!(response.postal_code.is_none());
    }
}
