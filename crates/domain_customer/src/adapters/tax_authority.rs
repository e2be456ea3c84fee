//! Tax Authority Adapter
//!
//! HTTP client adapter for the external tax authority, implementing the
//! [`TaxIdValidationPort`] trait. The authority is the source of truth for
//! whether a tax identifier exists and may be used on a customer record.
//!
//! A rejected or unknown tax id surfaces as `PortError::Validation`; only
//! transport failures and 5xx responses are treated as outages.

use async_trait::async_trait;
use chrono::Utc;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::sync::Arc;
use std::time::{Duration, Instant};

use core_kernel::{
    AdapterHealth, CircuitBreakerConfig, DomainPort, HealthCheckResult, HealthCheckable,
    OperationMetadata, PortError,
};

use super::{status_to_port_error, transport_to_port_error, CircuitBreaker};
use crate::ports::TaxIdValidationPort;

/// Configuration for the tax authority adapter
#[derive(Debug, Clone)]
pub struct TaxAuthorityConfig {
    /// Base URL of the authority API (e.g., "https://tax.example.gov/registry")
    pub base_url: String,

    /// Optional API key, sent as the X-Api-Key header
    pub api_key: Option<String>,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Circuit breaker configuration
    pub circuit_breaker: Option<CircuitBreakerConfig>,
}

impl Default for TaxAuthorityConfig {
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

/// Tax authority adapter implementing the TaxIdValidationPort trait
///
/// Queries the verdict through `GET {base_url}/{tax_id}`. A 404 from the
/// authority means the identifier is unknown and is reported as a
/// validation failure, not as an outage. The circuit breaker therefore
/// only reacts to transport failures and 5xx responses.
#[derive(Debug)]
pub struct TaxAuthorityAdapter {
    config: TaxAuthorityConfig,
    client: Client,
    circuit_breaker: Option<Arc<CircuitBreaker>>,
}

impl TaxAuthorityAdapter {
    /// Creates a new tax authority adapter with the given configuration
    pub fn new(config: TaxAuthorityConfig) -> Self {
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

    /// Returns the base URL of the authority API
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
                service: "tax-authority circuit breaker is open".to_string(),
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

    fn validation_url(&self, tax_id: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), tax_id)
    }
}

impl DomainPort for TaxAuthorityAdapter {}

#[async_trait]
impl TaxIdValidationPort for TaxAuthorityAdapter {
    async fn validate(
        &self,
        tax_id: &str,
        _metadata: Option<OperationMetadata>,
    ) -> Result<(), PortError> {
        self.ensure_available().await?;

        let mut request = self
            .client
            .get(self.validation_url(tax_id))
            .timeout(Duration::from_secs(self.config.timeout_secs));
        if let Some(ref key) = self.config.api_key {
            request = request.header("X-Api-Key", key);
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(err) => {
                self.record_failure().await;
                return Err(transport_to_port_error(
                    "tax-authority",
                    "validate_tax_id",
                    self.config.timeout_secs,
                    err,
                ));
            }
        };

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            // An unknown tax id is a verdict, not an outage
            self.record_success();
            return Err(PortError::validation_field(
                format!("Tax id {} is not recognized by the authority", tax_id),
                "tax_id",
            ));
        }
        if !status.is_success() {
            // Only server-side failures count toward the breaker
            if status.is_server_error() {
                self.record_failure().await;
            } else {
                self.record_success();
            }
            return Err(status_to_port_error(
                "tax-authority",
                "TaxId",
                tax_id,
                status,
            ));
        }

        let verdict: ValidationVerdict = match response.json().await {
            Ok(verdict) => verdict,
            Err(err) => {
                self.record_failure().await;
                return Err(transport_to_port_error(
                    "tax-authority",
                    "validate_tax_id",
                    self.config.timeout_secs,
                    err,
                ));
            }
        };

        self.record_success();
        if verdict.valid {
            Ok(())
        } else {
            Err(PortError::validation_field(
                verdict
                    .reason
                    .unwrap_or_else(|| format!("Tax id {} rejected by the authority", tax_id)),
                "tax_id",
            ))
        }
    }
}

#[async_trait]
impl HealthCheckable for TaxAuthorityAdapter {
    /// Probes the authority base URL for reachability
    async fn health_check(&self) -> HealthCheckResult {
        let start = Instant::now();

        if self.is_circuit_open().await {
            return HealthCheckResult {
                adapter_id: "tax-authority-adapter".to_string(),
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
                adapter_id: "tax-authority-adapter".to_string(),
                status: AdapterHealth::Healthy,
                latency_ms,
                message: None,
                checked_at: Utc::now(),
            },
            Err(err) => HealthCheckResult {
                adapter_id: "tax-authority-adapter".to_string(),
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

/// Verdict returned by the authority's validation endpoint
#[derive(Debug, Clone, Deserialize)]
struct ValidationVerdict {
    valid: bool,
    reason: Option<String>,
}
