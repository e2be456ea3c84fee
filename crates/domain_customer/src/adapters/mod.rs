//! External Adapters for the Customer Domain
//!
//! This module provides the HTTP adapter implementations for the two
//! external collaborators the use cases depend on: the postal-code lookup
//! service and the tax authority. Both implement their port trait from
//! [`crate::ports`], so they can be swapped for mocks in tests.
//!
//! # Available Adapters
//!
//! - **AddressServiceAdapter**: resolves postal codes via the lookup API
//! - **TaxAuthorityAdapter**: validates tax identifiers via the authority API
//!
//! # Usage
//!
//! Configure the adapters at application startup:
//!
//! ```rust,ignore
//! use domain_customer::adapters::{AddressServiceAdapter, AddressServiceConfig};
//! use domain_customer::AddressLookupPort;
//! use std::sync::Arc;
//!
//! let config = AddressServiceConfig {
//!     base_url: "https://lookup.example.com/addresses".to_string(),
//!     ..Default::default()
//! };
//!
//! let lookup: Arc<dyn AddressLookupPort> = Arc::new(AddressServiceAdapter::new(config));
//! ```

pub mod address_service;
pub mod tax_authority;

pub use address_service::{AddressServiceAdapter, AddressServiceConfig};
pub use tax_authority::{TaxAuthorityAdapter, TaxAuthorityConfig};

use reqwest::StatusCode;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

use core_kernel::{CircuitBreakerConfig, PortError};

/// Circuit breaker state for fault tolerance
#[derive(Debug)]
struct CircuitBreaker {
    config: CircuitBreakerConfig,
    failure_count: AtomicU64,
    success_count: AtomicU64,
    is_open: AtomicBool,
    last_failure_time: RwLock<Option<Instant>>,
}

impl CircuitBreaker {
    fn new(config: CircuitBreakerConfig) -> Self {
        Self {
            config,
            failure_count: AtomicU64::new(0),
            success_count: AtomicU64::new(0),
            is_open: AtomicBool::new(false),
            last_failure_time: RwLock::new(None),
        }
    }

    async fn is_available(&self) -> bool {
        if !self.is_open.load(Ordering::Relaxed) {
            return true;
        }

        // Check if timeout has elapsed
        let last_failure = self.last_failure_time.read().await;
        if let Some(time) = *last_failure {
            if time.elapsed() > Duration::from_secs(self.config.reset_timeout_secs) {
                // Half-open state: allow one request through
                return true;
            }
        }

        false
    }

    fn record_success(&self) {
        self.failure_count.store(0, Ordering::Relaxed);
        let success = self.success_count.fetch_add(1, Ordering::Relaxed) + 1;
        if success >= self.config.success_threshold as u64 {
            self.is_open.store(false, Ordering::Relaxed);
            self.success_count.store(0, Ordering::Relaxed);
        }
    }

    async fn record_failure(&self) {
        self.success_count.store(0, Ordering::Relaxed);
        let failures = self.failure_count.fetch_add(1, Ordering::Relaxed) + 1;
        if failures >= self.config.failure_threshold as u64 {
            self.is_open.store(true, Ordering::Relaxed);
            *self.last_failure_time.write().await = Some(Instant::now());
        }
    }
}

/// Maps an HTTP response status from an external service to a port error
fn status_to_port_error(service: &str, entity: &str, id: &str, status: StatusCode) -> PortError {
    match status {
        StatusCode::NOT_FOUND => PortError::not_found(entity, id),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => PortError::Unauthorized {
            message: format!("{} rejected the request: {}", service, status),
        },
        StatusCode::TOO_MANY_REQUESTS => PortError::RateLimited {
            retry_after_secs: 60,
        },
        status if status.is_server_error() => PortError::ServiceUnavailable {
            service: service.to_string(),
        },
        status => PortError::internal(format!(
            "{} returned unexpected status {}",
            service, status
        )),
    }
}

/// Maps a reqwest transport failure to a port error
fn transport_to_port_error(
    service: &str,
    operation: &str,
    timeout_secs: u64,
    err: reqwest::Error,
) -> PortError {
    if err.is_timeout() {
        PortError::Timeout {
            operation: operation.to_string(),
            duration_ms: timeout_secs * 1000,
        }
    } else if err.is_decode() {
        PortError::Transformation {
            message: format!("{} returned an unreadable body: {}", service, err),
        }
    } else {
        PortError::Connection {
            message: format!("{} request failed", service),
            source: Some(Box::new(err)),
        }
    }
}
