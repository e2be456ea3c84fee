//! Core Kernel - Foundational types and utilities for the customer system
//!
//! This crate provides the fundamental building blocks used across all domain modules:
//! - Strongly-typed identifiers shared by the domain and its adapters
//! - Ports-and-adapters infrastructure: port errors, health checks, and
//!   operation metadata for correlation across adapters

pub mod identifiers;
pub mod ports;

pub use identifiers::CustomerId;
pub use ports::{
    AdapterHealth, CircuitBreakerConfig, DomainPort, HealthCheckResult, HealthCheckable,
    OperationMetadata, PortError,
};
