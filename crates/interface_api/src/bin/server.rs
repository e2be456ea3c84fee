//! Customer Service - API Server Binary
//!
//! This binary starts the HTTP API server for the customer service.
//!
//! # Usage
//!
//! ```bash
//! # Run with default configuration
//! cargo run --bin customer-api
//!
//! # Run with environment variables
//! API_HOST=0.0.0.0 API_PORT=8080 DATABASE_URL=postgres://... cargo run --bin customer-api
//! ```
//!
//! # Environment Variables
//!
//! * `API_HOST` - Server host (default: 0.0.0.0)
//! * `API_PORT` - Server port (default: 8080)
//! * `API_DATABASE_URL` - PostgreSQL connection string
//! * `API_LOG_LEVEL` - Log level: trace, debug, info, warn, error (default: info)
//! * `API_ADDRESS_SERVICE_URL` - Base URL of the postal-code lookup service
//! * `API_ADDRESS_SERVICE_API_KEY` - Optional API key for the lookup service
//! * `API_TAX_AUTHORITY_URL` - Base URL of the tax authority service
//! * `API_EXTERNAL_TIMEOUT_SECS` - Timeout for external calls (default: 30)
//! * `API_VALIDATE_TAX_ID` - Whether inserts consult the tax authority (default: true)

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use domain_customer::adapters::{
    AddressServiceAdapter, AddressServiceConfig, TaxAuthorityAdapter, TaxAuthorityConfig,
};
use domain_customer::usecases::{
    FindCustomerByIdUseCase, InsertCustomerUseCase, UpdateCustomerUseCase,
};
use infra_db::adapters::PostgresCustomerAdapter;
use infra_db::{create_pool, ensure_schema, DatabaseConfig};
use interface_api::{config::ApiConfig, create_router, AppState};

/// Main entry point for the API server.
///
/// Initializes logging, loads configuration, establishes the database
/// connection, wires the adapters into the use cases, and starts the HTTP
/// server.
///
/// # Errors
///
/// Returns an error if:
/// - Configuration cannot be loaded from environment
/// - Database connection or schema setup fails
/// - Server fails to bind to the configured address
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (useful for local development)
    dotenvy::dotenv().ok();

    // Load configuration from environment
    let config = load_config();

    // Initialize tracing/logging
    init_tracing(&config.log_level);

    tracing::info!(
        host = %config.host,
        port = %config.port,
        "Starting Customer Service API Server"
    );

    // Create database connection pool and make sure the table exists
    let pool = create_pool(DatabaseConfig::new(&config.database_url)).await?;
    ensure_schema(&pool).await?;

    // Wire adapters
    let store = Arc::new(PostgresCustomerAdapter::new(pool));
    let address_lookup = Arc::new(AddressServiceAdapter::new(AddressServiceConfig {
        base_url: config.address_service_url.clone(),
        api_key: config.address_service_api_key.clone(),
        timeout_secs: config.external_timeout_secs,
        ..Default::default()
    }));
    let tax_validator = Arc::new(TaxAuthorityAdapter::new(TaxAuthorityConfig {
        base_url: config.tax_authority_url.clone(),
        timeout_secs: config.external_timeout_secs,
        ..Default::default()
    }));

    // Wire use cases
    let find_customer = Arc::new(FindCustomerByIdUseCase::new(store.clone()));
    let insert_customer = Arc::new(
        InsertCustomerUseCase::new(address_lookup.clone(), tax_validator, store.clone())
            .with_tax_id_validation(config.validate_tax_id),
    );
    let update_customer = Arc::new(UpdateCustomerUseCase::new(
        find_customer.clone(),
        address_lookup,
        store.clone(),
    ));

    let state = AppState {
        find_customer,
        insert_customer,
        update_customer,
        store,
        config: config.clone(),
    };

    // Create the API router
    let app = create_router(state);

    // Parse server address
    let addr: SocketAddr = config.server_addr().parse()?;

    tracing::info!(%addr, "Server listening");

    // Create TCP listener and serve
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Loads API configuration from environment variables.
///
/// Falls back to default values if environment variables are not set.
///
/// # Returns
///
/// `ApiConfig` populated from environment or defaults
fn load_config() -> ApiConfig {
    // Try to load from environment with API_ prefix
    ApiConfig::from_env().unwrap_or_else(|_| {
        // Fall back to individual env vars or defaults
        let defaults = ApiConfig::default();
        ApiConfig {
            host: std::env::var("API_HOST").unwrap_or(defaults.host),
            port: std::env::var("API_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            database_url: std::env::var("DATABASE_URL")
                .or_else(|_| std::env::var("API_DATABASE_URL"))
                .unwrap_or(defaults.database_url),
            log_level: std::env::var("API_LOG_LEVEL")
                .or_else(|_| std::env::var("RUST_LOG"))
                .unwrap_or(defaults.log_level),
            address_service_url: std::env::var("API_ADDRESS_SERVICE_URL")
                .unwrap_or(defaults.address_service_url),
            address_service_api_key: std::env::var("API_ADDRESS_SERVICE_API_KEY").ok(),
            tax_authority_url: std::env::var("API_TAX_AUTHORITY_URL")
                .unwrap_or(defaults.tax_authority_url),
            external_timeout_secs: std::env::var("API_EXTERNAL_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.external_timeout_secs),
            validate_tax_id: std::env::var("API_VALIDATE_TAX_ID")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.validate_tax_id),
        }
    })
}

/// Initializes the tracing subscriber for structured logging.
///
/// # Arguments
///
/// * `log_level` - The minimum log level to output (trace, debug, info, warn, error)
fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// This enables graceful shutdown of the server, allowing in-flight
/// requests to complete before the process exits.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
