//! HTTP API Layer
//!
//! This crate provides the REST API for the customer service using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: Request handlers calling the domain use cases
//! - **DTOs**: Request/Response data transfer objects
//! - **Error Handling**: Consistent error responses
//!
//! Handlers never see adapters directly; [`AppState`] carries the three
//! use-case input ports plus the store port for readiness probing. Tests
//! wire the same router against in-memory mocks.
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::{create_router, AppState};
//!
//! let app = create_router(state);
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod dto;
pub mod error;
pub mod handlers;

use std::sync::Arc;

use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use domain_customer::ports::CustomerStorePort;
use domain_customer::usecases::{FindCustomerById, InsertCustomer, UpdateCustomer};

use crate::config::ApiConfig;
use crate::handlers::{customer, health};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub find_customer: Arc<dyn FindCustomerById>,
    pub insert_customer: Arc<dyn InsertCustomer>,
    pub update_customer: Arc<dyn UpdateCustomer>,
    pub store: Arc<dyn CustomerStorePort>,
    pub config: ApiConfig,
}

/// Creates the main API router
///
/// # Arguments
///
/// * `state` - Application state with the wired use-case ports
///
/// # Returns
///
/// Configured Axum router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    // Public routes (no versioned prefix)
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    // Customer routes
    let customer_routes = Router::new()
        .route("/", post(customer::create_customer))
        .route("/:id", get(customer::get_customer))
        .route("/:id", put(customer::update_customer));

    let api_routes = Router::new().nest("/customers", customer_routes);

    // Combine all routes
    Router::new()
        .merge(public_routes)
        .nest("/api/v1", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .with_state(state)
}
