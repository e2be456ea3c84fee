//! API error handling

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use core_kernel::PortError;
use domain_customer::CustomerError;

/// API error types
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Validation failed")]
    Invalid { errors: Vec<String> },

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<String>>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message, details) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg, None),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, "conflict", msg, None),
            ApiError::Validation(msg) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "validation_error", msg, None)
            }
            ApiError::Invalid { errors } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "validation_error",
                "Validation failed".to_string(),
                Some(errors),
            ),
            ApiError::ServiceUnavailable(msg) => {
                (StatusCode::SERVICE_UNAVAILABLE, "service_unavailable", msg, None)
            }
            ApiError::Internal(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", msg, None)
            }
        };

        let body = ErrorResponse {
            error: error_type.to_string(),
            message,
            details,
        };

        (status, Json(body)).into_response()
    }
}

/// Maps domain errors onto HTTP semantics
///
/// The missing-record case keeps its stable "Customer not found" message.
/// Enrichment and validation failures are the caller's problem (422) unless
/// the failing collaborator was merely unreachable, in which case the
/// request may be retried (503).
impl From<CustomerError> for ApiError {
    fn from(err: CustomerError) -> Self {
        match err {
            CustomerError::NotFound => ApiError::NotFound(err.to_string()),
            CustomerError::AddressResolutionFailed { ref source, .. }
            | CustomerError::TaxIdValidationFailed { ref source, .. } => {
                if source.is_transient() {
                    ApiError::ServiceUnavailable(err.to_string())
                } else {
                    ApiError::Validation(err.to_string())
                }
            }
            CustomerError::Port(ref port_err) => {
                if port_err.is_transient() {
                    ApiError::ServiceUnavailable(err.to_string())
                } else if matches!(port_err, PortError::Conflict { .. }) {
                    ApiError::Conflict(err.to_string())
                } else {
                    ApiError::Internal(err.to_string())
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_maps_to_404() {
        let api_err: ApiError = CustomerError::NotFound.into();
        let response = api_err.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_unresolvable_postal_code_maps_to_422() {
        let api_err: ApiError = CustomerError::address_resolution(
            "00000",
            PortError::not_found("Address", "00000"),
        )
        .into();

        let response = api_err.into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_lookup_outage_maps_to_503() {
        let api_err: ApiError = CustomerError::address_resolution(
            "00000",
            PortError::connection("lookup unreachable"),
        )
        .into();

        let response = api_err.into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_transient_store_error_maps_to_503() {
        let api_err: ApiError = CustomerError::Port(PortError::connection("store offline")).into();
        let response = api_err.into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_other_store_error_maps_to_500() {
        let api_err: ApiError =
            CustomerError::Port(PortError::internal("row corrupted")).into();
        let response = api_err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
