//! Customer handlers
//!
//! Each handler delegates to a use-case input port from [`AppState`]. The
//! request-id middleware stamps an `x-request-id` header on every request;
//! handlers forward it to the domain as the operation's correlation id.

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use validator::Validate;

use core_kernel::{CustomerId, OperationMetadata};
use domain_customer::CustomerValidator;

use crate::dto::customer::{CreateCustomerRequest, CustomerResponse, UpdateCustomerRequest};
use crate::{error::ApiError, AppState};

/// Gets a customer by id
pub async fn get_customer(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<CustomerResponse>, ApiError> {
    let metadata = request_metadata(&headers);

    let customer = state
        .find_customer
        .find(&CustomerId::new(id), metadata)
        .await?;

    Ok(Json(customer.into()))
}

/// Creates a new customer
pub async fn create_customer(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<CreateCustomerRequest>,
) -> Result<(StatusCode, Json<CustomerResponse>), ApiError> {
    request.validate().map_err(validator_errors_to_api_error)?;

    let customer = request.into_customer();
    let shape = CustomerValidator::validate(&customer);
    if !shape.is_valid {
        return Err(ApiError::Invalid {
            errors: shape.errors,
        });
    }

    let metadata = request_metadata(&headers);
    let created = state.insert_customer.insert(customer, metadata).await?;

    Ok((StatusCode::CREATED, Json(created.into())))
}

/// Updates an existing customer
pub async fn update_customer(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(request): Json<UpdateCustomerRequest>,
) -> Result<Json<CustomerResponse>, ApiError> {
    request.validate().map_err(validator_errors_to_api_error)?;

    // The path id is authoritative; a differing body id is ignored
    let customer = request.into_customer(id);
    let shape = CustomerValidator::validate(&customer);
    if !shape.is_valid {
        return Err(ApiError::Invalid {
            errors: shape.errors,
        });
    }

    let metadata = request_metadata(&headers);
    let updated = state.update_customer.update(customer, metadata).await?;

    Ok(Json(updated.into()))
}

/// Builds operation metadata from the request headers
fn request_metadata(headers: &HeaderMap) -> Option<OperationMetadata> {
    headers
        .get("x-request-id")
        .and_then(|value| value.to_str().ok())
        .map(OperationMetadata::with_correlation_id)
}

/// Flattens field-level validator errors into response detail lines
fn validator_errors_to_api_error(errors: validator::ValidationErrors) -> ApiError {
    let details = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, field_errors)| {
            field_errors.iter().map(move |error| match &error.message {
                Some(message) => format!("{}: {}", field, message),
                None => format!("{}: invalid value", field),
            })
        })
        .collect();

    ApiError::Invalid { errors: details }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_metadata_reads_request_id() {
        let mut headers = HeaderMap::new();
        headers.insert("x-request-id", "req-123".parse().unwrap());

        let metadata = request_metadata(&headers).unwrap();

        assert_eq!(metadata.correlation_id.as_deref(), Some("req-123"));
    }

    #[test]
    fn test_request_metadata_absent_without_header() {
        assert!(request_metadata(&HeaderMap::new()).is_none());
    }
}
