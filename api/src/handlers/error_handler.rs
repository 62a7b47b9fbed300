//! Conversion of domain errors into JSON HTTP responses

use actix_web::{http::StatusCode, HttpResponse};
use validator::ValidationErrors;

use om_core::errors::{DomainError, OrderError};
use om_shared::{error_codes, ErrorResponse};

/// Status code and error code for a domain error
fn classify(error: &DomainError) -> (StatusCode, &'static str) {
    match error {
        DomainError::Validation { .. } => (StatusCode::BAD_REQUEST, error_codes::VALIDATION_ERROR),
        DomainError::NotFound { .. } => (StatusCode::NOT_FOUND, error_codes::NOT_FOUND),
        DomainError::Conflict { .. } => (StatusCode::CONFLICT, error_codes::CONFLICT),
        DomainError::Unauthorized | DomainError::Token(_) => {
            (StatusCode::UNAUTHORIZED, error_codes::UNAUTHORIZED)
        }
        DomainError::Forbidden => (StatusCode::FORBIDDEN, error_codes::FORBIDDEN),
        DomainError::Internal { .. } => (StatusCode::INTERNAL_SERVER_ERROR, error_codes::INTERNAL_ERROR),
        DomainError::Order(order_error) => match order_error {
            e if e.is_invalid_transition() => {
                (StatusCode::BAD_REQUEST, error_codes::INVALID_STATUS_TRANSITION)
            }
            OrderError::InactiveDriverAssignment { .. } => {
                (StatusCode::BAD_REQUEST, error_codes::INACTIVE_DRIVER)
            }
            OrderError::InvalidFileType { .. } => (StatusCode::BAD_REQUEST, error_codes::INVALID_FILE_TYPE),
            _ => (StatusCode::BAD_REQUEST, error_codes::BAD_REQUEST),
        },
    }
}

/// Handle domain errors and convert them to appropriate HTTP responses
///
/// Internal errors are logged in full but answered with a generic message.
pub fn handle_domain_error(error: DomainError) -> HttpResponse {
    let (status, code) = classify(&error);

    let message = if status.is_server_error() {
        log::error!("Domain error: {:?}", error);
        "An internal error occurred".to_string()
    } else {
        log::warn!("Request rejected ({}): {}", status.as_u16(), error);
        error.to_string()
    };

    HttpResponse::build(status).json(ErrorResponse::new(code, message))
}

/// 400 response listing every failed field
pub fn validation_error_response(errors: &ValidationErrors) -> HttpResponse {
    let mut response = ErrorResponse::new(error_codes::VALIDATION_ERROR, "Request validation failed");

    for (field, field_errors) in errors.field_errors() {
        let messages: Vec<String> = field_errors
            .iter()
            .map(|e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string())
            })
            .collect();
        response = response.add_detail(field.to_string(), messages);
    }

    log::warn!("Request validation failed: {}", errors);
    HttpResponse::BadRequest().json(response)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_transition_is_bad_request() {
        let error = DomainError::Order(OrderError::InvalidStatusTransition {
            from: "DELIVERED".to_string(),
            to: "CREATED".to_string(),
        });
        assert_eq!(
            classify(&error),
            (StatusCode::BAD_REQUEST, error_codes::INVALID_STATUS_TRANSITION)
        );
    }

    #[test]
    fn test_status_mapping() {
        let cases = [
            (DomainError::not_found("Order not found"), StatusCode::NOT_FOUND),
            (
                DomainError::Conflict {
                    message: "taken".to_string(),
                },
                StatusCode::CONFLICT,
            ),
            (DomainError::Unauthorized, StatusCode::UNAUTHORIZED),
            (DomainError::Forbidden, StatusCode::FORBIDDEN),
            (DomainError::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR),
            (
                DomainError::Order(OrderError::InactiveDriverAssignment {
                    driver_id: "d-1".to_string(),
                }),
                StatusCode::BAD_REQUEST,
            ),
        ];

        for (error, expected) in cases {
            assert_eq!(handle_domain_error(error).status(), expected);
        }
    }
}
