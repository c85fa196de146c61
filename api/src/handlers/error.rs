//! Conversion of domain errors into HTTP responses

use std::fmt;

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use validator::ValidationErrors;

use ch_core::errors::{AuthError, DomainError, TokenError};
use ch_shared::errors::error_codes;

use crate::dto::error::{ErrorResponse, ErrorResponseExt};

/// Every rejected token gets the same answer
pub const TOKEN_REJECTED_MESSAGE: &str = "invalid or expired token";

/// Handle domain errors and convert them to appropriate HTTP responses
pub fn handle_domain_error(error: &DomainError) -> HttpResponse {
    let (status, response) = map_domain_error(error);
    response.to_response(status)
}

fn map_domain_error(error: &DomainError) -> (StatusCode, ErrorResponse) {
    match error {
        DomainError::Token(TokenError::GenerationFailed) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            ErrorResponse::new(error_codes::INTERNAL_ERROR, "An internal error occurred"),
        ),
        DomainError::Token(_) => (
            StatusCode::UNAUTHORIZED,
            ErrorResponse::new(error_codes::TOKEN_INVALID, TOKEN_REJECTED_MESSAGE),
        ),
        DomainError::Unauthorized => (
            StatusCode::UNAUTHORIZED,
            ErrorResponse::new(error_codes::UNAUTHORIZED, "Authentication required"),
        ),
        DomainError::Auth(auth_error) => match auth_error {
            AuthError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                ErrorResponse::new(error_codes::INVALID_CREDENTIALS, "Invalid email or password"),
            ),
            AuthError::AccountNotVerified => (
                StatusCode::FORBIDDEN,
                ErrorResponse::new(error_codes::ACCOUNT_NOT_VERIFIED, "Account is not verified"),
            ),
            AuthError::InsufficientPermissions => (
                StatusCode::FORBIDDEN,
                ErrorResponse::new(error_codes::FORBIDDEN, "Insufficient permissions"),
            ),
            AuthError::WeakPassword { min_length } => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::new(
                    error_codes::VALIDATION_ERROR,
                    format!("Password must be at least {} characters", min_length),
                )
                .add_detail("min_length", min_length),
            ),
        },
        DomainError::Validation { message } => (
            StatusCode::BAD_REQUEST,
            ErrorResponse::new(error_codes::VALIDATION_ERROR, message.clone()),
        ),
        DomainError::NotFound { resource } => (
            StatusCode::NOT_FOUND,
            ErrorResponse::new(error_codes::NOT_FOUND, format!("{} not found", resource)),
        ),
        DomainError::Internal { message } => {
            tracing::error!("Internal error: {}", message);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse::new(error_codes::INTERNAL_ERROR, "An internal error occurred"),
            )
        }
    }
}

/// Convert validator failures into a 400 with per-field details
pub fn handle_validation_errors(errors: &ValidationErrors) -> HttpResponse {
    let mut response = ErrorResponse::new(error_codes::VALIDATION_ERROR, "Validation failed");

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

    response.to_response(StatusCode::BAD_REQUEST)
}

/// Domain error usable where actix expects an `Error`, such as middleware
/// and extractors
#[derive(Debug)]
pub struct ApiError(pub DomainError);

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl From<DomainError> for ApiError {
    fn from(error: DomainError) -> Self {
        Self(error)
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        map_domain_error(&self.0).0
    }

    fn error_response(&self) -> HttpResponse {
        handle_domain_error(&self.0)
    }
}
