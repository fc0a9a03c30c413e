//! Conversion of domain errors into HTTP responses
//!
//! Every failure that reaches a client is rendered as the shared
//! [`ErrorResponse`] body. Token and header failures are deliberately
//! collapsed into a single 401 so callers cannot tell which check failed.

use std::fmt;

use actix_web::{
    error::JsonPayloadError, http::StatusCode, HttpRequest, HttpResponse, ResponseError,
};
use inno_core::errors::{AuthError, DomainError, TokenError};
use inno_shared::{error_codes, ErrorResponse};
use tracing::{debug, error};
use validator::ValidationErrors;

/// Message returned for every authentication failure
pub const UNAUTHENTICATED_MESSAGE: &str = "Invalid or expired session";

/// Status, error code and client-facing message for a domain error
pub fn classify(error: &DomainError) -> (StatusCode, &'static str, String) {
    match error {
        DomainError::Auth(AuthError::InvalidCredentials) => (
            StatusCode::UNAUTHORIZED,
            error_codes::INVALID_CREDENTIALS,
            "Invalid email or password".to_string(),
        ),
        DomainError::Auth(AuthError::AccountDisabled) => (
            StatusCode::FORBIDDEN,
            error_codes::ACCOUNT_DISABLED,
            "Account is disabled".to_string(),
        ),
        DomainError::Token(TokenError::AlreadyRevoked) => (
            StatusCode::CONFLICT,
            error_codes::TOKEN_ALREADY_REVOKED,
            "Token has already been revoked".to_string(),
        ),
        DomainError::Token(TokenError::SigningFailed) | DomainError::Internal { .. } => (
            StatusCode::INTERNAL_SERVER_ERROR,
            error_codes::INTERNAL_ERROR,
            "An internal error occurred".to_string(),
        ),
        DomainError::Auth(AuthError::Unauthenticated)
        | DomainError::Token(_)
        | DomainError::Header(_) => (
            StatusCode::UNAUTHORIZED,
            error_codes::UNAUTHENTICATED,
            UNAUTHENTICATED_MESSAGE.to_string(),
        ),
        DomainError::StoreUnavailable { .. } => (
            StatusCode::SERVICE_UNAVAILABLE,
            error_codes::SERVICE_UNAVAILABLE,
            "Service temporarily unavailable".to_string(),
        ),
        DomainError::Validation { message } => (
            StatusCode::BAD_REQUEST,
            error_codes::VALIDATION_ERROR,
            message.clone(),
        ),
        DomainError::NotFound { resource } => (
            StatusCode::NOT_FOUND,
            error_codes::NOT_FOUND,
            format!("{} not found", resource),
        ),
    }
}

/// Handle domain errors and convert them to appropriate HTTP responses
pub fn handle_domain_error(error: &DomainError) -> HttpResponse {
    let (status, code, message) = classify(error);

    if status.is_server_error() {
        error!(error = %error, status = status.as_u16(), "Request failed");
    } else {
        debug!(error = %error, status = status.as_u16(), "Request rejected");
    }

    HttpResponse::build(status).json(ErrorResponse::new(code, message))
}

/// 400 response listing the failed validation rules per field
pub fn handle_validation_errors(errors: &ValidationErrors) -> HttpResponse {
    let mut response = ErrorResponse::new(error_codes::VALIDATION_ERROR, "Invalid request body");

    for (field, failures) in errors.field_errors() {
        let codes: Vec<String> = failures.iter().map(|f| f.code.to_string()).collect();
        response = response.add_detail(field, codes);
    }

    HttpResponse::BadRequest().json(response)
}

/// Error handler for JSON bodies that cannot be deserialized
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    debug!(error = %err, "Rejected request body");
    let message = err.to_string();
    actix_web::error::InternalError::from_response(
        err,
        HttpResponse::BadRequest().json(ErrorResponse::new(error_codes::VALIDATION_ERROR, message)),
    )
    .into()
}

/// Domain error carried through actix's error machinery
///
/// Used where actix expects an `Error` rather than a response, such as in
/// extractors.
#[derive(Debug)]
pub struct ApiError(pub DomainError);

impl From<DomainError> for ApiError {
    fn from(error: DomainError) -> Self {
        Self(error)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        classify(&self.0).0
    }

    fn error_response(&self) -> HttpResponse {
        handle_domain_error(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use inno_core::domain::entities::token::TokenKind;
    use inno_core::errors::HeaderError;

    #[test]
    fn test_token_failures_share_one_response() {
        let failures = [
            DomainError::from(TokenError::Expired),
            DomainError::from(TokenError::Revoked),
            DomainError::from(TokenError::BadSignature),
            DomainError::from(TokenError::Malformed),
            DomainError::from(TokenError::WrongKind {
                expected: TokenKind::Refresh,
                actual: TokenKind::Access,
            }),
            DomainError::from(HeaderError::MissingHeader),
            DomainError::from(AuthError::Unauthenticated),
        ];

        for failure in &failures {
            let (status, code, message) = classify(failure);
            assert_eq!(status, StatusCode::UNAUTHORIZED);
            assert_eq!(code, error_codes::UNAUTHENTICATED);
            assert_eq!(message, UNAUTHENTICATED_MESSAGE);
        }
    }

    #[test]
    fn test_status_mapping() {
        let cases = [
            (DomainError::from(AuthError::InvalidCredentials), StatusCode::UNAUTHORIZED),
            (DomainError::from(AuthError::AccountDisabled), StatusCode::FORBIDDEN),
            (DomainError::from(TokenError::AlreadyRevoked), StatusCode::CONFLICT),
            (DomainError::from(TokenError::SigningFailed), StatusCode::INTERNAL_SERVER_ERROR),
            (DomainError::store_unavailable("timeout"), StatusCode::SERVICE_UNAVAILABLE),
            (
                DomainError::Validation {
                    message: "bad".to_string(),
                },
                StatusCode::BAD_REQUEST,
            ),
        ];

        for (error, expected) in &cases {
            assert_eq!(handle_domain_error(error).status(), *expected, "{:?}", error);
        }
    }

    #[test]
    fn test_internal_details_are_not_exposed() {
        let (_, _, message) = classify(&DomainError::Internal {
            message: "pool exhausted on db-3".to_string(),
        });
        assert!(!message.contains("db-3"));
    }

    #[test]
    fn test_api_error_status() {
        let error = ApiError::from(DomainError::from(AuthError::Unauthenticated));
        assert_eq!(error.status_code(), StatusCode::UNAUTHORIZED);
    }
}
