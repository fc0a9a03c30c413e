use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::dto::auth::{AuthResponseDto, RefreshTokenRequest};
use crate::handlers::error::{handle_domain_error, handle_validation_errors};

use inno_core::repositories::{RevocationStore, UserRepository};
use inno_core::services::PasswordVerifier;

use super::AppState;

/// Handler for POST /api/v1/auth/refresh
///
/// Exchanges a refresh token for a new pair. The presented refresh token is
/// revoked, so it can only be used once.
///
/// # Request Body
///
/// ```json
/// {
///     "refreshToken": "eyJ..."
/// }
/// ```
///
/// ## Errors
/// - 400 Bad Request: Empty refresh token
/// - 401 Unauthorized: Invalid, expired, revoked or non-refresh token
/// - 403 Forbidden: Account disabled since the token was issued
/// - 503 Service Unavailable: Revocation store unreachable
pub async fn refresh<U, P, R>(
    state: web::Data<AppState<U, P, R>>,
    request: web::Json<RefreshTokenRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    P: PasswordVerifier + 'static,
    R: RevocationStore + 'static,
{
    if let Err(errors) = request.validate() {
        return handle_validation_errors(&errors);
    }

    match state.auth_service.refresh(&request.refresh_token).await {
        Ok(response) => HttpResponse::Ok().json(AuthResponseDto::from(response)),
        Err(error) => handle_domain_error(&error),
    }
}
