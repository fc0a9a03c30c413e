use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::dto::auth::{AuthResponseDto, LoginRequest};
use crate::handlers::error::{handle_domain_error, handle_validation_errors};

use inno_core::repositories::{RevocationStore, UserRepository};
use inno_core::services::PasswordVerifier;

use super::AppState;

/// Handler for POST /api/v1/auth/login
///
/// # Request Body
///
/// ```json
/// {
///     "email": "ana@uni.edu",
///     "password": "secret"
/// }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "accessToken": "eyJ...",
///     "refreshToken": "eyJ...",
///     "tokenType": "Bearer",
///     "expiresInSeconds": 900
/// }
/// ```
///
/// ## Errors
/// - 400 Bad Request: Malformed email or empty password
/// - 401 Unauthorized: Unknown email or wrong password
/// - 403 Forbidden: Account disabled
/// - 503 Service Unavailable: User store unreachable
pub async fn login<U, P, R>(
    state: web::Data<AppState<U, P, R>>,
    request: web::Json<LoginRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    P: PasswordVerifier + 'static,
    R: RevocationStore + 'static,
{
    if let Err(errors) = request.validate() {
        return handle_validation_errors(&errors);
    }

    match state
        .auth_service
        .login(&request.email, &request.password)
        .await
    {
        Ok(response) => HttpResponse::Ok().json(AuthResponseDto::from(response)),
        Err(error) => handle_domain_error(&error),
    }
}
