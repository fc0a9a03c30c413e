use actix_web::{web, HttpResponse};

use crate::dto::auth::{LogoutRequest, LogoutResponse};
use crate::handlers::error::handle_domain_error;
use crate::middleware::auth::AuthContext;

use inno_core::repositories::{RevocationStore, UserRepository};
use inno_core::services::PasswordVerifier;

use super::AppState;

/// Handler for POST /api/v1/auth/logout
///
/// Revokes the access token used to call this endpoint and, when the body
/// names one, the caller's refresh token.
///
/// # Headers
///
/// ```text
/// Authorization: Bearer {access_token}
/// ```
///
/// # Request Body (optional)
///
/// ```json
/// {
///     "refreshToken": "eyJ..."
/// }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "message": "Logged out successfully",
///     "accessTokenRevoked": true,
///     "refreshTokenRevoked": true
/// }
/// ```
///
/// ## Errors
/// - 401 Unauthorized: Missing, invalid or already revoked access token
/// - 503 Service Unavailable: Revocation store unreachable
pub async fn logout<U, P, R>(
    state: web::Data<AppState<U, P, R>>,
    auth: AuthContext,
    body: Option<web::Json<LogoutRequest>>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    P: PasswordVerifier + 'static,
    R: RevocationStore + 'static,
{
    let refresh_token = body.and_then(|body| body.into_inner().refresh_token);

    match state
        .auth_service
        .logout(&auth.token, refresh_token.as_deref())
        .await
    {
        Ok(outcome) => HttpResponse::Ok().json(LogoutResponse::from(outcome)),
        Err(error) => handle_domain_error(&error),
    }
}
