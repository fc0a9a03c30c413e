use actix_web::{web, HttpResponse};

use crate::dto::auth::ProfileResponse;
use crate::handlers::error::handle_domain_error;
use crate::middleware::auth::AuthContext;

use inno_core::repositories::{RevocationStore, UserRepository};
use inno_core::services::PasswordVerifier;

use super::AppState;

/// Handler for GET /api/v1/auth/profile
///
/// Returns the id, name, email and role of the authenticated user.
pub async fn profile<U, P, R>(
    state: web::Data<AppState<U, P, R>>,
    auth: AuthContext,
) -> HttpResponse
where
    U: UserRepository + 'static,
    P: PasswordVerifier + 'static,
    R: RevocationStore + 'static,
{
    match state.auth_service.profile(&auth.subject).await {
        Ok(profile) => HttpResponse::Ok().json(ProfileResponse::from(profile)),
        Err(error) => handle_domain_error(&error),
    }
}
