//! Authentication route handlers
//!
//! This module contains the session lifecycle endpoints:
//! - Login with email and password
//! - Token refresh with rotation
//! - Logout with revocation
//! - Profile of the authenticated user

pub mod login;
pub mod logout;
pub mod profile;
pub mod refresh;

use std::sync::Arc;

use inno_core::repositories::{RevocationStore, UserRepository};
use inno_core::services::{AuthService, PasswordVerifier, TokenValidator};

/// Application state that holds shared services
pub struct AppState<U, P, R>
where
    U: UserRepository,
    P: PasswordVerifier + 'static,
    R: RevocationStore,
{
    pub auth_service: Arc<AuthService<U, P, R>>,
    pub token_validator: Arc<TokenValidator<R, U>>,
}

impl<U, P, R> AppState<U, P, R>
where
    U: UserRepository,
    P: PasswordVerifier + 'static,
    R: RevocationStore,
{
    /// Builds the state, deriving the validator from the service's token
    /// service and user repository
    pub fn new(auth_service: Arc<AuthService<U, P, R>>) -> Self {
        let token_validator = Arc::new(TokenValidator::new(
            auth_service.token_service().clone(),
            auth_service.user_repository().clone(),
        ));
        Self {
            auth_service,
            token_validator,
        }
    }
}
