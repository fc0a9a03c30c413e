//! Main authentication service implementation

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::entities::token::TokenKind;
use crate::domain::entities::user::{User, UserProfile};
use crate::domain::value_objects::{AuthResponse, LogoutOutcome};
use crate::errors::{AuthError, DomainError, DomainResult};
use crate::repositories::{RevocationStore, UserRepository};
use crate::services::token::TokenService;

use super::password::PasswordVerifier;

/// Checked in place of a stored hash when the email is unknown, so every
/// failed login costs one password verification
pub(crate) const UNKNOWN_USER_HASH: &str = "$2b$10$Vk5pK1gRVTJI1sZqj0y5SuDOuDAim7cxA38M4rxzqNJPrYqVIkkxi";

/// Authentication service for the session lifecycle
pub struct AuthService<U, P, R>
where
    U: UserRepository,
    P: PasswordVerifier + 'static,
    R: RevocationStore,
{
    /// User lookup by email
    user_repository: Arc<U>,
    /// Password hash verification
    password_verifier: Arc<P>,
    /// Token issuance, validation and revocation
    token_service: Arc<TokenService<R>>,
}

impl<U, P, R> AuthService<U, P, R>
where
    U: UserRepository,
    P: PasswordVerifier + 'static,
    R: RevocationStore,
{
    /// Create a new authentication service
    ///
    /// # Arguments
    ///
    /// * `user_repository` - Repository for user lookup
    /// * `password_verifier` - Verifier for stored password hashes
    /// * `token_service` - Service for JWT token management
    pub fn new(
        user_repository: Arc<U>,
        password_verifier: Arc<P>,
        token_service: Arc<TokenService<R>>,
    ) -> Self {
        Self {
            user_repository,
            password_verifier,
            token_service,
        }
    }

    pub fn token_service(&self) -> &Arc<TokenService<R>> {
        &self.token_service
    }

    pub fn user_repository(&self) -> &Arc<U> {
        &self.user_repository
    }

    /// Authenticate with email and password
    ///
    /// Unknown emails and wrong passwords both fail with
    /// `AuthError::InvalidCredentials` after one password verification each.
    /// The enabled flag is only consulted once the password has been verified.
    ///
    /// # Returns
    ///
    /// * `Ok(AuthResponse)` - A fresh access/refresh pair
    /// * `Err(DomainError)` - Invalid credentials, disabled account or store failure
    pub async fn login(&self, email: &str, password: &str) -> DomainResult<AuthResponse> {
        let user = match self.user_repository.find_by_email(email).await? {
            Some(user) => user,
            None => {
                // The outcome is ignored: an unknown email never logs in
                self.verify_password(password, UNKNOWN_USER_HASH).await?;
                info!(email, "Login failed: unknown email");
                return Err(AuthError::InvalidCredentials.into());
            }
        };

        if !self.verify_password(password, &user.password_hash).await? {
            info!(email, "Login failed: wrong password");
            return Err(AuthError::InvalidCredentials.into());
        }

        if !user.enabled {
            info!(email, "Login refused: account disabled");
            return Err(AuthError::AccountDisabled.into());
        }

        let pair = self.token_service.issue_pair(&user.email, Some(&user.role))?;
        info!(email, role = %user.role, "User logged in");
        Ok(pair.into())
    }

    /// End a session
    ///
    /// The access token is always revoked and its failures propagate. A
    /// refresh token, when given, is revoked on a best-effort basis: it must
    /// belong to the same subject, and any failure only shows up as
    /// `refresh_token_revoked = false`.
    pub async fn logout(
        &self,
        access_token: &str,
        refresh_token: Option<&str>,
    ) -> DomainResult<LogoutOutcome> {
        let record = self
            .token_service
            .revoke(access_token, TokenKind::Access)
            .await?;

        let mut outcome = LogoutOutcome {
            access_token_revoked: true,
            refresh_token_revoked: false,
        };

        if let Some(refresh_token) = refresh_token {
            match self.revoke_owned_refresh(refresh_token, &record.subject).await {
                Ok(()) => outcome.refresh_token_revoked = true,
                Err(e) => {
                    warn!(subject = %record.subject, error = %e, "Refresh token not revoked during logout");
                }
            }
        }

        info!(
            subject = %record.subject,
            refresh_token_revoked = outcome.refresh_token_revoked,
            "User logged out"
        );
        Ok(outcome)
    }

    /// Exchange a refresh token for a new pair, rotating the refresh token
    ///
    /// The subject is re-resolved so that role changes and disabled accounts
    /// take effect. The presented token is revoked after the new pair has been
    /// issued; if that revocation fails the call still succeeds.
    pub async fn refresh(&self, refresh_token: &str) -> DomainResult<AuthResponse> {
        let principal = self
            .token_service
            .validate(refresh_token, TokenKind::Refresh)
            .await?;

        let user = self.active_user(&principal.subject).await?;
        let pair = self.token_service.issue_pair(&user.email, Some(&user.role))?;

        if let Err(e) = self
            .token_service
            .revoke(refresh_token, TokenKind::Refresh)
            .await
        {
            warn!(subject = %user.email, error = %e, "Presented refresh token was not revoked");
        }

        info!(subject = %user.email, "Tokens refreshed");
        Ok(pair.into())
    }

    /// Profile of the authenticated subject
    pub async fn profile(&self, subject: &str) -> DomainResult<UserProfile> {
        self.user_repository
            .find_by_email(subject)
            .await?
            .map(|user| user.profile())
            .ok_or_else(|| AuthError::Unauthenticated.into())
    }

    async fn active_user(&self, email: &str) -> DomainResult<User> {
        let user = self
            .user_repository
            .find_by_email(email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;
        if !user.enabled {
            return Err(AuthError::AccountDisabled.into());
        }
        Ok(user)
    }

    async fn revoke_owned_refresh(&self, refresh_token: &str, subject: &str) -> DomainResult<()> {
        let claims = self.token_service.inspect(refresh_token)?;
        if claims.sub != subject {
            return Err(AuthError::Unauthenticated.into());
        }
        self.token_service
            .revoke(refresh_token, TokenKind::Refresh)
            .await?;
        Ok(())
    }

    /// Bcrypt is CPU bound, so it runs off the async workers
    async fn verify_password(&self, password: &str, hash: &str) -> DomainResult<bool> {
        let verifier = self.password_verifier.clone();
        let password = password.to_owned();
        let hash = hash.to_owned();
        tokio::task::spawn_blocking(move || verifier.matches(&password, &hash))
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Password verification task failed: {}", e),
            })
    }
}
