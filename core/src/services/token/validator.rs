//! Bearer header adapter in front of the token service

use std::sync::Arc;

use tracing::debug;

use crate::domain::entities::token::{Principal, TokenKind};
use crate::errors::{AuthError, DomainError, DomainResult, HeaderError};
use crate::repositories::{RevocationStore, UserRepository};

use super::service::TokenService;

/// Required prefix of the Authorization header value
pub const BEARER_PREFIX: &str = "Bearer ";

/// Pulls the token out of an Authorization header value
///
/// The prefix match is exact and case-sensitive.
pub fn extract_bearer_token(header: Option<&str>) -> Result<&str, HeaderError> {
    let header = header.ok_or(HeaderError::MissingHeader)?;
    let token = header
        .strip_prefix(BEARER_PREFIX)
        .ok_or(HeaderError::MalformedHeader)?;
    if token.trim().is_empty() {
        return Err(HeaderError::EmptyToken);
    }
    Ok(token)
}

/// Authenticates requests from their Authorization header
///
/// The token subject is looked up on every call, so deleting or disabling an
/// account locks out its outstanding access tokens immediately.
pub struct TokenValidator<R: RevocationStore, U: UserRepository> {
    tokens: Arc<TokenService<R>>,
    users: Arc<U>,
}

impl<R: RevocationStore, U: UserRepository> TokenValidator<R, U> {
    pub fn new(tokens: Arc<TokenService<R>>, users: Arc<U>) -> Self {
        Self { tokens, users }
    }

    /// See [`extract_bearer_token`]
    pub fn extract(header: Option<&str>) -> Result<&str, HeaderError> {
        extract_bearer_token(header)
    }

    /// Validates the access token carried by an Authorization header
    ///
    /// Header and token failures, unknown subjects and disabled accounts are
    /// collapsed into `AuthError::Unauthenticated` after being logged with
    /// their specific kind. Store failures pass through unchanged.
    ///
    /// The returned role is the account's current role, not the one the token
    /// was issued with.
    pub async fn authenticate(&self, header: Option<&str>) -> DomainResult<Principal> {
        let token = Self::extract(header).map_err(|e| {
            debug!(reason = %e, "Authorization header rejected");
            DomainError::from(AuthError::Unauthenticated)
        })?;

        let principal = self
            .tokens
            .validate(token, TokenKind::Access)
            .await
            .map_err(|e| {
                if e.is_authentication_failure() {
                    AuthError::Unauthenticated.into()
                } else {
                    e
                }
            })?;

        match self.users.find_by_email(&principal.subject).await? {
            Some(user) if user.enabled => Ok(Principal {
                subject: user.email,
                role: Some(user.role),
            }),
            Some(_) => {
                debug!(subject = %principal.subject, "Token subject is disabled");
                Err(AuthError::Unauthenticated.into())
            }
            None => {
                debug!(subject = %principal.subject, "Token subject no longer exists");
                Err(AuthError::Unauthenticated.into())
            }
        }
    }
}
