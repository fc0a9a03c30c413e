//! Main token service implementation

use std::future::Future;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::entities::token::{
    hash_token, Claims, Principal, RevokedToken, TokenKind, TokenPair,
};
use crate::errors::{DomainError, DomainResult, TokenError};
use crate::repositories::RevocationStore;

use super::config::TokenServiceConfig;
use super::signer::TokenSigner;

/// Issues, validates and revokes access and refresh tokens
///
/// Every decision that depends on revocation status is made here. A token is
/// checked against the revocation store before it is parsed, so a revoked
/// token reports `Revoked` for as long as its record exists, expired or not.
pub struct TokenService<R: RevocationStore> {
    store: Arc<R>,
    signer: TokenSigner,
    config: TokenServiceConfig,
}

impl<R: RevocationStore> TokenService<R> {
    /// Creates a new token service instance
    ///
    /// # Arguments
    ///
    /// * `store` - Revocation store consulted on every validation
    /// * `signer` - Signer holding the HS256 key
    /// * `config` - Token lifetimes and store timeout
    pub fn new(store: Arc<R>, signer: TokenSigner, config: TokenServiceConfig) -> Self {
        Self {
            store,
            signer,
            config,
        }
    }

    /// Issues an access token with the configured access lifetime
    pub fn issue_access(&self, subject: &str, role: Option<&str>) -> DomainResult<String> {
        Ok(self.signer.issue(
            subject,
            TokenKind::Access,
            role,
            self.config.access_token_ttl_seconds,
        )?)
    }

    /// Issues a refresh token with the configured refresh lifetime
    ///
    /// Outstanding access tokens for the subject are unaffected.
    pub fn issue_refresh(&self, subject: &str, role: Option<&str>) -> DomainResult<String> {
        Ok(self.signer.issue(
            subject,
            TokenKind::Refresh,
            role,
            self.config.refresh_token_ttl_seconds,
        )?)
    }

    /// Issues an access and a refresh token for the same subject
    pub fn issue_pair(&self, subject: &str, role: Option<&str>) -> DomainResult<TokenPair> {
        Ok(TokenPair {
            access_token: self.issue_access(subject, role)?,
            refresh_token: self.issue_refresh(subject, role)?,
            expires_in_seconds: self.config.access_token_ttl_seconds,
        })
    }

    /// Validates a token of the expected kind
    ///
    /// Checks, in order: revocation record, signature and structure, expiry,
    /// kind. The first failing check decides the error.
    ///
    /// # Returns
    ///
    /// * `Ok(Principal)` - Subject and role carried by the token
    /// * `Err(DomainError::Token(_))` - `Revoked`, `Expired`, `BadSignature`, `Malformed` or `WrongKind`
    /// * `Err(DomainError::StoreUnavailable)` - The revocation store failed or timed out
    pub async fn validate(&self, token: &str, expected: TokenKind) -> DomainResult<Principal> {
        let token_hash = hash_token(token);
        if self.bounded("exists", self.store.exists(&token_hash)).await? {
            return Err(rejected(TokenError::Revoked));
        }

        let claims = self.signer.parse(token).map_err(rejected)?;
        if claims.kind != expected {
            return Err(rejected(TokenError::WrongKind {
                expected,
                actual: claims.kind,
            }));
        }

        Ok(claims.principal())
    }

    /// Verifies the signature and decodes the claims without enforcing
    /// expiry or revocation
    pub fn inspect(&self, token: &str) -> DomainResult<Claims> {
        self.signer.parse_allow_expired(token).map_err(rejected)
    }

    /// Revokes a token of the given kind
    ///
    /// Expired tokens may be revoked; forged ones may not.
    ///
    /// # Returns
    ///
    /// * `Ok(RevokedToken)` - The record that was stored
    /// * `Err(DomainError::Token(TokenError::AlreadyRevoked))` - The token was revoked before
    /// * `Err(DomainError::Token(TokenError::WrongKind { .. }))` - The token is of the other kind
    pub async fn revoke(&self, token: &str, kind: TokenKind) -> DomainResult<RevokedToken> {
        let claims = self.inspect(token)?;
        if claims.kind != kind {
            return Err(rejected(TokenError::WrongKind {
                expected: kind,
                actual: claims.kind,
            }));
        }

        let record = RevokedToken::from_claims(token, &claims);
        self.bounded("record", self.store.record(record.clone()))
            .await?;

        info!(subject = %record.subject, kind = %record.kind, "Token revoked");
        Ok(record)
    }

    /// Runs a store call under the configured timeout
    async fn bounded<T, F>(&self, operation: &str, call: F) -> DomainResult<T>
    where
        F: Future<Output = DomainResult<T>>,
    {
        match tokio::time::timeout(self.config.store_timeout, call).await {
            Ok(result) => result,
            Err(_) => {
                warn!(
                    operation,
                    timeout_ms = self.config.store_timeout.as_millis() as u64,
                    "Revocation store call timed out"
                );
                Err(DomainError::store_unavailable(format!(
                    "revocation store {} timed out",
                    operation
                )))
            }
        }
    }
}

/// Logs a rejected token at a level matching how unusual the outcome is
fn rejected(error: TokenError) -> DomainError {
    if error.is_expected() {
        debug!(reason = %error, "Token rejected");
    } else {
        warn!(reason = %error, "Token rejected");
    }
    DomainError::Token(error)
}
