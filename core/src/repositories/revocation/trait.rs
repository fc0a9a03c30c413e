//! Revocation store trait defining the interface for revoked token persistence.

use async_trait::async_trait;

use crate::domain::entities::token::RevokedToken;
use crate::errors::DomainError;

/// Durable set of revoked tokens, keyed by the hex SHA-256 of the token string
///
/// The core only ever checks and inserts. Records are never updated, and
/// removal of long-expired records is left to infrastructure housekeeping.
///
/// # Concurrency
/// Both operations must be individually atomic. When several callers record
/// the same token concurrently exactly one succeeds; the others receive
/// `TokenError::AlreadyRevoked` and exactly one record remains.
///
/// # Errors
/// I/O failures are reported as `DomainError::StoreUnavailable` and must never
/// be folded into a "revoked" or "not revoked" answer.
#[async_trait]
pub trait RevocationStore: Send + Sync {
    /// Check whether a token has been revoked
    ///
    /// # Arguments
    /// * `token_hash` - Hex SHA-256 of the raw token string
    ///
    /// # Returns
    /// * `Ok(true)` - A revocation record exists
    /// * `Ok(false)` - The token has not been revoked
    /// * `Err(DomainError)` - The store could not be reached
    ///
    /// # Example
    /// ```no_run
    /// # use inno_core::repositories::RevocationStore;
    /// # use inno_core::domain::entities::token::hash_token;
    /// # async fn example(store: &impl RevocationStore) -> Result<(), Box<dyn std::error::Error>> {
    /// if store.exists(&hash_token("eyJhbGciOi...")).await? {
    ///     println!("Token was revoked");
    /// }
    /// # Ok(())
    /// # }
    /// ```
    async fn exists(&self, token_hash: &str) -> Result<bool, DomainError>;

    /// Persist a revocation record
    ///
    /// # Arguments
    /// * `record` - The record to insert
    ///
    /// # Returns
    /// * `Ok(())` - Record stored
    /// * `Err(DomainError::Token(TokenError::AlreadyRevoked))` - A record for the same token exists
    /// * `Err(DomainError)` - The store could not be reached
    async fn record(&self, record: RevokedToken) -> Result<(), DomainError>;
}
