//! MySQL implementation of the RevocationStore trait.
//!
//! Uniqueness of `token_hash` is enforced by the `uk_revoked_token_hash` key,
//! so concurrent inserts of the same token are resolved by the database.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::MySqlPool;

use inno_core::domain::entities::token::RevokedToken;
use inno_core::errors::{DomainError, TokenError};
use inno_core::repositories::RevocationStore;

use crate::services::RevocationPurge;

/// MySQL implementation of RevocationStore
pub struct MySqlRevocationStore {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlRevocationStore {
    /// Create a new MySQL revocation store
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

fn unavailable(action: &str, e: sqlx::Error) -> DomainError {
    tracing::error!(error = %e, "Revocation store failed to {}", action);
    DomainError::StoreUnavailable {
        message: format!("Failed to {}: {}", action, e),
    }
}

fn is_unique_violation(e: &sqlx::Error) -> bool {
    matches!(e, sqlx::Error::Database(db) if db.is_unique_violation())
}

#[async_trait]
impl RevocationStore for MySqlRevocationStore {
    async fn exists(&self, token_hash: &str) -> Result<bool, DomainError> {
        let row = sqlx::query("SELECT 1 FROM revoked_token WHERE token_hash = ? LIMIT 1")
            .bind(token_hash)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| unavailable("check revocation", e))?;

        Ok(row.is_some())
    }

    async fn record(&self, record: RevokedToken) -> Result<(), DomainError> {
        let query = r#"
            INSERT INTO revoked_token (
                id, token_hash, subject, token_type, expires_at, revoked_at
            ) VALUES (?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(record.id.to_string())
            .bind(&record.token_hash)
            .bind(&record.subject)
            .bind(record.kind.as_str())
            .bind(record.expires_at)
            .bind(record.revoked_at)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    DomainError::Token(TokenError::AlreadyRevoked)
                } else {
                    unavailable("record revocation", e)
                }
            })?;

        Ok(())
    }
}

#[async_trait]
impl RevocationPurge for MySqlRevocationStore {
    async fn purge_expired(&self, cutoff: DateTime<Utc>) -> Result<usize, DomainError> {
        let result = sqlx::query("DELETE FROM revoked_token WHERE expires_at < ?")
            .bind(cutoff)
            .execute(&self.pool)
            .await
            .map_err(|e| unavailable("purge revocations", e))?;

        Ok(result.rows_affected() as usize)
    }
}
