//! In-memory implementation of the RevocationStore trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use inno_core::domain::entities::token::RevokedToken;
use inno_core::errors::{DomainError, TokenError};
use inno_core::repositories::RevocationStore;

use crate::services::RevocationPurge;

/// Revocation records held in a map keyed by token hash
///
/// Check-and-insert happens under a single write guard, which gives the same
/// one-winner guarantee as the unique key in MySQL.
#[derive(Clone, Default)]
pub struct InMemoryRevocationStore {
    records: Arc<RwLock<HashMap<String, RevokedToken>>>,
}

impl InMemoryRevocationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl RevocationStore for InMemoryRevocationStore {
    async fn exists(&self, token_hash: &str) -> Result<bool, DomainError> {
        Ok(self.records.read().await.contains_key(token_hash))
    }

    async fn record(&self, record: RevokedToken) -> Result<(), DomainError> {
        let mut records = self.records.write().await;
        if records.contains_key(&record.token_hash) {
            return Err(DomainError::Token(TokenError::AlreadyRevoked));
        }
        records.insert(record.token_hash.clone(), record);
        Ok(())
    }
}

#[async_trait]
impl RevocationPurge for InMemoryRevocationStore {
    async fn purge_expired(&self, cutoff: DateTime<Utc>) -> Result<usize, DomainError> {
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|_, record| record.expires_at >= cutoff);
        Ok(before - records.len())
    }
}
