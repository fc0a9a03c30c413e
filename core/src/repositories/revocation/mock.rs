//! Mock implementation of RevocationStore for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::domain::entities::token::RevokedToken;
use crate::errors::{DomainError, TokenError};

use super::r#trait::RevocationStore;

/// Mock revocation store with failure and latency injection
pub struct MockRevocationStore {
    records: Arc<RwLock<HashMap<String, RevokedToken>>>,
    failing: AtomicBool,
    latency: Option<Duration>,
    exists_calls: AtomicUsize,
}

impl MockRevocationStore {
    /// Create a new mock store
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(HashMap::new())),
            failing: AtomicBool::new(false),
            latency: None,
            exists_calls: AtomicUsize::new(0),
        }
    }

    /// Every call sleeps for `latency` before touching the map
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Make subsequent calls fail with `StoreUnavailable`
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Number of records currently stored
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn get(&self, token_hash: &str) -> Option<RevokedToken> {
        self.records.read().await.get(token_hash).cloned()
    }

    /// How many times `exists` has been called
    pub fn exists_calls(&self) -> usize {
        self.exists_calls.load(Ordering::SeqCst)
    }

    async fn simulate(&self) -> Result<(), DomainError> {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        if self.failing.load(Ordering::SeqCst) {
            return Err(DomainError::store_unavailable("mock store failure"));
        }
        Ok(())
    }
}

impl Default for MockRevocationStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RevocationStore for MockRevocationStore {
    async fn exists(&self, token_hash: &str) -> Result<bool, DomainError> {
        self.exists_calls.fetch_add(1, Ordering::SeqCst);
        self.simulate().await?;
        Ok(self.records.read().await.contains_key(token_hash))
    }

    async fn record(&self, record: RevokedToken) -> Result<(), DomainError> {
        self.simulate().await?;
        let mut records = self.records.write().await;

        if records.contains_key(&record.token_hash) {
            return Err(TokenError::AlreadyRevoked.into());
        }

        records.insert(record.token_hash.clone(), record);
        Ok(())
    }
}
