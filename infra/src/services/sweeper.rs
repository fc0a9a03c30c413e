//! Background removal of revocation records for long-expired tokens
//!
//! Once a token is past its own expiry it is rejected by validation anyway,
//! so its revocation record only needs to outlive it by a grace period.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;
use std::time::Duration as StdDuration;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use inno_core::errors::DomainError;

use crate::config::SweeperConfig;

/// Deletion of revocation records, kept out of the core store trait
#[async_trait]
pub trait RevocationPurge: Send + Sync {
    /// Delete records whose token expired before `cutoff`
    ///
    /// # Returns
    /// * `Ok(usize)` - Number of records deleted
    async fn purge_expired(&self, cutoff: DateTime<Utc>) -> Result<usize, DomainError>;
}

/// Periodically purges stale revocation records
pub struct RevocationSweeper<P: RevocationPurge + 'static> {
    store: Arc<P>,
    config: SweeperConfig,
}

impl<P: RevocationPurge> RevocationSweeper<P> {
    pub fn new(store: Arc<P>, config: SweeperConfig) -> Self {
        Self { store, config }
    }

    /// Run a single sweep
    pub async fn run_sweep(&self) -> Result<SweepResult, DomainError> {
        // The cutoff is never in the future, so records of live tokens survive
        let cutoff = Duration::from_std(StdDuration::from_secs(self.config.grace_period_seconds))
            .ok()
            .and_then(|grace| Utc::now().checked_sub_signed(grace))
            .unwrap_or(DateTime::<Utc>::MIN_UTC);
        let records_deleted = self.store.purge_expired(cutoff).await?;

        info!(records_deleted, %cutoff, "Revocation sweep completed");
        Ok(SweepResult {
            records_deleted,
            cutoff,
        })
    }

    /// Start the sweeper as a background task
    ///
    /// Returns `None` when the sweeper is disabled.
    pub fn start_background_task(self: Arc<Self>) -> Option<JoinHandle<()>> {
        if !self.config.enabled {
            warn!("Revocation sweeper is disabled");
            return None;
        }

        let interval = StdDuration::from_secs(self.config.interval_seconds.max(1));

        Some(tokio::spawn(async move {
            info!(
                interval_seconds = self.config.interval_seconds,
                grace_period_seconds = self.config.grace_period_seconds,
                "Revocation sweeper started"
            );

            let mut interval_timer = tokio::time::interval(interval);

            loop {
                interval_timer.tick().await;

                if let Err(e) = self.run_sweep().await {
                    error!("Revocation sweep failed: {}", e);
                }
            }
        }))
    }
}

/// Result of a sweep
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SweepResult {
    /// Number of revocation records deleted
    pub records_deleted: usize,
    /// Records for tokens that expired before this instant were eligible
    pub cutoff: DateTime<Utc>,
}
