//! Configuration for the token service

use std::time::Duration;

use inno_shared::config::JwtConfig;

/// Lifetimes and store bounds used by the token service
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    /// Access token lifetime in seconds
    pub access_token_ttl_seconds: i64,
    /// Refresh token lifetime in seconds
    pub refresh_token_ttl_seconds: i64,
    /// Upper bound for a single revocation store call
    pub store_timeout: Duration,
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        Self {
            access_token_ttl_seconds: 15 * 60,
            refresh_token_ttl_seconds: 7 * 24 * 60 * 60,
            store_timeout: Duration::from_secs(3),
        }
    }
}

impl From<&JwtConfig> for TokenServiceConfig {
    fn from(config: &JwtConfig) -> Self {
        Self {
            access_token_ttl_seconds: config.access_token_expiry,
            refresh_token_ttl_seconds: config.refresh_token_expiry,
            store_timeout: Duration::from_millis(config.store_timeout_ms),
        }
    }
}
