//! Authentication response value objects for API responses.

use serde::{Deserialize, Serialize};

use crate::domain::entities::token::{TokenPair, BEARER_TOKEN_TYPE};

/// Authentication response containing the issued token pair
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthResponse {
    /// JWT access token for API authentication
    pub access_token: String,

    /// JWT refresh token for obtaining new access tokens
    pub refresh_token: String,

    /// Always "Bearer"
    pub token_type: String,

    /// Access token lifetime in seconds
    pub expires_in_seconds: i64,
}

impl From<TokenPair> for AuthResponse {
    fn from(pair: TokenPair) -> Self {
        Self {
            access_token: pair.access_token,
            refresh_token: pair.refresh_token,
            token_type: BEARER_TOKEN_TYPE.to_string(),
            expires_in_seconds: pair.expires_in_seconds,
        }
    }
}

/// What a logout actually revoked
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct LogoutOutcome {
    pub access_token_revoked: bool,
    pub refresh_token_revoked: bool,
}
