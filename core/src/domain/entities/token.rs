//! Token entities for JWT-based authentication.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

/// JWT issuer
pub const JWT_ISSUER: &str = "innosistemas";

/// Token type sent to clients alongside the token pair
pub const BEARER_TOKEN_TYPE: &str = "Bearer";

/// Distinguishes short-lived access tokens from long-lived refresh tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

impl TokenKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Access => "access",
            TokenKind::Refresh => "refresh",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TokenKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "access" => Ok(TokenKind::Access),
            "refresh" => Ok(TokenKind::Refresh),
            other => Err(format!("Unknown token kind: {}", other)),
        }
    }
}

/// Claims structure for JWT payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user email)
    pub sub: String,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,

    /// Issuer
    pub iss: String,

    /// JWT ID (unique identifier for the token)
    pub jti: String,

    /// Access or refresh
    #[serde(rename = "type")]
    pub kind: TokenKind,

    /// Role of the subject at issuance time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl Claims {
    /// Creates claims valid from `issued_at` for `ttl_seconds`
    pub fn new(
        subject: impl Into<String>,
        kind: TokenKind,
        role: Option<String>,
        issued_at: DateTime<Utc>,
        ttl_seconds: i64,
    ) -> Self {
        Self {
            sub: subject.into(),
            iat: issued_at.timestamp(),
            exp: issued_at.timestamp() + ttl_seconds,
            iss: JWT_ISSUER.to_string(),
            jti: Uuid::new_v4().to_string(),
            kind,
            role,
        }
    }

    /// Checks if the claims have expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() > self.exp
    }

    /// Expiration as a timestamp
    pub fn expires_at(&self) -> DateTime<Utc> {
        Utc.timestamp_opt(self.exp, 0)
            .single()
            .unwrap_or(DateTime::<Utc>::MIN_UTC)
    }

    /// The validated identity carried by these claims
    pub fn principal(&self) -> Principal {
        Principal {
            subject: self.sub.clone(),
            role: self.role.clone(),
        }
    }
}

/// Identity established by a successfully validated token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub subject: String,
    pub role: Option<String>,
}

/// Durable record of a revoked token
///
/// Created once per token and never mutated; only the expiry sweep removes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevokedToken {
    /// Unique identifier for the record
    pub id: Uuid,

    /// Hex SHA-256 of the exact token string
    pub token_hash: String,

    /// Subject the token was issued to
    pub subject: String,

    /// The token's own expiry
    pub expires_at: DateTime<Utc>,

    /// When the revocation was recorded
    pub revoked_at: DateTime<Utc>,

    pub kind: TokenKind,
}

impl RevokedToken {
    /// Builds the revocation record for a raw token and its decoded claims
    pub fn from_claims(token: &str, claims: &Claims) -> Self {
        Self {
            id: Uuid::new_v4(),
            token_hash: hash_token(token),
            subject: claims.sub.clone(),
            expires_at: claims.expires_at(),
            revoked_at: Utc::now(),
            kind: claims.kind,
        }
    }
}

/// Token pair returned to the client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// JWT access token
    pub access_token: String,

    /// JWT refresh token
    pub refresh_token: String,

    /// Access token expiry time in seconds
    pub expires_in_seconds: i64,
}

/// Hashes a raw token string into the key used by the revocation store
pub fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hex::encode(hasher.finalize())
}
