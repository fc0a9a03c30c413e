//! Error kinds for authentication, token handling and bearer header parsing
//!
//! Each enum is a closed set of outcomes that callers match on explicitly.
//! Messages are internal: the presentation layer decides what reaches clients.

use thiserror::Error;

use crate::domain::entities::token::TokenKind;

/// Authentication use-case errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Unknown subject or wrong password; the two are deliberately indistinguishable
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Account disabled")]
    AccountDisabled,

    /// Any token or header failure, collapsed for the caller
    #[error("Invalid or expired session")]
    Unauthenticated,
}

/// Token validation, issuance and revocation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Malformed token")]
    Malformed,

    #[error("Token signature verification failed")]
    BadSignature,

    #[error("Token expired")]
    Expired,

    #[error("Token revoked")]
    Revoked,

    #[error("Wrong token kind: expected {expected}, got {actual}")]
    WrongKind {
        expected: TokenKind,
        actual: TokenKind,
    },

    #[error("Token already revoked")]
    AlreadyRevoked,

    #[error("Token signing failed")]
    SigningFailed,
}

impl TokenError {
    /// Outcomes that are part of normal operation (stale or logged-out sessions)
    /// as opposed to corrupted input or a key/clock mismatch
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            TokenError::Expired | TokenError::Revoked | TokenError::WrongKind { .. }
        )
    }
}

/// Authorization header parsing errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HeaderError {
    #[error("Authorization header is missing")]
    MissingHeader,

    #[error("Invalid authorization header format")]
    MalformedHeader,

    #[error("Bearer token is empty")]
    EmptyToken,
}
