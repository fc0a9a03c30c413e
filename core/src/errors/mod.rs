//! Domain-specific error types and error handling.

mod types;

#[cfg(test)]
mod tests;

pub use types::{AuthError, HeaderError, TokenError};

use thiserror::Error;

/// Core domain errors (general purpose)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    /// A backing store (revocations, users) failed or timed out
    #[error("Store unavailable: {message}")]
    StoreUnavailable { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    Header(#[from] HeaderError),
}

impl DomainError {
    /// Shorthand for a store failure
    pub fn store_unavailable(message: impl Into<String>) -> Self {
        DomainError::StoreUnavailable {
            message: message.into(),
        }
    }

    /// True when the failure only means "this request carries no valid session"
    pub fn is_authentication_failure(&self) -> bool {
        match self {
            DomainError::Auth(AuthError::Unauthenticated) | DomainError::Header(_) => true,
            DomainError::Token(TokenError::AlreadyRevoked | TokenError::SigningFailed) => false,
            DomainError::Token(_) => true,
            _ => false,
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
