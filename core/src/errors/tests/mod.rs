//! Unit tests for domain error types

use crate::domain::entities::token::TokenKind;
use crate::errors::{AuthError, DomainError, HeaderError, TokenError};

#[test]
fn test_token_error_converts_into_domain_error() {
    let error: DomainError = TokenError::Revoked.into();
    assert_eq!(error, DomainError::Token(TokenError::Revoked));
    assert_eq!(error.to_string(), "Token revoked");
}

#[test]
fn test_wrong_kind_message_names_both_kinds() {
    let error = TokenError::WrongKind {
        expected: TokenKind::Access,
        actual: TokenKind::Refresh,
    };
    assert_eq!(error.to_string(), "Wrong token kind: expected access, got refresh");
}

#[test]
fn test_expected_token_outcomes() {
    assert!(TokenError::Expired.is_expected());
    assert!(TokenError::Revoked.is_expected());
    assert!(TokenError::WrongKind {
        expected: TokenKind::Refresh,
        actual: TokenKind::Access,
    }
    .is_expected());
    assert!(!TokenError::Malformed.is_expected());
    assert!(!TokenError::BadSignature.is_expected());
}

#[test]
fn test_authentication_failure_classification() {
    assert!(DomainError::from(TokenError::Expired).is_authentication_failure());
    assert!(DomainError::from(TokenError::BadSignature).is_authentication_failure());
    assert!(DomainError::from(HeaderError::EmptyToken).is_authentication_failure());
    assert!(DomainError::from(AuthError::Unauthenticated).is_authentication_failure());

    assert!(!DomainError::from(TokenError::AlreadyRevoked).is_authentication_failure());
    assert!(!DomainError::from(AuthError::InvalidCredentials).is_authentication_failure());
    assert!(!DomainError::store_unavailable("timeout").is_authentication_failure());
}
