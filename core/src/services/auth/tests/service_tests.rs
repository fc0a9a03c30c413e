//! Unit tests for the authentication use cases

use super::mocks::{fixture, student, PASSWORD};
use crate::domain::entities::token::{hash_token, TokenKind};
use crate::errors::{AuthError, DomainError, TokenError};
use crate::services::auth::UNKNOWN_USER_HASH;

#[tokio::test]
async fn test_login_issues_valid_pair() {
    let fx = fixture().await;

    let response = fx.service.login("ana@uni.edu", PASSWORD).await.unwrap();

    assert_eq!(response.token_type, "Bearer");
    assert_eq!(response.expires_in_seconds, 900);
    let principal = fx
        .tokens
        .validate(&response.access_token, TokenKind::Access)
        .await
        .unwrap();
    assert_eq!(principal.subject, "ana@uni.edu");
    assert_eq!(principal.role.as_deref(), Some("STUDENT"));
    assert!(fx
        .tokens
        .validate(&response.refresh_token, TokenKind::Refresh)
        .await
        .is_ok());
}

#[tokio::test]
async fn test_wrong_password_and_unknown_email_are_indistinguishable() {
    let fx = fixture().await;

    let wrong_password = fx.service.login("ana@uni.edu", "nope").await;
    let unknown_email = fx.service.login("nobody@uni.edu", PASSWORD).await;

    assert_eq!(wrong_password, Err(DomainError::Auth(AuthError::InvalidCredentials)));
    assert_eq!(wrong_password, unknown_email);
}

#[tokio::test]
async fn test_unknown_email_still_verifies_a_password() {
    let fx = fixture().await;

    let _ = fx.service.login("nobody@uni.edu", PASSWORD).await;
    assert_eq!(fx.verifier.calls(), 1);

    let _ = fx.service.login("ana@uni.edu", "nope").await;
    assert_eq!(fx.verifier.calls(), 2);
}

#[tokio::test]
async fn test_unknown_email_never_matches_placeholder_hash() {
    let fx = fixture().await;

    // The plain verifier would accept the placeholder hash as a password
    assert_eq!(
        fx.service.login("nobody@uni.edu", UNKNOWN_USER_HASH).await,
        Err(DomainError::Auth(AuthError::InvalidCredentials))
    );
}

#[tokio::test]
async fn test_disabled_account_is_checked_after_password() {
    let fx = fixture().await;
    let mut user = student();
    user.disable();
    fx.users.add_user(user).await;

    assert_eq!(
        fx.service.login("ana@uni.edu", PASSWORD).await,
        Err(DomainError::Auth(AuthError::AccountDisabled))
    );
    assert_eq!(
        fx.service.login("ana@uni.edu", "nope").await,
        Err(DomainError::Auth(AuthError::InvalidCredentials))
    );
}

#[tokio::test]
async fn test_login_store_failure_is_unavailable() {
    let fx = fixture().await;
    fx.users.set_failing(true);

    assert!(matches!(
        fx.service.login("ana@uni.edu", PASSWORD).await,
        Err(DomainError::StoreUnavailable { .. })
    ));
}

#[tokio::test]
async fn test_logout_without_refresh_token() {
    let fx = fixture().await;
    let session = fx.service.login("ana@uni.edu", PASSWORD).await.unwrap();

    let outcome = fx.service.logout(&session.access_token, None).await.unwrap();

    assert!(outcome.access_token_revoked);
    assert!(!outcome.refresh_token_revoked);
    assert_eq!(
        fx.tokens.validate(&session.access_token, TokenKind::Access).await,
        Err(DomainError::Token(TokenError::Revoked))
    );
    assert!(fx
        .tokens
        .validate(&session.refresh_token, TokenKind::Refresh)
        .await
        .is_ok());
}

#[tokio::test]
async fn test_logout_with_refresh_token_revokes_both() {
    let fx = fixture().await;
    let session = fx.service.login("ana@uni.edu", PASSWORD).await.unwrap();

    let outcome = fx
        .service
        .logout(&session.access_token, Some(&session.refresh_token))
        .await
        .unwrap();

    assert!(outcome.access_token_revoked);
    assert!(outcome.refresh_token_revoked);
    assert_eq!(fx.store.len().await, 2);
    assert_eq!(
        fx.service.refresh(&session.refresh_token).await,
        Err(DomainError::Token(TokenError::Revoked))
    );
}

#[tokio::test]
async fn test_logout_ignores_foreign_refresh_token() {
    let fx = fixture().await;
    let session = fx.service.login("ana@uni.edu", PASSWORD).await.unwrap();
    let foreign = fx.tokens.issue_refresh("mallory@uni.edu", None).unwrap();

    let outcome = fx
        .service
        .logout(&session.access_token, Some(&foreign))
        .await
        .unwrap();

    assert!(outcome.access_token_revoked);
    assert!(!outcome.refresh_token_revoked);
    assert!(fx.store.get(&hash_token(&foreign)).await.is_none());
}

#[tokio::test]
async fn test_logout_with_access_token_as_refresh_keeps_access_revocation() {
    let fx = fixture().await;
    let session = fx.service.login("ana@uni.edu", PASSWORD).await.unwrap();
    let other_access = fx.tokens.issue_access("ana@uni.edu", None).unwrap();

    let outcome = fx
        .service
        .logout(&session.access_token, Some(&other_access))
        .await
        .unwrap();

    assert!(outcome.access_token_revoked);
    assert!(!outcome.refresh_token_revoked);
    assert!(fx
        .store
        .get(&hash_token(&session.access_token))
        .await
        .is_some());
}

#[tokio::test]
async fn test_logout_twice_is_already_revoked() {
    let fx = fixture().await;
    let session = fx.service.login("ana@uni.edu", PASSWORD).await.unwrap();

    fx.service.logout(&session.access_token, None).await.unwrap();

    assert_eq!(
        fx.service.logout(&session.access_token, None).await,
        Err(DomainError::Token(TokenError::AlreadyRevoked))
    );
}

#[tokio::test]
async fn test_refresh_rotates_refresh_token() {
    let fx = fixture().await;
    let session = fx.service.login("ana@uni.edu", PASSWORD).await.unwrap();

    let rotated = fx.service.refresh(&session.refresh_token).await.unwrap();

    assert_ne!(rotated.refresh_token, session.refresh_token);
    assert_ne!(rotated.access_token, session.access_token);
    assert_eq!(
        fx.tokens.validate(&session.refresh_token, TokenKind::Refresh).await,
        Err(DomainError::Token(TokenError::Revoked))
    );
    assert!(fx
        .tokens
        .validate(&rotated.refresh_token, TokenKind::Refresh)
        .await
        .is_ok());
    // Access tokens issued earlier stay valid until they expire.
    assert!(fx
        .tokens
        .validate(&session.access_token, TokenKind::Access)
        .await
        .is_ok());
}

#[tokio::test]
async fn test_refresh_rejects_access_token() {
    let fx = fixture().await;
    let session = fx.service.login("ana@uni.edu", PASSWORD).await.unwrap();

    assert!(matches!(
        fx.service.refresh(&session.access_token).await,
        Err(DomainError::Token(TokenError::WrongKind { .. }))
    ));
}

#[tokio::test]
async fn test_refresh_picks_up_role_changes() {
    let fx = fixture().await;
    let session = fx.service.login("ana@uni.edu", PASSWORD).await.unwrap();
    let mut promoted = student();
    promoted.role = "PROFESSOR".to_string();
    fx.users.add_user(promoted).await;

    let rotated = fx.service.refresh(&session.refresh_token).await.unwrap();

    let principal = fx
        .tokens
        .validate(&rotated.access_token, TokenKind::Access)
        .await
        .unwrap();
    assert_eq!(principal.role.as_deref(), Some("PROFESSOR"));
}

#[tokio::test]
async fn test_refresh_for_removed_or_disabled_user() {
    let fx = fixture().await;
    let first = fx.service.login("ana@uni.edu", PASSWORD).await.unwrap();
    let second = fx.service.login("ana@uni.edu", PASSWORD).await.unwrap();

    let mut user = student();
    user.disable();
    fx.users.add_user(user).await;
    assert_eq!(
        fx.service.refresh(&first.refresh_token).await,
        Err(DomainError::Auth(AuthError::AccountDisabled))
    );

    fx.users.remove_user("ana@uni.edu").await;
    assert_eq!(
        fx.service.refresh(&second.refresh_token).await,
        Err(DomainError::Auth(AuthError::InvalidCredentials))
    );
}

#[tokio::test]
async fn test_profile() {
    let fx = fixture().await;

    let profile = fx.service.profile("ana@uni.edu").await.unwrap();
    assert_eq!(profile.name, "Ana Gómez");
    assert_eq!(profile.role, "STUDENT");

    assert_eq!(
        fx.service.profile("ghost@uni.edu").await,
        Err(DomainError::Auth(AuthError::Unauthenticated))
    );
}
