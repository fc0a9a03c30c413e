//! Shared wiring for the API integration tests

#![allow(dead_code)]

use std::sync::Arc;

use actix_web::{http::header::AUTHORIZATION, test, web};
use async_trait::async_trait;
use serde_json::{json, Value};

use inno_api::routes::auth::AppState;
use inno_core::domain::entities::token::RevokedToken;
use inno_core::domain::entities::user::User;
use inno_core::domain::value_objects::SigningKey;
use inno_core::errors::DomainError;
use inno_core::repositories::RevocationStore;
use inno_core::services::{
    AuthService, BcryptPasswordVerifier, TokenService, TokenServiceConfig, TokenSigner,
};
use inno_infra::memory::{InMemoryRevocationStore, InMemoryUserRepository};

pub const SECRET: &str = "integration-test-secret-0123456789abcdef";
pub const PASSWORD: &str = "correct horse battery";
pub const STUDENT_EMAIL: &str = "ana@uni.edu";
pub const DISABLED_EMAIL: &str = "luis@uni.edu";

pub type State<R> = web::Data<AppState<InMemoryUserRepository, BcryptPasswordVerifier, R>>;

pub fn signer() -> TokenSigner {
    let key = SigningKey::from_secret(SECRET).unwrap();
    TokenSigner::new(&key)
}

/// A user whose password is [`PASSWORD`], hashed at the lowest bcrypt cost
pub fn user(name: &str, email: &str, role: &str) -> User {
    let hash = bcrypt::hash(PASSWORD, 4).unwrap();
    User::new(name, email, hash, role)
}

/// One enabled student and one disabled account
pub fn users() -> Arc<InMemoryUserRepository> {
    let mut disabled = user("Luis Pardo", DISABLED_EMAIL, "STUDENT");
    disabled.disable();
    Arc::new(InMemoryUserRepository::with_users([
        user("Ana Torres", STUDENT_EMAIL, "STUDENT"),
        disabled,
    ]))
}

pub fn state_with<R>(store: Arc<R>, config: TokenServiceConfig) -> State<R>
where
    R: RevocationStore + 'static,
{
    let tokens = Arc::new(TokenService::new(store, signer(), config));
    let auth = Arc::new(AuthService::new(
        users(),
        Arc::new(BcryptPasswordVerifier),
        tokens,
    ));
    web::Data::new(AppState::new(auth))
}

/// State over the in-memory store, returned alongside the store itself
pub fn memory_state() -> (State<InMemoryRevocationStore>, Arc<InMemoryRevocationStore>) {
    let store = Arc::new(InMemoryRevocationStore::new());
    (
        state_with(store.clone(), TokenServiceConfig::default()),
        store,
    )
}

pub fn bearer(token: &str) -> (actix_web::http::header::HeaderName, String) {
    (AUTHORIZATION, format!("Bearer {}", token))
}

pub fn login_request(email: &str, password: &str) -> test::TestRequest {
    test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .set_json(json!({ "email": email, "password": password }))
}

/// Pulls `(accessToken, refreshToken)` out of a login or refresh body
pub fn token_pair(body: &Value) -> (String, String) {
    (
        body["accessToken"].as_str().unwrap().to_string(),
        body["refreshToken"].as_str().unwrap().to_string(),
    )
}

/// A revocation store whose backend is always down
#[derive(Default)]
pub struct UnavailableStore;

#[async_trait]
impl RevocationStore for UnavailableStore {
    async fn exists(&self, _token_hash: &str) -> Result<bool, DomainError> {
        Err(DomainError::store_unavailable("connection refused"))
    }

    async fn record(&self, _record: RevokedToken) -> Result<(), DomainError> {
        Err(DomainError::store_unavailable("connection refused"))
    }
}
