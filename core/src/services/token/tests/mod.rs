
use std::sync::Arc;

use crate::domain::value_objects::SigningKey;
use crate::repositories::MockRevocationStore;
use crate::services::token::{TokenService, TokenServiceConfig, TokenSigner};

pub(super) const TEST_SECRET: &str = "test-secret-key-with-at-least-32-bytes!";

pub(super) fn signer() -> TokenSigner {
    TokenSigner::new(&SigningKey::from_secret(TEST_SECRET).unwrap())
}

pub(super) fn service_with(
    store: Arc<MockRevocationStore>,
    config: TokenServiceConfig,
) -> TokenService<MockRevocationStore> {
    TokenService::new(store, signer(), config)
}

pub(super) fn service() -> (TokenService<MockRevocationStore>, Arc<MockRevocationStore>) {
    let store = Arc::new(MockRevocationStore::new());
    (service_with(store.clone(), TokenServiceConfig::default()), store)
}
