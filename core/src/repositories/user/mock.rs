//! Mock implementation of UserRepository for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::user::User;
use crate::errors::DomainError;

use super::r#trait::UserRepository;

/// Mock user repository for testing
pub struct MockUserRepository {
    users: Arc<RwLock<HashMap<String, User>>>,
    failing: AtomicBool,
}

impl MockUserRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
            failing: AtomicBool::new(false),
        }
    }

    /// Insert or replace a user
    pub async fn add_user(&self, user: User) {
        self.users.write().await.insert(user.email.clone(), user);
    }

    pub async fn remove_user(&self, email: &str) {
        self.users.write().await.remove(email);
    }

    /// Make subsequent lookups fail with `StoreUnavailable`
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }
}

impl Default for MockUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(DomainError::store_unavailable("mock user store failure"));
        }
        Ok(self.users.read().await.get(email).cloned())
    }
}
