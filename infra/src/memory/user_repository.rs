//! In-memory implementation of the UserRepository trait.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use inno_core::domain::entities::user::User;
use inno_core::errors::DomainError;
use inno_core::repositories::UserRepository;

/// Users keyed by email
#[derive(Clone, Default)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<String, User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a repository pre-populated with `users`
    pub fn with_users(users: impl IntoIterator<Item = User>) -> Self {
        let map = users
            .into_iter()
            .map(|user| (user.email.clone(), user))
            .collect();
        Self {
            users: Arc::new(RwLock::new(map)),
        }
    }

    /// Insert a user, replacing any previous user with the same email
    pub async fn insert(&self, user: User) {
        self.users.write().await.insert(user.email.clone(), user);
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        Ok(self.users.read().await.get(email).cloned())
    }
}
