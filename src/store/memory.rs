use async_trait::async_trait;
use dashmap::DashMap;

use super::{CredentialStore, StoreError};
use crate::models::User;

/// In-process credential store keyed by username
///
/// Useful for tests, demos and deployments that load a fixed user list at
/// startup.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    users: DashMap<String, User>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_users(users: impl IntoIterator<Item = User>) -> Self {
        let store = Self::new();
        for user in users {
            store.insert(user);
        }
        store
    }

    /// Insert or replace the user with the same username
    pub fn insert(&self, user: User) -> Option<User> {
        self.users.insert(user.username.clone(), user)
    }

    pub fn remove(&self, username: &str) -> Option<User> {
        self.users.remove(username).map(|(_, user)| user)
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        Ok(self.users.get(username).map(|entry| entry.value().clone()))
    }
}
