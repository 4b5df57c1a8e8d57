use crate::{FiregateError, NewUser, Result, User};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Storage for local user accounts.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn get(&self, id: Uuid) -> Result<Option<User>>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;
    async fn find_by_firebase_uid(&self, uid: &str) -> Result<Option<User>>;
    async fn create(&self, user: NewUser) -> Result<User>;
}

/// Process-local user store.
///
/// Usernames, emails and Firebase UIDs are unique.
pub struct InMemoryUserStore {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self { users: Arc::new(RwLock::new(HashMap::new())) }
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

impl Default for InMemoryUserStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn get(&self, id: Uuid) -> Result<Option<User>> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email.as_deref() == Some(email)).cloned())
    }

    async fn find_by_firebase_uid(&self, uid: &str) -> Result<Option<User>> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.firebase_uid.as_deref() == Some(uid)).cloned())
    }

    async fn create(&self, new_user: NewUser) -> Result<User> {
        let mut users = self.users.write().await;

        for existing in users.values() {
            if existing.username == new_user.username {
                return Err(FiregateError::Conflict(format!(
                    "username '{}' already exists",
                    new_user.username
                )));
            }
            if new_user.email.is_some() && existing.email == new_user.email {
                return Err(FiregateError::Conflict("email already registered".into()));
            }
            if new_user.firebase_uid.is_some() && existing.firebase_uid == new_user.firebase_uid {
                return Err(FiregateError::Conflict("firebase uid already linked".into()));
            }
        }

        let user = new_user.into_user();
        tracing::debug!(user.id = %user.id, username = %user.username, "user created");
        users.insert(user.id, user.clone());
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_and_find() {
        let store = InMemoryUserStore::new();
        let user = store
            .create(NewUser::new("alice").email("alice@example.com").firebase_uid("uid-1"))
            .await
            .unwrap();

        assert_eq!(store.get(user.id).await.unwrap(), Some(user.clone()));
        assert_eq!(store.find_by_email("alice@example.com").await.unwrap(), Some(user.clone()));
        assert_eq!(store.find_by_firebase_uid("uid-1").await.unwrap(), Some(user));
        assert_eq!(store.find_by_email("bob@example.com").await.unwrap(), None);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let store = InMemoryUserStore::new();
        store.create(NewUser::new("alice").email("a@example.com")).await.unwrap();

        let err = store.create(NewUser::new("alice2").email("a@example.com")).await.unwrap_err();
        assert!(matches!(err, FiregateError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_duplicate_username_rejected() {
        let store = InMemoryUserStore::new();
        store.create(NewUser::new("alice")).await.unwrap();

        let err = store.create(NewUser::new("alice")).await.unwrap_err();
        assert!(matches!(err, FiregateError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_users_without_email_do_not_conflict() {
        let store = InMemoryUserStore::new();
        store.create(NewUser::new("one")).await.unwrap();
        store.create(NewUser::new("two")).await.unwrap();
        assert_eq!(store.len().await, 2);
    }
}
