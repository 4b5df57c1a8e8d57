use crate::password;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A local user account.
///
/// Users are created either by the staff tooling (with a password) or on
/// first Firebase login (without one).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: Option<String>,
    /// Firebase UID (`sub` claim) this account is linked to.
    pub firebase_uid: Option<String>,
    pub is_staff: bool,
    pub is_active: bool,
    #[serde(skip_serializing)]
    pub password_hash: Option<String>,
    pub date_joined: DateTime<Utc>,
}

impl User {
    /// Check a plaintext password. Users without a stored hash never match.
    pub fn check_password(&self, password: &str) -> bool {
        self.password_hash.as_deref().is_some_and(|hash| password::verify_password(hash, password))
    }

    pub fn has_usable_password(&self) -> bool {
        self.password_hash.is_some()
    }
}

/// Fields for creating a [`User`].
#[derive(Debug, Clone, Default)]
pub struct NewUser {
    pub username: String,
    pub email: Option<String>,
    pub firebase_uid: Option<String>,
    pub is_staff: bool,
    pub password_hash: Option<String>,
}

impl NewUser {
    pub fn new(username: impl Into<String>) -> Self {
        Self { username: username.into(), ..Default::default() }
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn email_opt(mut self, email: Option<String>) -> Self {
        self.email = email;
        self
    }

    pub fn firebase_uid(mut self, uid: impl Into<String>) -> Self {
        self.firebase_uid = Some(uid.into());
        self
    }

    pub fn staff(mut self, is_staff: bool) -> Self {
        self.is_staff = is_staff;
        self
    }

    pub fn password_hash(mut self, hash: impl Into<String>) -> Self {
        self.password_hash = Some(hash.into());
        self
    }

    pub(crate) fn into_user(self) -> User {
        User {
            id: Uuid::new_v4(),
            username: self.username,
            email: self.email,
            firebase_uid: self.firebase_uid,
            is_staff: self.is_staff,
            is_active: true,
            password_hash: self.password_hash,
            date_joined: Utc::now(),
        }
    }
}
