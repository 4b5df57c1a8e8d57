//! Seeding the user store from a TOML file.
//!
//! ```toml
//! [[users]]
//! email = "admin@example.com"
//! password = "change-me"
//! is_staff = true
//! ```

use anyhow::{Context, Result, bail};
use firegate_core::{NewUser, UserStore, password};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Default, Deserialize)]
pub struct UsersFile {
    #[serde(default)]
    pub users: Vec<UserEntry>,
}

#[derive(Debug, Deserialize)]
pub struct UserEntry {
    pub email: Option<String>,
    /// Defaults to the email.
    pub username: Option<String>,
    /// Plain-text password, hashed on load.
    pub password: Option<String>,
    /// Pre-computed argon2 PHC string.
    pub password_hash: Option<String>,
    #[serde(default)]
    pub is_staff: bool,
    pub firebase_uid: Option<String>,
}

impl UserEntry {
    fn into_new_user(self) -> Result<NewUser> {
        let Some(username) = self.username.or_else(|| self.email.clone()) else {
            bail!("user entry needs a username or an email");
        };

        let hash = match (self.password, self.password_hash) {
            (Some(_), Some(_)) => bail!("user '{username}' sets both password and password_hash"),
            (Some(plain), None) => Some(password::hash_password(&plain)?),
            (None, hash) => hash,
        };

        let mut user = NewUser::new(username).email_opt(self.email).staff(self.is_staff);
        if let Some(hash) = hash {
            user = user.password_hash(hash);
        }
        if let Some(uid) = self.firebase_uid {
            user = user.firebase_uid(uid);
        }
        Ok(user)
    }
}

impl UsersFile {
    pub fn from_toml(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read users file {}", path.display()))?;
        Self::from_toml(&raw).with_context(|| format!("invalid users file {}", path.display()))
    }

    /// Create every listed user; returns how many were created.
    pub async fn seed(self, store: &dyn UserStore) -> Result<usize> {
        let mut created = 0;
        for entry in self.users {
            let user = store.create(entry.into_new_user()?).await?;
            tracing::info!(user.id = %user.id, username = %user.username, staff = user.is_staff, "seeded user");
            created += 1;
        }
        Ok(created)
    }
}
