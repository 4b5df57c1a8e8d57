//! Mapping verified Firebase identities to local users.

use crate::firebase::FirebaseClaims;
use async_trait::async_trait;
use firegate_core::{FiregateError, NewUser, User, UserStore};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Why no local user could be produced for a verified identity.
#[derive(Debug, thiserror::Error)]
pub enum UserLookupError {
    /// No matching user and creation is disabled.
    #[error("user not found")]
    NotFound,

    #[error(transparent)]
    Store(#[from] FiregateError),
}

/// Resolves verified claims to a local user, optionally creating one.
#[async_trait]
pub trait UserGetter: Send + Sync {
    async fn get_or_create_user(&self, claims: &FirebaseClaims) -> Result<User, UserLookupError>;
}

/// Matches users on the `email` claim.
///
/// New users get the email as username and are linked to the Firebase UID.
pub struct EmailUserGetter {
    store: Arc<dyn UserStore>,
    create_if_not_exists: bool,
}

impl EmailUserGetter {
    pub fn new(store: Arc<dyn UserStore>, create_if_not_exists: bool) -> Self {
        Self { store, create_if_not_exists }
    }
}

#[async_trait]
impl UserGetter for EmailUserGetter {
    async fn get_or_create_user(&self, claims: &FirebaseClaims) -> Result<User, UserLookupError> {
        let Some(email) = claims.email.as_deref() else {
            tracing::debug!(uid = %claims.uid(), "token carries no email claim");
            return Err(UserLookupError::NotFound);
        };

        if let Some(user) = self.store.find_by_email(email).await? {
            return Ok(user);
        }
        if !self.create_if_not_exists {
            return Err(UserLookupError::NotFound);
        }

        let new_user = NewUser::new(email).email(email).firebase_uid(claims.uid());
        match self.store.create(new_user).await {
            Ok(user) => {
                tracing::info!(user.id = %user.id, uid = %claims.uid(), "created user from firebase login");
                Ok(user)
            }
            // Lost a race with a concurrent first login.
            Err(FiregateError::Conflict(_)) => {
                self.store.find_by_email(email).await?.ok_or(UserLookupError::NotFound)
            }
            Err(e) => Err(e.into()),
        }
    }
}

/// Matches users on the Firebase UID (`sub`).
///
/// Suits providers that do not always supply an email, such as phone sign-in.
pub struct UidUserGetter {
    store: Arc<dyn UserStore>,
    create_if_not_exists: bool,
}

impl UidUserGetter {
    pub fn new(store: Arc<dyn UserStore>, create_if_not_exists: bool) -> Self {
        Self { store, create_if_not_exists }
    }
}

#[async_trait]
impl UserGetter for UidUserGetter {
    async fn get_or_create_user(&self, claims: &FirebaseClaims) -> Result<User, UserLookupError> {
        let uid = claims.uid();
        if let Some(user) = self.store.find_by_firebase_uid(uid).await? {
            return Ok(user);
        }
        if !self.create_if_not_exists {
            return Err(UserLookupError::NotFound);
        }

        let new_user = NewUser::new(uid).email_opt(claims.email.clone()).firebase_uid(uid);
        match self.store.create(new_user).await {
            Ok(user) => {
                tracing::info!(user.id = %user.id, uid = %uid, "created user from firebase login");
                Ok(user)
            }
            Err(FiregateError::Conflict(_)) => {
                self.store.find_by_firebase_uid(uid).await?.ok_or(UserLookupError::NotFound)
            }
            Err(e) => Err(e.into()),
        }
    }
}

/// Built-in resolution strategies, selectable by name from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UserGetterKind {
    #[default]
    Email,
    Uid,
}

impl UserGetterKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            UserGetterKind::Email => "email",
            UserGetterKind::Uid => "uid",
        }
    }

    pub fn build(self, store: Arc<dyn UserStore>, create_if_not_exists: bool) -> Arc<dyn UserGetter> {
        match self {
            UserGetterKind::Email => Arc::new(EmailUserGetter::new(store, create_if_not_exists)),
            UserGetterKind::Uid => Arc::new(UidUserGetter::new(store, create_if_not_exists)),
        }
    }
}

impl FromStr for UserGetterKind {
    type Err = FiregateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "email" => Ok(UserGetterKind::Email),
            "uid" => Ok(UserGetterKind::Uid),
            other => Err(FiregateError::Config(format!(
                "unknown user_getter '{other}' (expected 'email' or 'uid')"
            ))),
        }
    }
}

impl fmt::Display for UserGetterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
