//! # firegate-auth
//!
//! Firebase login for firegate.
//!
//! ## Overview
//!
//! - [`firebase`] - ID token validation against Google's signing keys
//! - [`FirebaseAccountVerifier`] - reads the token header and applies the email policy
//! - [`AuthError`] - the closed set of login failures and their response bodies
//! - [`UserGetter`] - maps verified claims to local users
//! - [`FirebaseAuthConfig`] - settings
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use firegate_auth::{FirebaseAccountVerifier, FirebaseAuthConfig, UserGetterKind};
//! use firegate_auth::firebase::FirebaseApp;
//!
//! let config = FirebaseAuthConfig { project_id: Some("my-project".into()), ..Default::default() };
//! let app = FirebaseApp::initialize(&config)?;
//! let verifier = FirebaseAccountVerifier::from_config(&config, app.map(|a| a.verifier()))?;
//!
//! let claims = verifier.verify(request.headers()).await?;
//! let getter = UserGetterKind::Email.build(user_store, config.create_user_if_not_exists);
//! let user = getter.get_or_create_user(&claims).await?;
//! ```

pub mod firebase;

mod account;
mod config;
mod error;
mod user_getter;

pub use account::FirebaseAccountVerifier;
pub use config::{
    DEFAULT_ADMIN_LOGIN_REDIRECT_URL, DEFAULT_AUTH_BACKEND, DEFAULT_JWT_HEADER_NAME,
    FirebaseAuthConfig,
};
pub use error::{AuthError, ErrorBody};
pub use user_getter::{EmailUserGetter, UidUserGetter, UserGetter, UserGetterKind, UserLookupError};
