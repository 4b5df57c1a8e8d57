//! # firegate-server
//!
//! HTTP endpoints for Firebase token login and the staff login form.
//!
//! ```rust,ignore
//! let config = ServerConfig::new(firebase, validator, users, sessions)?;
//! let app = firegate_server::create_app(config)?;
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod cookie;
pub mod login;
pub mod rest;
pub mod templates;
pub mod urls;

pub use config::{CookieConfig, SecurityConfig, ServerConfig};
pub use rest::{AdminController, AuthController, create_app};
