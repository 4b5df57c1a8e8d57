//! # firegate-core
//!
//! Shared building blocks for firegate:
//!
//! - [`User`] / [`NewUser`] - local user accounts
//! - [`UserStore`] - user storage trait, with [`InMemoryUserStore`]
//! - [`password`] - argon2 password hashing
//! - [`FiregateError`] - the workspace-wide error type

pub mod error;
pub mod password;
pub mod store;
pub mod user;

pub use error::{FiregateError, Result};
pub use store::{InMemoryUserStore, UserStore};
pub use user::{NewUser, User};
