//! # firegate-cli
//!
//! Command-line launcher for the firegate login server.
//!
//! - `firegate serve` - run the HTTP server
//! - `firegate hash-password` - print an argon2 hash for a users file
//!
//! Settings come from `firegate.toml`, then `FIREBASE_AUTH_*` environment
//! variables (a `.env` file is loaded first), then command-line flags.

pub mod cli;
pub mod config;
pub mod serve;
pub mod users;

pub use config::AppConfig;
pub use serve::{build_server_config, run_serve};
pub use users::UsersFile;
