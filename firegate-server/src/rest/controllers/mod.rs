pub mod admin;
pub mod auth;

pub use admin::AdminController;
pub use auth::AuthController;
