//! Authentication failures reported to clients.

use crate::firebase::TokenError;
use serde::{Deserialize, Serialize};

/// A failed token login.
///
/// Each variant has a stable machine-readable [`code`](AuthError::code) and a
/// human-readable [`description`](AuthError::description); both are sent
/// verbatim in the 401 response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("Something went wrong")]
    Other,

    #[error("Missing Firebase authentication header")]
    NoAuthHeader,

    #[error("Firebase authentication token is expired")]
    JwtExpired,

    #[error("Firebase authentication token is invalid")]
    JwtInvalid,

    #[error("This user has not been registered")]
    UserNotRegistered,

    #[error("User email has not been verified")]
    EmailNotVerified,
}

impl AuthError {
    pub const fn code(&self) -> &'static str {
        match self {
            AuthError::Other => "OTHER",
            AuthError::NoAuthHeader => "NO_AUTH_HEADER",
            AuthError::JwtExpired => "JWT_EXPIRED",
            AuthError::JwtInvalid => "JWT_INVALID",
            AuthError::UserNotRegistered => "USER_NOT_REGISTERED",
            AuthError::EmailNotVerified => "EMAIL_NOT_VERIFIED",
        }
    }

    pub const fn description(&self) -> &'static str {
        match self {
            AuthError::Other => "Something went wrong",
            AuthError::NoAuthHeader => "Missing Firebase authentication header",
            AuthError::JwtExpired => "Firebase authentication token is expired",
            AuthError::JwtInvalid => "Firebase authentication token is invalid",
            AuthError::UserNotRegistered => "This user has not been registered",
            AuthError::EmailNotVerified => "User email has not been verified",
        }
    }

    pub fn response_body(&self) -> ErrorBody {
        ErrorBody { error: self.code().to_string(), description: self.description().to_string() }
    }
}

impl From<TokenError> for AuthError {
    fn from(err: TokenError) -> Self {
        if err.is_expired() { AuthError::JwtExpired } else { AuthError::JwtInvalid }
    }
}

/// JSON body of a failed login: `{"error": ..., "description": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    pub description: String,
}
