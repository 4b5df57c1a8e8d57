use crate::UserGetterKind;
use crate::firebase::MAX_CLOCK_SKEW_SECS;
use axum::http::HeaderName;
use firegate_core::{FiregateError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_JWT_HEADER_NAME: &str = "X-Firebase-Jwt";
pub const DEFAULT_ADMIN_LOGIN_REDIRECT_URL: &str = "admin:index";
pub const DEFAULT_AUTH_BACKEND: &str = "firegate.backends.FirebaseBackend";

/// Firebase login settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FirebaseAuthConfig {
    /// Path to the service-account JSON key.
    pub service_account_file: Option<PathBuf>,
    /// Overrides the project id from the service account.
    pub project_id: Option<String>,
    /// Web API key handed to the login page's Firebase JS SDK.
    pub web_api_key: Option<String>,
    pub auth_domain: Option<String>,
    /// Request header carrying the ID token.
    pub jwt_header_name: String,
    pub allow_not_confirmed_emails: bool,
    /// Show the Google sign-in button on the login page.
    pub enable_google_login: bool,
    /// Default post-login target: a route name or a path.
    pub admin_login_redirect_url: String,
    /// User resolution strategy (`email` or `uid`).
    pub user_getter: String,
    pub create_user_if_not_exists: bool,
    /// Backend label recorded on sessions.
    pub auth_backend: String,
    pub clock_skew_seconds: u64,
}

impl Default for FirebaseAuthConfig {
    fn default() -> Self {
        Self {
            service_account_file: None,
            project_id: None,
            web_api_key: None,
            auth_domain: None,
            jwt_header_name: DEFAULT_JWT_HEADER_NAME.to_string(),
            allow_not_confirmed_emails: false,
            enable_google_login: false,
            admin_login_redirect_url: DEFAULT_ADMIN_LOGIN_REDIRECT_URL.to_string(),
            user_getter: UserGetterKind::Email.as_str().to_string(),
            create_user_if_not_exists: false,
            auth_backend: DEFAULT_AUTH_BACKEND.to_string(),
            clock_skew_seconds: 0,
        }
    }
}

impl FirebaseAuthConfig {
    pub fn header_name(&self) -> Result<HeaderName> {
        HeaderName::from_bytes(self.jwt_header_name.as_bytes()).map_err(|_| {
            FiregateError::Config(format!("invalid jwt_header_name '{}'", self.jwt_header_name))
        })
    }

    pub fn user_getter_kind(&self) -> Result<UserGetterKind> {
        self.user_getter.parse()
    }

    pub fn validate(&self) -> Result<()> {
        self.header_name()?;
        self.user_getter_kind()?;
        if self.clock_skew_seconds > MAX_CLOCK_SKEW_SECS {
            return Err(FiregateError::Config(format!(
                "clock_skew_seconds must be between 0 and {MAX_CLOCK_SKEW_SECS}"
            )));
        }
        if self.admin_login_redirect_url.is_empty() {
            return Err(FiregateError::Config("admin_login_redirect_url must not be empty".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = FirebaseAuthConfig::default();
        assert_eq!(config.jwt_header_name, "X-Firebase-Jwt");
        assert!(!config.allow_not_confirmed_emails);
        assert!(!config.create_user_if_not_exists);
        assert_eq!(config.user_getter_kind().unwrap(), UserGetterKind::Email);
        assert_eq!(config.header_name().unwrap().as_str(), "x-firebase-jwt");
        config.validate().unwrap();
    }

    #[test]
    fn test_partial_deserialize_keeps_defaults() {
        let config: FirebaseAuthConfig = serde_json::from_str(
            r#"{"project_id": "demo", "allow_not_confirmed_emails": true}"#,
        )
        .unwrap();
        assert_eq!(config.project_id.as_deref(), Some("demo"));
        assert!(config.allow_not_confirmed_emails);
        assert_eq!(config.jwt_header_name, DEFAULT_JWT_HEADER_NAME);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let bad_header =
            FirebaseAuthConfig { jwt_header_name: "not a header".into(), ..Default::default() };
        assert!(bad_header.validate().is_err());

        let bad_getter = FirebaseAuthConfig { user_getter: "ldap".into(), ..Default::default() };
        assert!(bad_getter.validate().is_err());

        let bad_skew = FirebaseAuthConfig { clock_skew_seconds: 61, ..Default::default() };
        assert!(bad_skew.validate().is_err());
    }
}
