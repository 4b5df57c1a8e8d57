use axum_extra::extract::cookie::SameSite;
use firegate_auth::firebase::TokenValidator;
use firegate_auth::{FirebaseAccountVerifier, FirebaseAuthConfig, UserGetter};
use firegate_core::{Result, UserStore};
use firegate_session::SessionService;
use std::{sync::Arc, time::Duration};

/// Security configuration for the HTTP layer.
#[derive(Clone, Debug)]
pub struct SecurityConfig {
    /// Allowed origins for CORS (empty = allow all, which is NOT recommended for production)
    pub allowed_origins: Vec<String>,
    /// Maximum request body size in bytes (default: 64KB)
    pub max_body_size: usize,
    /// Request timeout duration (default: 30 seconds)
    pub request_timeout: Duration,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            allowed_origins: Vec::new(),
            max_body_size: 64 * 1024,
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl SecurityConfig {
    /// Create a production configuration with specific allowed origins
    pub fn production(allowed_origins: Vec<String>) -> Self {
        Self { allowed_origins, ..Default::default() }
    }
}

/// Session cookie attributes.
#[derive(Clone, Debug)]
pub struct CookieConfig {
    pub name: String,
    /// Set the Secure flag (should be true behind HTTPS)
    pub secure: bool,
    pub path: String,
    pub same_site: SameSite,
    /// Domain (None = current domain)
    pub domain: Option<String>,
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self {
            name: "firegate_session".to_string(),
            secure: true,
            path: "/".to_string(),
            same_site: SameSite::Lax,
            domain: None,
        }
    }
}

impl CookieConfig {
    /// Plain-HTTP development setup: no Secure flag.
    pub fn development() -> Self {
        Self { secure: false, ..Default::default() }
    }
}

/// Everything the HTTP endpoints need.
#[derive(Clone)]
pub struct ServerConfig {
    pub firebase: FirebaseAuthConfig,
    pub account_verifier: FirebaseAccountVerifier,
    pub user_getter: Arc<dyn UserGetter>,
    pub user_store: Arc<dyn UserStore>,
    pub session_service: Arc<dyn SessionService>,
    pub cookie: CookieConfig,
    pub security: SecurityConfig,
}

impl ServerConfig {
    /// Build from settings.
    ///
    /// `validator` is the initialized identity provider, if any. The user
    /// resolution strategy is picked from `firebase.user_getter`.
    pub fn new(
        firebase: FirebaseAuthConfig,
        validator: Option<Arc<dyn TokenValidator>>,
        user_store: Arc<dyn UserStore>,
        session_service: Arc<dyn SessionService>,
    ) -> Result<Self> {
        firebase.validate()?;
        let account_verifier = FirebaseAccountVerifier::from_config(&firebase, validator)?;
        let user_getter = firebase
            .user_getter_kind()?
            .build(user_store.clone(), firebase.create_user_if_not_exists);

        Ok(Self {
            firebase,
            account_verifier,
            user_getter,
            user_store,
            session_service,
            cookie: CookieConfig::default(),
            security: SecurityConfig::default(),
        })
    }

    /// Use a custom user resolution strategy.
    pub fn with_user_getter(mut self, user_getter: Arc<dyn UserGetter>) -> Self {
        self.user_getter = user_getter;
        self
    }

    pub fn with_cookie_config(mut self, cookie: CookieConfig) -> Self {
        self.cookie = cookie;
        self
    }

    pub fn with_security(mut self, security: SecurityConfig) -> Self {
        self.security = security;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use firegate_core::InMemoryUserStore;
    use firegate_session::InMemorySessionService;

    fn stores() -> (Arc<InMemoryUserStore>, Arc<InMemorySessionService>) {
        (Arc::new(InMemoryUserStore::new()), Arc::new(InMemorySessionService::new()))
    }

    #[test]
    fn test_security_config_defaults() {
        let default = SecurityConfig::default();
        assert!(default.allowed_origins.is_empty());
        assert_eq!(default.max_body_size, 64 * 1024);
        assert_eq!(default.request_timeout, Duration::from_secs(30));

        let prod = SecurityConfig::production(vec!["https://example.com".to_string()]);
        assert_eq!(prod.allowed_origins, vec!["https://example.com"]);
    }

    #[test]
    fn test_cookie_config() {
        let cookie = CookieConfig::default();
        assert_eq!(cookie.name, "firegate_session");
        assert!(cookie.secure);
        assert!(!CookieConfig::development().secure);
    }

    #[test]
    fn test_server_config_new() {
        let (users, sessions) = stores();
        let config =
            ServerConfig::new(FirebaseAuthConfig::default(), None, users, sessions).unwrap();
        assert!(!config.account_verifier.is_configured());
        assert_eq!(config.account_verifier.header_name().as_str(), "x-firebase-jwt");
    }

    #[test]
    fn test_server_config_rejects_invalid_settings() {
        let (users, sessions) = stores();
        let firebase = FirebaseAuthConfig { user_getter: "nope".into(), ..Default::default() };
        assert!(ServerConfig::new(firebase, None, users, sessions).is_err());
    }

    #[test]
    fn test_server_config_builder() {
        let (users, sessions) = stores();
        let config = ServerConfig::new(FirebaseAuthConfig::default(), None, users, sessions)
            .unwrap()
            .with_cookie_config(CookieConfig::development())
            .with_security(SecurityConfig {
                max_body_size: 100,
                request_timeout: Duration::from_secs(5),
                ..SecurityConfig::production(vec!["https://app.example.com".into()])
            });

        assert!(!config.cookie.secure);
        assert_eq!(config.security.allowed_origins, vec!["https://app.example.com"]);
        assert_eq!(config.security.max_body_size, 100);
        assert_eq!(config.security.request_timeout, Duration::from_secs(5));
    }
}
