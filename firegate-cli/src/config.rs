use anyhow::{Context, Result, bail};
use firegate_auth::FirebaseAuthConfig;
use firegate_session::DEFAULT_SESSION_TTL_SECS;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "firegate.toml";

/// Longest accepted session lifetime (one year).
pub const MAX_SESSION_TTL_SECS: i64 = 60 * 60 * 24 * 365;

/// Contents of `firegate.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerSection,
    pub firebase: FirebaseAuthConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSection {
    pub host: String,
    pub port: u16,
    /// CORS origins; empty allows any origin.
    pub allowed_origins: Vec<String>,
    /// Mark the session cookie `Secure`.
    pub secure_cookies: bool,
    pub session_ttl_secs: i64,
    pub max_body_size: usize,
    pub request_timeout_secs: u64,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
            allowed_origins: Vec::new(),
            secure_cookies: false,
            session_ttl_secs: DEFAULT_SESSION_TTL_SECS,
            max_body_size: 64 * 1024,
            request_timeout_secs: 30,
        }
    }
}

impl AppConfig {
    /// Load `path`, or `./firegate.toml` if it exists, or defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => {
                let default = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !default.exists() {
                    return Ok(Self::default());
                }
                default
            }
        };

        let raw = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_toml(&raw).with_context(|| format!("invalid config file {}", path.display()))
    }

    pub fn from_toml(raw: &str) -> Result<Self> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let ttl = self.server.session_ttl_secs;
        if !(1..=MAX_SESSION_TTL_SECS).contains(&ttl) {
            bail!("server.session_ttl_secs must be between 1 and {MAX_SESSION_TTL_SECS}, got {ttl}");
        }
        Ok(())
    }
}
