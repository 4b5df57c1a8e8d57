//! Identity-provider bootstrap from service-account credentials.

use super::{FirebaseVerifier, JwksCache, TokenValidator};
use crate::FirebaseAuthConfig;
use firegate_core::{FiregateError, Result};
use serde::Deserialize;
use std::path::Path;
use std::sync::Arc;

/// The parts of a Google service-account key file firegate reads.
///
/// The private key is never deserialized: token verification only needs
/// the project id.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceAccount {
    #[serde(rename = "type", default)]
    pub account_type: Option<String>,
    pub project_id: String,
    #[serde(default)]
    pub client_email: Option<String>,
    #[serde(default)]
    pub private_key_id: Option<String>,
}

impl ServiceAccount {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            FiregateError::Config(format!(
                "cannot read service account file {}: {e}",
                path.display()
            ))
        })?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let account: ServiceAccount = serde_json::from_str(raw)?;
        if let Some(kind) = account.account_type.as_deref() {
            if kind != "service_account" {
                return Err(FiregateError::Config(format!(
                    "expected a service_account credential, got '{kind}'"
                )));
            }
        }
        if account.project_id.is_empty() {
            return Err(FiregateError::Config("service account has an empty project_id".into()));
        }
        Ok(account)
    }
}

/// An initialized Firebase project.
#[derive(Clone)]
pub struct FirebaseApp {
    project_id: String,
    verifier: Arc<FirebaseVerifier>,
}

impl FirebaseApp {
    /// Initialize from configuration.
    ///
    /// Returns `Ok(None)` when neither a service account file nor a project
    /// id is configured; token verification is then unavailable.
    pub fn initialize(config: &FirebaseAuthConfig) -> Result<Option<Self>> {
        let project_id = match (&config.service_account_file, &config.project_id) {
            (_, Some(project_id)) if !project_id.is_empty() => project_id.clone(),
            (Some(path), _) => {
                let account = ServiceAccount::from_file(path)?;
                tracing::info!(
                    project_id = %account.project_id,
                    client_email = account.client_email.as_deref().unwrap_or("(none)"),
                    "loaded firebase service account"
                );
                account.project_id
            }
            _ => {
                tracing::warn!(
                    "no firebase service account or project id configured; token login is disabled"
                );
                return Ok(None);
            }
        };

        let verifier = FirebaseVerifier::new(project_id.clone())
            .with_clock_skew(config.clock_skew_seconds);
        Ok(Some(Self::from_verifier(verifier)))
    }

    pub fn from_verifier(verifier: FirebaseVerifier) -> Self {
        Self { project_id: verifier.project_id().to_string(), verifier: Arc::new(verifier) }
    }

    /// Replace the signing key source.
    pub fn with_jwks_cache(self, cache: Arc<JwksCache>) -> Self {
        let verifier = FirebaseVerifier::new(self.project_id.clone())
            .with_jwks_cache(cache)
            .with_clock_skew(self.verifier.clock_skew_secs());
        Self::from_verifier(verifier)
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    pub fn verifier(&self) -> Arc<dyn TokenValidator> {
        self.verifier.clone()
    }
}
