//! Reading and checking the Firebase token carried by a request.

use crate::firebase::{FirebaseClaims, TokenError, TokenValidator};
use crate::{AuthError, FirebaseAuthConfig};
use axum::http::{HeaderMap, HeaderName};
use std::sync::Arc;

/// Verifies the Firebase account behind a request.
///
/// Reads the token from the configured header, validates it and enforces the
/// email verification policy.
#[derive(Clone)]
pub struct FirebaseAccountVerifier {
    header_name: HeaderName,
    validator: Option<Arc<dyn TokenValidator>>,
    allow_not_confirmed_emails: bool,
}

impl FirebaseAccountVerifier {
    /// Without a validator every token is rejected as invalid.
    pub fn new(header_name: HeaderName, validator: Option<Arc<dyn TokenValidator>>) -> Self {
        Self { header_name, validator, allow_not_confirmed_emails: false }
    }

    pub fn from_config(
        config: &FirebaseAuthConfig,
        validator: Option<Arc<dyn TokenValidator>>,
    ) -> firegate_core::Result<Self> {
        Ok(Self::new(config.header_name()?, validator)
            .allow_not_confirmed_emails(config.allow_not_confirmed_emails))
    }

    pub fn allow_not_confirmed_emails(mut self, allow: bool) -> Self {
        self.allow_not_confirmed_emails = allow;
        self
    }

    pub fn header_name(&self) -> &HeaderName {
        &self.header_name
    }

    pub fn is_configured(&self) -> bool {
        self.validator.is_some()
    }

    /// Verify the request's token and return its claims.
    pub async fn verify(&self, headers: &HeaderMap) -> Result<FirebaseClaims, AuthError> {
        let Some(value) = headers.get(&self.header_name) else {
            return Err(AuthError::NoAuthHeader);
        };
        let token = value.to_str().map_err(|_| {
            tracing::debug!(header = %self.header_name, "auth header is not visible ASCII");
            AuthError::JwtInvalid
        })?;

        let Some(validator) = &self.validator else {
            tracing::warn!("firebase token presented but no identity provider is configured");
            return Err(TokenError::NotConfigured.into());
        };

        let claims = validator.validate(token.trim()).await.map_err(|e| {
            tracing::debug!(error = %e, "firebase token rejected");
            AuthError::from(e)
        })?;

        if !claims.is_email_verified() && !self.allow_not_confirmed_emails {
            tracing::debug!(uid = %claims.uid(), "firebase account email not verified");
            return Err(AuthError::EmailNotVerified);
        }

        Ok(claims)
    }
}
