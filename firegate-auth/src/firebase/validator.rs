//! Firebase ID token validation.

use super::{FirebaseClaims, JwksCache, TokenError};
use async_trait::async_trait;
use chrono::Utc;
use jsonwebtoken::{Algorithm, Validation};
use std::sync::Arc;

/// Issuer prefix; the project id is appended.
pub const FIREBASE_ISSUER_PREFIX: &str = "https://securetoken.google.com/";

/// Largest clock skew Firebase tolerates.
pub const MAX_CLOCK_SKEW_SECS: u64 = 60;

const MAX_UID_LEN: usize = 128;

/// Verifies an identity token and returns its claims.
#[async_trait]
pub trait TokenValidator: Send + Sync {
    async fn validate(&self, token: &str) -> Result<FirebaseClaims, TokenError>;

    /// Expected `iss` claim.
    fn issuer(&self) -> &str;
}

/// Validates Firebase ID tokens for a single project.
///
/// Checks the RS256 signature against Google's published keys, the audience
/// and issuer, `exp`/`iat`/`auth_time` against the current time and the
/// shape of the `sub` claim.
pub struct FirebaseVerifier {
    project_id: String,
    issuer: String,
    jwks_cache: Arc<JwksCache>,
    clock_skew_secs: u64,
}

impl FirebaseVerifier {
    pub fn new(project_id: impl Into<String>) -> Self {
        let project_id = project_id.into();
        let issuer = format!("{FIREBASE_ISSUER_PREFIX}{project_id}");
        Self { project_id, issuer, jwks_cache: Arc::new(JwksCache::firebase()), clock_skew_secs: 0 }
    }

    pub fn with_jwks_cache(mut self, cache: Arc<JwksCache>) -> Self {
        self.jwks_cache = cache;
        self
    }

    /// Clamped to [`MAX_CLOCK_SKEW_SECS`].
    pub fn with_clock_skew(mut self, secs: u64) -> Self {
        self.clock_skew_secs = secs.min(MAX_CLOCK_SKEW_SECS);
        self
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    pub fn clock_skew_secs(&self) -> u64 {
        self.clock_skew_secs
    }

    pub fn jwks_cache(&self) -> &Arc<JwksCache> {
        &self.jwks_cache
    }

    fn check_timestamps(&self, claims: &FirebaseClaims) -> Result<(), TokenError> {
        let Some(iat) = claims.iat else {
            return Err(TokenError::MissingClaim("iat".into()));
        };
        let latest = Utc::now().timestamp() + self.clock_skew_secs as i64;
        if iat > latest {
            return Err(TokenError::Invalid("token issued in the future".into()));
        }
        if claims.auth_time.is_some_and(|at| at > latest) {
            return Err(TokenError::Invalid("auth_time is in the future".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl TokenValidator for FirebaseVerifier {
    async fn validate(&self, token: &str) -> Result<FirebaseClaims, TokenError> {
        let header = jsonwebtoken::decode_header(token)?;
        if header.alg != Algorithm::RS256 {
            return Err(TokenError::UnsupportedAlgorithm(format!("{:?}", header.alg)));
        }
        let kid = header.kid.ok_or_else(|| TokenError::MissingClaim("kid".into()))?;

        let key = self.jwks_cache.get_key(&kid).await?;

        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_audience(&[&self.project_id]);
        validation.set_required_spec_claims(&["exp", "aud", "iss", "sub"]);
        validation.validate_exp = true;
        validation.leeway = self.clock_skew_secs;

        let token_data = jsonwebtoken::decode::<FirebaseClaims>(token, &key, &validation)?;
        let claims = token_data.claims;

        if claims.iss != self.issuer {
            return Err(TokenError::InvalidIssuer {
                expected: self.issuer.clone(),
                actual: claims.iss,
            });
        }
        if claims.sub.is_empty() {
            return Err(TokenError::MissingClaim("sub".into()));
        }
        if claims.sub.len() > MAX_UID_LEN {
            return Err(TokenError::Invalid("sub claim longer than 128 characters".into()));
        }
        self.check_timestamps(&claims)?;

        tracing::debug!(
            uid = %claims.sub,
            provider = claims.sign_in_provider().unwrap_or("unknown"),
            "firebase token validated"
        );
        Ok(claims)
    }

    fn issuer(&self) -> &str {
        &self.issuer
    }
}
