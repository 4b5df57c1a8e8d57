//! Signing key cache for Firebase ID tokens.

use super::TokenError;
use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::jwk::JwkSet;
use tokio::sync::{Mutex, RwLock};

/// Google's JWKS endpoint for Firebase ID token signing keys.
pub const FIREBASE_JWKS_URL: &str =
    "https://www.googleapis.com/service_accounts/v1/jwk/securetoken@system.gserviceaccount.com";

/// Minimum cache TTL in seconds (5 minutes).
const MIN_CACHE_TTL_SECS: i64 = 300;

/// Cache TTL when the response carries no usable `Cache-Control` header (1 hour).
const DEFAULT_CACHE_TTL_SECS: i64 = 3600;

/// Maximum cache TTL in seconds (24 hours).
const MAX_CACHE_TTL_SECS: i64 = 86_400;

/// While the cache is fresh, an unknown `kid` triggers at most one fetch per interval.
const MIN_REFETCH_INTERVAL_SECS: i64 = 60;

/// Caches decoding keys by `kid`.
///
/// Keys are refreshed when the cache has expired or a token names a `kid`
/// that is not cached. Unknown-`kid` refreshes of a fresh cache are rate
/// limited to one per minute. The TTL follows the endpoint's
/// `Cache-Control: max-age`, clamped to between 5 minutes and 24 hours.
pub struct JwksCache {
    jwks_uri: Option<String>,
    client: reqwest::Client,
    keys: DashMap<String, DecodingKey>,
    expires_at: RwLock<Option<DateTime<Utc>>>,
    last_refresh: RwLock<Option<DateTime<Utc>>>,
    refresh_lock: Mutex<()>,
}

impl JwksCache {
    /// Create a cache backed by a JWKS endpoint.
    pub fn new(jwks_uri: impl Into<String>) -> Self {
        Self::with_client(jwks_uri, reqwest::Client::new())
    }

    pub fn with_client(jwks_uri: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            jwks_uri: Some(jwks_uri.into()),
            client,
            keys: DashMap::new(),
            expires_at: RwLock::new(None),
            last_refresh: RwLock::new(None),
            refresh_lock: Mutex::new(()),
        }
    }

    /// Cache for Firebase's public endpoint.
    pub fn firebase() -> Self {
        Self::new(FIREBASE_JWKS_URL)
    }

    /// A fixed key set that is never refreshed.
    pub fn from_keys(keys: impl IntoIterator<Item = (String, DecodingKey)>) -> Self {
        Self {
            jwks_uri: None,
            client: reqwest::Client::new(),
            keys: keys.into_iter().collect(),
            expires_at: RwLock::new(Some(DateTime::<Utc>::MAX_UTC)),
            last_refresh: RwLock::new(None),
            refresh_lock: Mutex::new(()),
        }
    }

    pub fn jwks_uri(&self) -> Option<&str> {
        self.jwks_uri.as_deref()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Look up the key for `kid`, refreshing the set if needed.
    pub async fn get_key(&self, kid: &str) -> Result<DecodingKey, TokenError> {
        if let Some(key) = self.cached_key(kid).await {
            return Ok(key);
        }

        if self.jwks_uri.is_none() || self.recently_refreshed().await {
            tracing::debug!(kid = %kid, "signing key not in cached key set");
            return Err(TokenError::UnknownKey(kid.to_string()));
        }

        {
            let _guard = self.refresh_lock.lock().await;
            // Another task may have refreshed while we waited.
            if self.cached_key(kid).await.is_none() && !self.recently_refreshed().await {
                self.refresh().await?;
            }
        }

        self.keys.get(kid).map(|k| k.value().clone()).ok_or_else(|| {
            tracing::debug!(kid = %kid, "signing key not found after refresh");
            TokenError::UnknownKey(kid.to_string())
        })
    }

    async fn cached_key(&self, kid: &str) -> Option<DecodingKey> {
        if !self.is_fresh().await {
            return None;
        }
        self.keys.get(kid).map(|k| k.value().clone())
    }

    /// Fresh cache that was fetched less than a minute ago.
    async fn recently_refreshed(&self) -> bool {
        let Some(last) = *self.last_refresh.read().await else {
            return false;
        };
        self.is_fresh().await
            && Utc::now() - last < Duration::seconds(MIN_REFETCH_INTERVAL_SECS)
    }

    /// Fetch the key set and replace the cache. Returns the number of keys loaded.
    pub async fn refresh(&self) -> Result<usize, TokenError> {
        let Some(uri) = self.jwks_uri.as_deref() else {
            return Ok(self.keys.len());
        };

        tracing::info!(jwks_uri = %uri, "fetching token signing keys");

        let response = self.client.get(uri).send().await?.error_for_status()?;

        let ttl = cache_ttl(
            response.headers().get(reqwest::header::CACHE_CONTROL).and_then(|v| v.to_str().ok()),
        );

        let set: JwkSet = response.json().await?;

        let mut loaded = Vec::with_capacity(set.keys.len());
        for jwk in &set.keys {
            let Some(kid) = jwk.common.key_id.clone() else {
                tracing::warn!("skipping signing key without kid");
                continue;
            };
            match DecodingKey::from_jwk(jwk) {
                Ok(key) => loaded.push((kid, key)),
                Err(e) => tracing::warn!(kid = %kid, error = %e, "skipping unusable signing key"),
            }
        }

        if loaded.is_empty() {
            return Err(TokenError::KeyFetch("no usable signing keys in response".into()));
        }

        let count = loaded.len();
        self.keys.clear();
        for (kid, key) in loaded {
            self.keys.insert(kid, key);
        }

        let now = Utc::now();
        let expires_at = now + Duration::seconds(ttl);
        *self.expires_at.write().await = Some(expires_at);
        *self.last_refresh.write().await = Some(now);

        tracing::info!(num_keys = count, cache_ttl_secs = ttl, %expires_at, "signing keys cached");
        Ok(count)
    }

    async fn is_fresh(&self) -> bool {
        self.expires_at.read().await.is_some_and(|at| at > Utc::now())
    }
}

/// Cache lifetime in seconds for a `Cache-Control` header value.
fn cache_ttl(cache_control: Option<&str>) -> i64 {
    cache_control
        .and_then(parse_max_age)
        .unwrap_or(DEFAULT_CACHE_TTL_SECS)
        .clamp(MIN_CACHE_TTL_SECS, MAX_CACHE_TTL_SECS)
}

/// Parse `max-age` from a `Cache-Control` header.
///
/// `"public, max-age=19302, must-revalidate, no-transform"` -> `19302`
fn parse_max_age(cache_control: &str) -> Option<i64> {
    cache_control
        .split(',')
        .map(str::trim)
        .find_map(|directive| directive.strip_prefix("max-age="))
        .and_then(|v| v.parse().ok())
}
