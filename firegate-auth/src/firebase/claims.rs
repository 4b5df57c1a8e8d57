//! Firebase ID token claims.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Claims carried by a verified Firebase ID token.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FirebaseClaims {
    /// Issuer (`https://securetoken.google.com/<project-id>`).
    #[serde(default)]
    pub iss: String,
    /// Audience (the Firebase project id).
    #[serde(default)]
    pub aud: String,
    /// Subject: the Firebase user UID.
    #[serde(default)]
    pub sub: String,
    /// Issued-at. Required by the validator.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
    #[serde(default)]
    pub exp: i64,
    /// When the user actually authenticated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_time: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_verified: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub firebase: FirebaseInfo,
    /// Developer-defined custom claims.
    #[serde(flatten)]
    pub custom: HashMap<String, Value>,
}

/// The `firebase` claim.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FirebaseInfo {
    /// e.g. `password`, `google.com`, `phone`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sign_in_provider: Option<String>,
    #[serde(default)]
    pub identities: HashMap<String, Value>,
}

impl FirebaseClaims {
    /// The Firebase UID.
    pub fn uid(&self) -> &str {
        &self.sub
    }

    /// A missing `email_verified` claim counts as unverified.
    pub fn is_email_verified(&self) -> bool {
        self.email_verified.unwrap_or(false)
    }

    pub fn sign_in_provider(&self) -> Option<&str> {
        self.firebase.sign_in_provider.as_deref()
    }

    /// Read a custom claim.
    pub fn get_custom<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.custom.get(key).and_then(|v| serde_json::from_value(v.clone()).ok())
    }
}
