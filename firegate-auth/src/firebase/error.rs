//! Token validation errors.

/// Why a token failed verification.
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    /// The token's `exp` is in the past.
    #[error("Token expired")]
    Expired,

    #[error("Invalid signature")]
    InvalidSignature,

    #[error("Invalid issuer: expected {expected}, got {actual}")]
    InvalidIssuer { expected: String, actual: String },

    #[error("Invalid audience")]
    InvalidAudience,

    #[error("Missing claim: {0}")]
    MissingClaim(String),

    #[error("Unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),

    #[error("Unknown signing key: {0}")]
    UnknownKey(String),

    #[error("Failed to fetch signing keys: {0}")]
    KeyFetch(String),

    #[error("Identity provider is not configured")]
    NotConfigured,

    #[error("Invalid token: {0}")]
    Invalid(String),
}

impl TokenError {
    pub fn is_expired(&self) -> bool {
        matches!(self, TokenError::Expired)
    }
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        use jsonwebtoken::errors::ErrorKind;

        match err.kind() {
            ErrorKind::ExpiredSignature => TokenError::Expired,
            ErrorKind::InvalidSignature => TokenError::InvalidSignature,
            ErrorKind::InvalidAudience => TokenError::InvalidAudience,
            ErrorKind::InvalidIssuer => TokenError::Invalid("issuer mismatch".into()),
            ErrorKind::MissingRequiredClaim(claim) => TokenError::MissingClaim(claim.clone()),
            _ => TokenError::Invalid(err.to_string()),
        }
    }
}

impl From<reqwest::Error> for TokenError {
    fn from(err: reqwest::Error) -> Self {
        TokenError::KeyFetch(err.to_string())
    }
}
