//! Firebase ID token verification.
//!
//! ```rust,ignore
//! use firegate_auth::firebase::{FirebaseVerifier, TokenValidator};
//!
//! let verifier = FirebaseVerifier::new("my-project");
//! let claims = verifier.validate(token).await?;
//! println!("uid: {}", claims.uid());
//! ```

mod app;
mod claims;
mod error;
mod jwks;
mod validator;

pub use app::{FirebaseApp, ServiceAccount};
pub use claims::{FirebaseClaims, FirebaseInfo};
pub use error::TokenError;
pub use jwks::{FIREBASE_JWKS_URL, JwksCache};
pub use validator::{
    FIREBASE_ISSUER_PREFIX, FirebaseVerifier, MAX_CLOCK_SKEW_SECS, TokenValidator,
};
