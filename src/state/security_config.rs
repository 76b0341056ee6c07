use std::time::Duration;

use jsonwebtoken::Algorithm;

/// Options applied when signing a token.
///
/// `ttl` of `None` issues tokens without an `exp` claim; verification still
/// checks `exp` whenever one is present.
#[derive(Debug, Clone)]
pub struct SignOptions {
    pub ttl: Option<Duration>,
    /// Optional activation delay, emitted as the `nbf` claim.
    pub not_before: Option<Duration>,
}

impl Default for SignOptions {
    fn default() -> Self {
        Self {
            ttl: Some(Duration::from_secs(60 * 60)),
            not_before: None,
        }
    }
}

/// Configuration for token signing and verification.
#[derive(Debug, Clone)]
pub struct SecurityConfig {
    /// Shared secret for signing and verifying tokens
    pub jwt_secret: Vec<u8>,
    /// Signing algorithm (defaults to HS256)
    pub algorithm: Algorithm,
    pub sign_options: SignOptions,
}

impl SecurityConfig {
    pub fn new(jwt_secret: impl Into<Vec<u8>>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            algorithm: Algorithm::HS256,
            sign_options: SignOptions::default(),
        }
    }

    pub fn with_sign_options(mut self, sign_options: SignOptions) -> Self {
        self.sign_options = sign_options;
        self
    }
}
