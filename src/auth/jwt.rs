use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::state::security_config::SecurityConfig;
use crate::AppError;

/// Claims embedded in an issued token: the principal's login plus whatever
/// extra fields the password check returned, wrapped in the standard
/// timestamp envelope.
///
/// `login` and `iat` default when absent so that a token with a valid
/// signature but a missing login still decodes; the auth backend treats an
/// empty login as unauthenticated rather than a malformed token.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Claims {
    #[serde(default)]
    pub login: String,
    /// Issued-at (seconds since epoch)
    #[serde(default)]
    pub iat: i64,
    /// Expiry; absent when signing without a TTL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
    /// Not-before; absent unless an activation delay is configured
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nbf: Option<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Verification failures, classified so callers can match structurally
/// instead of comparing error strings.
#[derive(Error, Debug)]
pub enum TokenError {
    #[error("token expired")]
    Expired,
    #[error("token not yet valid")]
    NotYetValid,
    #[error("invalid token: {0}")]
    Invalid(String),
    /// Anything the codec does not recognize; callers treat this as fatal.
    #[error(transparent)]
    Other(jsonwebtoken::errors::Error),
}

/// Sign `login` plus `extra` claims into a compact token.
pub fn sign_token(
    login: &str,
    extra: Map<String, Value>,
    now: SystemTime,
    security: &SecurityConfig,
) -> Result<String, AppError> {
    let iat = now
        .duration_since(UNIX_EPOCH)
        .map_err(|_| AppError::internal("Failed to get current time".to_string()))?
        .as_secs() as i64;

    let opts = &security.sign_options;
    let claims = Claims {
        login: login.to_string(),
        iat,
        exp: opts.ttl.map(|ttl| iat + ttl.as_secs() as i64),
        nbf: opts.not_before.map(|nbf| iat + nbf.as_secs() as i64),
        extra,
    };

    encode(
        &Header::new(security.algorithm),
        &claims,
        &EncodingKey::from_secret(&security.jwt_secret),
    )
    .map_err(|e| AppError::internal(format!("Failed to encode token: {e}")))
}

/// Verify a token and return its claims.
///
/// Failures are classified: expired, not-yet-valid, and malformed/bad
/// signature each map to their own [`TokenError`] kind; anything else comes
/// back as [`TokenError::Other`].
pub fn verify_token(token: &str, security: &SecurityConfig) -> Result<Claims, TokenError> {
    // Pin the algorithm to the configured one. `exp` is validated when
    // present but not required, since sign options may omit the TTL.
    let mut validation = Validation::new(security.algorithm);
    validation.set_required_spec_claims::<&str>(&[]);
    validation.validate_nbf = true;

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(&security.jwt_secret),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => TokenError::Expired,
        ErrorKind::ImmatureSignature => TokenError::NotYetValid,
        ErrorKind::InvalidSignature
        | ErrorKind::InvalidToken
        | ErrorKind::Base64(_)
        | ErrorKind::Json(_)
        | ErrorKind::Utf8(_) => TokenError::Invalid(e.to_string()),
        _ => TokenError::Other(e),
    })
}
