use std::sync::Arc;
use std::time::SystemTime;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::debug;

use crate::auth::jwt::{sign_token, verify_token, Claims, TokenError};
use crate::state::security_config::SecurityConfig;
use crate::AppError;

/// Host-supplied predicates the auth backend composes.
///
/// `verify_password` is the authoritative credential check; `check` decides
/// whether a principal is still valid and is consulted on every token
/// verification, so deleting a user revokes their outstanding tokens.
/// Errors from either hook are not caught here; they propagate as fatal.
#[async_trait]
pub trait AuthHooks: Send + Sync {
    async fn check(&self, login: &str) -> Result<bool, AppError>;

    /// `None` means the credentials were rejected; `Some(extra)` carries
    /// additional claims (excluding `login`) to embed in the token.
    async fn verify_password(
        &self,
        login: &str,
        password: &str,
    ) -> Result<Option<Map<String, Value>>, AppError>;
}

/// Typed login payload. Requests are arbitrary JSON; parse early and treat
/// anything that does not fit as "no token" rather than an error.
#[derive(Debug, Deserialize)]
struct LoginRequest {
    login: String,
    password: String,
}

/// Stateless authentication backend: a token codec plus the two host
/// predicates. Constructed once at startup and shared read-only.
#[derive(Clone)]
pub struct AuthBackend {
    security: SecurityConfig,
    hooks: Arc<dyn AuthHooks>,
}

impl AuthBackend {
    pub fn new(security: SecurityConfig, hooks: Arc<dyn AuthHooks>) -> Self {
        Self { security, hooks }
    }

    /// Exchange credentials for a signed token.
    ///
    /// Returns `Ok(None)` for every credential problem (malformed body,
    /// missing fields, rejected password); an `Err` only signals an
    /// internal failure such as the signing step going wrong.
    pub async fn auth_login(&self, body: &Value) -> Result<Option<String>, AppError> {
        let Ok(req) = serde_json::from_value::<LoginRequest>(body.clone()) else {
            return Ok(None);
        };
        if req.login.is_empty() || req.password.is_empty() {
            return Ok(None);
        }

        let Some(extra) = self
            .hooks
            .verify_password(&req.login, &req.password)
            .await?
        else {
            debug!(login = %req.login, "password check rejected login");
            return Ok(None);
        };

        let token = sign_token(&req.login, extra, SystemTime::now(), &self.security)?;
        Ok(Some(token))
    }

    /// Validate a raw `Authorization` header value.
    ///
    /// `Ok(None)` is the soft "unauthenticated" outcome: wrong scheme,
    /// empty token, claims without a login, or a principal the `check`
    /// hook no longer accepts. A classified token failure (expired, not
    /// yet valid, malformed/bad signature) is a client protocol error and
    /// comes back as a 400-class `AppError` carrying the codec's message.
    pub async fn auth_check(&self, authorization_header: &str) -> Result<Option<Claims>, AppError> {
        // Exactly one scheme and one token, any amount of whitespace
        // between them. A header with trailing parts ("Bearer a b") is
        // unauthenticated, not an error.
        let mut parts = authorization_header.split_whitespace();
        let (Some("Bearer"), Some(token), None) = (parts.next(), parts.next(), parts.next())
        else {
            return Ok(None);
        };

        let claims = match verify_token(token, &self.security) {
            Ok(claims) => claims,
            Err(TokenError::Expired) => {
                return Err(AppError::bad_request(
                    "TOKEN_EXPIRED",
                    TokenError::Expired.to_string(),
                ))
            }
            Err(TokenError::NotYetValid) => {
                return Err(AppError::bad_request(
                    "TOKEN_NOT_YET_VALID",
                    TokenError::NotYetValid.to_string(),
                ))
            }
            Err(TokenError::Invalid(msg)) => {
                return Err(AppError::bad_request("TOKEN_INVALID", msg))
            }
            Err(TokenError::Other(e)) => {
                return Err(AppError::internal(format!(
                    "token verification failed: {e}"
                )))
            }
        };

        if claims.login.is_empty() {
            return Ok(None);
        }

        // Existence is re-checked on every call, never cached in the token.
        if !self.hooks.check(&claims.login).await? {
            debug!(login = %claims.login, "principal failed existence check");
            return Ok(None);
        }

        Ok(Some(claims))
    }
}
