//! Environment-driven configuration for the server binary.

use std::env;
use std::time::Duration;

use crate::error::AppError;
use crate::state::security_config::{SecurityConfig, SignOptions};

/// Configuration loaded from environment variables at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub jwt_secret: String,
    /// Token TTL in seconds; 0 disables the `exp` claim
    pub token_ttl_secs: u64,
    pub project_id: String,
    /// Route prefix the API is mounted under
    pub prefix: String,
}

impl Config {
    /// Load and validate all configuration from environment variables.
    pub fn from_env() -> Result<Self, AppError> {
        let host = env::var("GITADMIN_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());

        let port_str = env::var("GITADMIN_PORT").unwrap_or_else(|_| "4000".to_string());
        let port = port_str.parse::<u16>().map_err(|_| {
            AppError::config(format!(
                "GITADMIN_PORT must be a valid port number, got '{port_str}'"
            ))
        })?;

        let jwt_secret = match env::var("GITADMIN_JWT_SECRET") {
            Ok(secret) if secret.len() >= 32 => secret,
            Ok(_) => {
                return Err(AppError::config(
                    "GITADMIN_JWT_SECRET is too short. It should be at least 32 characters."
                        .to_string(),
                ))
            }
            Err(_) => {
                return Err(AppError::config(
                    "GITADMIN_JWT_SECRET must be set".to_string(),
                ))
            }
        };

        let token_ttl_secs = env::var("GITADMIN_TOKEN_TTL_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(60 * 60);

        let project_id = env::var("GITADMIN_PROJECT_ID").unwrap_or_default();

        let prefix = env::var("GITADMIN_PREFIX").unwrap_or_else(|_| "/admin".to_string());

        Ok(Config {
            host,
            port,
            jwt_secret,
            token_ttl_secs,
            project_id,
            prefix,
        })
    }

    pub fn security_config(&self) -> SecurityConfig {
        let ttl = if self.token_ttl_secs == 0 {
            None
        } else {
            Some(Duration::from_secs(self.token_ttl_secs))
        };
        SecurityConfig::new(self.jwt_secret.as_bytes()).with_sign_options(SignOptions {
            ttl,
            not_before: None,
        })
    }
}
