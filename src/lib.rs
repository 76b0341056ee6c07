#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod auth;
pub mod config;
pub mod error;
pub mod extractors;
pub mod health;
pub mod middleware;
pub mod provider;
pub mod routes;
pub mod state;
pub mod telemetry;
pub mod trace_ctx;

// Re-exports for public API
pub use auth::{sign_token, verify_token, AuthBackend, AuthHooks, Claims, TokenError};
pub use config::Config;
pub use error::AppError;
pub use extractors::CurrentUser;
pub use middleware::cors::cors_middleware;
pub use middleware::request_trace::RequestTrace;
pub use provider::{
    BeforeData, BeforeHook, CommitAction, CommitActionKind, CommitBody, FileContent, FileEntry,
    RepositoryBackend, ServerOptions,
};
pub use state::app_state::AppState;
pub use state::security_config::{SecurityConfig, SignOptions};
