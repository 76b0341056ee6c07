#![allow(dead_code)]

use std::sync::Arc;

use actix_web::body::BoxBody;
use actix_web::dev::ServiceResponse;
use actix_web::http::header::CONTENT_TYPE;
use actix_web::test;
use async_trait::async_trait;
use serde_json::{json, Map, Value};

use gitadmin::{AppError, AppState, AuthBackend, AuthHooks, SecurityConfig, ServerOptions};

// Logging is auto-installed for test binaries
#[ctor::ctor]
fn init_logging() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_test_writer()
        .try_init();
}

pub const TEST_SECRET: &str = "test_secret_key_for_testing_purposes_only";

/// Host predicates for tests: fixed credential pairs plus a separate list
/// of logins that still pass the existence check, so revocation can be
/// simulated by listing a credential without listing its login.
pub struct StubHooks {
    pub credentials: Vec<(String, String)>,
    pub known: Vec<String>,
}

impl StubHooks {
    pub fn with_user(login: &str, password: &str) -> Self {
        Self {
            credentials: vec![(login.to_string(), password.to_string())],
            known: vec![login.to_string()],
        }
    }

    pub fn nobody() -> Self {
        Self {
            credentials: vec![],
            known: vec![],
        }
    }
}

#[async_trait]
impl AuthHooks for StubHooks {
    async fn check(&self, login: &str) -> Result<bool, AppError> {
        Ok(self.known.iter().any(|l| l == login))
    }

    async fn verify_password(
        &self,
        login: &str,
        password: &str,
    ) -> Result<Option<Map<String, Value>>, AppError> {
        let matches = self
            .credentials
            .iter()
            .any(|(l, p)| l == login && p == password);
        if matches {
            let mut extra = Map::new();
            extra.insert("role".to_string(), json!("admin"));
            Ok(Some(extra))
        } else {
            Ok(None)
        }
    }
}

pub fn test_security() -> SecurityConfig {
    SecurityConfig::new(TEST_SECRET.as_bytes())
}

pub fn test_state(hooks: StubHooks) -> AppState {
    let auth = AuthBackend::new(test_security(), Arc::new(hooks));
    AppState::new(auth, ServerOptions::new("test-project"))
}

/// Validate that an error response follows the problem-details structure.
pub async fn assert_problem_details_structure(
    resp: ServiceResponse<BoxBody>,
    expected_status: u16,
    expected_code: &str,
) {
    assert_eq!(resp.status().as_u16(), expected_status);

    let content_type = resp
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(
        content_type.starts_with("application/problem+json"),
        "unexpected content type: {content_type}"
    );

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], expected_code);
    assert_eq!(body["status"], expected_status);
    assert!(body["title"].is_string());
    assert!(body["detail"].is_string());
    assert!(body["trace_id"].is_string());
}
