use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use async_trait::async_trait;
use serde_json::{Map, Value};

use gitadmin::middleware::cors::cors_middleware;
use gitadmin::middleware::request_trace::RequestTrace;
use gitadmin::{
    health, routes, telemetry, AppError, AppState, AuthBackend, AuthHooks, Config, ServerOptions,
};

/// Single-credential hooks for the dev server: one admin login/password
/// pair from the environment. Real deployments embed the library and
/// supply their own `AuthHooks`.
struct EnvCredentialHooks {
    login: String,
    password: String,
}

#[async_trait]
impl AuthHooks for EnvCredentialHooks {
    async fn check(&self, login: &str) -> Result<bool, AppError> {
        Ok(login == self.login)
    }

    async fn verify_password(
        &self,
        login: &str,
        password: &str,
    ) -> Result<Option<Map<String, Value>>, AppError> {
        if login == self.login && password == self.password {
            Ok(Some(Map::new()))
        } else {
            Ok(None)
        }
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    // Environment variables must be set by the runtime environment:
    // - Docker: via env_file / --env-file
    // - Local dev: source an env file manually
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {e}");
            std::process::exit(1);
        }
    };

    let admin_login = std::env::var("GITADMIN_ADMIN_LOGIN").unwrap_or_else(|_| {
        eprintln!("❌ GITADMIN_ADMIN_LOGIN must be set");
        std::process::exit(1);
    });
    let admin_password = std::env::var("GITADMIN_ADMIN_PASSWORD").unwrap_or_else(|_| {
        eprintln!("❌ GITADMIN_ADMIN_PASSWORD must be set");
        std::process::exit(1);
    });

    println!(
        "🚀 Starting gitadmin on http://{}:{}{}",
        config.host, config.port, config.prefix
    );

    let hooks = Arc::new(EnvCredentialHooks {
        login: admin_login,
        password: admin_password,
    });
    let auth = AuthBackend::new(config.security_config(), hooks);
    let options = ServerOptions::new(config.project_id.clone()).with_prefix(config.prefix.clone());

    let data = web::Data::new(AppState::new(auth, options));
    let prefix = config.prefix.clone();

    HttpServer::new(move || {
        App::new()
            .wrap(cors_middleware())
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(health::configure)
            .service(web::scope(&prefix).configure(routes::configure))
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
