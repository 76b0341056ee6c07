use actix_web::{web, HttpResponse};
use serde::Serialize;
use serde_json::Value;

use crate::error::AppError;
use crate::extractors::CurrentUser;
use crate::state::app_state::AppState;

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
}

/// Exchange a JSON credentials body for a signed token.
///
/// The backend treats every credential problem as "no token"; at the HTTP
/// edge that becomes a 401 so the admin UI can show a login failure.
async fn login(
    body: web::Json<Value>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    match app_state.auth.auth_login(&body).await? {
        Some(token) => Ok(HttpResponse::Ok().json(LoginResponse { token })),
        None => Err(AppError::unauthorized()),
    }
}

/// Return the validated claims for the presented bearer token.
async fn check(user: CurrentUser) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(user.claims))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/login").route(web::post().to(login)))
        .service(web::resource("/check").route(web::get().to(check)));
}
