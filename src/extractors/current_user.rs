use actix_web::{dev::Payload, http::header, web, FromRequest, HttpRequest};

use crate::auth::Claims;
use crate::error::AppError;
use crate::state::app_state::AppState;

/// Authenticated principal, resolved by running the auth backend's check
/// against the request's `Authorization` header.
///
/// Missing header, wrong scheme, or a principal that fails the existence
/// check all surface as 401; a malformed or expired token is a 400 from
/// the backend and passes through unchanged.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub claims: Claims,
}

impl FromRequest for CurrentUser {
    type Error = AppError;
    type Future = std::pin::Pin<Box<dyn std::future::Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let req = req.clone();

        Box::pin(async move {
            let app_state = req
                .app_data::<web::Data<AppState>>()
                .ok_or_else(|| AppError::internal("AppState not available".to_string()))?;

            let auth_value = req
                .headers()
                .get(header::AUTHORIZATION)
                .and_then(|h| h.to_str().ok())
                .unwrap_or_default();

            match app_state.auth.auth_check(auth_value).await? {
                Some(claims) => Ok(CurrentUser { claims }),
                None => Err(AppError::unauthorized()),
            }
        })
    }
}
