//! Actix-web extractor resolving the bearer access token into the request subject.

use actix_web::dev::Payload;
use actix_web::http::header;
use actix_web::{FromRequest, HttpRequest, web};
use secrecy::{ExposeSecret, SecretString};
use std::future::{Ready, ready};

use crate::error::{AppError, ErrorCode};
use crate::models::RequestUser;
use crate::services::JwtManager;

/// Pull the bearer token out of the Authorization header, wrapped so it is never logged.
fn extract_bearer_token(req: &HttpRequest) -> Option<SecretString> {
    req.headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(|s| SecretString::from(s.trim().to_string()))
}

/// Extractor that requires a valid access token.
///
/// ```ignore
/// async fn handler(user: CurrentUser) -> impl Responder {
///     // user.0 is the authenticated subject
/// }
/// ```
pub struct CurrentUser(pub RequestUser);

impl FromRequest for CurrentUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let Some(jwt) = req.app_data::<web::Data<JwtManager>>() else {
            return ready(Err(AppError::Internal(
                "JWT manager not configured".to_string(),
            )));
        };

        let Some(token) = extract_bearer_token(req) else {
            return ready(Err(AppError::unauthorized(
                ErrorCode::InvalidJwt,
                "Missing access token. Provide Authorization: Bearer <token>.",
            )));
        };

        ready(
            jwt.verify_access_token(token.expose_secret())
                .map(CurrentUser),
        )
    }
}
