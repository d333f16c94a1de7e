//! Sign-in, sign-up and nickname endpoints.

use actix_web::{HttpResponse, web};

use crate::auth::CurrentUser;
use crate::config::{ACCESS_TOKEN_HEADER, REFRESH_TOKEN_HEADER};
use crate::error::{AppError, AppResult};
use crate::models::{
    CenterAuthRequest, CenterResponse, IsDuplicatedNicknameResponse, JwtResponse, LectorRequest,
    LectorResponse, OAuthProvider, SignInRequest,
};
use crate::services::UserService;

fn token_response(jwt: JwtResponse) -> HttpResponse {
    HttpResponse::Ok()
        .insert_header((ACCESS_TOKEN_HEADER, jwt.access_token.clone()))
        .insert_header((REFRESH_TOKEN_HEADER, jwt.refresh_token.clone()))
        .json(jwt)
}

/// Sign in with an OAuth provider token.
///
/// First-time identities are created with role PENDING.
#[utoipa::path(
    post,
    path = "/api/v1/auth/{provider}/sign-in",
    tag = "Auth",
    params(
        ("provider" = String, Path, description = "OAuth provider: google or kakao")
    ),
    request_body = SignInRequest,
    responses(
        (status = 200, description = "Signed in", body = JwtResponse),
        (status = 400, description = "Unknown provider", body = crate::error::ErrorResponse),
        (status = 401, description = "Provider rejected the token", body = crate::error::ErrorResponse),
    )
)]
pub async fn sign_in(
    service: web::Data<UserService>,
    path: web::Path<String>,
    body: web::Json<SignInRequest>,
) -> AppResult<HttpResponse> {
    let provider = OAuthProvider::parse(&path).ok_or_else(|| {
        AppError::invalid_format(format!("Unknown OAuth provider '{}'", path.as_str()))
    })?;

    let jwt = service.sign_in(provider, body.into_inner()).await?;
    Ok(token_response(jwt))
}

/// Development-only sign-in using the token as the account id.
#[utoipa::path(
    post,
    path = "/api/v1/auth/test-sign-in",
    tag = "Auth",
    request_body = SignInRequest,
    responses(
        (status = 200, description = "Signed in", body = JwtResponse),
    )
)]
pub async fn test_sign_in(
    service: web::Data<UserService>,
    body: web::Json<SignInRequest>,
) -> AppResult<HttpResponse> {
    let jwt = service.test_sign_in(body.into_inner()).await?;
    Ok(token_response(jwt))
}

/// Sign up as a center admin, submitting the center for review.
#[utoipa::path(
    post,
    path = "/api/v1/auth/center/sign-up",
    tag = "Auth",
    request_body = CenterAuthRequest,
    responses(
        (status = 201, description = "Center submitted", body = CenterResponse),
        (status = 400, description = "Invalid request, duplicated nickname or already signed up", body = crate::error::ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = crate::error::ErrorResponse),
    ),
    security(("bearer" = []))
)]
pub async fn sign_up_center(
    user: CurrentUser,
    service: web::Data<UserService>,
    body: web::Json<CenterAuthRequest>,
) -> AppResult<HttpResponse> {
    let response = service.sign_up_center(&user.0, body.into_inner()).await?;
    Ok(HttpResponse::Created().json(response))
}

/// Sign up as a lector, submitting the profile for review.
#[utoipa::path(
    post,
    path = "/api/v1/auth/lector/sign-up",
    tag = "Auth",
    request_body = LectorRequest,
    responses(
        (status = 201, description = "Lector submitted", body = LectorResponse),
        (status = 400, description = "Invalid request, duplicated nickname or already signed up", body = crate::error::ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = crate::error::ErrorResponse),
    ),
    security(("bearer" = []))
)]
pub async fn sign_up_lector(
    user: CurrentUser,
    service: web::Data<UserService>,
    body: web::Json<LectorRequest>,
) -> AppResult<HttpResponse> {
    let response = service.sign_up_lector(&user.0, body.into_inner()).await?;
    Ok(HttpResponse::Created().json(response))
}

#[utoipa::path(
    get,
    path = "/api/v1/auth/nickname/{nickname}/is-duplicated",
    tag = "Auth",
    params(
        ("nickname" = String, Path, description = "Nickname to check")
    ),
    responses(
        (status = 200, description = "Whether the nickname is taken", body = IsDuplicatedNicknameResponse),
    )
)]
pub async fn is_duplicated_nickname(
    service: web::Data<UserService>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let response = service.check_nickname_duplication(&path).await?;
    Ok(HttpResponse::Ok().json(response))
}

/// Register auth routes. The test sign-in route only exists in development.
pub fn configure_routes(cfg: &mut web::ServiceConfig, allow_test_sign_in: bool) {
    if allow_test_sign_in {
        cfg.service(web::resource("/auth/test-sign-in").route(web::post().to(test_sign_in)));
    }
    cfg.service(web::resource("/auth/center/sign-up").route(web::post().to(sign_up_center)))
        .service(web::resource("/auth/lector/sign-up").route(web::post().to(sign_up_lector)))
        .service(
            web::resource("/auth/nickname/{nickname}/is-duplicated")
                .route(web::get().to(is_duplicated_nickname)),
        )
        .service(web::resource("/auth/{provider}/sign-in").route(web::post().to(sign_in)));
}
