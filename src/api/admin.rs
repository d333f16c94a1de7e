//! Admin review endpoints.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use crate::auth::CurrentUser;
use crate::error::AppResult;
use crate::models::{CenterBriefResponse, LectorBriefResponse};
use crate::services::AdminService;

/// Centers waiting for review.
#[utoipa::path(
    get,
    path = "/api/v1/admin/centers",
    tag = "Admin",
    responses(
        (status = 200, description = "Pending centers, oldest first", body = Vec<CenterBriefResponse>),
        (status = 401, description = "Caller is not an admin", body = crate::error::ErrorResponse),
    ),
    security(("bearer" = []))
)]
pub async fn pending_centers(
    user: CurrentUser,
    service: web::Data<AdminService>,
) -> AppResult<HttpResponse> {
    let response = service.find_pending_centers(&user.0).await?;
    Ok(HttpResponse::Ok().json(response))
}

/// Lectors waiting for review.
#[utoipa::path(
    get,
    path = "/api/v1/admin/lectors",
    tag = "Admin",
    responses(
        (status = 200, description = "Pending lectors, oldest first", body = Vec<LectorBriefResponse>),
        (status = 401, description = "Caller is not an admin", body = crate::error::ErrorResponse),
    ),
    security(("bearer" = []))
)]
pub async fn pending_lectors(
    user: CurrentUser,
    service: web::Data<AdminService>,
) -> AppResult<HttpResponse> {
    let response = service.find_pending_lectors(&user.0).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[utoipa::path(
    post,
    path = "/api/v1/admin/centers/{center_id}/approve",
    tag = "Admin",
    params(("center_id" = Uuid, Path, description = "Center UUID")),
    responses(
        (status = 200, description = "Center approved", body = CenterBriefResponse),
        (status = 400, description = "Center missing or already reviewed", body = crate::error::ErrorResponse),
        (status = 401, description = "Caller is not an admin", body = crate::error::ErrorResponse),
    ),
    security(("bearer" = []))
)]
pub async fn approve_center(
    user: CurrentUser,
    service: web::Data<AdminService>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let response = service.approve_center(&user.0, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[utoipa::path(
    post,
    path = "/api/v1/admin/centers/{center_id}/reject",
    tag = "Admin",
    params(("center_id" = Uuid, Path, description = "Center UUID")),
    responses(
        (status = 204, description = "Center rejected"),
        (status = 400, description = "Center missing or already reviewed", body = crate::error::ErrorResponse),
        (status = 401, description = "Caller is not an admin", body = crate::error::ErrorResponse),
    ),
    security(("bearer" = []))
)]
pub async fn reject_center(
    user: CurrentUser,
    service: web::Data<AdminService>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    service.reject_center(&user.0, path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[utoipa::path(
    post,
    path = "/api/v1/admin/lectors/{lector_id}/approve",
    tag = "Admin",
    params(("lector_id" = Uuid, Path, description = "Lector UUID")),
    responses(
        (status = 200, description = "Lector approved", body = LectorBriefResponse),
        (status = 400, description = "Lector missing or already reviewed", body = crate::error::ErrorResponse),
        (status = 401, description = "Caller is not an admin", body = crate::error::ErrorResponse),
    ),
    security(("bearer" = []))
)]
pub async fn approve_lector(
    user: CurrentUser,
    service: web::Data<AdminService>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let response = service.approve_lector(&user.0, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[utoipa::path(
    post,
    path = "/api/v1/admin/lectors/{lector_id}/reject",
    tag = "Admin",
    params(("lector_id" = Uuid, Path, description = "Lector UUID")),
    responses(
        (status = 204, description = "Lector rejected"),
        (status = 400, description = "Lector missing or already reviewed", body = crate::error::ErrorResponse),
        (status = 401, description = "Caller is not an admin", body = crate::error::ErrorResponse),
    ),
    security(("bearer" = []))
)]
pub async fn reject_lector(
    user: CurrentUser,
    service: web::Data<AdminService>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    service.reject_lector(&user.0, path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/admin/centers").route(web::get().to(pending_centers)))
        .service(web::resource("/admin/lectors").route(web::get().to(pending_lectors)))
        .service(
            web::resource("/admin/centers/{center_id}/approve")
                .route(web::post().to(approve_center)),
        )
        .service(
            web::resource("/admin/centers/{center_id}/reject").route(web::post().to(reject_center)),
        )
        .service(
            web::resource("/admin/lectors/{lector_id}/approve")
                .route(web::post().to(approve_lector)),
        )
        .service(
            web::resource("/admin/lectors/{lector_id}/reject").route(web::post().to(reject_lector)),
        );
}
