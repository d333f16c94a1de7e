//! User-side upload endpoints.

use actix_multipart::Multipart;
use actix_web::{HttpResponse, web};

use crate::api::upload::{MaxUploadSize, read_file};
use crate::auth::CurrentUser;
use crate::error::{AppError, AppResult};
use crate::models::{LectorUploadPurpose, UploadFileResponse};
use crate::services::UserService;

/// Upload a profile image.
#[utoipa::path(
    post,
    path = "/api/v1/user/profile",
    tag = "User",
    request_body(content_type = "multipart/form-data", description = "Image file"),
    responses(
        (status = 200, description = "Uploaded", body = UploadFileResponse),
        (status = 400, description = "Empty, oversized or unsupported file", body = crate::error::ErrorResponse),
    ),
    security(("bearer" = []))
)]
pub async fn upload_profile(
    _user: CurrentUser,
    service: web::Data<UserService>,
    max_size: web::Data<MaxUploadSize>,
    payload: Multipart,
) -> AppResult<HttpResponse> {
    let upload = read_file(payload, max_size).await?;
    let response = service.upload_profile(upload).await?;
    Ok(HttpResponse::Ok().json(response))
}

/// Upload a lector file (proof documents).
#[utoipa::path(
    post,
    path = "/api/v1/user/{purpose}/file",
    tag = "User",
    params(
        ("purpose" = String, Path, description = "Upload purpose: proof")
    ),
    request_body(content_type = "multipart/form-data", description = "Image or PDF file"),
    responses(
        (status = 200, description = "Uploaded", body = UploadFileResponse),
        (status = 400, description = "Unknown purpose or unsupported file", body = crate::error::ErrorResponse),
    ),
    security(("bearer" = []))
)]
pub async fn upload_file(
    _user: CurrentUser,
    service: web::Data<UserService>,
    max_size: web::Data<MaxUploadSize>,
    path: web::Path<String>,
    payload: Multipart,
) -> AppResult<HttpResponse> {
    let purpose = LectorUploadPurpose::parse(&path).ok_or_else(|| {
        AppError::invalid_format(format!("Unknown upload purpose '{}'", path.as_str()))
    })?;

    let upload = read_file(payload, max_size).await?;
    let response = service.upload_file(purpose, upload).await?;
    Ok(HttpResponse::Ok().json(response))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/user/profile").route(web::post().to(upload_profile)))
        .service(web::resource("/user/{purpose}/file").route(web::post().to(upload_file)));
}
