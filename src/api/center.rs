//! Center endpoints: lookup, search, deletion, uploads, posts, reviews and review answers.

use actix_multipart::Multipart;
use actix_web::{HttpResponse, web};
use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;

use crate::api::upload::{MaxUploadSize, read_file};
use crate::auth::CurrentUser;
use crate::error::{AppError, AppResult};
use crate::models::{
    CenterBriefResponse, CenterNameResponse, CenterResponse, CenterUploadPurpose, Pagination,
    PaginationParams, PostBriefResponse, PostSummaryResponse, ReviewAnswerRequest,
    ReviewAnswerResponse, ReviewBriefResponse, ReviewSummaryResponse, UploadFileResponse,
};
use crate::services::{CenterService, ReviewFilter};

/// Query for the posts list.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PostsQuery {
    /// First day, inclusive (YYYY-MM-DD)
    pub start: NaiveDate,
    /// Last day, inclusive (YYYY-MM-DD)
    pub end: NaiveDate,
    pub hold_id: Option<Uuid>,
    pub page: Option<u64>,
    pub size: Option<u64>,
}

/// Query for the reviews list.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ReviewsQuery {
    /// First day, inclusive (YYYY-MM-DD)
    pub start: NaiveDate,
    /// Last day, inclusive (YYYY-MM-DD)
    pub end: NaiveDate,
    pub tag: Option<String>,
    pub is_answered: Option<bool>,
    pub page: Option<u64>,
    pub size: Option<u64>,
}

/// Centers owned by the caller.
#[utoipa::path(
    get,
    path = "/api/v1/center",
    tag = "Center",
    params(PaginationParams),
    responses(
        (status = 200, description = "Owned centers", body = Pagination<CenterBriefResponse>),
        (status = 401, description = "Caller is not a center admin", body = crate::error::ErrorResponse),
        (status = 404, description = "No centers on this page", body = crate::error::ErrorResponse),
    ),
    security(("bearer" = []))
)]
pub async fn find_centers(
    user: CurrentUser,
    service: web::Data<CenterService>,
    query: web::Query<PaginationParams>,
) -> AppResult<HttpResponse> {
    let response = service.find_centers(&user.0, &query).await?;
    Ok(HttpResponse::Ok().json(response))
}

/// Search approved centers by name.
#[utoipa::path(
    get,
    path = "/api/v1/center/name/{name}",
    tag = "Center",
    params(("name" = String, Path, description = "Part of the center name")),
    responses(
        (status = 200, description = "Matching centers", body = Vec<CenterNameResponse>),
    ),
    security(("bearer" = []))
)]
pub async fn find_centers_by_name(
    _user: CurrentUser,
    service: web::Data<CenterService>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let response = service.find_centers_by_name(&path).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[utoipa::path(
    get,
    path = "/api/v1/center/{center_id}",
    tag = "Center",
    params(("center_id" = Uuid, Path, description = "Center UUID")),
    responses(
        (status = 200, description = "Center detail", body = CenterResponse),
        (status = 404, description = "Center not found", body = crate::error::ErrorResponse),
    ),
    security(("bearer" = []))
)]
pub async fn find_center(
    _user: CurrentUser,
    service: web::Data<CenterService>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let response = service.find_center(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}

/// Delete a center and everything it owns.
#[utoipa::path(
    delete,
    path = "/api/v1/center/{center_id}",
    tag = "Center",
    params(("center_id" = Uuid, Path, description = "Center UUID")),
    responses(
        (status = 200, description = "Deleted center", body = CenterResponse),
        (status = 401, description = "Caller does not own the center", body = crate::error::ErrorResponse),
        (status = 404, description = "Center not found", body = crate::error::ErrorResponse),
    ),
    security(("bearer" = []))
)]
pub async fn delete_center(
    user: CurrentUser,
    service: web::Data<CenterService>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let response = service.delete_center(&user.0, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}

/// Upload a center file (profile, image, fee table or proof).
#[utoipa::path(
    post,
    path = "/api/v1/center/{purpose}/file",
    tag = "Center",
    params(("purpose" = String, Path, description = "profile, image, fee or proof")),
    request_body(content_type = "multipart/form-data", description = "Image, or PDF for proofs"),
    responses(
        (status = 200, description = "Uploaded", body = UploadFileResponse),
        (status = 400, description = "Unknown purpose or unsupported file", body = crate::error::ErrorResponse),
    ),
    security(("bearer" = []))
)]
pub async fn upload_file(
    _user: CurrentUser,
    service: web::Data<CenterService>,
    max_size: web::Data<MaxUploadSize>,
    path: web::Path<String>,
    payload: Multipart,
) -> AppResult<HttpResponse> {
    let purpose = CenterUploadPurpose::parse(&path).ok_or_else(|| {
        AppError::invalid_format(format!("Unknown upload purpose '{}'", path.as_str()))
    })?;

    let upload = read_file(payload, max_size).await?;
    let response = service.upload_file(purpose, upload).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[utoipa::path(
    get,
    path = "/api/v1/center/{center_id}/posts",
    tag = "Center",
    params(("center_id" = Uuid, Path, description = "Center UUID"), PostsQuery),
    responses(
        (status = 200, description = "Posts, newest first", body = Pagination<PostBriefResponse>),
        (status = 401, description = "Caller does not own the center", body = crate::error::ErrorResponse),
        (status = 404, description = "Center not found", body = crate::error::ErrorResponse),
    ),
    security(("bearer" = []))
)]
pub async fn find_posts(
    user: CurrentUser,
    service: web::Data<CenterService>,
    path: web::Path<Uuid>,
    query: web::Query<PostsQuery>,
) -> AppResult<HttpResponse> {
    let query = query.into_inner();
    let params = PaginationParams {
        page: query.page,
        size: query.size,
    };
    let response = service
        .find_posts_by_center(
            &user.0,
            path.into_inner(),
            query.start,
            query.end,
            query.hold_id,
            &params,
        )
        .await?;
    Ok(HttpResponse::Ok().json(response))
}

#[utoipa::path(
    get,
    path = "/api/v1/center/{center_id}/posts/summary",
    tag = "Center",
    params(("center_id" = Uuid, Path, description = "Center UUID")),
    responses(
        (status = 200, description = "Post counts", body = PostSummaryResponse),
    ),
    security(("bearer" = []))
)]
pub async fn find_posts_summary(
    user: CurrentUser,
    service: web::Data<CenterService>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let response = service
        .find_posts_summary_by_center(&user.0, path.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(response))
}

#[utoipa::path(
    get,
    path = "/api/v1/center/{center_id}/reviews",
    tag = "Center",
    params(("center_id" = Uuid, Path, description = "Center UUID"), ReviewsQuery),
    responses(
        (status = 200, description = "Reviews, newest first", body = Pagination<ReviewBriefResponse>),
    ),
    security(("bearer" = []))
)]
pub async fn find_reviews(
    user: CurrentUser,
    service: web::Data<CenterService>,
    path: web::Path<Uuid>,
    query: web::Query<ReviewsQuery>,
) -> AppResult<HttpResponse> {
    let query = query.into_inner();
    let params = PaginationParams {
        page: query.page,
        size: query.size,
    };
    let filter = ReviewFilter {
        tag: query.tag,
        is_answered: query.is_answered,
    };
    let response = service
        .find_reviews_by_center(
            &user.0,
            path.into_inner(),
            query.start,
            query.end,
            &filter,
            &params,
        )
        .await?;
    Ok(HttpResponse::Ok().json(response))
}

#[utoipa::path(
    get,
    path = "/api/v1/center/{center_id}/reviews/summary",
    tag = "Center",
    params(("center_id" = Uuid, Path, description = "Center UUID")),
    responses(
        (status = 200, description = "Review counts", body = ReviewSummaryResponse),
    ),
    security(("bearer" = []))
)]
pub async fn find_reviews_summary(
    user: CurrentUser,
    service: web::Data<CenterService>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let response = service
        .find_reviews_summary_by_center(&user.0, path.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(response))
}

#[utoipa::path(
    post,
    path = "/api/v1/center/{center_id}/reviews/{review_id}",
    tag = "Center",
    params(
        ("center_id" = Uuid, Path, description = "Center UUID"),
        ("review_id" = Uuid, Path, description = "Review UUID")
    ),
    request_body = ReviewAnswerRequest,
    responses(
        (status = 201, description = "Answer created", body = ReviewAnswerResponse),
        (status = 400, description = "Review already answered", body = crate::error::ErrorResponse),
        (status = 404, description = "Review not found", body = crate::error::ErrorResponse),
    ),
    security(("bearer" = []))
)]
pub async fn create_review_answer(
    user: CurrentUser,
    service: web::Data<CenterService>,
    path: web::Path<(Uuid, Uuid)>,
    body: web::Json<ReviewAnswerRequest>,
) -> AppResult<HttpResponse> {
    let (center_id, review_id) = path.into_inner();
    let response = service
        .create_review_answer(&user.0, center_id, review_id, body.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(response))
}

#[utoipa::path(
    put,
    path = "/api/v1/center/{center_id}/reviews/{review_id}",
    tag = "Center",
    params(
        ("center_id" = Uuid, Path, description = "Center UUID"),
        ("review_id" = Uuid, Path, description = "Review UUID")
    ),
    request_body = ReviewAnswerRequest,
    responses(
        (status = 200, description = "Answer updated", body = ReviewAnswerResponse),
        (status = 404, description = "Review or answer not found", body = crate::error::ErrorResponse),
    ),
    security(("bearer" = []))
)]
pub async fn update_review_answer(
    user: CurrentUser,
    service: web::Data<CenterService>,
    path: web::Path<(Uuid, Uuid)>,
    body: web::Json<ReviewAnswerRequest>,
) -> AppResult<HttpResponse> {
    let (center_id, review_id) = path.into_inner();
    let response = service
        .update_review_answer(&user.0, center_id, review_id, body.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(response))
}

#[utoipa::path(
    delete,
    path = "/api/v1/center/{center_id}/reviews/{review_id}",
    tag = "Center",
    params(
        ("center_id" = Uuid, Path, description = "Center UUID"),
        ("review_id" = Uuid, Path, description = "Review UUID")
    ),
    responses(
        (status = 204, description = "Answer deleted"),
        (status = 404, description = "Review or answer not found", body = crate::error::ErrorResponse),
    ),
    security(("bearer" = []))
)]
pub async fn delete_review_answer(
    user: CurrentUser,
    service: web::Data<CenterService>,
    path: web::Path<(Uuid, Uuid)>,
) -> AppResult<HttpResponse> {
    let (center_id, review_id) = path.into_inner();
    service
        .delete_review_answer(&user.0, center_id, review_id)
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/center").route(web::get().to(find_centers)))
        .service(web::resource("/center/name/{name}").route(web::get().to(find_centers_by_name)))
        .service(web::resource("/center/{purpose}/file").route(web::post().to(upload_file)))
        .service(
            web::resource("/center/{center_id}")
                .route(web::get().to(find_center))
                .route(web::delete().to(delete_center)),
        )
        .service(web::resource("/center/{center_id}/posts").route(web::get().to(find_posts)))
        .service(
            web::resource("/center/{center_id}/posts/summary")
                .route(web::get().to(find_posts_summary)),
        )
        .service(web::resource("/center/{center_id}/reviews").route(web::get().to(find_reviews)))
        .service(
            web::resource("/center/{center_id}/reviews/summary")
                .route(web::get().to(find_reviews_summary)),
        )
        .service(
            web::resource("/center/{center_id}/reviews/{review_id}")
                .route(web::post().to(create_review_answer))
                .route(web::put().to(update_review_answer))
                .route(web::delete().to(delete_review_answer)),
        );
}
