//! OpenAPI documentation configuration.

use utoipa::OpenApi;

use crate::{api, error, models};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Claon Admin Server",
        version = "0.1.0",
        description = "Admin API for climbing centers: sign-up, center management, posts and reviews, and admin review"
    ),
    servers(
        (url = "/", description = "Local server")
    ),
    paths(
        // Health
        api::health::health,
        api::health::ready,
        // Auth
        api::auth::sign_in,
        api::auth::test_sign_in,
        api::auth::sign_up_center,
        api::auth::sign_up_lector,
        api::auth::is_duplicated_nickname,
        // User
        api::user::upload_profile,
        api::user::upload_file,
        // Center
        api::center::find_centers,
        api::center::find_centers_by_name,
        api::center::find_center,
        api::center::delete_center,
        api::center::upload_file,
        api::center::find_posts,
        api::center::find_posts_summary,
        api::center::find_reviews,
        api::center::find_reviews_summary,
        api::center::create_review_answer,
        api::center::update_review_answer,
        api::center::delete_review_answer,
        // Admin
        api::admin::pending_centers,
        api::admin::pending_lectors,
        api::admin::approve_center,
        api::admin::reject_center,
        api::admin::approve_lector,
        api::admin::reject_lector,
    ),
    components(
        schemas(
            error::ErrorResponse,
            api::health::HealthResponse,
            api::health::ReadyResponse,
            // Auth and user
            models::Role,
            models::OAuthProvider,
            models::SignInRequest,
            models::JwtResponse,
            models::UserProfileDto,
            models::UserProfileResponse,
            models::IsDuplicatedNicknameResponse,
            models::UploadFileResponse,
            // Center
            models::CenterAuthRequest,
            models::CenterResponse,
            models::CenterBriefResponse,
            models::CenterNameResponse,
            models::CenterOperatingTimeDto,
            models::CenterFeeDto,
            models::CenterHoldDto,
            models::CenterWallDto,
            models::WallType,
            // Lector
            models::LectorRequest,
            models::LectorResponse,
            models::LectorBriefResponse,
            models::LectorContestDto,
            models::LectorCertificateDto,
            models::LectorCareerDto,
            // Posts and reviews
            models::ClimbingHistoryDto,
            models::PostBriefResponse,
            models::PostCountPerHold,
            models::PostSummaryResponse,
            models::ReviewAnswerRequest,
            models::ReviewAnswerResponse,
            models::ReviewBriefResponse,
            models::ReviewTagCount,
            models::ReviewSummaryResponse,
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "Auth", description = "Sign-in and sign-up"),
        (name = "User", description = "User uploads"),
        (name = "Center", description = "Center management, posts and reviews"),
        (name = "Admin", description = "Review of center and lector sign-ups")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

/// Bearer access token scheme.
struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::HttpBuilder::new()
                        .scheme(utoipa::openapi::security::HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
