//! API endpoint modules.

pub mod admin;
pub mod auth;
pub mod center;
pub mod health;
pub mod openapi;
pub mod upload;
pub mod user;

use actix_web::web;

use crate::error::AppError;

pub use admin::configure_routes as configure_admin_routes;
pub use auth::configure_routes as configure_auth_routes;
pub use center::configure_routes as configure_center_routes;
pub use health::configure_health_routes;
pub use openapi::ApiDoc;
pub use upload::MaxUploadSize;
pub use user::configure_routes as configure_user_routes;

/// JSON bodies that fail to parse answer with the INVALID_FORMAT error body.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| AppError::invalid_format(err.to_string()).into())
}

/// Malformed query strings answer with the INVALID_FORMAT error body.
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default()
        .error_handler(|err, _req| AppError::invalid_format(err.to_string()).into())
}

/// Every `/api/v1` route. The development-only test sign-in is included when
/// `allow_test_sign_in` is set.
pub fn configure_api(cfg: &mut web::ServiceConfig, allow_test_sign_in: bool) {
    configure_health_routes(cfg);
    configure_auth_routes(cfg, allow_test_sign_in);
    configure_user_routes(cfg);
    configure_center_routes(cfg);
    configure_admin_routes(cfg);
}
