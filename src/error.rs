//! Domain error types for the Claon admin server.
//!
//! Every failure a handler can surface carries a stable [`ErrorCode`] that clients
//! match on, plus a human readable message.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;
use std::fmt;

/// Stable error codes returned in the `error` field of every error body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    NoneAdminAccount,
    NotAccessible,
    InvalidJwt,
    WrongOauthToken,
    DuplicatedNickname,
    UserAlreadySignedUp,
    DataDoesNotExist,
    RowAlreadyExist,
    AlreadyReviewed,
    InvalidFormat,
    InternalServerError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NoneAdminAccount => "NONE_ADMIN_ACCOUNT",
            Self::NotAccessible => "NOT_ACCESSIBLE",
            Self::InvalidJwt => "INVALID_JWT",
            Self::WrongOauthToken => "WRONG_OAUTH_TOKEN",
            Self::DuplicatedNickname => "DUPLICATED_NICKNAME",
            Self::UserAlreadySignedUp => "USER_ALREADY_SIGNED_UP",
            Self::DataDoesNotExist => "DATA_DOES_NOT_EXIST",
            Self::RowAlreadyExist => "ROW_ALREADY_EXIST",
            Self::AlreadyReviewed => "ALREADY_REVIEWED",
            Self::InvalidFormat => "INVALID_FORMAT",
            Self::InternalServerError => "INTERNAL_SERVER_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Application-level errors.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Caller lacks the role or ownership the operation needs
    #[error("{1}")]
    Unauthorized(ErrorCode, String),

    /// Request is well-formed HTTP but violates a business rule
    #[error("{1}")]
    BadRequest(ErrorCode, String),

    /// Requested resource does not exist
    #[error("{1}")]
    NotFound(ErrorCode, String),

    /// Database operation failed
    #[error("Database error: {0}")]
    Database(String),

    /// Storage (S3) operation failed
    #[error("Storage error: {0}")]
    Storage(String),

    /// Any other infrastructure failure
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn unauthorized(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::Unauthorized(code, message.into())
    }

    pub fn bad_request(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::BadRequest(code, message.into())
    }

    pub fn not_found(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::NotFound(code, message.into())
    }

    pub fn invalid_format(message: impl Into<String>) -> Self {
        Self::BadRequest(ErrorCode::InvalidFormat, message.into())
    }

    /// The wire code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Unauthorized(code, _) | Self::BadRequest(code, _) | Self::NotFound(code, _) => {
                *code
            }
            Self::Database(_) | Self::Storage(_) | Self::Internal(_) => {
                ErrorCode::InternalServerError
            }
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Unauthorized(..) => StatusCode::UNAUTHORIZED,
            AppError::BadRequest(..) => StatusCode::BAD_REQUEST,
            AppError::NotFound(..) => StatusCode::NOT_FOUND,
            AppError::Database(_) | AppError::Storage(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            AppError::Database(err_str) => {
                tracing::error!("Database error: {}", err_str);
                "An internal database error occurred".to_string()
            }
            AppError::Storage(err_str) => {
                tracing::error!("Storage error: {}", err_str);
                "File storage is unavailable".to_string()
            }
            AppError::Internal(err_str) => {
                tracing::error!("Internal error: {}", err_str);
                "An internal error occurred".to_string()
            }
            _ => self.to_string(),
        };

        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.code().to_string(),
            message,
        })
    }
}

/// Error response body matching OpenAPI schema.
#[derive(Debug, serde::Serialize, serde::Deserialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

/// Convenience type alias for Results with AppError.
pub type AppResult<T> = Result<T, AppError>;

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::invalid_format(format!("JSON parsing error: {}", err))
    }
}

impl From<sea_orm::DbErr> for AppError {
    fn from(err: sea_orm::DbErr) -> Self {
        AppError::Database(err.to_string())
    }
}
