//! Domain models and request/response shapes for the Claon admin API.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::error::{AppError, AppResult};

pub mod auth;
pub mod center;
pub mod file;
pub mod lector;
pub mod post;
pub mod review;
pub mod user;
pub mod validation;

pub use auth::{JwtResponse, OAuthProvider, OAuthUserInfo, RequestUser, SignInRequest};
pub use center::{
    CenterAuthRequest, CenterBriefResponse, CenterFeeDto, CenterHoldDto, CenterNameResponse,
    CenterOperatingTimeDto, CenterResponse, CenterWallDto, WallType,
};
pub use file::{CenterUploadPurpose, FileUpload, LectorUploadPurpose, UploadFileResponse};
pub use lector::{
    LectorBriefResponse, LectorCareerDto, LectorCertificateDto, LectorContestDto, LectorRequest,
    LectorResponse,
};
pub use post::{ClimbingHistoryDto, PostBriefResponse, PostCountPerHold, PostSummaryResponse};
pub use review::{
    ReviewAnswerRequest, ReviewAnswerResponse, ReviewBriefResponse, ReviewSummaryResponse,
    ReviewTagCount,
};
pub use user::{IsDuplicatedNicknameResponse, Role, UserProfileDto, UserProfileResponse};

pub const DEFAULT_PAGE_SIZE: u64 = 50;
pub const MAX_PAGE_SIZE: u64 = 100;

/// Pagination query parameters (`?page=1&size=50`).
#[derive(Debug, Clone, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PaginationParams {
    /// 1-based page number
    pub page: Option<u64>,
    /// Items per page, 1 to 100
    pub size: Option<u64>,
}

impl PaginationParams {
    pub fn new(page: u64, size: u64) -> Self {
        Self {
            page: Some(page),
            size: Some(size),
        }
    }

    /// Resolve defaults and reject out-of-range values.
    pub fn resolve(&self) -> AppResult<PageRequest> {
        let page = self.page.unwrap_or(1);
        let size = self.size.unwrap_or(DEFAULT_PAGE_SIZE);

        if page < 1 {
            return Err(AppError::invalid_format("page must be at least 1"));
        }
        if !(1..=MAX_PAGE_SIZE).contains(&size) {
            return Err(AppError::invalid_format(format!(
                "size must be between 1 and {}",
                MAX_PAGE_SIZE
            )));
        }

        // Row offset must fit the database's signed 64-bit OFFSET.
        let offset = (page - 1)
            .checked_mul(size)
            .and_then(|offset| i64::try_from(offset).ok());
        let in_range = offset.is_some() && i64::try_from(page).is_ok();
        if !in_range {
            return Err(AppError::invalid_format(format!("page {} is out of range", page)));
        }

        Ok(PageRequest { page, size })
    }
}

/// Validated page coordinates handed to repositories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u64,
    pub size: u64,
}

impl PageRequest {
    /// Zero-based page index as SeaORM's paginator expects.
    pub fn index(&self) -> u64 {
        self.page - 1
    }
}

/// One page of repository results together with the total row count.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u64,
    pub size: u64,
    pub total: u64,
}

impl<T> Page<T> {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Paginated response envelope.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Pagination<T> {
    /// Next page number, or -1 on the last page
    pub next_page_num: i64,
    pub previous_page_num: i64,
    pub total_num: u64,
    pub results: Vec<T>,
}

impl<T> Pagination<T> {
    /// Wrap a page of raw rows, mapping each one to its response shape in order.
    pub fn from_page<E, F>(page: Page<E>, map: F) -> Self
    where
        F: FnMut(E) -> T,
    {
        let has_next = page.page.saturating_mul(page.size) < page.total;
        let current = i64::try_from(page.page).unwrap_or(i64::MAX);
        Pagination {
            next_page_num: if has_next { current.saturating_add(1) } else { -1 },
            previous_page_num: current - 1,
            total_num: page.total,
            results: page.items.into_iter().map(map).collect(),
        }
    }
}
