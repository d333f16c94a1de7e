//! Center lookups, deletion, uploads and the center admin's posts and reviews views.

use std::sync::Arc;

use chrono::{Duration, NaiveDate, NaiveTime, Utc};
use sea_orm::TransactionTrait;
use tracing::info;
use uuid::Uuid;

use crate::auth::{authorize, ensure_owner};
use crate::db::{
    DbPool, center_fees, center_holds, center_walls, centers, day_range, posts, review_answers,
    reviews,
};
use crate::entity::{center, review};
use crate::error::{AppError, AppResult, ErrorCode};
use crate::models::{
    CenterBriefResponse, CenterNameResponse, CenterResponse, CenterUploadPurpose, FileUpload,
    Pagination, PaginationParams, PostBriefResponse, PostCountPerHold, PostSummaryResponse,
    RequestUser, ReviewAnswerRequest, ReviewAnswerResponse, ReviewBriefResponse,
    ReviewSummaryResponse, ReviewTagCount, Role, UploadFileResponse,
};
use crate::services::storage::{FileStorage, store_upload};

/// Optional filters for the reviews list.
#[derive(Debug, Clone, Default)]
pub struct ReviewFilter {
    pub tag: Option<String>,
    pub is_answered: Option<bool>,
}

fn center_not_found(center_id: Uuid) -> AppError {
    AppError::not_found(
        ErrorCode::DataDoesNotExist,
        format!("Center {} not found", center_id),
    )
}

fn check_date_order(start: NaiveDate, end: NaiveDate) -> AppResult<()> {
    if start > end {
        return Err(AppError::invalid_format("start date is after end date"));
    }
    Ok(())
}

#[derive(Clone)]
pub struct CenterService {
    pool: DbPool,
    storage: Arc<dyn FileStorage>,
    max_upload_size: usize,
}

impl CenterService {
    pub fn new(pool: DbPool, storage: Arc<dyn FileStorage>, max_upload_size: usize) -> Self {
        Self {
            pool,
            storage,
            max_upload_size,
        }
    }

    /// Load a center the subject manages: CENTER_ADMIN role, existing center, owned by them.
    async fn owned_center(&self, subject: &RequestUser, center_id: Uuid) -> AppResult<center::Model> {
        authorize(subject, Role::CenterAdmin)?;
        let center = centers::find_by_id(self.pool.connection(), center_id)
            .await?
            .ok_or_else(|| center_not_found(center_id))?;
        ensure_owner(subject, center.user_id)?;
        Ok(center)
    }

    async fn assemble(&self, center: &center::Model) -> AppResult<CenterResponse> {
        let db = self.pool.connection();
        let fees = center_fees::find_all_by_center_id(db, center.id).await?;
        let holds = center_holds::find_all_by_center_id(db, center.id).await?;
        let walls = center_walls::find_all_by_center_id(db, center.id).await?;
        Ok(CenterResponse::from_entity(center, &fees, &holds, &walls))
    }

    /// Approved centers whose name contains `name`.
    pub async fn find_centers_by_name(&self, name: &str) -> AppResult<Vec<CenterNameResponse>> {
        let found = centers::find_by_name(self.pool.connection(), name.trim()).await?;
        Ok(found.into_iter().map(CenterNameResponse::from_entity).collect())
    }

    pub async fn find_center(&self, center_id: Uuid) -> AppResult<CenterResponse> {
        let center = centers::find_by_id(self.pool.connection(), center_id)
            .await?
            .ok_or_else(|| center_not_found(center_id))?;
        self.assemble(&center).await
    }

    /// Centers owned by the subject. An empty page is reported as missing data.
    pub async fn find_centers(
        &self,
        subject: &RequestUser,
        params: &PaginationParams,
    ) -> AppResult<Pagination<CenterBriefResponse>> {
        authorize(subject, Role::CenterAdmin)?;
        let page_request = params.resolve()?;

        let page =
            centers::find_all_by_user_id(self.pool.connection(), subject.id, page_request).await?;
        if page.is_empty() {
            return Err(AppError::not_found(
                ErrorCode::DataDoesNotExist,
                "No centers on this page",
            ));
        }

        Ok(Pagination::from_page(page, CenterBriefResponse::from_entity))
    }

    /// Delete a center and everything it owns. Allowed for its owner and for admins.
    pub async fn delete_center(
        &self,
        subject: &RequestUser,
        center_id: Uuid,
    ) -> AppResult<CenterResponse> {
        if !matches!(subject.role, Role::CenterAdmin | Role::Admin) {
            return Err(AppError::unauthorized(
                ErrorCode::NotAccessible,
                "Only center admins can delete centers",
            ));
        }

        let center = centers::find_by_id(self.pool.connection(), center_id)
            .await?
            .ok_or_else(|| center_not_found(center_id))?;
        ensure_owner(subject, center.user_id)?;

        let response = self.assemble(&center).await?;

        let txn = self.pool.connection().begin().await?;
        centers::delete(&txn, center.id).await?;
        txn.commit().await?;

        info!(center_id = %center_id, deleted_by = %subject.id, "Center deleted");
        Ok(response)
    }

    pub async fn upload_file(
        &self,
        purpose: CenterUploadPurpose,
        upload: FileUpload,
    ) -> AppResult<UploadFileResponse> {
        let file_url = store_upload(
            self.storage.as_ref(),
            self.max_upload_size,
            "center",
            purpose.as_str(),
            purpose.accepts_documents(),
            upload,
        )
        .await?;
        Ok(UploadFileResponse { file_url })
    }

    /// Posts written at the center between `start` and `end` (whole days), newest first.
    pub async fn find_posts_by_center(
        &self,
        subject: &RequestUser,
        center_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
        hold_id: Option<Uuid>,
        params: &PaginationParams,
    ) -> AppResult<Pagination<PostBriefResponse>> {
        let center = self.owned_center(subject, center_id).await?;
        check_date_order(start, end)?;
        let page_request = params.resolve()?;

        let db = self.pool.connection();
        let (from, until) = day_range(start, end);
        let page =
            posts::find_by_center_and_date(db, center.id, from, until, hold_id, page_request)
                .await?;

        let post_ids: Vec<Uuid> = page.items.iter().map(|p| p.id).collect();
        let histories = posts::find_histories_by_post_ids(db, &post_ids).await?;

        Ok(Pagination::from_page(page, |post| {
            PostBriefResponse::from_entity(post, &histories)
        }))
    }

    pub async fn find_posts_summary_by_center(
        &self,
        subject: &RequestUser,
        center_id: Uuid,
    ) -> AppResult<PostSummaryResponse> {
        let center = self.owned_center(subject, center_id).await?;
        let db = self.pool.connection();

        let now = Utc::now();
        let today = now.date_naive().and_time(NaiveTime::MIN).and_utc();

        let count_total = posts::count_by_center(db, center.id, None).await?;
        let count_today = posts::count_by_center(db, center.id, Some(today)).await?;
        let count_per_week =
            posts::count_by_center(db, center.id, Some(now - Duration::days(7))).await?;
        let count_per_month =
            posts::count_by_center(db, center.id, Some(now - Duration::days(30))).await?;

        let holds = center_holds::find_all_by_center_id(db, center.id).await?;
        let count_per_hold = posts::count_per_hold(db, &holds)
            .await?
            .into_iter()
            .map(|(hold, count)| PostCountPerHold {
                hold_id: hold.id,
                hold_name: hold.name,
                count,
            })
            .collect();

        Ok(PostSummaryResponse {
            center_id: center.id,
            center_name: center.name,
            count_total,
            count_today,
            count_per_week,
            count_per_month,
            count_per_hold,
        })
    }

    /// Reviews of the center between `start` and `end` (whole days), newest first.
    pub async fn find_reviews_by_center(
        &self,
        subject: &RequestUser,
        center_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
        filter: &ReviewFilter,
        params: &PaginationParams,
    ) -> AppResult<Pagination<ReviewBriefResponse>> {
        let center = self.owned_center(subject, center_id).await?;
        check_date_order(start, end)?;
        let page_request = params.resolve()?;

        let db = self.pool.connection();
        let (from, until) = day_range(start, end);
        let page = reviews::find_by_center_and_date(
            db,
            center.id,
            from,
            until,
            filter.tag.as_deref(),
            filter.is_answered,
            page_request,
        )
        .await?;

        let review_ids: Vec<Uuid> = page.items.iter().map(|r| r.id).collect();
        let tags = reviews::find_tags_by_review_ids(db, &review_ids).await?;
        let answers = review_answers::find_by_review_ids(db, &review_ids).await?;

        Ok(Pagination::from_page(page, |review| {
            ReviewBriefResponse::from_entity(review, &tags, &answers)
        }))
    }

    pub async fn find_reviews_summary_by_center(
        &self,
        subject: &RequestUser,
        center_id: Uuid,
    ) -> AppResult<ReviewSummaryResponse> {
        let center = self.owned_center(subject, center_id).await?;
        let db = self.pool.connection();

        let count_total = reviews::count_by_center(db, center.id).await?;
        let count_answered = reviews::count_answered_by_center(db, center.id).await?;
        let count_per_tag = reviews::count_per_tag(db, center.id)
            .await?
            .into_iter()
            .map(|(tag, count)| ReviewTagCount { tag, count })
            .collect();

        Ok(ReviewSummaryResponse {
            center_id: center.id,
            center_name: center.name,
            count_total,
            count_answered,
            count_not_answered: count_total.saturating_sub(count_answered),
            count_per_tag,
        })
    }

    async fn review_of_center(&self, center_id: Uuid, review_id: Uuid) -> AppResult<review::Model> {
        reviews::find_by_id(self.pool.connection(), review_id)
            .await?
            .filter(|r| r.center_id == center_id)
            .ok_or_else(|| {
                AppError::not_found(
                    ErrorCode::DataDoesNotExist,
                    format!("Review {} not found for center {}", review_id, center_id),
                )
            })
    }

    pub async fn create_review_answer(
        &self,
        subject: &RequestUser,
        center_id: Uuid,
        review_id: Uuid,
        request: ReviewAnswerRequest,
    ) -> AppResult<ReviewAnswerResponse> {
        let center = self.owned_center(subject, center_id).await?;
        request.validate()?;
        let review = self.review_of_center(center.id, review_id).await?;

        let db = self.pool.connection();
        if review_answers::find_by_review_id(db, review.id).await?.is_some() {
            return Err(AppError::bad_request(
                ErrorCode::RowAlreadyExist,
                format!("Review {} already has an answer", review.id),
            ));
        }

        let answer = review_answers::save(db, review.id, &request.answer_content).await?;
        info!(review_id = %review.id, "Review answered");
        Ok(ReviewAnswerResponse::from_entity(answer))
    }

    pub async fn update_review_answer(
        &self,
        subject: &RequestUser,
        center_id: Uuid,
        review_id: Uuid,
        request: ReviewAnswerRequest,
    ) -> AppResult<ReviewAnswerResponse> {
        let center = self.owned_center(subject, center_id).await?;
        request.validate()?;
        let review = self.review_of_center(center.id, review_id).await?;

        let db = self.pool.connection();
        let answer = review_answers::find_by_review_id(db, review.id)
            .await?
            .ok_or_else(|| answer_not_found(review.id))?;

        let answer = review_answers::update_content(db, answer, &request.answer_content).await?;
        Ok(ReviewAnswerResponse::from_entity(answer))
    }

    pub async fn delete_review_answer(
        &self,
        subject: &RequestUser,
        center_id: Uuid,
        review_id: Uuid,
    ) -> AppResult<()> {
        let center = self.owned_center(subject, center_id).await?;
        let review = self.review_of_center(center.id, review_id).await?;

        let db = self.pool.connection();
        let answer = review_answers::find_by_review_id(db, review.id)
            .await?
            .ok_or_else(|| answer_not_found(review.id))?;

        review_answers::delete(db, answer).await?;
        info!(review_id = %review.id, "Review answer deleted");
        Ok(())
    }
}

fn answer_not_found(review_id: Uuid) -> AppError {
    AppError::not_found(
        ErrorCode::DataDoesNotExist,
        format!("Review {} has no answer", review_id),
    )
}
