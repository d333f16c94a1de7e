//! Admin review of center and lector sign-ups.

use tracing::info;
use uuid::Uuid;

use crate::auth::authorize;
use crate::db::{DbPool, centers, lectors};
use crate::error::{AppError, AppResult, ErrorCode};
use crate::models::{CenterBriefResponse, LectorBriefResponse, RequestUser, Role};

fn missing(kind: &str, id: Uuid) -> AppError {
    AppError::bad_request(
        ErrorCode::DataDoesNotExist,
        format!("{} {} does not exist", kind, id),
    )
}

fn already_reviewed(kind: &str, id: Uuid) -> AppError {
    AppError::bad_request(
        ErrorCode::AlreadyReviewed,
        format!("{} {} has already been reviewed", kind, id),
    )
}

#[derive(Clone)]
pub struct AdminService {
    pool: DbPool,
}

impl AdminService {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub async fn find_pending_centers(
        &self,
        subject: &RequestUser,
    ) -> AppResult<Vec<CenterBriefResponse>> {
        authorize(subject, Role::Admin)?;
        let pending = centers::find_all_pending(self.pool.connection()).await?;
        Ok(pending.into_iter().map(CenterBriefResponse::from_entity).collect())
    }

    pub async fn find_pending_lectors(
        &self,
        subject: &RequestUser,
    ) -> AppResult<Vec<LectorBriefResponse>> {
        authorize(subject, Role::Admin)?;
        let pending = lectors::find_all_pending(self.pool.connection()).await?;
        Ok(pending.into_iter().map(LectorBriefResponse::from_entity).collect())
    }

    pub async fn approve_center(
        &self,
        subject: &RequestUser,
        center_id: Uuid,
    ) -> AppResult<CenterBriefResponse> {
        authorize(subject, Role::Admin)?;
        let db = self.pool.connection();
        let center = centers::find_by_id(db, center_id)
            .await?
            .ok_or_else(|| missing("Center", center_id))?;
        if center.approved || center.rejected {
            return Err(already_reviewed("Center", center_id));
        }

        let center = centers::approve(db, center).await?;
        info!(center_id = %center_id, admin_id = %subject.id, "Center approved");
        Ok(CenterBriefResponse::from_entity(center))
    }

    /// Mark the center rejected. The record and its children are kept.
    pub async fn reject_center(&self, subject: &RequestUser, center_id: Uuid) -> AppResult<()> {
        authorize(subject, Role::Admin)?;
        let db = self.pool.connection();
        let center = centers::find_by_id(db, center_id)
            .await?
            .ok_or_else(|| missing("Center", center_id))?;
        if center.approved || center.rejected {
            return Err(already_reviewed("Center", center_id));
        }

        centers::reject(db, center).await?;
        info!(center_id = %center_id, admin_id = %subject.id, "Center rejected");
        Ok(())
    }

    pub async fn approve_lector(
        &self,
        subject: &RequestUser,
        lector_id: Uuid,
    ) -> AppResult<LectorBriefResponse> {
        authorize(subject, Role::Admin)?;
        let db = self.pool.connection();
        let lector = lectors::find_by_id(db, lector_id)
            .await?
            .ok_or_else(|| missing("Lector", lector_id))?;
        if lector.approved || lector.rejected {
            return Err(already_reviewed("Lector", lector_id));
        }

        let lector = lectors::approve(db, lector).await?;
        info!(lector_id = %lector_id, admin_id = %subject.id, "Lector approved");
        Ok(LectorBriefResponse::from_entity(lector))
    }

    pub async fn reject_lector(&self, subject: &RequestUser, lector_id: Uuid) -> AppResult<()> {
        authorize(subject, Role::Admin)?;
        let db = self.pool.connection();
        let lector = lectors::find_by_id(db, lector_id)
            .await?
            .ok_or_else(|| missing("Lector", lector_id))?;
        if lector.approved || lector.rejected {
            return Err(already_reviewed("Lector", lector_id));
        }

        lectors::reject(db, lector).await?;
        info!(lector_id = %lector_id, admin_id = %subject.id, "Lector rejected");
        Ok(())
    }
}
