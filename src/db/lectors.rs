//! Database operations for lectors.

use chrono::Utc;
use sea_orm::*;
use uuid::Uuid;

use crate::entity::lector::{self, ActiveModel, Column, Entity as Lector};
use crate::error::AppResult;

pub async fn save<C: ConnectionTrait>(db: &C, lector: &lector::Model) -> AppResult<lector::Model> {
    let model = ActiveModel {
        id: Set(lector.id),
        user_id: Set(lector.user_id),
        is_setter: Set(lector.is_setter),
        contest: Set(lector.contest.clone()),
        certificate: Set(lector.certificate.clone()),
        career: Set(lector.career.clone()),
        approved: Set(lector.approved),
        rejected: Set(lector.rejected),
        created_at: Set(lector.created_at),
        updated_at: Set(lector.updated_at),
    };
    Ok(model.insert(db).await?)
}

pub async fn find_by_id<C: ConnectionTrait>(db: &C, id: Uuid) -> AppResult<Option<lector::Model>> {
    Ok(Lector::find_by_id(id).one(db).await?)
}

pub async fn find_by_user_id<C: ConnectionTrait>(
    db: &C,
    user_id: Uuid,
) -> AppResult<Option<lector::Model>> {
    Ok(Lector::find()
        .filter(Column::UserId.eq(user_id))
        .one(db)
        .await?)
}

pub async fn exists_by_user_id<C: ConnectionTrait>(db: &C, user_id: Uuid) -> AppResult<bool> {
    let count = Lector::find()
        .filter(Column::UserId.eq(user_id))
        .count(db)
        .await?;
    Ok(count > 0)
}

/// Lectors still waiting for an admin decision, oldest first.
pub async fn find_all_pending<C: ConnectionTrait>(db: &C) -> AppResult<Vec<lector::Model>> {
    Ok(Lector::find()
        .filter(Column::Approved.eq(false))
        .filter(Column::Rejected.eq(false))
        .order_by_asc(Column::CreatedAt)
        .order_by_asc(Column::Id)
        .all(db)
        .await?)
}

pub async fn approve<C: ConnectionTrait>(db: &C, lector: lector::Model) -> AppResult<lector::Model> {
    let mut active: ActiveModel = lector.into();
    active.approved = Set(true);
    active.updated_at = Set(Utc::now());
    Ok(active.update(db).await?)
}

pub async fn reject<C: ConnectionTrait>(db: &C, lector: lector::Model) -> AppResult<lector::Model> {
    let mut active: ActiveModel = lector.into();
    active.rejected = Set(true);
    active.updated_at = Set(Utc::now());
    Ok(active.update(db).await?)
}
