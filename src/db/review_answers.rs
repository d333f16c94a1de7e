//! Database operations for review answers.

use chrono::Utc;
use sea_orm::*;
use uuid::Uuid;

use crate::entity::review_answer::{self, ActiveModel, Column, Entity as ReviewAnswer};
use crate::error::AppResult;

pub async fn save<C: ConnectionTrait>(
    db: &C,
    review_id: Uuid,
    content: &str,
) -> AppResult<review_answer::Model> {
    let now = Utc::now();
    let model = ActiveModel {
        id: Set(Uuid::now_v7()),
        review_id: Set(review_id),
        content: Set(content.to_string()),
        created_at: Set(now),
        updated_at: Set(now),
    };
    Ok(model.insert(db).await?)
}

pub async fn find_by_review_id<C: ConnectionTrait>(
    db: &C,
    review_id: Uuid,
) -> AppResult<Option<review_answer::Model>> {
    Ok(ReviewAnswer::find()
        .filter(Column::ReviewId.eq(review_id))
        .one(db)
        .await?)
}

pub async fn find_by_review_ids<C: ConnectionTrait>(
    db: &C,
    review_ids: &[Uuid],
) -> AppResult<Vec<review_answer::Model>> {
    if review_ids.is_empty() {
        return Ok(Vec::new());
    }
    Ok(ReviewAnswer::find()
        .filter(Column::ReviewId.is_in(review_ids.iter().copied()))
        .all(db)
        .await?)
}

pub async fn update_content<C: ConnectionTrait>(
    db: &C,
    answer: review_answer::Model,
    content: &str,
) -> AppResult<review_answer::Model> {
    let mut active: ActiveModel = answer.into();
    active.content = Set(content.to_string());
    active.updated_at = Set(Utc::now());
    Ok(active.update(db).await?)
}

pub async fn delete<C: ConnectionTrait>(db: &C, answer: review_answer::Model) -> AppResult<()> {
    ReviewAnswer::delete_by_id(answer.id).exec(db).await?;
    Ok(())
}
