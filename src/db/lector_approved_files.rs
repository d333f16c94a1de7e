//! Database operations for lector proof documents.

use sea_orm::*;
use uuid::Uuid;

use crate::entity::lector_approved_file::{self, ActiveModel, Column, Entity as ApprovedFile};
use crate::error::AppResult;

fn to_active(model: &lector_approved_file::Model) -> ActiveModel {
    ActiveModel {
        id: Set(model.id),
        lector_id: Set(model.lector_id),
        user_id: Set(model.user_id),
        url: Set(model.url.clone()),
        created_at: Set(model.created_at),
    }
}

pub async fn save_all<C: ConnectionTrait>(
    db: &C,
    files: Vec<lector_approved_file::Model>,
) -> AppResult<Vec<lector_approved_file::Model>> {
    if files.is_empty() {
        return Ok(files);
    }
    ApprovedFile::insert_many(files.iter().map(to_active))
        .exec(db)
        .await?;
    Ok(files)
}

pub async fn find_all_by_lector_id<C: ConnectionTrait>(
    db: &C,
    lector_id: Uuid,
) -> AppResult<Vec<lector_approved_file::Model>> {
    Ok(ApprovedFile::find()
        .filter(Column::LectorId.eq(lector_id))
        .order_by_asc(Column::Id)
        .all(db)
        .await?)
}
