//! Database operations for center proof documents.

use sea_orm::*;
use uuid::Uuid;

use crate::entity::center_approved_file::{self, ActiveModel, Column, Entity as ApprovedFile};
use crate::error::AppResult;

fn to_active(model: &center_approved_file::Model) -> ActiveModel {
    ActiveModel {
        id: Set(model.id),
        center_id: Set(model.center_id),
        user_id: Set(model.user_id),
        url: Set(model.url.clone()),
        created_at: Set(model.created_at),
    }
}

pub async fn save_all<C: ConnectionTrait>(
    db: &C,
    files: Vec<center_approved_file::Model>,
) -> AppResult<Vec<center_approved_file::Model>> {
    if files.is_empty() {
        return Ok(files);
    }
    ApprovedFile::insert_many(files.iter().map(to_active))
        .exec(db)
        .await?;
    Ok(files)
}

pub async fn find_all_by_center_id<C: ConnectionTrait>(
    db: &C,
    center_id: Uuid,
) -> AppResult<Vec<center_approved_file::Model>> {
    Ok(ApprovedFile::find()
        .filter(Column::CenterId.eq(center_id))
        .order_by_asc(Column::Id)
        .all(db)
        .await?)
}

pub async fn delete_by_center_id<C: ConnectionTrait>(db: &C, center_id: Uuid) -> AppResult<u64> {
    let result = ApprovedFile::delete_many()
        .filter(Column::CenterId.eq(center_id))
        .exec(db)
        .await?;
    Ok(result.rows_affected)
}
