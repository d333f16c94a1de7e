//! Database operations for center holds.

use sea_orm::*;
use uuid::Uuid;

use crate::entity::center_hold::{self, ActiveModel, Column, Entity as CenterHold};
use crate::error::AppResult;

fn to_active(model: &center_hold::Model) -> ActiveModel {
    ActiveModel {
        id: Set(model.id),
        center_id: Set(model.center_id),
        name: Set(model.name.clone()),
        difficulty: Set(model.difficulty.clone()),
        is_color: Set(model.is_color),
    }
}

pub async fn save_all<C: ConnectionTrait>(
    db: &C,
    holds: Vec<center_hold::Model>,
) -> AppResult<Vec<center_hold::Model>> {
    if holds.is_empty() {
        return Ok(holds);
    }
    CenterHold::insert_many(holds.iter().map(to_active))
        .exec(db)
        .await?;
    Ok(holds)
}

pub async fn find_by_id<C: ConnectionTrait>(
    db: &C,
    id: Uuid,
) -> AppResult<Option<center_hold::Model>> {
    Ok(CenterHold::find_by_id(id).one(db).await?)
}

/// Holds of a center in insertion order.
pub async fn find_all_by_center_id<C: ConnectionTrait>(
    db: &C,
    center_id: Uuid,
) -> AppResult<Vec<center_hold::Model>> {
    Ok(CenterHold::find()
        .filter(Column::CenterId.eq(center_id))
        .order_by_asc(Column::Id)
        .all(db)
        .await?)
}

pub async fn delete_by_center_id<C: ConnectionTrait>(db: &C, center_id: Uuid) -> AppResult<u64> {
    let result = CenterHold::delete_many()
        .filter(Column::CenterId.eq(center_id))
        .exec(db)
        .await?;
    Ok(result.rows_affected)
}
