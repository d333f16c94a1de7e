//! Database operations for center walls.

use sea_orm::*;
use uuid::Uuid;

use crate::entity::center_wall::{self, ActiveModel, Column, Entity as CenterWall};
use crate::error::AppResult;

fn to_active(model: &center_wall::Model) -> ActiveModel {
    ActiveModel {
        id: Set(model.id),
        center_id: Set(model.center_id),
        name: Set(model.name.clone()),
        wall_type: Set(model.wall_type.clone()),
    }
}

pub async fn save_all<C: ConnectionTrait>(
    db: &C,
    walls: Vec<center_wall::Model>,
) -> AppResult<Vec<center_wall::Model>> {
    if walls.is_empty() {
        return Ok(walls);
    }
    CenterWall::insert_many(walls.iter().map(to_active))
        .exec(db)
        .await?;
    Ok(walls)
}

pub async fn find_all_by_center_id<C: ConnectionTrait>(
    db: &C,
    center_id: Uuid,
) -> AppResult<Vec<center_wall::Model>> {
    Ok(CenterWall::find()
        .filter(Column::CenterId.eq(center_id))
        .order_by_asc(Column::Id)
        .all(db)
        .await?)
}

pub async fn delete_by_center_id<C: ConnectionTrait>(db: &C, center_id: Uuid) -> AppResult<u64> {
    let result = CenterWall::delete_many()
        .filter(Column::CenterId.eq(center_id))
        .exec(db)
        .await?;
    Ok(result.rows_affected)
}
