//! Database operations for center fees.

use sea_orm::*;
use uuid::Uuid;

use crate::entity::center_fee::{self, ActiveModel, Column, Entity as CenterFee};
use crate::error::AppResult;

fn to_active(model: &center_fee::Model) -> ActiveModel {
    ActiveModel {
        id: Set(model.id),
        center_id: Set(model.center_id),
        name: Set(model.name.clone()),
        price: Set(model.price),
        count: Set(model.count),
    }
}

/// Batch insert, one row per element. An empty batch writes nothing.
pub async fn save_all<C: ConnectionTrait>(
    db: &C,
    fees: Vec<center_fee::Model>,
) -> AppResult<Vec<center_fee::Model>> {
    if fees.is_empty() {
        return Ok(fees);
    }
    CenterFee::insert_many(fees.iter().map(to_active))
        .exec(db)
        .await?;
    Ok(fees)
}

/// Fees of a center in insertion order.
pub async fn find_all_by_center_id<C: ConnectionTrait>(
    db: &C,
    center_id: Uuid,
) -> AppResult<Vec<center_fee::Model>> {
    Ok(CenterFee::find()
        .filter(Column::CenterId.eq(center_id))
        .order_by_asc(Column::Id)
        .all(db)
        .await?)
}

pub async fn delete_by_center_id<C: ConnectionTrait>(db: &C, center_id: Uuid) -> AppResult<u64> {
    let result = CenterFee::delete_many()
        .filter(Column::CenterId.eq(center_id))
        .exec(db)
        .await?;
    Ok(result.rows_affected)
}
