//! Database operations for centers.

use chrono::Utc;
use sea_orm::*;
use uuid::Uuid;

use crate::entity::center::{self, ActiveModel, Column, Entity as Center};
use crate::error::AppResult;
use crate::models::{Page, PageRequest};

use super::{center_approved_files, center_fees, center_holds, center_walls, posts, reviews};

fn to_active(model: &center::Model) -> ActiveModel {
    ActiveModel {
        id: Set(model.id),
        user_id: Set(model.user_id),
        name: Set(model.name.clone()),
        profile_img: Set(model.profile_img.clone()),
        address: Set(model.address.clone()),
        detail_address: Set(model.detail_address.clone()),
        tel: Set(model.tel.clone()),
        web_url: Set(model.web_url.clone()),
        instagram_name: Set(model.instagram_name.clone()),
        youtube_url: Set(model.youtube_url.clone()),
        center_img: Set(model.center_img.clone()),
        operating_time: Set(model.operating_time.clone()),
        utility: Set(model.utility.clone()),
        fee_img: Set(model.fee_img.clone()),
        approved: Set(model.approved),
        rejected: Set(model.rejected),
        created_at: Set(model.created_at),
        updated_at: Set(model.updated_at),
    }
}

pub async fn save<C: ConnectionTrait>(db: &C, center: &center::Model) -> AppResult<center::Model> {
    Ok(to_active(center).insert(db).await?)
}

pub async fn find_by_id<C: ConnectionTrait>(db: &C, id: Uuid) -> AppResult<Option<center::Model>> {
    Ok(Center::find_by_id(id).one(db).await?)
}

pub async fn exists_by_id<C: ConnectionTrait>(db: &C, id: Uuid) -> AppResult<bool> {
    let count = Center::find().filter(Column::Id.eq(id)).count(db).await?;
    Ok(count > 0)
}

/// Whether `user_id` already owns a center, approved or not.
pub async fn exists_by_user_id<C: ConnectionTrait>(db: &C, user_id: Uuid) -> AppResult<bool> {
    let count = Center::find()
        .filter(Column::UserId.eq(user_id))
        .count(db)
        .await?;
    Ok(count > 0)
}

pub async fn exists_by_name_and_approved<C: ConnectionTrait>(db: &C, name: &str) -> AppResult<bool> {
    let count = Center::find()
        .filter(Column::Name.eq(name))
        .filter(Column::Approved.eq(true))
        .count(db)
        .await?;
    Ok(count > 0)
}

/// Approved centers whose name contains `name`.
pub async fn find_by_name<C: ConnectionTrait>(db: &C, name: &str) -> AppResult<Vec<center::Model>> {
    Ok(Center::find()
        .filter(Column::Name.contains(name))
        .filter(Column::Approved.eq(true))
        .order_by_asc(Column::Name)
        .order_by_asc(Column::Id)
        .all(db)
        .await?)
}

/// Centers owned by `user_id`, oldest first.
pub async fn find_all_by_user_id<C: ConnectionTrait>(
    db: &C,
    user_id: Uuid,
    page: PageRequest,
) -> AppResult<Page<center::Model>> {
    let paginator = Center::find()
        .filter(Column::UserId.eq(user_id))
        .order_by_asc(Column::CreatedAt)
        .order_by_asc(Column::Id)
        .paginate(db, page.size);

    let total = paginator.num_items().await?;
    let items = paginator.fetch_page(page.index()).await?;

    Ok(Page {
        items,
        page: page.page,
        size: page.size,
        total,
    })
}

/// Centers still waiting for an admin decision, oldest first.
pub async fn find_all_pending<C: ConnectionTrait>(db: &C) -> AppResult<Vec<center::Model>> {
    Ok(Center::find()
        .filter(Column::Approved.eq(false))
        .filter(Column::Rejected.eq(false))
        .order_by_asc(Column::CreatedAt)
        .order_by_asc(Column::Id)
        .all(db)
        .await?)
}

pub async fn find_all_ids_by_approved_true<C: ConnectionTrait>(db: &C) -> AppResult<Vec<Uuid>> {
    Ok(Center::find()
        .select_only()
        .column(Column::Id)
        .filter(Column::Approved.eq(true))
        .order_by_asc(Column::Id)
        .into_tuple::<Uuid>()
        .all(db)
        .await?)
}

pub async fn approve<C: ConnectionTrait>(db: &C, center: center::Model) -> AppResult<center::Model> {
    let mut active: ActiveModel = center.into();
    active.approved = Set(true);
    active.updated_at = Set(Utc::now());
    Ok(active.update(db).await?)
}

pub async fn reject<C: ConnectionTrait>(db: &C, center: center::Model) -> AppResult<center::Model> {
    let mut active: ActiveModel = center.into();
    active.rejected = Set(true);
    active.updated_at = Set(Utc::now());
    Ok(active.update(db).await?)
}

/// Delete a center with everything it owns. Children go first so the call also works on
/// backends that do not enforce `ON DELETE CASCADE`. Run inside a transaction.
pub async fn delete<C: ConnectionTrait>(db: &C, id: Uuid) -> AppResult<()> {
    posts::delete_by_center_id(db, id).await?;
    reviews::delete_by_center_id(db, id).await?;
    center_fees::delete_by_center_id(db, id).await?;
    center_holds::delete_by_center_id(db, id).await?;
    center_walls::delete_by_center_id(db, id).await?;
    center_approved_files::delete_by_center_id(db, id).await?;
    Center::delete_by_id(id).exec(db).await?;
    Ok(())
}
