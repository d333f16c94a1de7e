//! Database operations for posts and their climbing histories.

use chrono::{DateTime, Utc};
use sea_orm::*;
use uuid::Uuid;

use crate::entity::climbing_history::{self, Entity as ClimbingHistory};
use crate::entity::post::{self, ActiveModel, Column, Entity as Post};
use crate::entity::center_hold;
use crate::error::AppResult;
use crate::models::{Page, PageRequest};

/// Insert a post together with its climbing histories.
pub async fn save<C: ConnectionTrait>(
    db: &C,
    post: &post::Model,
    histories: &[climbing_history::Model],
) -> AppResult<post::Model> {
    let model = ActiveModel {
        id: Set(post.id),
        user_id: Set(post.user_id),
        center_id: Set(post.center_id),
        content: Set(post.content.clone()),
        img: Set(post.img.clone()),
        created_at: Set(post.created_at),
    };
    let saved = model.insert(db).await?;

    if !histories.is_empty() {
        ClimbingHistory::insert_many(histories.iter().map(|h| climbing_history::ActiveModel {
            id: Set(h.id),
            post_id: Set(h.post_id),
            hold_id: Set(h.hold_id),
            climbing_count: Set(h.climbing_count),
        }))
        .exec(db)
        .await?;
    }

    Ok(saved)
}

/// Posts of a center created in `[from, until)`, newest first. With `hold_id`, only posts
/// that logged a climb on that hold.
pub async fn find_by_center_and_date<C: ConnectionTrait>(
    db: &C,
    center_id: Uuid,
    from: DateTime<Utc>,
    until: DateTime<Utc>,
    hold_id: Option<Uuid>,
    page: PageRequest,
) -> AppResult<Page<post::Model>> {
    let mut query = Post::find()
        .filter(Column::CenterId.eq(center_id))
        .filter(Column::CreatedAt.gte(from))
        .filter(Column::CreatedAt.lt(until));

    if let Some(hold_id) = hold_id {
        query = query.filter(
            Column::Id.in_subquery(
                ClimbingHistory::find()
                    .select_only()
                    .column(climbing_history::Column::PostId)
                    .filter(climbing_history::Column::HoldId.eq(hold_id))
                    .into_query(),
            ),
        );
    }

    let paginator = query
        .order_by_desc(Column::CreatedAt)
        .order_by_desc(Column::Id)
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

pub async fn find_histories_by_post_ids<C: ConnectionTrait>(
    db: &C,
    post_ids: &[Uuid],
) -> AppResult<Vec<climbing_history::Model>> {
    if post_ids.is_empty() {
        return Ok(Vec::new());
    }
    Ok(ClimbingHistory::find()
        .filter(climbing_history::Column::PostId.is_in(post_ids.iter().copied()))
        .order_by_asc(climbing_history::Column::Id)
        .all(db)
        .await?)
}

/// Number of posts at a center, optionally only those created at or after `since`.
pub async fn count_by_center<C: ConnectionTrait>(
    db: &C,
    center_id: Uuid,
    since: Option<DateTime<Utc>>,
) -> AppResult<u64> {
    let mut query = Post::find().filter(Column::CenterId.eq(center_id));
    if let Some(since) = since {
        query = query.filter(Column::CreatedAt.gte(since));
    }
    Ok(query.count(db).await?)
}

/// Number of distinct posts that logged a climb on each of `holds`, in the given order.
pub async fn count_per_hold<C: ConnectionTrait>(
    db: &C,
    holds: &[center_hold::Model],
) -> AppResult<Vec<(center_hold::Model, u64)>> {
    let mut counts = Vec::with_capacity(holds.len());
    for hold in holds {
        let count = Post::find()
            .filter(
                Column::Id.in_subquery(
                    ClimbingHistory::find()
                        .select_only()
                        .column(climbing_history::Column::PostId)
                        .filter(climbing_history::Column::HoldId.eq(hold.id))
                        .into_query(),
                ),
            )
            .count(db)
            .await?;
        counts.push((hold.clone(), count));
    }
    Ok(counts)
}

/// Remove every post of a center and every climbing history touching the center's posts
/// or holds.
pub async fn delete_by_center_id<C: ConnectionTrait>(db: &C, center_id: Uuid) -> AppResult<u64> {
    ClimbingHistory::delete_many()
        .filter(
            Condition::any()
                .add(
                    climbing_history::Column::PostId.in_subquery(
                        Post::find()
                            .select_only()
                            .column(Column::Id)
                            .filter(Column::CenterId.eq(center_id))
                            .into_query(),
                    ),
                )
                .add(
                    climbing_history::Column::HoldId.in_subquery(
                        center_hold::Entity::find()
                            .select_only()
                            .column(center_hold::Column::Id)
                            .filter(center_hold::Column::CenterId.eq(center_id))
                            .into_query(),
                    ),
                ),
        )
        .exec(db)
        .await?;

    let result = Post::delete_many()
        .filter(Column::CenterId.eq(center_id))
        .exec(db)
        .await?;
    Ok(result.rows_affected)
}
