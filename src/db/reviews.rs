//! Database operations for reviews and their tags.

use chrono::{DateTime, Utc};
use sea_orm::*;
use uuid::Uuid;

use crate::entity::review::{self, ActiveModel, Column, Entity as Review};
use crate::entity::review_answer::{self, Entity as ReviewAnswer};
use crate::entity::review_tag::{self, Entity as ReviewTag};
use crate::error::AppResult;
use crate::models::{Page, PageRequest};

/// Insert a review together with its tags.
pub async fn save<C: ConnectionTrait>(
    db: &C,
    review: &review::Model,
    tags: &[review_tag::Model],
) -> AppResult<review::Model> {
    let model = ActiveModel {
        id: Set(review.id),
        user_id: Set(review.user_id),
        center_id: Set(review.center_id),
        content: Set(review.content.clone()),
        created_at: Set(review.created_at),
    };
    let saved = model.insert(db).await?;

    if !tags.is_empty() {
        ReviewTag::insert_many(tags.iter().map(|t| review_tag::ActiveModel {
            id: Set(t.id),
            review_id: Set(t.review_id),
            word: Set(t.word.clone()),
        }))
        .exec(db)
        .await?;
    }

    Ok(saved)
}

pub async fn find_by_id<C: ConnectionTrait>(db: &C, id: Uuid) -> AppResult<Option<review::Model>> {
    Ok(Review::find_by_id(id).one(db).await?)
}

fn answered_reviews() -> sea_query::SelectStatement {
    ReviewAnswer::find()
        .select_only()
        .column(review_answer::Column::ReviewId)
        .into_query()
}

fn center_reviews(center_id: Uuid) -> sea_query::SelectStatement {
    Review::find()
        .select_only()
        .column(Column::Id)
        .filter(Column::CenterId.eq(center_id))
        .into_query()
}

/// Reviews of a center created in `[from, until)`, newest first, optionally restricted to
/// a tag word and to answered or unanswered reviews.
pub async fn find_by_center_and_date<C: ConnectionTrait>(
    db: &C,
    center_id: Uuid,
    from: DateTime<Utc>,
    until: DateTime<Utc>,
    tag: Option<&str>,
    is_answered: Option<bool>,
    page: PageRequest,
) -> AppResult<Page<review::Model>> {
    let mut query = Review::find()
        .filter(Column::CenterId.eq(center_id))
        .filter(Column::CreatedAt.gte(from))
        .filter(Column::CreatedAt.lt(until));

    if let Some(tag) = tag {
        query = query.filter(
            Column::Id.in_subquery(
                ReviewTag::find()
                    .select_only()
                    .column(review_tag::Column::ReviewId)
                    .filter(review_tag::Column::Word.eq(tag))
                    .into_query(),
            ),
        );
    }

    query = match is_answered {
        Some(true) => query.filter(Column::Id.in_subquery(answered_reviews())),
        Some(false) => query.filter(Column::Id.not_in_subquery(answered_reviews())),
        None => query,
    };

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

pub async fn find_tags_by_review_ids<C: ConnectionTrait>(
    db: &C,
    review_ids: &[Uuid],
) -> AppResult<Vec<review_tag::Model>> {
    if review_ids.is_empty() {
        return Ok(Vec::new());
    }
    Ok(ReviewTag::find()
        .filter(review_tag::Column::ReviewId.is_in(review_ids.iter().copied()))
        .order_by_asc(review_tag::Column::Id)
        .all(db)
        .await?)
}

pub async fn count_by_center<C: ConnectionTrait>(db: &C, center_id: Uuid) -> AppResult<u64> {
    Ok(Review::find()
        .filter(Column::CenterId.eq(center_id))
        .count(db)
        .await?)
}

pub async fn count_answered_by_center<C: ConnectionTrait>(db: &C, center_id: Uuid) -> AppResult<u64> {
    Ok(Review::find()
        .filter(Column::CenterId.eq(center_id))
        .filter(Column::Id.in_subquery(answered_reviews()))
        .count(db)
        .await?)
}

/// Tag usage across a center's reviews, most used first, ties by word.
pub async fn count_per_tag<C: ConnectionTrait>(db: &C, center_id: Uuid) -> AppResult<Vec<(String, u64)>> {
    let rows: Vec<(String, i64)> = ReviewTag::find()
        .select_only()
        .column(review_tag::Column::Word)
        .column_as(review_tag::Column::Id.count(), "count")
        .filter(review_tag::Column::ReviewId.in_subquery(center_reviews(center_id)))
        .group_by(review_tag::Column::Word)
        .into_tuple()
        .all(db)
        .await?;

    let mut counts: Vec<(String, u64)> = rows
        .into_iter()
        .map(|(word, count)| (word, u64::try_from(count).unwrap_or(0)))
        .collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    Ok(counts)
}

/// Remove every review of a center along with its tags and answer.
pub async fn delete_by_center_id<C: ConnectionTrait>(db: &C, center_id: Uuid) -> AppResult<u64> {
    ReviewAnswer::delete_many()
        .filter(review_answer::Column::ReviewId.in_subquery(center_reviews(center_id)))
        .exec(db)
        .await?;
    ReviewTag::delete_many()
        .filter(review_tag::Column::ReviewId.in_subquery(center_reviews(center_id)))
        .exec(db)
        .await?;

    let result = Review::delete_many()
        .filter(Column::CenterId.eq(center_id))
        .exec(db)
        .await?;
    Ok(result.rows_affected)
}
