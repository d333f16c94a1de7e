//! Review and post repositories: filters, counts and answers.

use claon_admin_lib::db::{day_range, posts, review_answers, reviews};
use claon_admin_lib::models::{PageRequest, Role};
use uuid::Uuid;

use super::test_helpers::*;

const FIRST_PAGE: PageRequest = PageRequest { page: 1, size: 50 };

#[actix_rt::test]
async fn test_count_per_tag_orders_by_count_then_word() {
    let pool = setup_db().await;
    let owner = create_user(&pool, Role::CenterAdmin, Some("owner")).await;
    let climber = create_user(&pool, Role::Pending, Some("climber")).await;
    let (center, _) = create_center(&pool, owner.id, "tags", true).await;
    let (other, _) = create_center(&pool, owner.id, "other", true).await;

    create_review(&pool, climber.id, center.id, at(2024, 5, 1, 9), &["wide", "clean"]).await;
    create_review(&pool, climber.id, center.id, at(2024, 5, 2, 9), &["clean", "bright"]).await;
    create_review(&pool, climber.id, center.id, at(2024, 5, 3, 9), &["wide"]).await;
    create_review(&pool, climber.id, other.id, at(2024, 5, 3, 9), &["bright", "bright"]).await;

    let counts = reviews::count_per_tag(pool.connection(), center.id).await.unwrap();
    assert_eq!(
        counts,
        vec![
            ("clean".to_string(), 2),
            ("wide".to_string(), 2),
            ("bright".to_string(), 1),
        ]
    );
}

#[actix_rt::test]
async fn test_answered_filter_and_counts() {
    let pool = setup_db().await;
    let owner = create_user(&pool, Role::CenterAdmin, Some("owner")).await;
    let climber = create_user(&pool, Role::Pending, Some("climber")).await;
    let (center, _) = create_center(&pool, owner.id, "answers", true).await;
    let db = pool.connection();

    let answered = create_review(&pool, climber.id, center.id, at(2024, 5, 1, 9), &[]).await;
    let open = create_review(&pool, climber.id, center.id, at(2024, 5, 2, 9), &[]).await;
    review_answers::save(db, answered.id, "thanks").await.unwrap();

    let (from, until) = day_range(day(2024, 5, 1), day(2024, 5, 2));
    let only_answered =
        reviews::find_by_center_and_date(db, center.id, from, until, None, Some(true), FIRST_PAGE)
            .await
            .unwrap();
    let ids: Vec<Uuid> = only_answered.items.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![answered.id]);

    let only_open =
        reviews::find_by_center_and_date(db, center.id, from, until, None, Some(false), FIRST_PAGE)
            .await
            .unwrap();
    let ids: Vec<Uuid> = only_open.items.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![open.id]);

    assert_eq!(reviews::count_by_center(db, center.id).await.unwrap(), 2);
    assert_eq!(reviews::count_answered_by_center(db, center.id).await.unwrap(), 1);

    let answers = review_answers::find_by_review_ids(db, &[answered.id, open.id])
        .await
        .unwrap();
    assert_eq!(answers.len(), 1);
    assert_eq!(answers[0].review_id, answered.id);
}

#[actix_rt::test]
async fn test_day_range_includes_whole_end_day() {
    let pool = setup_db().await;
    let owner = create_user(&pool, Role::CenterAdmin, Some("owner")).await;
    let climber = create_user(&pool, Role::Pending, Some("climber")).await;
    let (center, _) = create_center(&pool, owner.id, "days", true).await;
    let db = pool.connection();

    create_post(&pool, climber.id, center.id, at(2024, 4, 30, 23), &[]).await;
    let late = create_post(&pool, climber.id, center.id, at(2024, 5, 1, 23), &[]).await;
    create_post(&pool, climber.id, center.id, at(2024, 5, 2, 0), &[]).await;

    let (from, until) = day_range(day(2024, 5, 1), day(2024, 5, 1));
    let page = posts::find_by_center_and_date(db, center.id, from, until, None, FIRST_PAGE)
        .await
        .unwrap();
    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].id, late.id);
}
