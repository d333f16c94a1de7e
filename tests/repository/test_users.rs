//! User repository: identity lookup, nickname checks and role updates.

use claon_admin_lib::db::users;
use claon_admin_lib::error::ErrorCode;
use claon_admin_lib::models::{OAuthUserInfo, Role};
use uuid::Uuid;

use super::test_helpers::*;

#[actix_rt::test]
async fn test_create_pending_and_find_by_identity() {
    let pool = setup_db().await;
    let db = pool.connection();
    let info = google_identity();

    let created = users::create_pending(db, &info).await.unwrap();
    assert_eq!(Role::of(&created), Role::Pending);
    assert_eq!(created.nickname, None);
    assert_eq!(created.profile_img, info.profile_image);

    let found = users::find_by_oauth_id_and_sns(db, &info.oauth_id, &info.sns)
        .await
        .unwrap()
        .expect("user by identity");
    assert_eq!(found.id, created.id);

    let other_sns = users::find_by_oauth_id_and_sns(db, &info.oauth_id, "kakao:1")
        .await
        .unwrap();
    assert!(other_sns.is_none());
}

#[actix_rt::test]
async fn test_nickname_checks_exclude_self() {
    let pool = setup_db().await;
    let db = pool.connection();
    let holder = create_user(&pool, Role::Lector, Some("holder")).await;

    assert!(users::exists_by_nickname(db, "holder").await.unwrap());
    assert!(!users::exists_by_nickname(db, "nobody").await.unwrap());
    assert!(!users::exists_by_nickname_for_other(db, "holder", holder.id).await.unwrap());
    assert!(users::exists_by_nickname_for_other(db, "holder", Uuid::now_v7()).await.unwrap());
}

#[actix_rt::test]
async fn test_update_role() {
    let pool = setup_db().await;
    let db = pool.connection();
    let subject = create_user(&pool, Role::Pending, None).await;

    let updated = users::update_role(db, subject.id, Role::Admin).await.unwrap();
    assert_eq!(Role::of(&updated), Role::Admin);

    let err = users::update_role(db, Uuid::now_v7(), Role::Admin).await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::DataDoesNotExist);
}

#[actix_rt::test]
async fn test_find_all_oldest_first() {
    let pool = setup_db().await;
    let db = pool.connection();

    let first = users::create_pending(db, &google_identity()).await.unwrap();
    let second = users::create_pending(
        db,
        &OAuthUserInfo {
            oauth_id: "kakao-1".to_string(),
            sns: "kakao:1".to_string(),
            email: None,
            nickname: None,
            profile_image: None,
        },
    )
    .await
    .unwrap();

    let ids: Vec<Uuid> = users::find_all(db).await.unwrap().iter().map(|u| u.id).collect();
    assert_eq!(ids, vec![first.id, second.id]);
}
