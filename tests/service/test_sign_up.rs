//! Center and lector sign-up flows.

use claon_admin_lib::db::{center_approved_files, centers, lectors, users};
use claon_admin_lib::entity::{center, center_fee, center_hold, center_wall, user};
use claon_admin_lib::error::ErrorCode;
use claon_admin_lib::models::{PaginationParams, RequestUser, Role};
use claon_admin_lib::services::{BackgroundTask, SignUpKind};
use sea_orm::{ConnectionTrait, EntityTrait, PaginatorTrait};

use super::test_helpers::*;

#[actix_rt::test]
async fn test_sign_up_center_persists_graph_and_promotes_user() {
    let mut ctx = setup().await;
    let subject = create_user(&ctx.pool, Role::Pending, None).await;
    let request = center_request("climber");

    let response = ctx
        .user_service
        .sign_up_center(&subject, request.clone())
        .await
        .expect("sign-up should succeed");

    assert_eq!(response.name, request.name);
    assert_eq!(response.address, request.address);
    assert_eq!(response.youtube_code, request.youtube_code);
    assert_eq!(response.image_list, request.image_list);
    assert_eq!(response.utility_list, request.utility_list);
    assert_eq!(response.operating_time_list, request.operating_time_list);
    assert_eq!(response.fee_list, request.fee_list);
    assert_eq!(response.hold_list, request.hold_list);
    assert_eq!(response.wall_list, request.wall_list);
    assert!(!response.approved);

    let db = ctx.pool.connection();
    let stored = centers::find_by_id(db, response.center_id)
        .await
        .unwrap()
        .expect("center stored");
    assert_eq!(stored.user_id, subject.id);
    assert!(!stored.approved && !stored.rejected);

    let files = center_approved_files::find_all_by_center_id(db, stored.id)
        .await
        .unwrap();
    assert_eq!(files.len(), request.proof_list.len());

    let user = users::find_by_id(db, subject.id).await.unwrap().unwrap();
    assert_eq!(Role::of(&user), Role::CenterAdmin);
    assert_eq!(user.nickname.as_deref(), Some("climber"));

    assert_eq!(
        ctx.tasks.try_recv().ok(),
        Some(BackgroundTask::SignUpSubmitted {
            kind: SignUpKind::Center,
            id: response.center_id,
        })
    );
}

#[actix_rt::test]
async fn test_sign_up_center_twice_is_rejected() {
    let ctx = setup().await;
    let subject = create_user(&ctx.pool, Role::CenterAdmin, Some("owner")).await;

    let err = ctx
        .user_service
        .sign_up_center(&subject, center_request("owner"))
        .await
        .unwrap_err();

    assert_eq!(err.code(), ErrorCode::UserAlreadySignedUp);
}

#[actix_rt::test]
async fn test_sign_up_center_replayed_with_stale_token_keeps_one_center() {
    let ctx = setup().await;
    let subject = create_user(&ctx.pool, Role::Pending, None).await;

    ctx.user_service
        .sign_up_center(&subject, center_request("climber"))
        .await
        .expect("first sign-up should succeed");

    // Same PENDING token, same nickname.
    let err = ctx
        .user_service
        .sign_up_center(&subject, center_request("climber"))
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::UserAlreadySignedUp);

    let db = ctx.pool.connection();
    assert_eq!(center::Entity::find().count(db).await.unwrap(), 1);
}

#[actix_rt::test]
async fn test_center_admin_cannot_sign_up_as_lector() {
    let ctx = setup().await;
    let pending = create_user(&ctx.pool, Role::Pending, None).await;
    ctx.user_service
        .sign_up_center(&pending, center_request("owner"))
        .await
        .expect("center sign-up should succeed");
    let owner = RequestUser::new(pending.id, pending.sns.clone(), Role::CenterAdmin);

    let err = ctx
        .user_service
        .sign_up_lector(&owner, lector_request("owner"))
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::UserAlreadySignedUp);

    let err = ctx
        .user_service
        .sign_up_lector(&pending, lector_request("owner"))
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::UserAlreadySignedUp);

    let db = ctx.pool.connection();
    assert!(!lectors::exists_by_user_id(db, owner.id).await.unwrap());
    let user = users::find_by_id(db, owner.id).await.unwrap().unwrap();
    assert_eq!(Role::of(&user), Role::CenterAdmin);

    let page = ctx
        .center_service
        .find_centers(&owner, &PaginationParams::new(1, 10))
        .await
        .expect("owner keeps access to the center");
    assert_eq!(page.total_num, 1);
}

#[actix_rt::test]
async fn test_lector_cannot_sign_up_a_center() {
    let ctx = setup().await;
    let pending = create_user(&ctx.pool, Role::Pending, None).await;
    ctx.user_service
        .sign_up_lector(&pending, lector_request("setter"))
        .await
        .expect("lector sign-up should succeed");

    let err = ctx
        .user_service
        .sign_up_center(&pending, center_request("setter"))
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::UserAlreadySignedUp);

    let db = ctx.pool.connection();
    assert!(!centers::exists_by_user_id(db, pending.id).await.unwrap());
}

#[actix_rt::test]
async fn test_failed_center_sign_up_rolls_back_every_write() {
    let mut ctx = setup().await;
    let subject = create_user(&ctx.pool, Role::Pending, None).await;

    // The last child insert of the transaction has nowhere to go.
    ctx.pool
        .connection()
        .execute_unprepared("DROP TABLE center_approved_files")
        .await
        .unwrap();

    let result = ctx
        .user_service
        .sign_up_center(&subject, center_request("climber"))
        .await;
    assert!(result.is_err());

    let db = ctx.pool.connection();
    assert_eq!(center::Entity::find().count(db).await.unwrap(), 0);
    assert_eq!(center_fee::Entity::find().count(db).await.unwrap(), 0);
    assert_eq!(center_hold::Entity::find().count(db).await.unwrap(), 0);
    assert_eq!(center_wall::Entity::find().count(db).await.unwrap(), 0);

    let user = users::find_by_id(db, subject.id).await.unwrap().unwrap();
    assert_eq!(Role::of(&user), Role::Pending);
    assert_eq!(user.nickname, None);
    assert!(ctx.tasks.try_recv().is_err());
}

#[actix_rt::test]
async fn test_sign_up_with_taken_nickname_writes_nothing() {
    let ctx = setup().await;
    create_user(&ctx.pool, Role::Lector, Some("taken")).await;
    let subject = create_user(&ctx.pool, Role::Pending, None).await;

    let err = ctx
        .user_service
        .sign_up_center(&subject, center_request("taken"))
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::DuplicatedNickname);

    let db = ctx.pool.connection();
    assert_eq!(center::Entity::find().count(db).await.unwrap(), 0);
    let user = users::find_by_id(db, subject.id).await.unwrap().unwrap();
    assert_eq!(Role::of(&user), Role::Pending);
}

#[actix_rt::test]
async fn test_sign_up_may_keep_own_nickname() {
    let ctx = setup().await;
    let subject = create_user(&ctx.pool, Role::Pending, Some("myself")).await;

    let result = ctx
        .user_service
        .sign_up_lector(&subject, lector_request("myself"))
        .await;

    assert!(result.is_ok(), "own nickname must not count as taken: {:?}", result.err());
}

#[actix_rt::test]
async fn test_sign_up_center_rejects_invalid_request() {
    let ctx = setup().await;
    let subject = create_user(&ctx.pool, Role::Pending, None).await;

    let mut request = center_request("climber");
    request.proof_list.clear();
    let err = ctx
        .user_service
        .sign_up_center(&subject, request)
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::InvalidFormat);

    let mut request = center_request("climber");
    request.operating_time_list[0].start_time = "25:00".to_string();
    let err = ctx
        .user_service
        .sign_up_center(&subject, request)
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::InvalidFormat);
}

#[actix_rt::test]
async fn test_sign_up_lector_persists_profile() {
    let mut ctx = setup().await;
    let subject = create_user(&ctx.pool, Role::Pending, None).await;
    let request = lector_request("setter");

    let response = ctx
        .user_service
        .sign_up_lector(&subject, request.clone())
        .await
        .expect("sign-up should succeed");

    assert!(response.is_setter);
    assert_eq!(response.contest_list, request.contest_list);
    assert_eq!(response.certificate_list, request.certificate_list);
    assert_eq!(response.career_list, request.career_list);
    assert_eq!(response.proof_list, request.proof_list);
    assert!(!response.approved);

    let db = ctx.pool.connection();
    let lector = lectors::find_by_user_id(db, subject.id)
        .await
        .unwrap()
        .expect("lector stored");
    assert_eq!(lector.id, response.lector_id);

    let user = user::Entity::find_by_id(subject.id)
        .one(db)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(Role::of(&user), Role::Lector);

    assert_eq!(
        ctx.tasks.try_recv().ok(),
        Some(BackgroundTask::SignUpSubmitted {
            kind: SignUpKind::Lector,
            id: response.lector_id,
        })
    );
}

#[actix_rt::test]
async fn test_sign_up_lector_twice_is_rejected() {
    let ctx = setup().await;
    let subject = create_user(&ctx.pool, Role::Pending, None).await;

    ctx.user_service
        .sign_up_lector(&subject, lector_request("setter"))
        .await
        .unwrap();

    // Stale token still says PENDING; the stored lector profile blocks the second attempt.
    let err = ctx
        .user_service
        .sign_up_lector(&subject, lector_request("setter"))
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::UserAlreadySignedUp);
}

#[actix_rt::test]
async fn test_admin_cannot_sign_up() {
    let ctx = setup().await;
    let subject = create_user(&ctx.pool, Role::Admin, Some("root")).await;

    let err = ctx
        .user_service
        .sign_up_lector(&subject, lector_request("root"))
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::UserAlreadySignedUp);
}

#[actix_rt::test]
async fn test_upload_profile_stores_under_user_domain() {
    let ctx = setup().await;

    let response = ctx
        .user_service
        .upload_profile(claon_admin_lib::models::FileUpload {
            filename: "me.PNG".to_string(),
            data: vec![1, 2, 3],
        })
        .await
        .unwrap();

    let objects = ctx.storage.objects.lock().unwrap().clone();
    assert_eq!(objects.len(), 1);
    assert!(objects[0].key.starts_with("user/profile/"));
    assert!(objects[0].key.ends_with(".png"));
    assert_eq!(objects[0].content_type, "image/png");
    assert_eq!(response.file_url, format!("https://files.test/{}", objects[0].key));
}

#[actix_rt::test]
async fn test_upload_profile_rejects_documents_and_oversized_files() {
    let ctx = setup().await;

    let err = ctx
        .user_service
        .upload_profile(claon_admin_lib::models::FileUpload {
            filename: "cv.pdf".to_string(),
            data: vec![1],
        })
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::InvalidFormat);

    let err = ctx
        .user_service
        .upload_profile(claon_admin_lib::models::FileUpload {
            filename: "big.png".to_string(),
            data: vec![0; MAX_UPLOAD_SIZE + 1],
        })
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::InvalidFormat);

    assert!(ctx.storage.objects.lock().unwrap().is_empty());
}
