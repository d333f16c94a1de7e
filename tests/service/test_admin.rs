//! Admin review of center and lector sign-ups.

use claon_admin_lib::db::{center_holds, centers, lectors};
use claon_admin_lib::error::{AppError, ErrorCode};
use claon_admin_lib::models::Role;
use uuid::Uuid;

use super::test_helpers::*;

#[actix_rt::test]
async fn test_non_admin_learns_nothing_about_targets() {
    let ctx = setup().await;
    let owner = create_user(&ctx.pool, Role::CenterAdmin, Some("owner")).await;
    let (center, _) = create_center(&ctx.pool, owner.id, "pending", false).await;

    let err = ctx
        .admin_service
        .approve_center(&owner, center.id)
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::NoneAdminAccount);

    // Same answer for a target that does not exist.
    let err = ctx
        .admin_service
        .approve_center(&owner, Uuid::now_v7())
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::NoneAdminAccount);

    let err = ctx
        .admin_service
        .find_pending_lectors(&owner)
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::NoneAdminAccount);
}

#[actix_rt::test]
async fn test_review_of_missing_target_is_bad_request() {
    let ctx = setup().await;
    let admin = create_user(&ctx.pool, Role::Admin, Some("admin")).await;

    let err = ctx
        .admin_service
        .reject_center(&admin, Uuid::now_v7())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(ErrorCode::DataDoesNotExist, _)));

    let err = ctx
        .admin_service
        .approve_lector(&admin, Uuid::now_v7())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(ErrorCode::DataDoesNotExist, _)));
}

#[actix_rt::test]
async fn test_approve_center_once() {
    let ctx = setup().await;
    let admin = create_user(&ctx.pool, Role::Admin, Some("admin")).await;
    let owner = create_user(&ctx.pool, Role::CenterAdmin, Some("owner")).await;
    let (center, _) = create_center(&ctx.pool, owner.id, "pending", false).await;

    let approved = ctx
        .admin_service
        .approve_center(&admin, center.id)
        .await
        .unwrap();
    assert!(approved.is_approved);
    assert_eq!(approved.center_id, center.id);

    let err = ctx
        .admin_service
        .approve_center(&admin, center.id)
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::AlreadyReviewed);

    let err = ctx
        .admin_service
        .reject_center(&admin, center.id)
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::AlreadyReviewed);

    let names = ctx
        .center_service
        .find_centers_by_name("pending")
        .await
        .unwrap();
    assert_eq!(names.len(), 1);
}

#[actix_rt::test]
async fn test_reject_center_keeps_record() {
    let ctx = setup().await;
    let admin = create_user(&ctx.pool, Role::Admin, Some("admin")).await;
    let owner = create_user(&ctx.pool, Role::CenterAdmin, Some("owner")).await;
    let (center, holds) = create_center(&ctx.pool, owner.id, "rejected", false).await;

    ctx.admin_service
        .reject_center(&admin, center.id)
        .await
        .unwrap();

    let db = ctx.pool.connection();
    let stored = centers::find_by_id(db, center.id).await.unwrap().unwrap();
    assert!(stored.rejected);
    assert!(!stored.approved);
    assert_eq!(
        center_holds::find_all_by_center_id(db, center.id)
            .await
            .unwrap()
            .len(),
        holds.len()
    );

    let err = ctx
        .admin_service
        .approve_center(&admin, center.id)
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::AlreadyReviewed);
}

#[actix_rt::test]
async fn test_pending_lists_exclude_reviewed() {
    let ctx = setup().await;
    let admin = create_user(&ctx.pool, Role::Admin, Some("admin")).await;
    let owner = create_user(&ctx.pool, Role::CenterAdmin, Some("owner")).await;
    let (waiting, _) = create_center(&ctx.pool, owner.id, "waiting", false).await;
    let (to_reject, _) = create_center(&ctx.pool, owner.id, "to reject", false).await;
    create_center(&ctx.pool, owner.id, "done", true).await;

    ctx.admin_service
        .reject_center(&admin, to_reject.id)
        .await
        .unwrap();

    let pending = ctx.admin_service.find_pending_centers(&admin).await.unwrap();
    let ids: Vec<Uuid> = pending.iter().map(|c| c.center_id).collect();
    assert_eq!(ids, vec![waiting.id]);
}

#[actix_rt::test]
async fn test_lector_review() {
    let ctx = setup().await;
    let admin = create_user(&ctx.pool, Role::Admin, Some("admin")).await;
    let first = create_user(&ctx.pool, Role::Pending, None).await;
    let second = create_user(&ctx.pool, Role::Pending, None).await;

    let approved = ctx
        .user_service
        .sign_up_lector(&first, lector_request("first"))
        .await
        .unwrap();
    let rejected = ctx
        .user_service
        .sign_up_lector(&second, lector_request("second"))
        .await
        .unwrap();

    let pending = ctx.admin_service.find_pending_lectors(&admin).await.unwrap();
    assert_eq!(pending.len(), 2);
    assert_eq!(pending[0].lector_id, approved.lector_id);
    assert_eq!(pending[0].user_id, first.id);

    let brief = ctx
        .admin_service
        .approve_lector(&admin, approved.lector_id)
        .await
        .unwrap();
    assert!(brief.is_approved);

    ctx.admin_service
        .reject_lector(&admin, rejected.lector_id)
        .await
        .unwrap();
    let stored = lectors::find_by_id(ctx.pool.connection(), rejected.lector_id)
        .await
        .unwrap()
        .expect("rejected lector is kept");
    assert!(stored.rejected);

    let err = ctx
        .admin_service
        .reject_lector(&admin, approved.lector_id)
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::AlreadyReviewed);

    assert!(ctx.admin_service.find_pending_lectors(&admin).await.unwrap().is_empty());
}
