//! Center management: listing, lookup, deletion, name search and uploads.

use claon_admin_lib::db::{center_fees, center_holds, center_walls, centers};
use claon_admin_lib::error::ErrorCode;
use claon_admin_lib::models::{
    CenterUploadPurpose, FileUpload, PaginationParams, RequestUser, Role,
};
use uuid::Uuid;

use super::test_helpers::*;

#[actix_rt::test]
async fn test_find_centers_requires_center_admin() {
    let ctx = setup().await;
    let lector = create_user(&ctx.pool, Role::Lector, Some("lector")).await;

    let err = ctx
        .center_service
        .find_centers(&lector, &PaginationParams::default())
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::NotAccessible);
}

#[actix_rt::test]
async fn test_find_centers_empty_page_is_missing_data() {
    let ctx = setup().await;
    let owner = create_user(&ctx.pool, Role::CenterAdmin, Some("owner")).await;

    let err = ctx
        .center_service
        .find_centers(&owner, &PaginationParams::default())
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::DataDoesNotExist);
}

#[actix_rt::test]
async fn test_find_centers_pages_through_own_centers() {
    let ctx = setup().await;
    let owner = create_user(&ctx.pool, Role::CenterAdmin, Some("owner")).await;
    let other = create_user(&ctx.pool, Role::CenterAdmin, Some("other")).await;

    let (first, _) = create_center(&ctx.pool, owner.id, "first", false).await;
    let (second, _) = create_center(&ctx.pool, owner.id, "second", true).await;
    let (third, _) = create_center(&ctx.pool, owner.id, "third", false).await;
    create_center(&ctx.pool, other.id, "not mine", true).await;

    let page_one = ctx
        .center_service
        .find_centers(&owner, &PaginationParams::new(1, 2))
        .await
        .unwrap();
    assert_eq!(page_one.total_num, 3);
    assert_eq!(page_one.previous_page_num, 0);
    assert_eq!(page_one.next_page_num, 2);
    let ids: Vec<Uuid> = page_one.results.iter().map(|c| c.center_id).collect();
    assert_eq!(ids, vec![first.id, second.id]);
    assert!(page_one.results[1].is_approved);

    let page_two = ctx
        .center_service
        .find_centers(&owner, &PaginationParams::new(2, 2))
        .await
        .unwrap();
    assert_eq!(page_two.next_page_num, -1);
    assert_eq!(page_two.previous_page_num, 1);
    assert_eq!(page_two.results.len(), 1);
    assert_eq!(page_two.results[0].center_id, third.id);

    let err = ctx
        .center_service
        .find_centers(&owner, &PaginationParams::new(3, 2))
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::DataDoesNotExist);

    let err = ctx
        .center_service
        .find_centers(&owner, &PaginationParams::new(1, 500))
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::InvalidFormat);
}

#[actix_rt::test]
async fn test_find_center_returns_full_graph() {
    let ctx = setup().await;
    let owner = create_user(&ctx.pool, Role::CenterAdmin, Some("owner")).await;
    let (center, holds) = create_center(&ctx.pool, owner.id, "graph", true).await;

    let response = ctx.center_service.find_center(center.id).await.unwrap();
    assert_eq!(response.center_id, center.id);
    assert_eq!(response.name, "graph");
    assert_eq!(response.hold_list.len(), holds.len());
    assert!(response.approved);

    let err = ctx
        .center_service
        .find_center(Uuid::now_v7())
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::DataDoesNotExist);
}

#[actix_rt::test]
async fn test_delete_center_removes_everything_it_owns() {
    let ctx = setup().await;
    let subject = create_user(&ctx.pool, Role::Pending, None).await;
    let signed_up = ctx
        .user_service
        .sign_up_center(&subject, center_request("owner"))
        .await
        .unwrap();
    // The stored role changed; a fresh token would carry CENTER_ADMIN.
    let owner = RequestUser::new(subject.id, subject.sns.clone(), Role::CenterAdmin);

    let climber = create_user(&ctx.pool, Role::Pending, Some("climber")).await;
    let holds = center_holds::find_all_by_center_id(ctx.pool.connection(), signed_up.center_id)
        .await
        .unwrap();
    let hold_ids: Vec<Uuid> = holds.iter().map(|h| h.id).collect();
    let center_id = signed_up.center_id;
    create_post(&ctx.pool, climber.id, center_id, at(2024, 3, 1, 10), &hold_ids).await;
    create_review(&ctx.pool, climber.id, center_id, at(2024, 3, 1, 11), &["clean"]).await;

    let deleted = ctx
        .center_service
        .delete_center(&owner, signed_up.center_id)
        .await
        .unwrap();
    assert_eq!(deleted, signed_up);

    let db = ctx.pool.connection();
    assert!(centers::find_by_id(db, center_id).await.unwrap().is_none());
    assert!(center_fees::find_all_by_center_id(db, center_id).await.unwrap().is_empty());
    assert!(center_holds::find_all_by_center_id(db, center_id).await.unwrap().is_empty());
    assert!(center_walls::find_all_by_center_id(db, center_id).await.unwrap().is_empty());

    let err = ctx
        .center_service
        .find_center(center_id)
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::DataDoesNotExist);
}

#[actix_rt::test]
async fn test_delete_center_checks_role_then_ownership() {
    let ctx = setup().await;
    let owner = create_user(&ctx.pool, Role::CenterAdmin, Some("owner")).await;
    let stranger = create_user(&ctx.pool, Role::CenterAdmin, Some("stranger")).await;
    let lector = create_user(&ctx.pool, Role::Lector, Some("lector")).await;
    let (center, _) = create_center(&ctx.pool, owner.id, "mine", true).await;

    let err = ctx
        .center_service
        .delete_center(&lector, center.id)
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::NotAccessible);

    let err = ctx
        .center_service
        .delete_center(&stranger, center.id)
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::NotAccessible);

    let err = ctx
        .center_service
        .delete_center(&owner, Uuid::now_v7())
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::DataDoesNotExist);

    assert!(centers::exists_by_id(ctx.pool.connection(), center.id).await.unwrap());
}

#[actix_rt::test]
async fn test_admin_may_delete_any_center() {
    let ctx = setup().await;
    let owner = create_user(&ctx.pool, Role::CenterAdmin, Some("owner")).await;
    let admin = create_user(&ctx.pool, Role::Admin, Some("admin")).await;
    let (center, _) = create_center(&ctx.pool, owner.id, "mine", true).await;

    ctx.center_service
        .delete_center(&admin, center.id)
        .await
        .unwrap();

    assert!(!centers::exists_by_id(ctx.pool.connection(), center.id).await.unwrap());
}

#[actix_rt::test]
async fn test_find_centers_by_name_only_lists_approved() {
    let ctx = setup().await;
    let owner = create_user(&ctx.pool, Role::CenterAdmin, Some("owner")).await;
    let (approved, _) = create_center(&ctx.pool, owner.id, "the climb gangnam", true).await;
    create_center(&ctx.pool, owner.id, "the climb hongdae", false).await;
    create_center(&ctx.pool, owner.id, "seoul forest", true).await;

    let found = ctx
        .center_service
        .find_centers_by_name("climb")
        .await
        .unwrap();

    assert_eq!(found.len(), 1);
    assert_eq!(found[0].center_id, approved.id);
    assert_eq!(found[0].name, "the climb gangnam");
}

#[actix_rt::test]
async fn test_center_proof_upload_accepts_pdf() {
    let ctx = setup().await;

    let response = ctx
        .center_service
        .upload_file(
            CenterUploadPurpose::Proof,
            FileUpload {
                filename: "license.pdf".to_string(),
                data: vec![0x25, 0x50, 0x44, 0x46],
            },
        )
        .await
        .unwrap();
    assert!(response.file_url.starts_with("https://files.test/center/proof/"));
    assert!(response.file_url.ends_with(".pdf"));

    let err = ctx
        .center_service
        .upload_file(
            CenterUploadPurpose::Image,
            FileUpload {
                filename: "license.pdf".to_string(),
                data: vec![1],
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::InvalidFormat);
}
