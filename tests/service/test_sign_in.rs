//! OAuth sign-in, test sign-in and nickname checks.

use claon_admin_lib::error::ErrorCode;
use claon_admin_lib::models::{OAuthProvider, Role, SignInRequest};

use super::test_helpers::*;

fn token(value: &str) -> SignInRequest {
    SignInRequest {
        token: value.to_string(),
    }
}

#[actix_rt::test]
async fn test_first_sign_in_creates_pending_user() {
    let ctx = setup().await;

    let response = ctx
        .user_service
        .sign_in(OAuthProvider::Google, token(VALID_OAUTH_TOKEN))
        .await
        .expect("sign-in should succeed");

    assert!(!response.is_signed_up);
    assert_eq!(response.profile.role, Role::Pending);
    assert_eq!(response.profile.email.as_deref(), Some("climber@gmail.com"));

    let subject = ctx.jwt.verify_access_token(&response.access_token).unwrap();
    assert_eq!(subject.role, Role::Pending);
    assert_eq!(subject.sns, "climber@gmail.com");
}

#[actix_rt::test]
async fn test_repeated_sign_in_reuses_user() {
    let ctx = setup().await;

    let first = ctx
        .user_service
        .sign_in(OAuthProvider::Google, token(VALID_OAUTH_TOKEN))
        .await
        .unwrap();
    let second = ctx
        .user_service
        .sign_in(OAuthProvider::Google, token(VALID_OAUTH_TOKEN))
        .await
        .unwrap();

    let first_id = ctx.jwt.verify_access_token(&first.access_token).unwrap().id;
    let second_id = ctx.jwt.verify_access_token(&second.access_token).unwrap().id;
    assert_eq!(first_id, second_id);

    let all = claon_admin_lib::db::users::find_all(ctx.pool.connection())
        .await
        .unwrap();
    assert_eq!(all.len(), 1);
}

#[actix_rt::test]
async fn test_sign_in_reports_signed_up_role() {
    let ctx = setup().await;
    let first = ctx
        .user_service
        .sign_in(OAuthProvider::Google, token(VALID_OAUTH_TOKEN))
        .await
        .unwrap();
    let subject = ctx.jwt.verify_access_token(&first.access_token).unwrap();

    ctx.user_service
        .sign_up_lector(&subject, lector_request("setter"))
        .await
        .unwrap();

    let again = ctx
        .user_service
        .sign_in(OAuthProvider::Google, token(VALID_OAUTH_TOKEN))
        .await
        .unwrap();
    assert!(again.is_signed_up);
    assert_eq!(again.profile.role, Role::Lector);
    assert_eq!(again.profile.nickname.as_deref(), Some("setter"));
}

#[actix_rt::test]
async fn test_sign_in_with_wrong_token() {
    let ctx = setup().await;

    let err = ctx
        .user_service
        .sign_in(OAuthProvider::Google, token("forged"))
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::WrongOauthToken);
}

#[actix_rt::test]
async fn test_sign_in_with_unconfigured_provider() {
    let ctx = setup().await;

    let err = ctx
        .user_service
        .sign_in(OAuthProvider::Kakao, token(VALID_OAUTH_TOKEN))
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::InvalidFormat);
}

#[actix_rt::test]
async fn test_test_sign_in_uses_token_as_identity() {
    let ctx = setup().await;

    let first = ctx.user_service.test_sign_in(token("tester-1")).await.unwrap();
    let again = ctx.user_service.test_sign_in(token("tester-1")).await.unwrap();
    let other = ctx.user_service.test_sign_in(token("tester-2")).await.unwrap();

    let id = |t: &str| ctx.jwt.verify_access_token(t).unwrap().id;
    assert_eq!(id(&first.access_token), id(&again.access_token));
    assert_ne!(id(&first.access_token), id(&other.access_token));
    assert!(!first.is_signed_up);

    let err = ctx.user_service.test_sign_in(token("  ")).await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::InvalidFormat);
}

#[actix_rt::test]
async fn test_nickname_duplication_check() {
    let ctx = setup().await;
    create_user(&ctx.pool, Role::Lector, Some("taken")).await;

    let taken = ctx
        .user_service
        .check_nickname_duplication("taken")
        .await
        .unwrap();
    let free = ctx
        .user_service
        .check_nickname_duplication("free")
        .await
        .unwrap();

    assert!(taken.is_duplicated);
    assert!(!free.is_duplicated);
}
