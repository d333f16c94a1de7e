//! HTTP surface: routing, bearer authentication, token headers and error bodies.

use actix_http::Request;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use claon_admin_lib::api::{self, MaxUploadSize};
use claon_admin_lib::config::{ACCESS_TOKEN_HEADER, REFRESH_TOKEN_HEADER};
use serde_json::{Value, json};

use super::test_helpers::*;

async fn create_test_app(
    ctx: &TestContext,
    allow_test_sign_in: bool,
) -> impl Service<Request, Response = ServiceResponse, Error = actix_web::Error> {
    test::init_service(
        App::new()
            .app_data(web::Data::new(ctx.pool.clone()))
            .app_data(web::Data::new(ctx.jwt.clone()))
            .app_data(web::Data::new(ctx.user_service.clone()))
            .app_data(web::Data::new(ctx.center_service.clone()))
            .app_data(web::Data::new(ctx.admin_service.clone()))
            .app_data(web::Data::new(MaxUploadSize(MAX_UPLOAD_SIZE)))
            .app_data(api::json_config())
            .app_data(api::query_config())
            .service(
                web::scope("/api/v1")
                    .configure(|cfg| api::configure_api(cfg, allow_test_sign_in)),
            ),
    )
    .await
}

async fn test_sign_in(
    app: &impl Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
    account: &str,
) -> String {
    let req = test::TestRequest::post()
        .uri("/api/v1/auth/test-sign-in")
        .set_json(json!({ "token": account }))
        .to_request();
    let resp = test::call_service(app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    resp.headers()
        .get(ACCESS_TOKEN_HEADER)
        .and_then(|v| v.to_str().ok())
        .expect("access token header")
        .to_string()
}

fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {}", token))
}

#[actix_rt::test]
async fn test_health_and_ready() {
    let ctx = setup().await;
    let app = create_test_app(&ctx, false).await;

    let req = test::TestRequest::get().uri("/api/v1/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get().uri("/api/v1/ready").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["database"], "connected");
}

#[actix_rt::test]
async fn test_missing_token_is_invalid_jwt() {
    let ctx = setup().await;
    let app = create_test_app(&ctx, false).await;

    let req = test::TestRequest::get().uri("/api/v1/center").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "INVALID_JWT");

    let req = test::TestRequest::get()
        .uri("/api/v1/center")
        .insert_header(bearer("not-a-jwt"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "INVALID_JWT");
}

#[actix_rt::test]
async fn test_sign_in_route_availability() {
    let ctx = setup().await;

    let production = create_test_app(&ctx, false).await;
    let req = test::TestRequest::post()
        .uri("/api/v1/auth/test-sign-in")
        .set_json(json!({ "token": "tester" }))
        .to_request();
    let resp = test::call_service(&production, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let development = create_test_app(&ctx, true).await;
    let req = test::TestRequest::post()
        .uri("/api/v1/auth/test-sign-in")
        .set_json(json!({ "token": "tester" }))
        .to_request();
    let resp = test::call_service(&development, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.headers().contains_key(ACCESS_TOKEN_HEADER));
    assert!(resp.headers().contains_key(REFRESH_TOKEN_HEADER));
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["is_signed_up"], false);
    assert_eq!(body["profile"]["role"], "PENDING");
}

#[actix_rt::test]
async fn test_provider_sign_in() {
    let ctx = setup().await;
    let app = create_test_app(&ctx, false).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/google/sign-in")
        .set_json(json!({ "token": VALID_OAUTH_TOKEN }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/google/sign-in")
        .set_json(json!({ "token": "forged" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "WRONG_OAUTH_TOKEN");

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/github/sign-in")
        .set_json(json!({ "token": VALID_OAUTH_TOKEN }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "INVALID_FORMAT");
}

#[actix_rt::test]
async fn test_malformed_body_is_invalid_format() {
    let ctx = setup().await;
    let app = create_test_app(&ctx, true).await;
    let token = test_sign_in(&app, "tester").await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/lector/sign-up")
        .insert_header(bearer(&token))
        .insert_header(("Content-Type", "application/json"))
        .set_payload("{\"profile\": 42}")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "INVALID_FORMAT");
}

#[actix_rt::test]
async fn test_center_sign_up_then_list_over_http() {
    let ctx = setup().await;
    let app = create_test_app(&ctx, true).await;
    let token = test_sign_in(&app, "owner-account").await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/center/sign-up")
        .insert_header(bearer(&token))
        .set_json(center_request("owner"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Value = test::read_body_json(resp).await;
    let center_id = created["center_id"].as_str().expect("center id").to_string();

    let req = test::TestRequest::get()
        .uri("/api/v1/auth/nickname/owner/is-duplicated")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["is_duplicated"], true);

    // Signing in again yields a token carrying the new role.
    let token = test_sign_in(&app, "owner-account").await;

    let req = test::TestRequest::get()
        .uri("/api/v1/center?page=1&size=10")
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["total_num"], 1);
    assert_eq!(body["next_page_num"], -1);
    assert_eq!(body["results"][0]["center_id"], center_id.as_str());

    let req = test::TestRequest::get()
        .uri("/api/v1/center?page=0")
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::get()
        .uri("/api/v1/admin/centers")
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "NONE_ADMIN_ACCOUNT");

    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/center/{}", center_id))
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/center/{}", center_id))
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "DATA_DOES_NOT_EXIST");
}

#[actix_rt::test]
async fn test_profile_upload_over_multipart() {
    let ctx = setup().await;
    let app = create_test_app(&ctx, true).await;
    let token = test_sign_in(&app, "uploader").await;

    let boundary = "claon-boundary";
    let mut payload = Vec::new();
    payload.extend_from_slice(format!("--{}\r\n", boundary).as_bytes());
    payload.extend_from_slice(
        b"Content-Disposition: form-data; name=\"file\"; filename=\"me.png\"\r\n",
    );
    payload.extend_from_slice(b"Content-Type: image/png\r\n\r\n");
    payload.extend_from_slice(&[0x89, 0x50, 0x4e, 0x47]);
    payload.extend_from_slice(format!("\r\n--{}--\r\n", boundary).as_bytes());

    let req = test::TestRequest::post()
        .uri("/api/v1/user/profile")
        .insert_header(bearer(&token))
        .insert_header((
            "Content-Type",
            format!("multipart/form-data; boundary={}", boundary),
        ))
        .set_payload(payload)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    let url = body["file_url"].as_str().expect("file url");
    assert!(url.starts_with("https://files.test/user/profile/"));

    let stored = ctx.storage.objects.lock().unwrap().clone();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].size, 4);
}
