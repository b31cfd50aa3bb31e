//! HTTP tests for `/api/v1/users`, login and token refresh.

mod common;

use axum::http::StatusCode;
use axum::Router;
use common::{body_json, delete, get, get_authed, patch_json, post_json};
use serde_json::{json, Value};

const PASSWORD: &str = "correct-horse-battery";

fn user_body(email: &str) -> Value {
    json!({
        "first_name": "Ada",
        "last_name": "Lovelace",
        "email": email,
        "password": PASSWORD,
        "department": "Structural"
    })
}

async fn login(app: &Router, email: &str, password: &str) -> axum::response::Response {
    post_json(
        app.clone(),
        "/api/v1/users/login",
        json!({ "email": email, "password": password }),
    )
    .await
}

#[tokio::test]
async fn create_user_hides_password_hash() {
    let app = common::build_test_app().await;

    let response = post_json(app, "/api/v1/users", user_body("ada@example.com")).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let user = body_json(response).await["data"].clone();
    assert_eq!(user["email"], "ada@example.com");
    assert_eq!(user["role"], "user");
    assert!(user.get("password_hash").is_none());
    assert!(user.get("password").is_none());
}

#[tokio::test]
async fn duplicate_email_is_409() {
    let app = common::build_test_app().await;
    post_json(app.clone(), "/api/v1/users", user_body("dup@example.com")).await;

    let response = post_json(app, "/api/v1/users", user_body("dup@example.com")).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["code"], "CONFLICT");
}

#[tokio::test]
async fn short_password_is_400() {
    let app = common::build_test_app().await;
    let mut body = user_body("short@example.com");
    body["password"] = json!("abc");

    let response = post_json(app, "/api/v1/users", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn invalid_email_is_400() {
    let app = common::build_test_app().await;
    let response = post_json(app, "/api/v1/users", user_body("not-an-email")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn unknown_role_is_400() {
    let app = common::build_test_app().await;
    let mut body = user_body("role@example.com");
    body["role"] = json!("superuser");

    let response = post_json(app, "/api/v1/users", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn login_then_me() {
    let app = common::build_test_app().await;
    post_json(app.clone(), "/api/v1/users", user_body("me@example.com")).await;

    let response = login(&app, "me@example.com", PASSWORD).await;
    assert_eq!(response.status(), StatusCode::OK);
    let tokens = body_json(response).await;
    assert_eq!(tokens["user"]["email"], "me@example.com");
    assert_eq!(tokens["expires_in"], 15 * 60);
    let access = tokens["access_token"].as_str().unwrap();

    let response = get_authed(app, "/api/v1/users/me", access).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["email"], "me@example.com");
}

#[tokio::test]
async fn wrong_password_and_unknown_email_look_the_same() {
    let app = common::build_test_app().await;
    post_json(app.clone(), "/api/v1/users", user_body("pw@example.com")).await;

    let wrong = login(&app, "pw@example.com", "not-the-password").await;
    assert_eq!(wrong.status(), StatusCode::UNAUTHORIZED);
    let wrong = body_json(wrong).await;

    let unknown = login(&app, "nobody@example.com", PASSWORD).await;
    assert_eq!(unknown.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(unknown).await, wrong);
}

#[tokio::test]
async fn me_requires_token() {
    let app = common::build_test_app().await;

    let response = get(app.clone(), "/api/v1/users/me").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = get_authed(app, "/api/v1/users/me", "garbage").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn refresh_issues_new_access_token() {
    let app = common::build_test_app().await;
    post_json(app.clone(), "/api/v1/users", user_body("rt@example.com")).await;
    let tokens = body_json(login(&app, "rt@example.com", PASSWORD).await).await;
    let refresh = tokens["refresh_token"].as_str().unwrap();

    let response = post_json(
        app.clone(),
        "/api/v1/users/refresh",
        json!({ "refresh_token": refresh }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let access = body_json(response).await["access_token"]
        .as_str()
        .unwrap()
        .to_string();

    let response = get_authed(app.clone(), "/api/v1/users/me", &access).await;
    assert_eq!(response.status(), StatusCode::OK);

    // An access token is not a refresh token.
    let response = post_json(
        app,
        "/api/v1/users/refresh",
        json!({ "refresh_token": access }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn patch_password_changes_login() {
    let app = common::build_test_app().await;
    let created = body_json(post_json(app.clone(), "/api/v1/users", user_body("p@example.com")).await).await;
    let id = created["data"]["id"].as_i64().unwrap();

    let response = patch_json(
        app.clone(),
        &format!("/api/v1/users/{id}"),
        json!({ "password": "a-brand-new-password", "department": "Civil" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["department"], "Civil");

    assert_eq!(
        login(&app, "p@example.com", PASSWORD).await.status(),
        StatusCode::UNAUTHORIZED
    );
    assert_eq!(
        login(&app, "p@example.com", "a-brand-new-password").await.status(),
        StatusCode::OK
    );
}

#[tokio::test]
async fn delete_user() {
    let app = common::build_test_app().await;
    let created = body_json(post_json(app.clone(), "/api/v1/users", user_body("d@example.com")).await).await;
    let id = created["data"]["id"].as_i64().unwrap();

    let response = delete(app.clone(), &format!("/api/v1/users/{id}")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get(app.clone(), &format!("/api/v1/users/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let users = body_json(get(app, "/api/v1/users").await).await;
    assert_eq!(users["data"], json!([]));
}
