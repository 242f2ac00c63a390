//! HTTP-level tests for registration, login, token refresh and logout.

mod common;

use axum::http::StatusCode;
use cfomatch_core::roles::{UserStatus, UserType};
use cfomatch_db::repositories::UserRepo;
use common::{body_json, get_auth, post_json, post_json_auth, TEST_PASSWORD};
use serde_json::json;
use sqlx::PgPool;

async fn login(app: axum::Router, email: &str, password: &str) -> axum::http::Response<axum::body::Body> {
    post_json(
        app,
        "/api/v1/auth/login",
        json!({ "email": email, "password": password }),
    )
    .await
}

#[sqlx::test(migrations = "../db/migrations")]
async fn register_creates_account_profile_and_tokens(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/auth/register",
        json!({
            "email": "Owner@Example.com",
            "password": "long-enough-password",
            "user_type": "company",
            "display_name": "株式会社テスト"
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert!(json["data"]["access_token"].is_string());
    assert!(json["data"]["refresh_token"].is_string());
    assert_eq!(json["data"]["user"]["email"], "owner@example.com");
    assert_eq!(json["data"]["user"]["user_type"], "company");
    assert!(json["data"]["user"].get("password_hash").is_none());

    let token = json["data"]["access_token"].as_str().unwrap().to_string();
    let app = common::build_test_app(pool);
    let me = body_json(get_auth(app, "/api/v1/me", &token).await).await;
    assert_eq!(me["data"]["profile"]["display_name"], "株式会社テスト");
    assert!(me["data"]["company"].is_null());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn failed_registration_leaves_no_account_behind(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/auth/register",
        json!({
            "email": "retry@example.com",
            "password": "long-enough-password",
            "user_type": "cfo",
            "display_name": "bad\0name"
        }),
    )
    .await;
    assert_ne!(response.status(), StatusCode::CREATED);

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/auth/register",
        json!({
            "email": "retry@example.com",
            "password": "long-enough-password",
            "user_type": "cfo",
            "display_name": "山田 太郎"
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn register_rejects_admin_and_short_passwords(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/auth/register",
        json!({
            "email": "sneaky@example.com",
            "password": "long-enough-password",
            "user_type": "admin",
            "display_name": "Sneaky"
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/auth/register",
        json!({
            "email": "short@example.com",
            "password": "short",
            "user_type": "cfo",
            "display_name": "Short"
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn duplicate_registration_conflicts(pool: PgPool) {
    common::create_user(&pool, "taken@example.com", UserType::Cfo).await;

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/auth/register",
        json!({
            "email": "TAKEN@example.com",
            "password": "long-enough-password",
            "user_type": "cfo",
            "display_name": "Again"
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn login_with_wrong_password_is_401(pool: PgPool) {
    common::create_user(&pool, "cfo@example.com", UserType::Cfo).await;

    let app = common::build_test_app(pool.clone());
    assert_eq!(
        login(app, "cfo@example.com", "wrong-password").await.status(),
        StatusCode::UNAUTHORIZED
    );

    let app = common::build_test_app(pool);
    assert_eq!(
        login(app, "nobody@example.com", "whatever").await.status(),
        StatusCode::UNAUTHORIZED
    );
}

#[sqlx::test(migrations = "../db/migrations")]
async fn suspended_user_cannot_log_in(pool: PgPool) {
    let user = common::create_user(&pool, "suspended@example.com", UserType::Company).await;
    UserRepo::update_status(&pool, user.id, UserStatus::Suspended)
        .await
        .unwrap();

    let app = common::build_test_app(pool);
    let response = login(app, "suspended@example.com", TEST_PASSWORD).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn five_failures_lock_the_account(pool: PgPool) {
    common::create_user(&pool, "locked@example.com", UserType::Cfo).await;

    for _ in 0..5 {
        let app = common::build_test_app(pool.clone());
        assert_eq!(
            login(app, "locked@example.com", "wrong-password").await.status(),
            StatusCode::UNAUTHORIZED
        );
    }

    let app = common::build_test_app(pool.clone());
    let response = login(app, "locked@example.com", TEST_PASSWORD).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // Once the lock has expired, a single mistake does not re-lock.
    sqlx::query(
        "UPDATE users SET locked_until = NOW() - INTERVAL '1 minute' WHERE email = $1",
    )
    .bind("locked@example.com")
    .execute(&pool)
    .await
    .unwrap();

    let app = common::build_test_app(pool.clone());
    let response = login(app, "locked@example.com", "wrong-password").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let app = common::build_test_app(pool);
    let response = login(app, "locked@example.com", TEST_PASSWORD).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn refresh_rotates_and_old_token_is_single_use(pool: PgPool) {
    common::create_user(&pool, "rotate@example.com", UserType::Cfo).await;

    let app = common::build_test_app(pool.clone());
    let json = body_json(login(app, "rotate@example.com", TEST_PASSWORD).await).await;
    let original = json["data"]["refresh_token"].as_str().unwrap().to_string();

    let app = common::build_test_app(pool.clone());
    let response = post_json(app, "/api/v1/auth/refresh", json!({ "refresh_token": original })).await;
    assert_eq!(response.status(), StatusCode::OK);
    let rotated = body_json(response).await;
    assert_ne!(rotated["data"]["refresh_token"].as_str().unwrap(), original);

    let app = common::build_test_app(pool);
    let replay = post_json(app, "/api/v1/auth/refresh", json!({ "refresh_token": original })).await;
    assert_eq!(replay.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn logout_revokes_refresh_tokens(pool: PgPool) {
    common::create_user(&pool, "bye@example.com", UserType::Company).await;

    let app = common::build_test_app(pool.clone());
    let json = body_json(login(app, "bye@example.com", TEST_PASSWORD).await).await;
    let access = json["data"]["access_token"].as_str().unwrap().to_string();
    let refresh = json["data"]["refresh_token"].as_str().unwrap().to_string();

    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(app, "/api/v1/auth/logout", json!({}), &access).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let app = common::build_test_app(pool);
    let response = post_json(app, "/api/v1/auth/refresh", json!({ "refresh_token": refresh })).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
