#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use cfomatch_api::auth::jwt::{generate_access_token, JwtConfig};
use cfomatch_api::auth::password::hash_password;
use cfomatch_api::config::ServerConfig;
use cfomatch_api::router::build_app_router;
use cfomatch_api::state::AppState;
use cfomatch_api::storage::StorageConfig;
use cfomatch_core::roles::UserType;
use cfomatch_db::models::profile::UpdateProfile;
use cfomatch_db::models::user::{CreateUser, User};
use cfomatch_db::repositories::{ProfileRepo, UserRepo};
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

/// Plaintext password of every user created by [`create_user`].
pub const TEST_PASSWORD: &str = "test_password_123!";

/// Build a test `ServerConfig` with safe defaults.
///
/// Uploads go to a fresh directory under the system temp dir so tests never
/// share files.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "test-secret-for-integration-tests".to_string(),
            access_token_expiry_mins: 15,
            refresh_token_expiry_days: 7,
        },
        storage: StorageConfig::Local {
            root: std::env::temp_dir().join(format!("cfomatch-test-{}", uuid::Uuid::new_v4())),
        },
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        storage: config.storage.build(),
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

/// Create an active user with a profile and return it.
pub async fn create_user(pool: &PgPool, email: &str, user_type: UserType) -> User {
    let password_hash = hash_password(TEST_PASSWORD).expect("hashing should succeed");
    let user = UserRepo::create(
        pool,
        &CreateUser {
            email: email.to_string(),
            password_hash,
            user_type,
        },
    )
    .await
    .expect("user creation should succeed");
    let name = email.split('@').next().unwrap_or(email);
    ProfileRepo::create(pool, user.id, name)
        .await
        .expect("profile creation should succeed");
    user
}

/// Mint an access token for `user` with the test JWT secret.
pub fn token_for(user: &User) -> String {
    generate_access_token(user.id, user.user_type, &test_config().jwt)
        .expect("token generation should succeed")
}

/// Create a user and return it together with a valid access token.
pub async fn user_with_token(pool: &PgPool, email: &str, user_type: UserType) -> (User, String) {
    let user = create_user(pool, email, user_type).await;
    let token = token_for(&user);
    (user, token)
}

/// Give a user a specific display name.
pub async fn set_display_name(pool: &PgPool, user: &User, name: &str) {
    ProfileRepo::update(
        pool,
        user.id,
        &UpdateProfile {
            display_name: Some(name.to_string()),
            ..Default::default()
        },
    )
    .await
    .expect("profile update should succeed");
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should be readable")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be JSON")
}

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("request should build");
    app.oneshot(request).await.expect("request should succeed")
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::POST, uri, None, Some(body)).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, Method::PUT, uri, Some(token), Some(body)).await
}

pub async fn patch_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, Method::PATCH, uri, Some(token), Some(body)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, Some(token), None).await
}

/// POST a single-file `multipart/form-data` body under the `file` field.
pub async fn post_file_auth(
    app: Router,
    uri: &str,
    filename: &str,
    content_type: &str,
    data: &[u8],
    token: &str,
) -> Response<Body> {
    let boundary = "cfomatch-test-boundary";
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\nContent-Type: {content_type}\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("authorization", format!("Bearer {token}"))
        .header(
            "content-type",
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(Body::from(body))
        .expect("request should build");
    app.oneshot(request).await.expect("request should succeed")
}
