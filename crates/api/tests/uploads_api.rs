//! HTTP-level tests for `POST /uploads/{purpose}`.

mod common;

use axum::http::StatusCode;
use cfomatch_core::roles::UserType;
use common::{body_json, get_auth, post_file_auth};
use sqlx::PgPool;

const PNG_BYTES: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR";
const PDF_BYTES: &[u8] = b"%PDF-1.4\n%\xe2\xe3\xcf\xd3\n";

#[sqlx::test(migrations = "../db/migrations")]
async fn png_as_document_is_400(pool: PgPool) {
    let (_user, token) = common::user_with_token(&pool, "cfo@example.com", UserType::Cfo).await;

    let app = common::build_test_app(pool);
    let response = post_file_auth(
        app,
        "/api/v1/uploads/document",
        "invoice.png",
        "image/png",
        PNG_BYTES,
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["success"], false);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn unknown_purpose_is_400(pool: PgPool) {
    let (_user, token) = common::user_with_token(&pool, "cfo@example.com", UserType::Cfo).await;

    let app = common::build_test_app(pool);
    let response = post_file_auth(
        app,
        "/api/v1/uploads/resume",
        "cv.pdf",
        "application/pdf",
        PDF_BYTES,
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn document_upload_is_recorded_under_a_generated_key(pool: PgPool) {
    let (user, token) = common::user_with_token(&pool, "cfo@example.com", UserType::Cfo).await;

    let app = common::build_test_app(pool);
    let response = post_file_auth(
        app,
        "/api/v1/uploads/document",
        "../../etc/invoice-2026-04.pdf",
        "application/pdf",
        PDF_BYTES,
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["purpose"], "document");
    assert_eq!(json["data"]["original_name"], "invoice-2026-04.pdf");
    assert_eq!(json["data"]["size_bytes"], PDF_BYTES.len());
    let path = json["data"]["storage_path"].as_str().unwrap();
    assert!(path.starts_with(&format!("documents/{}/", user.id)));
    assert!(path.ends_with(".pdf"));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn avatar_upload_sets_profile_avatar(pool: PgPool) {
    let (_user, token) = common::user_with_token(&pool, "co@example.com", UserType::Company).await;

    let app = common::build_test_app(pool.clone());
    let response = post_file_auth(
        app,
        "/api/v1/uploads/avatar",
        "me.png",
        "image/png",
        PNG_BYTES,
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let stored = body_json(response).await;

    let app = common::build_test_app(pool);
    let me = body_json(get_auth(app, "/api/v1/me", &token).await).await;
    assert_eq!(
        me["data"]["profile"]["avatar_path"],
        stored["data"]["storage_path"]
    );
}
