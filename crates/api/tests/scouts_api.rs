//! HTTP-level tests for scouts and their conversations.

mod common;

use axum::http::StatusCode;
use cfomatch_core::roles::UserType;
use common::{body_json, get_auth, post_json_auth};
use serde_json::json;
use sqlx::PgPool;

/// Send a scout from `token`'s user to `receiver_id` and return its id.
async fn send_scout(pool: &PgPool, token: &str, receiver_id: i64, title: &str) -> i64 {
    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        "/api/v1/scouts",
        json!({ "receiver_id": receiver_id, "title": title, "body": "ぜひお話しさせてください" }),
        token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

#[sqlx::test(migrations = "../db/migrations")]
async fn company_scouts_cfo_and_both_mailboxes_show_it(pool: PgPool) {
    let (_company, company_token) =
        common::user_with_token(&pool, "co@example.com", UserType::Company).await;
    let (cfo, cfo_token) = common::user_with_token(&pool, "cfo@example.com", UserType::Cfo).await;

    let scout_id = send_scout(&pool, &company_token, cfo.id, "CFO募集").await;

    let app = common::build_test_app(pool.clone());
    let inbox = body_json(get_auth(app, "/api/v1/scouts", &cfo_token).await).await;
    assert_eq!(inbox["success"], true);
    assert_eq!(inbox["pagination"]["total"], 1);
    assert_eq!(inbox["data"][0]["id"], scout_id);
    assert_eq!(inbox["data"][0]["status"], "pending");
    assert_eq!(inbox["data"][0]["counterpart_type"], "company");
    assert_eq!(inbox["data"][0]["unread_count"], 1);

    let app = common::build_test_app(pool.clone());
    let outbox = body_json(get_auth(app, "/api/v1/scouts?box=sent", &company_token).await).await;
    assert_eq!(outbox["pagination"]["total"], 1);

    let app = common::build_test_app(pool);
    let empty = body_json(get_auth(app, "/api/v1/scouts", &company_token).await).await;
    assert_eq!(empty["pagination"]["total"], 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn scout_with_missing_field_is_400(pool: PgPool) {
    let (_company, token) =
        common::user_with_token(&pool, "co@example.com", UserType::Company).await;
    let cfo = common::create_user(&pool, "cfo@example.com", UserType::Cfo).await;

    let app = common::build_test_app(pool);
    let response = post_json_auth(
        app,
        "/api/v1/scouts",
        json!({ "receiver_id": cfo.id, "title": "No body" }),
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn scout_must_cross_sides(pool: PgPool) {
    let (_a, token) = common::user_with_token(&pool, "a@example.com", UserType::Company).await;
    let b = common::create_user(&pool, "b@example.com", UserType::Company).await;

    let app = common::build_test_app(pool);
    let response = post_json_auth(
        app,
        "/api/v1/scouts",
        json!({ "receiver_id": b.id, "title": "Hi", "body": "Same side" }),
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn second_pending_scout_to_same_user_conflicts(pool: PgPool) {
    let (_company, token) =
        common::user_with_token(&pool, "co@example.com", UserType::Company).await;
    let cfo = common::create_user(&pool, "cfo@example.com", UserType::Cfo).await;

    send_scout(&pool, &token, cfo.id, "First").await;

    let app = common::build_test_app(pool);
    let response = post_json_auth(
        app,
        "/api/v1/scouts",
        json!({ "receiver_id": cfo.id, "title": "Second", "body": "Again" }),
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn reverse_scout_while_one_is_pending_conflicts(pool: PgPool) {
    let (company, company_token) =
        common::user_with_token(&pool, "co@example.com", UserType::Company).await;
    let (cfo, cfo_token) = common::user_with_token(&pool, "cfo@example.com", UserType::Cfo).await;

    send_scout(&pool, &company_token, cfo.id, "CFO募集").await;

    let app = common::build_test_app(pool);
    let response = post_json_auth(
        app,
        "/api/v1/scouts",
        json!({ "receiver_id": company.id, "title": "ご提案", "body": "お手伝いできます" }),
        &cfo_token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["success"], false);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn accepting_a_declined_scout_is_409(pool: PgPool) {
    let (_company, company_token) =
        common::user_with_token(&pool, "co@example.com", UserType::Company).await;
    let (cfo, cfo_token) = common::user_with_token(&pool, "cfo@example.com", UserType::Cfo).await;
    let scout_id = send_scout(&pool, &company_token, cfo.id, "Offer").await;

    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        &format!("/api/v1/scouts/{scout_id}/decline"),
        json!({}),
        &cfo_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["status"], "declined");

    let app = common::build_test_app(pool);
    let response = post_json_auth(
        app,
        &format!("/api/v1/scouts/{scout_id}/accept"),
        json!({}),
        &cfo_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn only_the_receiver_may_accept(pool: PgPool) {
    let (_company, company_token) =
        common::user_with_token(&pool, "co@example.com", UserType::Company).await;
    let cfo = common::create_user(&pool, "cfo@example.com", UserType::Cfo).await;
    let (_other, other_token) =
        common::user_with_token(&pool, "other@example.com", UserType::Cfo).await;
    let scout_id = send_scout(&pool, &company_token, cfo.id, "Offer").await;

    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        &format!("/api/v1/scouts/{scout_id}/accept"),
        json!({}),
        &company_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let app = common::build_test_app(pool);
    let response = get_auth(app, &format!("/api/v1/scouts/{scout_id}"), &other_token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn conversation_flow_and_read_receipts(pool: PgPool) {
    let (_company, company_token) =
        common::user_with_token(&pool, "co@example.com", UserType::Company).await;
    let (cfo, cfo_token) = common::user_with_token(&pool, "cfo@example.com", UserType::Cfo).await;
    let scout_id = send_scout(&pool, &company_token, cfo.id, "Offer").await;

    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        &format!("/api/v1/scouts/{scout_id}/accept"),
        json!({}),
        &cfo_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        &format!("/api/v1/scouts/{scout_id}/messages"),
        json!({ "body": "よろしくお願いします" }),
        &cfo_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let app = common::build_test_app(pool.clone());
    let detail = body_json(
        get_auth(app, &format!("/api/v1/scouts/{scout_id}"), &company_token).await,
    )
    .await;
    assert_eq!(detail["data"]["scout"]["status"], "accepted");
    let types: Vec<&str> = detail["data"]["messages"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["message_type"].as_str().unwrap())
        .collect();
    assert_eq!(types, ["scout", "accepted", "text"]);

    let app = common::build_test_app(pool.clone());
    let read = body_json(
        post_json_auth(
            app,
            &format!("/api/v1/scouts/{scout_id}/read"),
            json!({}),
            &company_token,
        )
        .await,
    )
    .await;
    assert_eq!(read["data"]["marked"], 2);

    let app = common::build_test_app(pool);
    let blank = post_json_auth(
        app,
        &format!("/api/v1/scouts/{scout_id}/messages"),
        json!({ "body": "   " }),
        &company_token,
    )
    .await;
    assert_eq!(blank.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn withdrawn_scout_rejects_messages(pool: PgPool) {
    let (_company, company_token) =
        common::user_with_token(&pool, "co@example.com", UserType::Company).await;
    let cfo = common::create_user(&pool, "cfo@example.com", UserType::Cfo).await;
    let scout_id = send_scout(&pool, &company_token, cfo.id, "Offer").await;

    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        &format!("/api/v1/scouts/{scout_id}/withdraw"),
        json!({}),
        &company_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let app = common::build_test_app(pool);
    let response = post_json_auth(
        app,
        &format!("/api/v1/scouts/{scout_id}/messages"),
        json!({ "body": "Still there?" }),
        &company_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn scout_listing_pagination_is_consistent(pool: PgPool) {
    let (cfo, cfo_token) = common::user_with_token(&pool, "cfo@example.com", UserType::Cfo).await;
    for i in 0..3 {
        let (_company, token) =
            common::user_with_token(&pool, &format!("co{i}@example.com"), UserType::Company).await;
        send_scout(&pool, &token, cfo.id, &format!("Offer {i}")).await;
    }

    let app = common::build_test_app(pool.clone());
    let page1 = body_json(get_auth(app, "/api/v1/scouts?limit=2&page=1", &cfo_token).await).await;
    assert_eq!(page1["data"].as_array().unwrap().len(), 2);
    assert_eq!(page1["pagination"]["total"], 3);
    assert_eq!(page1["pagination"]["total_pages"], 2);
    assert_eq!(page1["pagination"]["has_next"], true);

    let app = common::build_test_app(pool);
    let page2 = body_json(get_auth(app, "/api/v1/scouts?limit=2&page=2", &cfo_token).await).await;
    assert_eq!(page2["data"].as_array().unwrap().len(), 1);
    assert_eq!(page2["pagination"]["has_next"], false);
    assert_eq!(page2["pagination"]["has_prev"], true);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn scout_activity_appears_in_sender_log_newest_first(pool: PgPool) {
    let (company, company_token) =
        common::user_with_token(&pool, "co@example.com", UserType::Company).await;
    let (cfo, _cfo_token) = common::user_with_token(&pool, "cfo@example.com", UserType::Cfo).await;

    let scout_id = send_scout(&pool, &company_token, cfo.id, "CFO募集").await;
    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        &format!("/api/v1/scouts/{scout_id}/messages"),
        json!({ "body": "日程はいかがでしょうか" }),
        &company_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let app = common::build_test_app(pool.clone());
    let log = body_json(get_auth(app, "/api/v1/activities", &company_token).await).await;
    assert_eq!(log["pagination"]["total"], 2);
    assert_eq!(log["data"][0]["activity_type"], "message_sent");
    assert_eq!(log["data"][1]["activity_type"], "scout_sent");
    assert_eq!(log["data"][1]["entity_id"], scout_id);
    assert_eq!(log["data"][1]["user_id"], company.id);

    let app = common::build_test_app(pool);
    let filtered = body_json(
        get_auth(app, "/api/v1/activities?activity_type=scout_sent", &company_token).await,
    )
    .await;
    assert_eq!(filtered["pagination"]["total"], 1);
}
