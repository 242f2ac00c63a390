//! HTTP-level tests for contracts, invoices and the admin finance console.

mod common;

use axum::http::StatusCode;
use cfomatch_core::roles::UserType;
use common::{body_json, get_auth, patch_json_auth, post_json_auth};
use serde_json::json;
use sqlx::PgPool;

struct Parties {
    company_token: String,
    cfo_token: String,
    scout_id: i64,
}

/// A company and a CFO with an accepted scout between them.
async fn accepted_scout(pool: &PgPool) -> Parties {
    let (_company, company_token) =
        common::user_with_token(pool, "co@example.com", UserType::Company).await;
    let (cfo, cfo_token) = common::user_with_token(pool, "cfo@example.com", UserType::Cfo).await;

    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        "/api/v1/scouts",
        json!({ "receiver_id": cfo.id, "title": "CFO募集", "body": "詳細はこちら" }),
        &company_token,
    )
    .await;
    let scout_id = body_json(response).await["data"]["id"].as_i64().unwrap();

    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        &format!("/api/v1/scouts/{scout_id}/accept"),
        json!({}),
        &cfo_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    Parties {
        company_token,
        cfo_token,
        scout_id,
    }
}

async fn propose_contract(pool: &PgPool, parties: &Parties) -> i64 {
    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        "/api/v1/contracts",
        json!({
            "scout_id": parties.scout_id,
            "title": "月次決算支援",
            "description": "週1日稼働",
            "monthly_fee": 300000,
            "start_date": "2026-04-01",
            "end_date": "2027-03-31"
        }),
        &parties.company_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "pending");
    json["data"]["id"].as_i64().unwrap()
}

async fn set_status(pool: &PgPool, contract_id: i64, status: &str, token: &str) -> StatusCode {
    let app = common::build_test_app(pool.clone());
    patch_json_auth(
        app,
        &format!("/api/v1/contracts/{contract_id}/status"),
        json!({ "status": status }),
        token,
    )
    .await
    .status()
}

#[sqlx::test(migrations = "../db/migrations")]
async fn contract_requires_an_accepted_scout(pool: PgPool) {
    let (_company, company_token) =
        common::user_with_token(&pool, "co@example.com", UserType::Company).await;
    let cfo = common::create_user(&pool, "cfo@example.com", UserType::Cfo).await;

    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        "/api/v1/scouts",
        json!({ "receiver_id": cfo.id, "title": "Offer", "body": "Pending" }),
        &company_token,
    )
    .await;
    let scout_id = body_json(response).await["data"]["id"].as_i64().unwrap();

    let app = common::build_test_app(pool);
    let response = post_json_auth(
        app,
        "/api/v1/contracts",
        json!({
            "scout_id": scout_id,
            "title": "Too early",
            "monthly_fee": 100000,
            "start_date": "2026-04-01"
        }),
        &company_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn cfo_cannot_propose_contracts(pool: PgPool) {
    let parties = accepted_scout(&pool).await;

    let app = common::build_test_app(pool);
    let response = post_json_auth(
        app,
        "/api/v1/contracts",
        json!({
            "scout_id": parties.scout_id,
            "title": "Wrong side",
            "monthly_fee": 100000,
            "start_date": "2026-04-01"
        }),
        &parties.cfo_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn contract_status_lifecycle(pool: PgPool) {
    let parties = accepted_scout(&pool).await;
    let contract_id = propose_contract(&pool, &parties).await;

    assert_eq!(
        set_status(&pool, contract_id, "signed", &parties.cfo_token).await,
        StatusCode::BAD_REQUEST
    );
    assert_eq!(
        set_status(&pool, contract_id, "active", &parties.company_token).await,
        StatusCode::FORBIDDEN
    );
    assert_eq!(
        set_status(&pool, contract_id, "completed", &parties.cfo_token).await,
        StatusCode::CONFLICT
    );
    assert_eq!(
        set_status(&pool, contract_id, "active", &parties.cfo_token).await,
        StatusCode::OK
    );
    assert_eq!(
        set_status(&pool, contract_id, "completed", &parties.company_token).await,
        StatusCode::OK
    );
    assert_eq!(
        set_status(&pool, contract_id, "cancelled", &parties.company_token).await,
        StatusCode::CONFLICT
    );
}

#[sqlx::test(migrations = "../db/migrations")]
async fn contracts_are_scoped_to_parties(pool: PgPool) {
    let parties = accepted_scout(&pool).await;
    let contract_id = propose_contract(&pool, &parties).await;
    let (_outsider, outsider_token) =
        common::user_with_token(&pool, "outsider@example.com", UserType::Company).await;
    let (_admin, admin_token) =
        common::user_with_token(&pool, "admin@example.com", UserType::Admin).await;

    let app = common::build_test_app(pool.clone());
    let listed = body_json(get_auth(app, "/api/v1/contracts", &outsider_token).await).await;
    assert_eq!(listed["pagination"]["total"], 0);

    let app = common::build_test_app(pool.clone());
    let response = get_auth(app, &format!("/api/v1/contracts/{contract_id}"), &outsider_token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let app = common::build_test_app(pool.clone());
    let listed = body_json(get_auth(app, "/api/v1/contracts", &parties.cfo_token).await).await;
    assert_eq!(listed["pagination"]["total"], 1);

    let app = common::build_test_app(pool);
    let listed = body_json(get_auth(app, "/api/v1/contracts", &admin_token).await).await;
    assert_eq!(listed["pagination"]["total"], 1);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn invoices_need_an_active_contract_and_compute_tax(pool: PgPool) {
    let parties = accepted_scout(&pool).await;
    let contract_id = propose_contract(&pool, &parties).await;
    let invoice = json!({
        "amount": 300000,
        "issue_date": "2026-04-30",
        "due_date": "2026-05-31"
    });

    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        &format!("/api/v1/contracts/{contract_id}/invoices"),
        invoice.clone(),
        &parties.cfo_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    assert_eq!(
        set_status(&pool, contract_id, "active", &parties.cfo_token).await,
        StatusCode::OK
    );

    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        &format!("/api/v1/contracts/{contract_id}/invoices"),
        invoice.clone(),
        &parties.company_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        &format!("/api/v1/contracts/{contract_id}/invoices"),
        invoice,
        &parties.cfo_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["tax_amount"], 30000);
    assert_eq!(json["data"]["total_amount"], 330000);
    assert_eq!(json["data"]["status"], "issued");
    assert_eq!(
        json["data"]["invoice_number"],
        format!("INV-202604-{contract_id}-001")
    );

    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        &format!("/api/v1/contracts/{contract_id}/invoices"),
        json!({ "amount": 1000, "issue_date": "2026-05-31", "due_date": "2026-05-01" }),
        &parties.cfo_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let app = common::build_test_app(pool);
    let listed = body_json(
        get_auth(
            app,
            &format!("/api/v1/contracts/{contract_id}/invoices"),
            &parties.company_token,
        )
        .await,
    )
    .await;
    assert_eq!(listed["pagination"]["total"], 1);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn admin_confirms_payment_and_summary_reflects_it(pool: PgPool) {
    let parties = accepted_scout(&pool).await;
    let contract_id = propose_contract(&pool, &parties).await;
    set_status(&pool, contract_id, "active", &parties.cfo_token).await;
    let (_admin, admin_token) =
        common::user_with_token(&pool, "admin@example.com", UserType::Admin).await;

    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        &format!("/api/v1/contracts/{contract_id}/invoices"),
        json!({ "amount": 100000, "issue_date": "2026-04-30", "due_date": "2026-05-31" }),
        &parties.cfo_token,
    )
    .await;
    let invoice_id = body_json(response).await["data"]["id"].as_i64().unwrap();

    let app = common::build_test_app(pool.clone());
    let summary = body_json(get_auth(app, "/api/v1/admin/finance/summary", &admin_token).await).await;
    assert_eq!(summary["data"]["outstanding_amount"], 110000);

    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        &format!("/api/v1/admin/finance/invoices/{invoice_id}/confirm-payment"),
        json!({ "note": "振込確認済み" }),
        &admin_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let paid = body_json(response).await;
    assert_eq!(paid["data"]["status"], "paid");
    assert!(paid["data"]["paid_at"].is_string());
    assert_eq!(paid["data"]["admin_note"], "振込確認済み");

    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        &format!("/api/v1/admin/finance/invoices/{invoice_id}/confirm-payment"),
        json!({}),
        &admin_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let app = common::build_test_app(pool.clone());
    let summary = body_json(get_auth(app, "/api/v1/admin/finance/summary", &admin_token).await).await;
    assert_eq!(summary["data"]["outstanding_amount"], 0);
    assert_eq!(summary["data"]["by_status"][0]["status"], "paid");
    assert_eq!(summary["data"]["by_status"][0]["count"], 1);

    let app = common::build_test_app(pool);
    let listed = body_json(
        get_auth(app, "/api/v1/admin/finance/invoices?status=paid", &admin_token).await,
    )
    .await;
    assert_eq!(listed["pagination"]["total"], 1);
    assert_eq!(listed["data"][0]["contract_title"], "月次決算支援");
    assert_eq!(listed["data"][0]["company_name"], "co");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn invoice_cannot_be_marked_overdue_before_due_date(pool: PgPool) {
    let parties = accepted_scout(&pool).await;
    let contract_id = propose_contract(&pool, &parties).await;
    set_status(&pool, contract_id, "active", &parties.cfo_token).await;
    let (_admin, admin_token) =
        common::user_with_token(&pool, "admin@example.com", UserType::Admin).await;

    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        &format!("/api/v1/contracts/{contract_id}/invoices"),
        json!({ "amount": 100000, "issue_date": "2099-01-01", "due_date": "2099-01-31" }),
        &parties.cfo_token,
    )
    .await;
    let invoice_id = body_json(response).await["data"]["id"].as_i64().unwrap();

    let app = common::build_test_app(pool.clone());
    let response = patch_json_auth(
        app,
        &format!("/api/v1/admin/finance/invoices/{invoice_id}/status"),
        json!({ "status": "overdue" }),
        &admin_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let app = common::build_test_app(pool);
    let response = patch_json_auth(
        app,
        &format!("/api/v1/admin/finance/invoices/{invoice_id}/status"),
        json!({ "status": "cancelled", "note": "重複発行" }),
        &admin_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["status"], "cancelled");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn oversized_invoice_amount_is_rejected(pool: PgPool) {
    let parties = accepted_scout(&pool).await;
    let contract_id = propose_contract(&pool, &parties).await;
    assert_eq!(
        set_status(&pool, contract_id, "active", &parties.cfo_token).await,
        StatusCode::OK
    );

    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        &format!("/api/v1/contracts/{contract_id}/invoices"),
        json!({
            "amount": i64::MAX / 5,
            "issue_date": "2026-04-30",
            "due_date": "2026-05-31"
        }),
        &parties.cfo_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["code"], "VALIDATION_ERROR");

    let app = common::build_test_app(pool);
    let listed = body_json(
        get_auth(
            app,
            &format!("/api/v1/contracts/{contract_id}/invoices"),
            &parties.cfo_token,
        )
        .await,
    )
    .await;
    assert_eq!(listed["pagination"]["total"], 0);
}
