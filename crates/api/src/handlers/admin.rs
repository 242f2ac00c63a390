//! Admin console handlers (`/admin`): user moderation, finance, tags and
//! support tickets.
//!
//! Every handler takes [`RequireAdmin`], so non-admin callers get 403
//! before any work is done.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use cfomatch_core::activity::{self, entity};
use cfomatch_core::error::CoreError;
use cfomatch_core::invoice::{self, is_past_due, InvoiceStatus};
use cfomatch_core::roles::UserStatus;
use cfomatch_core::search::contains_pattern;
use cfomatch_core::support::{self, MAX_ADMIN_NOTE_CHARS};
use cfomatch_core::tag::MAX_NAME_CHARS;
use cfomatch_core::types::{DbId, Yen};
use cfomatch_core::validation::validate_text;
use cfomatch_db::models::activity::CreateActivity;
use cfomatch_db::models::invoice::{
    ConfirmPayment, FinanceInvoiceRow, Invoice, InvoiceListParams, InvoiceStatusTotal,
    UpdateInvoiceStatus,
};
use cfomatch_db::models::support::{SupportTicket, TicketListParams, UpdateTicket};
use cfomatch_db::models::tag::{CreateTag, Tag, TagListParams, UpdateTag};
use cfomatch_db::models::user::{AdminUserRow, UpdateUserStatus, UserListParams, UserResponse};
use cfomatch_db::repositories::{
    InvoiceRepo, SessionRepo, SupportTicketRepo, TagRepo, UserRepo,
};
use chrono::Utc;
use serde::Serialize;
use serde_json::json;

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::handlers::activities;
use crate::middleware::rbac::RequireAdmin;
use crate::response::{DataResponse, PaginatedResponse};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/users
pub async fn list_users(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    AppQuery(params): AppQuery<UserListParams>,
) -> AppResult<Json<PaginatedResponse<AdminUserRow>>> {
    let pattern = contains_pattern(params.q.as_deref())?;
    let (items, total) = UserRepo::list_for_admin(&state.pool, &params, pattern.as_deref()).await?;
    Ok(Json(PaginatedResponse::new(items, &params.page_params(), total)))
}

/// PATCH /api/v1/admin/users/{id}/status
///
/// Suspending an account also revokes all of its refresh sessions.
pub async fn update_user_status(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<UpdateUserStatus>,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    if id == admin.user_id {
        return Err(AppError::Core(CoreError::Validation(
            "Admins cannot change their own status".into(),
        )));
    }
    let status: UserStatus = input.status.parse()?;

    let user = UserRepo::update_status(&state.pool, id, status)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;

    if !status.is_usable() {
        let revoked = SessionRepo::revoke_all_for_user(&state.pool, id).await?;
        tracing::info!(user_id = id, revoked, "Revoked sessions of deactivated user");
    }

    tracing::info!(user_id = id, status = %status, admin_id = admin.user_id, "User status changed");
    activities::record(
        &state,
        CreateActivity::new(admin.user_id, activity::USER_STATUS_CHANGED)
            .entity(entity::USER, id)
            .metadata(json!({ "status": status })),
    )
    .await;

    Ok(Json(DataResponse::new(UserResponse::from(&user))))
}

// ---------------------------------------------------------------------------
// Finance
// ---------------------------------------------------------------------------

/// Finance dashboard figures.
#[derive(Debug, Serialize)]
pub struct FinanceSummary {
    pub by_status: Vec<InvoiceStatusTotal>,
    /// Sum of `total_amount` over issued and overdue invoices.
    pub outstanding_amount: Yen,
}

/// GET /api/v1/admin/finance/invoices
pub async fn list_invoices(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    AppQuery(params): AppQuery<InvoiceListParams>,
) -> AppResult<Json<PaginatedResponse<FinanceInvoiceRow>>> {
    let (items, total) = InvoiceRepo::list_for_finance(&state.pool, &params).await?;
    Ok(Json(PaginatedResponse::new(items, &params.page_params(), total)))
}

/// GET /api/v1/admin/finance/summary
pub async fn finance_summary(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<DataResponse<FinanceSummary>>> {
    let by_status = InvoiceRepo::status_totals(&state.pool).await?;
    let outstanding_amount = by_status
        .iter()
        .filter(|t| t.status.is_outstanding())
        .map(|t| t.total_amount)
        .sum();
    Ok(Json(DataResponse::new(FinanceSummary {
        by_status,
        outstanding_amount,
    })))
}

async fn load_invoice(state: &AppState, id: DbId) -> AppResult<Invoice> {
    InvoiceRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Invoice",
            id,
        }))
}

fn validate_note(note: Option<&str>) -> Result<(), CoreError> {
    match note {
        Some(note) => validate_text("note", note, MAX_ADMIN_NOTE_CHARS),
        None => Ok(()),
    }
}

/// POST /api/v1/admin/finance/invoices/{id}/confirm-payment
///
/// Mark an issued or overdue invoice as paid after checking the bank
/// statement by hand.
pub async fn confirm_payment(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<ConfirmPayment>,
) -> AppResult<Json<DataResponse<Invoice>>> {
    validate_note(input.note.as_deref())?;
    let current = load_invoice(&state, id).await?;
    invoice::validate_transition(current.status, InvoiceStatus::Paid)?;

    let paid = InvoiceRepo::confirm_payment(&state.pool, id, current.status, input.note.as_deref())
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Conflict(format!(
                "Invoice {id} was modified concurrently; reload and retry"
            )))
        })?;

    tracing::info!(invoice_id = id, admin_id = admin.user_id, "Invoice payment confirmed");
    activities::record(
        &state,
        CreateActivity::new(admin.user_id, activity::INVOICE_PAID)
            .entity(entity::INVOICE, id)
            .metadata(json!({ "total_amount": paid.total_amount })),
    )
    .await;

    Ok(Json(DataResponse::new(paid)))
}

/// PATCH /api/v1/admin/finance/invoices/{id}/status
///
/// Move an invoice to `overdue` (only once its due date has passed),
/// `cancelled` or `paid`.
pub async fn update_invoice_status(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<UpdateInvoiceStatus>,
) -> AppResult<Json<DataResponse<Invoice>>> {
    let next: InvoiceStatus = input.status.parse()?;
    validate_note(input.note.as_deref())?;
    let current = load_invoice(&state, id).await?;
    invoice::validate_transition(current.status, next)?;

    if next == InvoiceStatus::Overdue
        && !is_past_due(current.status, current.due_date, Utc::now().date_naive())
    {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Invoice {id} is not past its due date {}",
            current.due_date
        ))));
    }

    let updated =
        InvoiceRepo::update_status(&state.pool, id, current.status, next, input.note.as_deref())
            .await?
            .ok_or_else(|| {
                AppError::Core(CoreError::Conflict(format!(
                    "Invoice {id} was modified concurrently; reload and retry"
                )))
            })?;

    tracing::info!(
        invoice_id = id,
        from = %current.status,
        to = %next,
        admin_id = admin.user_id,
        "Invoice status changed"
    );
    if next == InvoiceStatus::Paid {
        activities::record(
            &state,
            CreateActivity::new(admin.user_id, activity::INVOICE_PAID)
                .entity(entity::INVOICE, id)
                .metadata(json!({ "total_amount": updated.total_amount })),
        )
        .await;
    }

    Ok(Json(DataResponse::new(updated)))
}

// ---------------------------------------------------------------------------
// Tags
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/tags
pub async fn list_tags(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    AppQuery(params): AppQuery<TagListParams>,
) -> AppResult<Json<DataResponse<Vec<Tag>>>> {
    let tags = TagRepo::list(&state.pool, &params).await?;
    Ok(Json(DataResponse::new(tags)))
}

/// POST /api/v1/admin/tags
pub async fn create_tag(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    AppJson(input): AppJson<CreateTag>,
) -> AppResult<(StatusCode, Json<DataResponse<Tag>>)> {
    validate_text("name", &input.name, MAX_NAME_CHARS)?;
    let tag = TagRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse::new(tag))))
}

/// PUT /api/v1/admin/tags/{id}
pub async fn update_tag(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<UpdateTag>,
) -> AppResult<Json<DataResponse<Tag>>> {
    if let Some(name) = &input.name {
        validate_text("name", name, MAX_NAME_CHARS)?;
    }
    let tag = TagRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Tag", id }))?;
    Ok(Json(DataResponse::new(tag)))
}

/// DELETE /api/v1/admin/tags/{id}
pub async fn delete_tag(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    AppPath(id): AppPath<DbId>,
) -> AppResult<StatusCode> {
    if TagRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound { entity: "Tag", id }))
    }
}

// ---------------------------------------------------------------------------
// Support tickets
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/support/tickets
pub async fn list_tickets(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    AppQuery(params): AppQuery<TicketListParams>,
) -> AppResult<Json<PaginatedResponse<SupportTicket>>> {
    let (items, total) = SupportTicketRepo::list(&state.pool, None, &params).await?;
    Ok(Json(PaginatedResponse::new(items, &params.page_params(), total)))
}

/// PATCH /api/v1/admin/support/tickets/{id}
pub async fn update_ticket(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<UpdateTicket>,
) -> AppResult<Json<DataResponse<SupportTicket>>> {
    if input.status.is_none() && input.admin_note.is_none() {
        return Err(AppError::BadRequest(
            "Provide at least one of 'status' or 'admin_note'".into(),
        ));
    }
    if let Some(note) = &input.admin_note {
        validate_text("admin_note", note, MAX_ADMIN_NOTE_CHARS)?;
    }

    let ticket = SupportTicketRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "SupportTicket",
            id,
        }))?;
    if let Some(next) = input.status {
        support::validate_transition(ticket.status, next)?;
    }

    let updated = SupportTicketRepo::update(&state.pool, id, input.status, input.admin_note.as_deref())
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "SupportTicket",
            id,
        }))?;

    tracing::info!(ticket_id = id, status = %updated.status, admin_id = admin.user_id, "Support ticket updated");
    Ok(Json(DataResponse::new(updated)))
}
