//! Handlers for the caller's own support tickets (`/support/tickets`).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use cfomatch_core::activity::{self, entity};
use cfomatch_core::support::validate_ticket;
use cfomatch_db::models::activity::CreateActivity;
use cfomatch_db::models::support::{CreateTicket, SupportTicket, TicketListParams};
use cfomatch_db::repositories::SupportTicketRepo;

use crate::error::AppResult;
use crate::extract::{AppJson, AppQuery};
use crate::handlers::activities;
use crate::middleware::auth::AuthUser;
use crate::response::{DataResponse, PaginatedResponse};
use crate::state::AppState;

/// GET /api/v1/support/tickets
pub async fn list_my_tickets(
    State(state): State<AppState>,
    user: AuthUser,
    AppQuery(params): AppQuery<TicketListParams>,
) -> AppResult<Json<PaginatedResponse<SupportTicket>>> {
    let (items, total) = SupportTicketRepo::list(&state.pool, Some(user.user_id), &params).await?;
    Ok(Json(PaginatedResponse::new(items, &params.page_params(), total)))
}

/// POST /api/v1/support/tickets
pub async fn create_ticket(
    State(state): State<AppState>,
    user: AuthUser,
    AppJson(input): AppJson<CreateTicket>,
) -> AppResult<(StatusCode, Json<DataResponse<SupportTicket>>)> {
    validate_ticket(&input.subject, &input.body)?;
    let ticket = SupportTicketRepo::create(&state.pool, user.user_id, &input).await?;

    tracing::info!(ticket_id = ticket.id, user_id = user.user_id, "Support ticket opened");
    activities::record(
        &state,
        CreateActivity::new(user.user_id, activity::TICKET_CREATED)
            .entity(entity::TICKET, ticket.id),
    )
    .await;

    Ok((StatusCode::CREATED, Json(DataResponse::new(ticket))))
}
