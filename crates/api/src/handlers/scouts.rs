//! Handlers for the `/scouts` resource: offers between companies and CFOs
//! and the conversation attached to each offer.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use cfomatch_core::activity::{self, entity};
use cfomatch_core::error::CoreError;
use cfomatch_core::scout::{
    authorize_action, party_of, transition, validate_counterparty, validate_message_body,
    validate_scout_content, MessageType, ScoutAction,
};
use cfomatch_core::types::DbId;
use cfomatch_db::models::activity::CreateActivity;
use cfomatch_db::models::message::{CreateMessage, Message, PostMessage};
use cfomatch_db::models::scout::{CreateScout, Scout, ScoutListItem, ScoutListParams};
use cfomatch_db::repositories::{MessageRepo, ScoutRepo, UserRepo};
use serde::Serialize;
use serde_json::json;

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::handlers::activities;
use crate::middleware::auth::AuthUser;
use crate::response::{DataResponse, PaginatedResponse};
use crate::state::AppState;

/// A scout with its full conversation, oldest message first.
#[derive(Debug, Serialize)]
pub struct ScoutDetail {
    pub scout: Scout,
    pub messages: Vec<Message>,
}

#[derive(Debug, Serialize)]
pub struct MarkReadResponse {
    pub marked: u64,
}

/// Load a scout or 404.
async fn load_scout(state: &AppState, id: DbId) -> AppResult<Scout> {
    ScoutRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Scout", id }))
}

/// Load a scout the caller takes part in. Admins may read any scout.
async fn load_visible_scout(state: &AppState, user: &AuthUser, id: DbId) -> AppResult<Scout> {
    let scout = load_scout(state, id).await?;
    if !user.is_admin() && party_of(scout.sender_id, scout.receiver_id, user.user_id).is_none() {
        return Err(AppError::Core(CoreError::Forbidden(
            "You are not a party to this scout".into(),
        )));
    }
    Ok(scout)
}

/// GET /api/v1/scouts?box=received|sent&status=
pub async fn list_scouts(
    State(state): State<AppState>,
    user: AuthUser,
    AppQuery(params): AppQuery<ScoutListParams>,
) -> AppResult<Json<PaginatedResponse<ScoutListItem>>> {
    let (items, total) = ScoutRepo::list_for_user(&state.pool, user.user_id, &params).await?;
    Ok(Json(PaginatedResponse::new(items, &params.page_params(), total)))
}

/// POST /api/v1/scouts
///
/// Companies scout CFOs and CFOs scout companies. The opening message is
/// stored alongside the scout.
pub async fn create_scout(
    State(state): State<AppState>,
    user: AuthUser,
    AppJson(input): AppJson<CreateScout>,
) -> AppResult<(StatusCode, Json<DataResponse<Scout>>)> {
    validate_scout_content(&input.title, &input.body)?;

    let receiver = UserRepo::find_by_id(&state.pool, input.receiver_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: input.receiver_id,
        }))?;
    if !receiver.status.is_usable() {
        return Err(AppError::Core(CoreError::Validation(
            "The receiving account is not active".into(),
        )));
    }
    validate_counterparty(user.user_id, user.user_type, receiver.id, receiver.user_type)?;

    let scout = ScoutRepo::create(&state.pool, user.user_id, &input).await?;

    tracing::info!(
        scout_id = scout.id,
        sender_id = scout.sender_id,
        receiver_id = scout.receiver_id,
        "Scout sent"
    );
    activities::record(
        &state,
        CreateActivity::new(user.user_id, activity::SCOUT_SENT)
            .entity(entity::SCOUT, scout.id)
            .metadata(json!({ "receiver_id": scout.receiver_id })),
    )
    .await;

    Ok((StatusCode::CREATED, Json(DataResponse::new(scout))))
}

/// GET /api/v1/scouts/{id}
pub async fn get_scout(
    State(state): State<AppState>,
    user: AuthUser,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<DataResponse<ScoutDetail>>> {
    let scout = load_visible_scout(&state, &user, id).await?;
    let messages = MessageRepo::list_by_scout(&state.pool, scout.id).await?;
    Ok(Json(DataResponse::new(ScoutDetail { scout, messages })))
}

/// POST /api/v1/scouts/{id}/accept
pub async fn accept_scout(
    State(state): State<AppState>,
    user: AuthUser,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<DataResponse<Scout>>> {
    apply_action(&state, &user, id, ScoutAction::Accept).await
}

/// POST /api/v1/scouts/{id}/decline
pub async fn decline_scout(
    State(state): State<AppState>,
    user: AuthUser,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<DataResponse<Scout>>> {
    apply_action(&state, &user, id, ScoutAction::Decline).await
}

/// POST /api/v1/scouts/{id}/withdraw
pub async fn withdraw_scout(
    State(state): State<AppState>,
    user: AuthUser,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<DataResponse<Scout>>> {
    apply_action(&state, &user, id, ScoutAction::Withdraw).await
}

async fn apply_action(
    state: &AppState,
    user: &AuthUser,
    id: DbId,
    action: ScoutAction,
) -> AppResult<Json<DataResponse<Scout>>> {
    let scout = load_scout(state, id).await?;
    authorize_action(action, party_of(scout.sender_id, scout.receiver_id, user.user_id))?;
    transition(scout.status, action)?;

    // A concurrent response may have resolved the scout since it was loaded.
    let updated = ScoutRepo::transition(&state.pool, id, user.user_id, action)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Conflict(format!(
                "Scout {id} is no longer pending"
            )))
        })?;

    tracing::info!(scout_id = id, user_id = user.user_id, status = %updated.status, "Scout resolved");
    activities::record(
        state,
        CreateActivity::new(user.user_id, activity::for_scout_status(updated.status))
            .entity(entity::SCOUT, id),
    )
    .await;

    Ok(Json(DataResponse::new(updated)))
}

/// GET /api/v1/scouts/{id}/messages
pub async fn list_messages(
    State(state): State<AppState>,
    user: AuthUser,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<DataResponse<Vec<Message>>>> {
    let scout = load_visible_scout(&state, &user, id).await?;
    let messages = MessageRepo::list_by_scout(&state.pool, scout.id).await?;
    Ok(Json(DataResponse::new(messages)))
}

/// POST /api/v1/scouts/{id}/messages
///
/// Only the two parties may post, and only while the scout is pending or
/// accepted.
pub async fn post_message(
    State(state): State<AppState>,
    user: AuthUser,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<PostMessage>,
) -> AppResult<(StatusCode, Json<DataResponse<Message>>)> {
    let scout = load_scout(&state, id).await?;
    if party_of(scout.sender_id, scout.receiver_id, user.user_id).is_none() {
        return Err(AppError::Core(CoreError::Forbidden(
            "You are not a party to this scout".into(),
        )));
    }
    if !scout.status.allows_messages() {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Cannot post to a scout that is {}",
            scout.status
        ))));
    }
    validate_message_body(&input.body)?;

    let message = MessageRepo::create(
        &state.pool,
        &CreateMessage {
            scout_id: scout.id,
            sender_id: user.user_id,
            body: input.body.trim(),
            message_type: MessageType::Text,
        },
    )
    .await?;

    activities::record(
        &state,
        CreateActivity::new(user.user_id, activity::MESSAGE_SENT).entity(entity::SCOUT, scout.id),
    )
    .await;

    Ok((StatusCode::CREATED, Json(DataResponse::new(message))))
}

/// POST /api/v1/scouts/{id}/read
///
/// Mark every message from the other party as read.
pub async fn mark_read(
    State(state): State<AppState>,
    user: AuthUser,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<DataResponse<MarkReadResponse>>> {
    let scout = load_scout(&state, id).await?;
    if party_of(scout.sender_id, scout.receiver_id, user.user_id).is_none() {
        return Err(AppError::Core(CoreError::Forbidden(
            "You are not a party to this scout".into(),
        )));
    }
    let marked = MessageRepo::mark_read(&state.pool, scout.id, user.user_id).await?;
    Ok(Json(DataResponse::new(MarkReadResponse { marked })))
}
