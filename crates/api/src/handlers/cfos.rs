//! Handlers for the CFO directory (`/cfos`).

use axum::extract::State;
use axum::Json;
use cfomatch_core::activity::{self, entity};
use cfomatch_core::error::CoreError;
use cfomatch_core::search::contains_pattern;
use cfomatch_core::types::DbId;
use cfomatch_core::validation::validate_input;
use cfomatch_db::models::activity::CreateActivity;
use cfomatch_db::models::cfo::{Cfo, CfoFilter, UpsertCfo};
use cfomatch_db::repositories::CfoRepo;

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::handlers::activities;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireCfo;
use crate::response::{DataResponse, PaginatedResponse};
use crate::state::AppState;

/// GET /api/v1/cfos
///
/// Filter by skill, minimum experience, availability, region, remote flag
/// and free text; sort by `newest` (default), `oldest`, `experience` or
/// `fee_low`.
pub async fn list_cfos(
    State(state): State<AppState>,
    _user: AuthUser,
    AppQuery(filter): AppQuery<CfoFilter>,
) -> AppResult<Json<PaginatedResponse<Cfo>>> {
    let pattern = contains_pattern(filter.q.as_deref())?;
    let (items, total) = CfoRepo::search(&state.pool, &filter, pattern.as_deref()).await?;
    Ok(Json(PaginatedResponse::new(items, &filter.page_params(), total)))
}

/// GET /api/v1/cfos/{id}
pub async fn get_cfo(
    State(state): State<AppState>,
    _user: AuthUser,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<DataResponse<Cfo>>> {
    let cfo = CfoRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Cfo", id }))?;
    Ok(Json(DataResponse::new(cfo)))
}

/// PUT /api/v1/cfos/me
pub async fn upsert_my_cfo(
    State(state): State<AppState>,
    RequireCfo(user): RequireCfo,
    AppJson(input): AppJson<UpsertCfo>,
) -> AppResult<Json<DataResponse<Cfo>>> {
    validate_input(&input)?;
    let cfo = CfoRepo::upsert(&state.pool, user.user_id, &input).await?;

    tracing::info!(cfo_id = cfo.id, user_id = user.user_id, "CFO record saved");
    activities::record(
        &state,
        CreateActivity::new(user.user_id, activity::PROFILE_UPDATED).entity(entity::CFO, cfo.id),
    )
    .await;

    Ok(Json(DataResponse::new(cfo)))
}
