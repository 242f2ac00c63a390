//! Handlers for the company directory (`/companies`).

use axum::extract::State;
use axum::Json;
use cfomatch_core::activity::{self, entity};
use cfomatch_core::error::CoreError;
use cfomatch_core::search::contains_pattern;
use cfomatch_core::types::DbId;
use cfomatch_core::validation::validate_input;
use cfomatch_db::models::activity::CreateActivity;
use cfomatch_db::models::company::{Company, CompanyFilter, UpsertCompany};
use cfomatch_db::repositories::CompanyRepo;

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::handlers::activities;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireCompany;
use crate::response::{DataResponse, PaginatedResponse};
use crate::state::AppState;

/// GET /api/v1/companies
///
/// Filter by industry, revenue range, recruiting flag and free text;
/// sort by `newest` (default), `oldest` or `name`.
pub async fn list_companies(
    State(state): State<AppState>,
    _user: AuthUser,
    AppQuery(filter): AppQuery<CompanyFilter>,
) -> AppResult<Json<PaginatedResponse<Company>>> {
    let pattern = contains_pattern(filter.q.as_deref())?;
    let (items, total) = CompanyRepo::search(&state.pool, &filter, pattern.as_deref()).await?;
    Ok(Json(PaginatedResponse::new(items, &filter.page_params(), total)))
}

/// GET /api/v1/companies/{id}
pub async fn get_company(
    State(state): State<AppState>,
    _user: AuthUser,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<DataResponse<Company>>> {
    let company = CompanyRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Company",
            id,
        }))?;
    Ok(Json(DataResponse::new(company)))
}

/// PUT /api/v1/companies/me
///
/// Create or replace the caller's company record.
pub async fn upsert_my_company(
    State(state): State<AppState>,
    RequireCompany(user): RequireCompany,
    AppJson(input): AppJson<UpsertCompany>,
) -> AppResult<Json<DataResponse<Company>>> {
    validate_input(&input)?;
    let company = CompanyRepo::upsert(&state.pool, user.user_id, &input).await?;

    tracing::info!(company_id = company.id, user_id = user.user_id, "Company record saved");
    activities::record(
        &state,
        CreateActivity::new(user.user_id, activity::PROFILE_UPDATED)
            .entity(entity::COMPANY, company.id),
    )
    .await;

    Ok(Json(DataResponse::new(company)))
}
