//! Handlers for the caller's own account (`/me`).

use axum::extract::State;
use axum::Json;
use cfomatch_core::activity::{self, entity};
use cfomatch_core::error::CoreError;
use cfomatch_core::roles::UserType;
use cfomatch_core::validation::validate_input;
use cfomatch_db::models::activity::CreateActivity;
use cfomatch_db::models::cfo::Cfo;
use cfomatch_db::models::company::Company;
use cfomatch_db::models::profile::{Profile, UpdateProfile};
use cfomatch_db::models::user::UserResponse;
use cfomatch_db::repositories::{CfoRepo, CompanyRepo, ProfileRepo, UserRepo};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::handlers::activities;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Account, profile and the side-specific directory record.
#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub user: UserResponse,
    pub profile: Option<Profile>,
    pub company: Option<Company>,
    pub cfo: Option<Cfo>,
}

/// GET /api/v1/me
pub async fn get_me(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DataResponse<MeResponse>>> {
    let account = UserRepo::find_by_id(&state.pool, user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: user.user_id,
        }))?;
    let profile = ProfileRepo::find_by_user(&state.pool, user.user_id).await?;

    let (company, cfo) = match account.user_type {
        UserType::Company => (CompanyRepo::find_by_user(&state.pool, user.user_id).await?, None),
        UserType::Cfo => (None, CfoRepo::find_by_user(&state.pool, user.user_id).await?),
        UserType::Admin => (None, None),
    };

    Ok(Json(DataResponse::new(MeResponse {
        user: UserResponse::from(&account),
        profile,
        company,
        cfo,
    })))
}

/// PUT /api/v1/me/profile
///
/// Update display name, bio and contact fields. Absent fields are kept.
pub async fn update_profile(
    State(state): State<AppState>,
    user: AuthUser,
    AppJson(input): AppJson<UpdateProfile>,
) -> AppResult<Json<DataResponse<Profile>>> {
    validate_input(&input)?;
    if let Some(name) = &input.display_name {
        if name.trim().is_empty() {
            return Err(AppError::Core(CoreError::Validation(
                "display_name must not be empty".into(),
            )));
        }
    }

    let profile = ProfileRepo::update(&state.pool, user.user_id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Profile",
            id: user.user_id,
        }))?;

    activities::record(
        &state,
        CreateActivity::new(user.user_id, activity::PROFILE_UPDATED)
            .entity(entity::PROFILE, profile.id),
    )
    .await;

    Ok(Json(DataResponse::new(profile)))
}
