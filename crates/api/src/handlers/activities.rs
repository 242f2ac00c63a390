//! Handlers for the `/activities` resource and the shared activity recorder.

use axum::extract::State;
use axum::Json;
use cfomatch_db::models::activity::{Activity, ActivityListParams, CreateActivity};
use cfomatch_db::repositories::ActivityRepo;

use crate::error::AppResult;
use crate::extract::AppQuery;
use crate::middleware::auth::AuthUser;
use crate::response::PaginatedResponse;
use crate::state::AppState;

/// GET /api/v1/activities
///
/// The caller's own activity log, newest first.
pub async fn list_activities(
    State(state): State<AppState>,
    user: AuthUser,
    AppQuery(params): AppQuery<ActivityListParams>,
) -> AppResult<Json<PaginatedResponse<Activity>>> {
    let (items, total) = ActivityRepo::list_for_user(&state.pool, user.user_id, &params).await?;
    Ok(Json(PaginatedResponse::new(items, &params.page_params(), total)))
}

/// Append an activity entry. The log is best-effort: a failed insert is
/// logged and never fails the request that triggered it.
pub(crate) async fn record(state: &AppState, activity: CreateActivity) {
    if let Err(e) = ActivityRepo::record(&state.pool, &activity).await {
        tracing::warn!(
            error = %e,
            user_id = activity.user_id,
            activity_type = activity.activity_type,
            "Failed to record activity"
        );
    }
}
