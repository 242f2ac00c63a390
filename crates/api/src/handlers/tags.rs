//! Public tag listing for profile pickers.

use axum::extract::State;
use axum::Json;
use cfomatch_db::models::tag::{Tag, TagListParams};
use cfomatch_db::repositories::TagRepo;

use crate::error::AppResult;
use crate::extract::AppQuery;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/tags?category=
///
/// Active tags only; inactive ones are visible through the admin console.
pub async fn list_tags(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<TagListParams>,
) -> AppResult<Json<DataResponse<Vec<Tag>>>> {
    let params = TagListParams {
        include_inactive: false,
        ..params
    };
    let tags = TagRepo::list(&state.pool, &params).await?;
    Ok(Json(DataResponse::new(tags)))
}
