use axum::routing::get;
use axum::Router;

use crate::handlers::tags;
use crate::state::AppState;

/// Routes mounted at `/tags`. Admin tag management lives under `/admin/tags`.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(tags::list_tags))
}
