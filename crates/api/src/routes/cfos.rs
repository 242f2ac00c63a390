use axum::routing::{get, put};
use axum::Router;

use crate::handlers::cfos;
use crate::state::AppState;

/// Routes mounted at `/cfos`.
///
/// ```text
/// GET /      -> list_cfos
/// PUT /me    -> upsert_my_cfo
/// GET /{id}  -> get_cfo
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(cfos::list_cfos))
        .route("/me", put(cfos::upsert_my_cfo))
        .route("/{id}", get(cfos::get_cfo))
}
