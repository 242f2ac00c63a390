use axum::routing::{get, put};
use axum::Router;

use crate::handlers::companies;
use crate::state::AppState;

/// Routes mounted at `/companies`.
///
/// ```text
/// GET /      -> list_companies
/// PUT /me    -> upsert_my_company
/// GET /{id}  -> get_company
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(companies::list_companies))
        .route("/me", put(companies::upsert_my_company))
        .route("/{id}", get(companies::get_company))
}
