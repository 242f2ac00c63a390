//! Route definitions for the `/scouts` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::scouts;
use crate::state::AppState;

/// Routes mounted at `/scouts`.
///
/// ```text
/// GET  /                 -> list_scouts
/// POST /                 -> create_scout
/// GET  /{id}             -> get_scout
/// POST /{id}/accept      -> accept_scout
/// POST /{id}/decline     -> decline_scout
/// POST /{id}/withdraw    -> withdraw_scout
/// GET  /{id}/messages    -> list_messages
/// POST /{id}/messages    -> post_message
/// POST /{id}/read        -> mark_read
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(scouts::list_scouts).post(scouts::create_scout))
        .route("/{id}", get(scouts::get_scout))
        .route("/{id}/accept", post(scouts::accept_scout))
        .route("/{id}/decline", post(scouts::decline_scout))
        .route("/{id}/withdraw", post(scouts::withdraw_scout))
        .route(
            "/{id}/messages",
            get(scouts::list_messages).post(scouts::post_message),
        )
        .route("/{id}/read", post(scouts::mark_read))
}
