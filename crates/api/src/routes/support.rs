use axum::routing::get;
use axum::Router;

use crate::handlers::support;
use crate::state::AppState;

/// Routes mounted at `/support`.
///
/// ```text
/// GET  /tickets  -> list_my_tickets
/// POST /tickets  -> create_ticket
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/tickets",
        get(support::list_my_tickets).post(support::create_ticket),
    )
}
