//! Route definitions for the admin console.
//!
//! All handlers enforce the admin role via the `RequireAdmin` extractor.

use axum::routing::{get, patch, post, put};
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

/// Routes mounted at `/admin`.
///
/// ```text
/// GET    /users                                   -> list_users
/// PATCH  /users/{id}/status                       -> update_user_status
///
/// GET    /finance/invoices                        -> list_invoices
/// GET    /finance/summary                         -> finance_summary
/// POST   /finance/invoices/{id}/confirm-payment   -> confirm_payment
/// PATCH  /finance/invoices/{id}/status            -> update_invoice_status
///
/// GET    /tags                                    -> list_tags
/// POST   /tags                                    -> create_tag
/// PUT    /tags/{id}                               -> update_tag
/// DELETE /tags/{id}                               -> delete_tag
///
/// GET    /support/tickets                         -> list_tickets
/// PATCH  /support/tickets/{id}                    -> update_ticket
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users", get(admin::list_users))
        .route("/users/{id}/status", patch(admin::update_user_status))
        .route("/finance/invoices", get(admin::list_invoices))
        .route("/finance/summary", get(admin::finance_summary))
        .route(
            "/finance/invoices/{id}/confirm-payment",
            post(admin::confirm_payment),
        )
        .route(
            "/finance/invoices/{id}/status",
            patch(admin::update_invoice_status),
        )
        .route("/tags", get(admin::list_tags).post(admin::create_tag))
        .route("/tags/{id}", put(admin::update_tag).delete(admin::delete_tag))
        .route("/support/tickets", get(admin::list_tickets))
        .route("/support/tickets/{id}", patch(admin::update_ticket))
}
