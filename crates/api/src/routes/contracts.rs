//! Route definitions for the `/contracts` resource.

use axum::routing::{get, patch};
use axum::Router;

use crate::handlers::contracts;
use crate::state::AppState;

/// Routes mounted at `/contracts`.
///
/// ```text
/// GET   /                -> list_contracts
/// POST  /                -> create_contract (company users)
/// GET   /{id}            -> get_contract
/// PATCH /{id}/status     -> update_contract_status
/// GET   /{id}/invoices   -> list_contract_invoices
/// POST  /{id}/invoices   -> create_invoice (CFO users)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(contracts::list_contracts).post(contracts::create_contract),
        )
        .route("/{id}", get(contracts::get_contract))
        .route("/{id}/status", patch(contracts::update_contract_status))
        .route(
            "/{id}/invoices",
            get(contracts::list_contract_invoices).post(contracts::create_invoice),
        )
}
