pub mod activities;
pub mod admin;
pub mod auth;
pub mod cfos;
pub mod companies;
pub mod contracts;
pub mod health;
pub mod me;
pub mod scouts;
pub mod support;
pub mod tags;
pub mod uploads;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                                  register (public)
/// /auth/login                                     login (public)
/// /auth/refresh                                   refresh (public)
/// /auth/logout                                    logout (requires auth)
///
/// /me                                             get
/// /me/profile                                     update (PUT)
///
/// /companies                                      search
/// /companies/me                                   upsert (company users)
/// /companies/{id}                                 get
///
/// /cfos                                           search
/// /cfos/me                                        upsert (CFO users)
/// /cfos/{id}                                      get
///
/// /scouts                                         list, create
/// /scouts/{id}                                    get (with messages)
/// /scouts/{id}/accept|decline|withdraw            resolve (POST)
/// /scouts/{id}/messages                           list, post
/// /scouts/{id}/read                               mark read (POST)
///
/// /contracts                                      list, create (company users)
/// /contracts/{id}                                 get
/// /contracts/{id}/status                          transition (PATCH)
/// /contracts/{id}/invoices                        list, issue (CFO users)
///
/// /activities                                     own activity log
/// /uploads/{purpose}                              upload (multipart POST)
/// /support/tickets                                list own, create
/// /tags                                           active tags (public)
///
/// /admin/users                                    list (admin only)
/// /admin/users/{id}/status                        moderate (PATCH)
/// /admin/finance/invoices                         list
/// /admin/finance/summary                          per-status totals
/// /admin/finance/invoices/{id}/confirm-payment    mark paid (POST)
/// /admin/finance/invoices/{id}/status             transition (PATCH)
/// /admin/tags                                     list, create
/// /admin/tags/{id}                                update, delete
/// /admin/support/tickets                          list
/// /admin/support/tickets/{id}                     update (PATCH)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/me", me::router())
        .nest("/companies", companies::router())
        .nest("/cfos", cfos::router())
        .nest("/scouts", scouts::router())
        .nest("/contracts", contracts::router())
        .nest("/activities", activities::router())
        .nest("/uploads", uploads::router())
        .nest("/support", support::router())
        .nest("/tags", tags::router())
        .nest("/admin", admin::router())
}
