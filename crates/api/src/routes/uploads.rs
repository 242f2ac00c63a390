//! Route definitions for file uploads.

use axum::extract::DefaultBodyLimit;
use axum::routing::post;
use axum::Router;
use cfomatch_core::upload::MAX_DOCUMENT_BYTES;

use crate::handlers::uploads;
use crate::state::AppState;

/// Allowance for multipart boundaries and part headers on top of the
/// largest accepted file.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// Routes mounted at `/uploads`.
///
/// ```text
/// POST /{purpose}  -> upload_file (multipart, `avatar` or `document`)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{purpose}", post(uploads::upload_file))
        .layer(DefaultBodyLimit::max(
            MAX_DOCUMENT_BYTES + MULTIPART_OVERHEAD_BYTES,
        ))
}
