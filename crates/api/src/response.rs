//! Shared response envelope types for API handlers.
//!
//! Successful responses use `{ "success": true, "data": ... }`, with a
//! `pagination` object added on listings. Errors are produced by
//! [`crate::error::AppError`] as `{ "success": false, "error", "code" }`.

use cfomatch_core::pagination::{PageParams, Pagination};
use serde::Serialize;

/// Standard `{ "success": true, "data": T }` response envelope.
///
/// # Example
///
/// ```ignore
/// Ok(Json(DataResponse::new(scout)))
/// ```
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub success: bool,
    pub data: T,
}

impl<T: Serialize> DataResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Listing envelope: `{ "success": true, "data": [...], "pagination": {...} }`.
#[derive(Debug, Serialize)]
pub struct PaginatedResponse<T: Serialize> {
    pub success: bool,
    pub data: Vec<T>,
    pub pagination: Pagination,
}

impl<T: Serialize> PaginatedResponse<T> {
    /// Wrap one page of rows with metadata derived from the request's
    /// clamped page parameters and the total matching count.
    pub fn new(data: Vec<T>, params: &PageParams, total: i64) -> Self {
        Self {
            success: true,
            data,
            pagination: Pagination::from_params(params, total),
        }
    }
}
