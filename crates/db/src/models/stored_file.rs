//! Metadata for files pushed to object storage.

use cfomatch_core::types::{DbId, Timestamp};
use cfomatch_core::upload::UploadPurpose;
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `stored_files` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct StoredFile {
    pub id: DbId,
    pub owner_id: DbId,
    #[sqlx(try_from = "String")]
    pub purpose: UploadPurpose,
    pub storage_path: String,
    pub content_type: String,
    pub size_bytes: i64,
    pub original_name: String,
    pub created_at: Timestamp,
}

/// Insert DTO.
#[derive(Debug)]
pub struct CreateStoredFile {
    pub owner_id: DbId,
    pub purpose: UploadPurpose,
    pub storage_path: String,
    pub content_type: String,
    pub size_bytes: i64,
    pub original_name: String,
}
