//! Repository for the `stored_files` table.

use cfomatch_core::types::DbId;
use sqlx::PgPool;

use crate::models::stored_file::{CreateStoredFile, StoredFile};

const COLUMNS: &str =
    "id, owner_id, purpose, storage_path, content_type, size_bytes, original_name, created_at";

/// Metadata for objects written to storage.
pub struct StoredFileRepo;

impl StoredFileRepo {
    pub async fn create(pool: &PgPool, input: &CreateStoredFile) -> Result<StoredFile, sqlx::Error> {
        let query = format!(
            "INSERT INTO stored_files
                (owner_id, purpose, storage_path, content_type, size_bytes, original_name)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, StoredFile>(&query)
            .bind(input.owner_id)
            .bind(input.purpose.as_str())
            .bind(&input.storage_path)
            .bind(&input.content_type)
            .bind(input.size_bytes)
            .bind(&input.original_name)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<StoredFile>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM stored_files WHERE id = $1");
        sqlx::query_as::<_, StoredFile>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
