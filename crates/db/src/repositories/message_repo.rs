//! Repository for the `messages` table.

use cfomatch_core::types::DbId;
use sqlx::PgPool;

use crate::models::message::{CreateMessage, Message};

const COLUMNS: &str = "id, scout_id, sender_id, body, message_type, read_at, created_at, updated_at";

/// Provides the chat thread attached to a scout.
pub struct MessageRepo;

impl MessageRepo {
    pub async fn create(pool: &PgPool, input: &CreateMessage<'_>) -> Result<Message, sqlx::Error> {
        let query = format!(
            "INSERT INTO messages (scout_id, sender_id, body, message_type)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Message>(&query)
            .bind(input.scout_id)
            .bind(input.sender_id)
            .bind(input.body)
            .bind(input.message_type.as_str())
            .fetch_one(pool)
            .await
    }

    /// The whole thread in chronological order.
    pub async fn list_by_scout(pool: &PgPool, scout_id: DbId) -> Result<Vec<Message>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM messages WHERE scout_id = $1 ORDER BY created_at ASC, id ASC"
        );
        sqlx::query_as::<_, Message>(&query)
            .bind(scout_id)
            .fetch_all(pool)
            .await
    }

    /// Mark every message the other party wrote as read. Returns the count.
    pub async fn mark_read(pool: &PgPool, scout_id: DbId, reader_id: DbId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE messages SET read_at = NOW()
             WHERE scout_id = $1 AND sender_id <> $2 AND read_at IS NULL",
        )
        .bind(scout_id)
        .bind(reader_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }
}
