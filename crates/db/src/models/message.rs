//! Scout conversation messages.

use cfomatch_core::scout::MessageType;
use cfomatch_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `messages` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Message {
    pub id: DbId,
    pub scout_id: DbId,
    pub sender_id: DbId,
    pub body: String,
    #[sqlx(try_from = "String")]
    pub message_type: MessageType,
    pub read_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Insert DTO used by the repository.
#[derive(Debug)]
pub struct CreateMessage<'a> {
    pub scout_id: DbId,
    pub sender_id: DbId,
    pub body: &'a str,
    pub message_type: MessageType,
}

/// Request body for `POST /scouts/{id}/messages`.
#[derive(Debug, Deserialize)]
pub struct PostMessage {
    pub body: String,
}
