//! Scout models and DTOs.

use cfomatch_core::pagination::PageParams;
use cfomatch_core::roles::UserType;
use cfomatch_core::scout::ScoutStatus;
use cfomatch_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `scouts` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Scout {
    pub id: DbId,
    pub sender_id: DbId,
    pub receiver_id: DbId,
    pub title: String,
    pub body: String,
    #[sqlx(try_from = "String")]
    pub status: ScoutStatus,
    pub responded_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Inbox/outbox row: the scout plus who is on the other side.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ScoutListItem {
    pub id: DbId,
    pub sender_id: DbId,
    pub receiver_id: DbId,
    pub title: String,
    #[sqlx(try_from = "String")]
    pub status: ScoutStatus,
    pub counterpart_id: DbId,
    pub counterpart_name: Option<String>,
    #[sqlx(try_from = "String")]
    pub counterpart_type: UserType,
    pub unread_count: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Request body for `POST /scouts`.
#[derive(Debug, Deserialize)]
pub struct CreateScout {
    pub receiver_id: DbId,
    pub title: String,
    pub body: String,
}

/// Which side of the mailbox to list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoutBox {
    #[default]
    Received,
    Sent,
}

/// Query parameters for `GET /scouts`.
#[derive(Debug, Default, Deserialize)]
pub struct ScoutListParams {
    #[serde(default, rename = "box")]
    pub mailbox: ScoutBox,
    pub status: Option<ScoutStatus>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl ScoutListParams {
    pub fn page_params(&self) -> PageParams {
        PageParams {
            page: self.page,
            limit: self.limit,
        }
    }
}
