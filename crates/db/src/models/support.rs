//! Support tickets raised by users and worked by admins.

use cfomatch_core::pagination::PageParams;
use cfomatch_core::support::TicketStatus;
use cfomatch_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `support_tickets` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SupportTicket {
    pub id: DbId,
    pub user_id: DbId,
    pub subject: String,
    pub body: String,
    #[sqlx(try_from = "String")]
    pub status: TicketStatus,
    pub admin_note: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Request body for `POST /support/tickets`.
#[derive(Debug, Deserialize)]
pub struct CreateTicket {
    pub subject: String,
    pub body: String,
}

/// Request body for `PATCH /admin/support/tickets/{id}`.
#[derive(Debug, Deserialize)]
pub struct UpdateTicket {
    pub status: Option<TicketStatus>,
    pub admin_note: Option<String>,
}

/// Query parameters for ticket listings.
#[derive(Debug, Default, Deserialize)]
pub struct TicketListParams {
    pub status: Option<TicketStatus>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl TicketListParams {
    pub fn page_params(&self) -> PageParams {
        PageParams {
            page: self.page,
            limit: self.limit,
        }
    }
}
