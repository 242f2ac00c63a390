//! Contract models and DTOs.

use cfomatch_core::contract::ContractStatus;
use cfomatch_core::pagination::PageParams;
use cfomatch_core::types::{Date, DbId, Timestamp, Yen};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `contracts` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Contract {
    pub id: DbId,
    pub company_user_id: DbId,
    pub cfo_user_id: DbId,
    pub scout_id: Option<DbId>,
    pub title: String,
    pub description: Option<String>,
    pub monthly_fee: Yen,
    pub start_date: Date,
    pub end_date: Option<Date>,
    #[sqlx(try_from = "String")]
    pub status: ContractStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Request body for `POST /contracts`.
#[derive(Debug, Deserialize)]
pub struct CreateContractRequest {
    pub scout_id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub monthly_fee: Yen,
    pub start_date: Date,
    pub end_date: Option<Date>,
}

/// Insert DTO with both parties resolved from the scout.
#[derive(Debug)]
pub struct CreateContract {
    pub company_user_id: DbId,
    pub cfo_user_id: DbId,
    pub scout_id: Option<DbId>,
    pub title: String,
    pub description: Option<String>,
    pub monthly_fee: Yen,
    pub start_date: Date,
    pub end_date: Option<Date>,
}

/// Request body for `PATCH /contracts/{id}/status`.
///
/// Kept as a string so an unknown value produces a validation message that
/// lists the accepted statuses.
#[derive(Debug, Deserialize)]
pub struct UpdateContractStatus {
    pub status: String,
}

/// Query parameters for `GET /contracts`.
#[derive(Debug, Default, Deserialize)]
pub struct ContractListParams {
    pub status: Option<ContractStatus>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl ContractListParams {
    pub fn page_params(&self) -> PageParams {
        PageParams {
            page: self.page,
            limit: self.limit,
        }
    }
}
