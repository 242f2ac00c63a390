//! Company directory entries.

use cfomatch_core::pagination::PageParams;
use cfomatch_core::search::CompanySort;
use cfomatch_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `companies` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Company {
    pub id: DbId,
    pub user_id: DbId,
    pub name: String,
    pub industry: Option<String>,
    pub revenue_range: Option<String>,
    pub employee_count: Option<i32>,
    pub description: Option<String>,
    pub is_recruiting: bool,
    pub recruiting_summary: Option<String>,
    pub desired_skills: Vec<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Request body for `PUT /companies/me`. Creates the row on first save.
#[derive(Debug, Deserialize, Validate)]
pub struct UpsertCompany {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(max = 100))]
    pub industry: Option<String>,
    #[validate(length(max = 50))]
    pub revenue_range: Option<String>,
    #[validate(range(min = 0))]
    pub employee_count: Option<i32>,
    #[validate(length(max = 5000))]
    pub description: Option<String>,
    #[serde(default)]
    pub is_recruiting: bool,
    #[validate(length(max = 2000))]
    pub recruiting_summary: Option<String>,
    #[serde(default)]
    pub desired_skills: Vec<String>,
}

/// Query parameters for `GET /companies`.
#[derive(Debug, Default, Deserialize)]
pub struct CompanyFilter {
    pub industry: Option<String>,
    pub revenue_range: Option<String>,
    pub recruiting: Option<bool>,
    pub q: Option<String>,
    pub sort: Option<CompanySort>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl CompanyFilter {
    pub fn page_params(&self) -> PageParams {
        PageParams {
            page: self.page,
            limit: self.limit,
        }
    }
}
