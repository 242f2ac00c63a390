//! CFO directory entries.

use cfomatch_core::pagination::PageParams;
use cfomatch_core::search::{Availability, CfoSort};
use cfomatch_core::types::{DbId, Timestamp, Yen};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `cfos` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Cfo {
    pub id: DbId,
    pub user_id: DbId,
    pub headline: String,
    pub years_experience: i32,
    pub skills: Vec<String>,
    pub certifications: Vec<String>,
    #[sqlx(try_from = "String")]
    pub availability: Availability,
    pub region: Option<String>,
    pub remote_ok: bool,
    pub monthly_fee_min: Option<Yen>,
    pub monthly_fee_max: Option<Yen>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Request body for `PUT /cfos/me`. Creates the row on first save.
#[derive(Debug, Deserialize, Validate)]
#[validate(schema(function = "validate_fee_range"))]
pub struct UpsertCfo {
    #[validate(length(min = 1, max = 200))]
    pub headline: String,
    #[validate(range(min = 0, max = 70))]
    pub years_experience: i32,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub certifications: Vec<String>,
    pub availability: Availability,
    #[validate(length(max = 100))]
    pub region: Option<String>,
    #[serde(default = "default_remote_ok")]
    pub remote_ok: bool,
    #[validate(range(min = 0))]
    pub monthly_fee_min: Option<Yen>,
    #[validate(range(min = 0))]
    pub monthly_fee_max: Option<Yen>,
}

fn default_remote_ok() -> bool {
    true
}

fn validate_fee_range(input: &UpsertCfo) -> Result<(), validator::ValidationError> {
    match (input.monthly_fee_min, input.monthly_fee_max) {
        (Some(min), Some(max)) if min > max => {
            Err(validator::ValidationError::new("monthly_fee_min_exceeds_max"))
        }
        _ => Ok(()),
    }
}

/// Query parameters for `GET /cfos`.
#[derive(Debug, Default, Deserialize)]
pub struct CfoFilter {
    pub skill: Option<String>,
    pub min_experience: Option<i32>,
    pub availability: Option<Availability>,
    pub region: Option<String>,
    pub remote_ok: Option<bool>,
    pub q: Option<String>,
    pub sort: Option<CfoSort>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl CfoFilter {
    pub fn page_params(&self) -> PageParams {
        PageParams {
            page: self.page,
            limit: self.limit,
        }
    }
}
