//! Admin-managed tags for skill, industry and certification pickers.

use cfomatch_core::tag::TagCategory;
use cfomatch_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `tags` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Tag {
    pub id: DbId,
    pub name: String,
    #[sqlx(try_from = "String")]
    pub category: TagCategory,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Request body for `POST /admin/tags`.
#[derive(Debug, Deserialize)]
pub struct CreateTag {
    pub name: String,
    pub category: TagCategory,
}

/// Request body for `PUT /admin/tags/{id}`.
#[derive(Debug, Deserialize)]
pub struct UpdateTag {
    pub name: Option<String>,
    pub is_active: Option<bool>,
}

/// Query parameters for tag listings.
#[derive(Debug, Default, Deserialize)]
pub struct TagListParams {
    pub category: Option<TagCategory>,
    #[serde(default)]
    pub include_inactive: bool,
}
