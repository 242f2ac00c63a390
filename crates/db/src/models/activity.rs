//! Activity log entries.

use cfomatch_core::pagination::PageParams;
use cfomatch_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `activities` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Activity {
    pub id: DbId,
    pub user_id: DbId,
    pub activity_type: String,
    pub entity_type: Option<String>,
    pub entity_id: Option<DbId>,
    pub metadata: serde_json::Value,
    pub created_at: Timestamp,
}

/// Insert DTO. `activity_type` and `entity_type` come from
/// `cfomatch_core::activity`.
#[derive(Debug)]
pub struct CreateActivity {
    pub user_id: DbId,
    pub activity_type: &'static str,
    pub entity_type: Option<&'static str>,
    pub entity_id: Option<DbId>,
    pub metadata: serde_json::Value,
}

impl CreateActivity {
    pub fn new(user_id: DbId, activity_type: &'static str) -> Self {
        Self {
            user_id,
            activity_type,
            entity_type: None,
            entity_id: None,
            metadata: serde_json::Value::Object(serde_json::Map::new()),
        }
    }

    #[must_use]
    pub fn entity(mut self, entity_type: &'static str, entity_id: DbId) -> Self {
        self.entity_type = Some(entity_type);
        self.entity_id = Some(entity_id);
        self
    }

    #[must_use]
    pub fn metadata(mut self, metadata: serde_json::Value) -> Self {
        self.metadata = metadata;
        self
    }
}

/// Query parameters for `GET /activities`.
#[derive(Debug, Default, Deserialize)]
pub struct ActivityListParams {
    pub activity_type: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl ActivityListParams {
    pub fn page_params(&self) -> PageParams {
        PageParams {
            page: self.page,
            limit: self.limit,
        }
    }
}
