//! Repository for the `activities` table.

use cfomatch_core::types::DbId;
use sqlx::{PgPool, Postgres, QueryBuilder};

use super::push_page;
use crate::models::activity::{Activity, ActivityListParams, CreateActivity};

const COLUMNS: &str = "id, user_id, activity_type, entity_type, entity_id, metadata, created_at";

/// Append-only per-user activity log.
pub struct ActivityRepo;

impl ActivityRepo {
    pub async fn record(pool: &PgPool, input: &CreateActivity) -> Result<Activity, sqlx::Error> {
        let query = format!(
            "INSERT INTO activities (user_id, activity_type, entity_type, entity_id, metadata)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Activity>(&query)
            .bind(input.user_id)
            .bind(input.activity_type)
            .bind(input.entity_type)
            .bind(input.entity_id)
            .bind(&input.metadata)
            .fetch_one(pool)
            .await
    }

    /// The user's activity, newest first.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
        params: &ActivityListParams,
    ) -> Result<(Vec<Activity>, i64), sqlx::Error> {
        let page = params.page_params();

        let mut count = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM activities");
        push_filters(&mut count, user_id, params);
        let total: i64 = count.build_query_scalar().fetch_one(pool).await?;

        let mut rows = QueryBuilder::<Postgres>::new(format!("SELECT {COLUMNS} FROM activities"));
        push_filters(&mut rows, user_id, params);
        push_page(&mut rows, "created_at DESC, id DESC", &page);
        let items = rows.build_query_as::<Activity>().fetch_all(pool).await?;

        Ok((items, total))
    }
}

fn push_filters(qb: &mut QueryBuilder<'_, Postgres>, user_id: DbId, params: &ActivityListParams) {
    qb.push(" WHERE user_id = ").push_bind(user_id);
    if let Some(activity_type) = &params.activity_type {
        qb.push(" AND activity_type = ").push_bind(activity_type.clone());
    }
}
