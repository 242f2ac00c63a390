//! Repository for the `scouts` table.

use cfomatch_core::scout::{MessageType, ScoutAction, ScoutStatus};
use cfomatch_core::types::DbId;
use sqlx::{PgPool, Postgres, QueryBuilder};

use super::push_page;
use crate::models::scout::{CreateScout, Scout, ScoutBox, ScoutListItem, ScoutListParams};

const COLUMNS: &str = "id, sender_id, receiver_id, title, body, status, responded_at, \
                       created_at, updated_at";

/// Provides scout persistence and the conditional status transition.
pub struct ScoutRepo;

impl ScoutRepo {
    /// Insert a pending scout and its opening `scout` message in one transaction.
    ///
    /// A second pending scout for the same (sender, receiver) pair violates
    /// `uq_scouts_pending_pair`.
    pub async fn create(
        pool: &PgPool,
        sender_id: DbId,
        input: &CreateScout,
    ) -> Result<Scout, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO scouts (sender_id, receiver_id, title, body)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        let scout = sqlx::query_as::<_, Scout>(&query)
            .bind(sender_id)
            .bind(input.receiver_id)
            .bind(&input.title)
            .bind(&input.body)
            .fetch_one(&mut *tx)
            .await?;

        sqlx::query(
            "INSERT INTO messages (scout_id, sender_id, body, message_type) VALUES ($1, $2, $3, $4)",
        )
        .bind(scout.id)
        .bind(sender_id)
        .bind(&scout.body)
        .bind(MessageType::Scout.as_str())
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(scout)
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Scout>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM scouts WHERE id = $1");
        sqlx::query_as::<_, Scout>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List the caller's received or sent scouts, newest first.
    ///
    /// Each row carries the other party's display name and type, and the
    /// number of unread messages written by that party.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
        params: &ScoutListParams,
    ) -> Result<(Vec<ScoutListItem>, i64), sqlx::Error> {
        let page = params.page_params();

        let mut count = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM scouts s");
        push_filters(&mut count, user_id, params);
        let total: i64 = count.build_query_scalar().fetch_one(pool).await?;

        let counterpart = match params.mailbox {
            ScoutBox::Received => "s.sender_id",
            ScoutBox::Sent => "s.receiver_id",
        };
        let mut rows = QueryBuilder::<Postgres>::new(format!(
            "SELECT s.id, s.sender_id, s.receiver_id, s.title, s.status,
                    u.id AS counterpart_id,
                    p.display_name AS counterpart_name,
                    u.user_type AS counterpart_type,
                    (SELECT COUNT(*) FROM messages m
                      WHERE m.scout_id = s.id AND m.sender_id <> "
        ));
        rows.push_bind(user_id);
        rows.push(format!(
            " AND m.read_at IS NULL) AS unread_count,
                    s.created_at, s.updated_at
             FROM scouts s
             JOIN users u ON u.id = {counterpart}
             LEFT JOIN profiles p ON p.user_id = u.id"
        ));
        push_filters(&mut rows, user_id, params);
        push_page(&mut rows, "s.created_at DESC, s.id DESC", &page);
        let items = rows.build_query_as::<ScoutListItem>().fetch_all(pool).await?;

        Ok((items, total))
    }

    /// Apply `action` if the scout is still pending, and record the matching
    /// chat message in the same transaction.
    ///
    /// Returns `None` when the scout was no longer pending, which is how a
    /// lost race surfaces.
    pub async fn transition(
        pool: &PgPool,
        id: DbId,
        actor_id: DbId,
        action: ScoutAction,
    ) -> Result<Option<Scout>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE scouts SET status = $2, responded_at = NOW()
             WHERE id = $1 AND status = $3
             RETURNING {COLUMNS}"
        );
        let updated = sqlx::query_as::<_, Scout>(&query)
            .bind(id)
            .bind(action.target_status().as_str())
            .bind(ScoutStatus::Pending.as_str())
            .fetch_optional(&mut *tx)
            .await?;

        let Some(scout) = updated else {
            tx.rollback().await?;
            return Ok(None);
        };

        sqlx::query(
            "INSERT INTO messages (scout_id, sender_id, body, message_type) VALUES ($1, $2, $3, $4)",
        )
        .bind(scout.id)
        .bind(actor_id)
        .bind(action.message_body())
        .bind(action.message_type().as_str())
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(Some(scout))
    }
}

fn push_filters(qb: &mut QueryBuilder<'_, Postgres>, user_id: DbId, params: &ScoutListParams) {
    match params.mailbox {
        ScoutBox::Received => qb.push(" WHERE s.receiver_id = "),
        ScoutBox::Sent => qb.push(" WHERE s.sender_id = "),
    };
    qb.push_bind(user_id);
    if let Some(status) = params.status {
        qb.push(" AND s.status = ").push_bind(status.as_str());
    }
}
