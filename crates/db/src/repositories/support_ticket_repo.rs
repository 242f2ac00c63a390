//! Repository for the `support_tickets` table.

use cfomatch_core::support::TicketStatus;
use cfomatch_core::types::DbId;
use sqlx::{PgPool, Postgres, QueryBuilder};

use super::push_page;
use crate::models::support::{CreateTicket, SupportTicket, TicketListParams};

const COLUMNS: &str = "id, user_id, subject, body, status, admin_note, created_at, updated_at";

/// Provides support ticket persistence.
pub struct SupportTicketRepo;

impl SupportTicketRepo {
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &CreateTicket,
    ) -> Result<SupportTicket, sqlx::Error> {
        let query = format!(
            "INSERT INTO support_tickets (user_id, subject, body)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SupportTicket>(&query)
            .bind(user_id)
            .bind(&input.subject)
            .bind(&input.body)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<SupportTicket>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM support_tickets WHERE id = $1");
        sqlx::query_as::<_, SupportTicket>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List tickets newest first. `owner = None` lists every user's tickets.
    pub async fn list(
        pool: &PgPool,
        owner: Option<DbId>,
        params: &TicketListParams,
    ) -> Result<(Vec<SupportTicket>, i64), sqlx::Error> {
        let page = params.page_params();

        let mut count = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM support_tickets");
        push_filters(&mut count, owner, params.status);
        let total: i64 = count.build_query_scalar().fetch_one(pool).await?;

        let mut rows =
            QueryBuilder::<Postgres>::new(format!("SELECT {COLUMNS} FROM support_tickets"));
        push_filters(&mut rows, owner, params.status);
        push_page(&mut rows, "created_at DESC, id DESC", &page);
        let items = rows.build_query_as::<SupportTicket>().fetch_all(pool).await?;

        Ok((items, total))
    }

    /// Set the status and/or admin note. `None` fields are left unchanged.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        status: Option<TicketStatus>,
        admin_note: Option<&str>,
    ) -> Result<Option<SupportTicket>, sqlx::Error> {
        let query = format!(
            "UPDATE support_tickets SET
                status = COALESCE($2, status),
                admin_note = COALESCE($3, admin_note)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SupportTicket>(&query)
            .bind(id)
            .bind(status.map(TicketStatus::as_str))
            .bind(admin_note)
            .fetch_optional(pool)
            .await
    }
}

fn push_filters(
    qb: &mut QueryBuilder<'_, Postgres>,
    owner: Option<DbId>,
    status: Option<TicketStatus>,
) {
    qb.push(" WHERE TRUE");
    if let Some(user_id) = owner {
        qb.push(" AND user_id = ").push_bind(user_id);
    }
    if let Some(status) = status {
        qb.push(" AND status = ").push_bind(status.as_str());
    }
}
