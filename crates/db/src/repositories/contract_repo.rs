//! Repository for the `contracts` table.

use cfomatch_core::contract::ContractStatus;
use cfomatch_core::types::DbId;
use sqlx::{PgPool, Postgres, QueryBuilder};

use super::push_page;
use crate::models::contract::{Contract, ContractListParams, CreateContract};

const COLUMNS: &str = "id, company_user_id, cfo_user_id, scout_id, title, description, \
                       monthly_fee, start_date, end_date, status, created_at, updated_at";

/// Provides contract persistence and conditional status updates.
pub struct ContractRepo;

impl ContractRepo {
    /// Insert a new contract in `pending` status.
    ///
    /// A second contract for the same scout violates `uq_contracts_scout_id`.
    pub async fn create(pool: &PgPool, input: &CreateContract) -> Result<Contract, sqlx::Error> {
        let query = format!(
            "INSERT INTO contracts
                (company_user_id, cfo_user_id, scout_id, title, description,
                 monthly_fee, start_date, end_date)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Contract>(&query)
            .bind(input.company_user_id)
            .bind(input.cfo_user_id)
            .bind(input.scout_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.monthly_fee)
            .bind(input.start_date)
            .bind(input.end_date)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Contract>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM contracts WHERE id = $1");
        sqlx::query_as::<_, Contract>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List contracts, newest first.
    ///
    /// With `party = Some(user_id)` only contracts where the user is either
    /// party are returned; `None` lists every contract (admin view).
    pub async fn list(
        pool: &PgPool,
        party: Option<DbId>,
        params: &ContractListParams,
    ) -> Result<(Vec<Contract>, i64), sqlx::Error> {
        let page = params.page_params();

        let mut count = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM contracts");
        push_filters(&mut count, party, params.status);
        let total: i64 = count.build_query_scalar().fetch_one(pool).await?;

        let mut rows = QueryBuilder::<Postgres>::new(format!("SELECT {COLUMNS} FROM contracts"));
        push_filters(&mut rows, party, params.status);
        push_page(&mut rows, "created_at DESC, id DESC", &page);
        let items = rows.build_query_as::<Contract>().fetch_all(pool).await?;

        Ok((items, total))
    }

    /// Move a contract from `expected` to `next`.
    ///
    /// Returns `None` if the contract's status changed underneath the caller.
    pub async fn update_status(
        pool: &PgPool,
        id: DbId,
        expected: ContractStatus,
        next: ContractStatus,
    ) -> Result<Option<Contract>, sqlx::Error> {
        let query = format!(
            "UPDATE contracts SET status = $2
             WHERE id = $1 AND status = $3
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Contract>(&query)
            .bind(id)
            .bind(next.as_str())
            .bind(expected.as_str())
            .fetch_optional(pool)
            .await
    }
}

fn push_filters(
    qb: &mut QueryBuilder<'_, Postgres>,
    party: Option<DbId>,
    status: Option<ContractStatus>,
) {
    qb.push(" WHERE TRUE");
    if let Some(user_id) = party {
        qb.push(" AND (company_user_id = ")
            .push_bind(user_id)
            .push(" OR cfo_user_id = ")
            .push_bind(user_id)
            .push(")");
    }
    if let Some(status) = status {
        qb.push(" AND status = ").push_bind(status.as_str());
    }
}
