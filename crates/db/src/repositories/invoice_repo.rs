//! Repository for the `invoices` table.

use cfomatch_core::invoice::InvoiceStatus;
use cfomatch_core::types::DbId;
use sqlx::{PgPool, Postgres, QueryBuilder};

use super::push_page;
use crate::models::invoice::{
    CreateInvoice, FinanceInvoiceRow, Invoice, InvoiceListParams, InvoiceStatusTotal,
};

const COLUMNS: &str = "id, contract_id, invoice_number, amount, tax_amount, total_amount, \
                       issue_date, due_date, paid_at, status, pdf_path, admin_note, \
                       created_at, updated_at";

/// Provides invoice persistence, the finance console listing, and payment
/// confirmation.
pub struct InvoiceRepo;

impl InvoiceRepo {
    pub async fn create(pool: &PgPool, input: &CreateInvoice) -> Result<Invoice, sqlx::Error> {
        let query = format!(
            "INSERT INTO invoices
                (contract_id, invoice_number, amount, tax_amount, total_amount,
                 issue_date, due_date, pdf_path)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Invoice>(&query)
            .bind(input.contract_id)
            .bind(&input.invoice_number)
            .bind(input.amount)
            .bind(input.tax_amount)
            .bind(input.total_amount)
            .bind(input.issue_date)
            .bind(input.due_date)
            .bind(&input.pdf_path)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Invoice>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM invoices WHERE id = $1");
        sqlx::query_as::<_, Invoice>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Number of invoices already issued against a contract.
    pub async fn count_for_contract(pool: &PgPool, contract_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM invoices WHERE contract_id = $1")
            .bind(contract_id)
            .fetch_one(pool)
            .await
    }

    pub async fn list_by_contract(
        pool: &PgPool,
        contract_id: DbId,
        params: &InvoiceListParams,
    ) -> Result<(Vec<Invoice>, i64), sqlx::Error> {
        let page = params.page_params();

        let mut count = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM invoices i");
        count.push(" WHERE i.contract_id = ").push_bind(contract_id);
        push_status(&mut count, params.status);
        let total: i64 = count.build_query_scalar().fetch_one(pool).await?;

        let mut rows = QueryBuilder::<Postgres>::new(format!("SELECT {COLUMNS} FROM invoices i"));
        rows.push(" WHERE i.contract_id = ").push_bind(contract_id);
        push_status(&mut rows, params.status);
        push_page(&mut rows, "i.issue_date DESC, i.id DESC", &page);
        let items = rows.build_query_as::<Invoice>().fetch_all(pool).await?;

        Ok((items, total))
    }

    /// Every invoice with its contract title and both parties' display names.
    pub async fn list_for_finance(
        pool: &PgPool,
        params: &InvoiceListParams,
    ) -> Result<(Vec<FinanceInvoiceRow>, i64), sqlx::Error> {
        let page = params.page_params();

        let mut count = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM invoices i WHERE TRUE");
        push_status(&mut count, params.status);
        let total: i64 = count.build_query_scalar().fetch_one(pool).await?;

        let mut rows = QueryBuilder::<Postgres>::new(
            "SELECT i.id, i.contract_id, c.title AS contract_title, i.invoice_number,
                    i.amount, i.tax_amount, i.total_amount, i.issue_date, i.due_date,
                    i.paid_at, i.status, i.pdf_path, i.admin_note,
                    cp.display_name AS company_name, fp.display_name AS cfo_name,
                    i.created_at
             FROM invoices i
             JOIN contracts c ON c.id = i.contract_id
             LEFT JOIN profiles cp ON cp.user_id = c.company_user_id
             LEFT JOIN profiles fp ON fp.user_id = c.cfo_user_id
             WHERE TRUE",
        );
        push_status(&mut rows, params.status);
        push_page(&mut rows, "i.due_date ASC, i.id ASC", &page);
        let items = rows
            .build_query_as::<FinanceInvoiceRow>()
            .fetch_all(pool)
            .await?;

        Ok((items, total))
    }

    /// Invoice count and summed total per status.
    pub async fn status_totals(pool: &PgPool) -> Result<Vec<InvoiceStatusTotal>, sqlx::Error> {
        sqlx::query_as::<_, InvoiceStatusTotal>(
            "SELECT status, COUNT(*) AS count, COALESCE(SUM(total_amount), 0)::BIGINT AS total_amount
             FROM invoices
             GROUP BY status
             ORDER BY status",
        )
        .fetch_all(pool)
        .await
    }

    /// Move an invoice from `expected` to `next`, optionally recording an
    /// admin note. Moving to `paid` stamps `paid_at`.
    ///
    /// Returns `None` if the invoice's status changed underneath the caller.
    pub async fn update_status(
        pool: &PgPool,
        id: DbId,
        expected: InvoiceStatus,
        next: InvoiceStatus,
        note: Option<&str>,
    ) -> Result<Option<Invoice>, sqlx::Error> {
        let query = format!(
            "UPDATE invoices SET
                status = $2,
                admin_note = COALESCE($4, admin_note),
                paid_at = CASE WHEN $2 = 'paid' THEN NOW() ELSE paid_at END
             WHERE id = $1 AND status = $3
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Invoice>(&query)
            .bind(id)
            .bind(next.as_str())
            .bind(expected.as_str())
            .bind(note)
            .fetch_optional(pool)
            .await
    }

    /// Manual payment confirmation by an admin.
    pub async fn confirm_payment(
        pool: &PgPool,
        id: DbId,
        expected: InvoiceStatus,
        note: Option<&str>,
    ) -> Result<Option<Invoice>, sqlx::Error> {
        Self::update_status(pool, id, expected, InvoiceStatus::Paid, note).await
    }
}

fn push_status(qb: &mut QueryBuilder<'_, Postgres>, status: Option<InvoiceStatus>) {
    if let Some(status) = status {
        qb.push(" AND i.status = ").push_bind(status.as_str());
    }
}
