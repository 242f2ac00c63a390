//! Invoice models and DTOs.

use cfomatch_core::invoice::InvoiceStatus;
use cfomatch_core::pagination::PageParams;
use cfomatch_core::types::{Date, DbId, Timestamp, Yen};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `invoices` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Invoice {
    pub id: DbId,
    pub contract_id: DbId,
    pub invoice_number: String,
    pub amount: Yen,
    pub tax_amount: Yen,
    pub total_amount: Yen,
    pub issue_date: Date,
    pub due_date: Date,
    pub paid_at: Option<Timestamp>,
    #[sqlx(try_from = "String")]
    pub status: InvoiceStatus,
    pub pdf_path: Option<String>,
    pub admin_note: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Finance-console row: invoice plus contract and party names.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct FinanceInvoiceRow {
    pub id: DbId,
    pub contract_id: DbId,
    pub contract_title: String,
    pub invoice_number: String,
    pub amount: Yen,
    pub tax_amount: Yen,
    pub total_amount: Yen,
    pub issue_date: Date,
    pub due_date: Date,
    pub paid_at: Option<Timestamp>,
    #[sqlx(try_from = "String")]
    pub status: InvoiceStatus,
    pub pdf_path: Option<String>,
    pub admin_note: Option<String>,
    pub company_name: Option<String>,
    pub cfo_name: Option<String>,
    pub created_at: Timestamp,
}

/// Per-status totals for the finance dashboard.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct InvoiceStatusTotal {
    #[sqlx(try_from = "String")]
    pub status: InvoiceStatus,
    pub count: i64,
    pub total_amount: Yen,
}

/// Request body for `POST /contracts/{id}/invoices`.
#[derive(Debug, Deserialize)]
pub struct CreateInvoiceRequest {
    pub amount: Yen,
    pub issue_date: Date,
    pub due_date: Date,
    /// Previously uploaded `document` file holding the invoice PDF.
    pub pdf_file_id: Option<DbId>,
}

/// Insert DTO with computed amounts and number.
#[derive(Debug)]
pub struct CreateInvoice {
    pub contract_id: DbId,
    pub invoice_number: String,
    pub amount: Yen,
    pub tax_amount: Yen,
    pub total_amount: Yen,
    pub issue_date: Date,
    pub due_date: Date,
    pub pdf_path: Option<String>,
}

/// Request body for `POST /admin/finance/invoices/{id}/confirm-payment`.
#[derive(Debug, Default, Deserialize)]
pub struct ConfirmPayment {
    pub note: Option<String>,
}

/// Request body for `PATCH /admin/finance/invoices/{id}/status`.
#[derive(Debug, Deserialize)]
pub struct UpdateInvoiceStatus {
    pub status: String,
    pub note: Option<String>,
}

/// Query parameters for invoice listings.
#[derive(Debug, Default, Deserialize)]
pub struct InvoiceListParams {
    pub status: Option<InvoiceStatus>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl InvoiceListParams {
    pub fn page_params(&self) -> PageParams {
        PageParams {
            page: self.page,
            limit: self.limit,
        }
    }
}
