//! Invoice arithmetic, numbering and status transitions.
//!
//! Payment is confirmed by hand: an admin checks the uploaded PDF against
//! the bank statement and marks the invoice paid. Nothing here talks to a
//! payment provider.

use crate::error::CoreError;
use crate::types::{Date, DbId, Yen};
use crate::validation::validate_positive;

/// Consumption tax rate applied to every invoice, in percent.
pub const TAX_RATE_PERCENT: Yen = 10;

text_enum! {
    /// Invoice status stored in `invoices.status`.
    InvoiceStatus("invoice status") {
        Issued => "issued",
        Paid => "paid",
        Overdue => "overdue",
        Cancelled => "cancelled",
    }
}

impl InvoiceStatus {
    pub fn allowed_next(self) -> &'static [InvoiceStatus] {
        match self {
            InvoiceStatus::Issued => &[
                InvoiceStatus::Paid,
                InvoiceStatus::Overdue,
                InvoiceStatus::Cancelled,
            ],
            InvoiceStatus::Overdue => &[InvoiceStatus::Paid, InvoiceStatus::Cancelled],
            InvoiceStatus::Paid | InvoiceStatus::Cancelled => &[],
        }
    }

    /// Whether the invoice still expects a payment.
    pub fn is_outstanding(self) -> bool {
        matches!(self, InvoiceStatus::Issued | InvoiceStatus::Overdue)
    }
}

pub fn validate_transition(current: InvoiceStatus, next: InvoiceStatus) -> Result<(), CoreError> {
    if current.allowed_next().contains(&next) {
        Ok(())
    } else {
        Err(CoreError::Conflict(format!(
            "Cannot move invoice from {current} to {next}"
        )))
    }
}

/// Net, tax and gross amounts of an invoice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvoiceAmounts {
    pub amount: Yen,
    pub tax_amount: Yen,
    pub total_amount: Yen,
}

/// Consumption tax on `amount`, truncated to whole yen.
///
/// `None` when the intermediate product does not fit in an `i64`.
pub fn compute_tax(amount: Yen) -> Option<Yen> {
    amount.checked_mul(TAX_RATE_PERCENT).map(|v| v / 100)
}

pub fn compute_amounts(amount: Yen) -> Result<InvoiceAmounts, CoreError> {
    validate_positive("amount", amount)?;
    let too_large = || CoreError::Validation("amount is too large".into());
    let tax_amount = compute_tax(amount).ok_or_else(too_large)?;
    let total_amount = amount.checked_add(tax_amount).ok_or_else(too_large)?;
    Ok(InvoiceAmounts {
        amount,
        tax_amount,
        total_amount,
    })
}

pub fn validate_dates(issue_date: Date, due_date: Date) -> Result<(), CoreError> {
    if due_date < issue_date {
        return Err(CoreError::Validation(
            "due_date must not be before issue_date".into(),
        ));
    }
    Ok(())
}

/// Human-facing invoice number, e.g. `INV-202604-17-003`.
///
/// `seq` is the 1-based count of invoices already issued on the contract
/// plus one.
pub fn invoice_number(contract_id: DbId, issue_date: Date, seq: i64) -> String {
    format!(
        "INV-{}-{contract_id}-{seq:03}",
        issue_date.format("%Y%m")
    )
}

/// An outstanding invoice whose due date has passed.
pub fn is_past_due(status: InvoiceStatus, due_date: Date, today: Date) -> bool {
    status == InvoiceStatus::Issued && due_date < today
}
