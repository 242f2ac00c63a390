//! Contract status transitions and term validation.

use crate::error::CoreError;
use crate::types::{Date, Yen};
use crate::validation::{validate_positive, validate_text};

/// Maximum contract title length in characters.
pub const MAX_TITLE_CHARS: usize = 200;

text_enum! {
    /// Contract status stored in `contracts.status`.
    ContractStatus("contract status") {
        Pending => "pending",
        Active => "active",
        Completed => "completed",
        Cancelled => "cancelled",
    }
}

impl ContractStatus {
    /// States reachable in one step from `self`.
    pub fn allowed_next(self) -> &'static [ContractStatus] {
        match self {
            ContractStatus::Pending => &[ContractStatus::Active, ContractStatus::Cancelled],
            ContractStatus::Active => &[ContractStatus::Completed, ContractStatus::Cancelled],
            ContractStatus::Completed | ContractStatus::Cancelled => &[],
        }
    }

    pub fn can_transition_to(self, next: ContractStatus) -> bool {
        self.allowed_next().contains(&next)
    }

    pub fn is_terminal(self) -> bool {
        self.allowed_next().is_empty()
    }
}

/// Which side of a contract the caller is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContractParty {
    Company,
    Cfo,
}

pub fn validate_transition(current: ContractStatus, next: ContractStatus) -> Result<(), CoreError> {
    if current.can_transition_to(next) {
        Ok(())
    } else {
        Err(CoreError::Conflict(format!(
            "Cannot move contract from {current} to {next}"
        )))
    }
}

/// Check the caller may request `next`.
///
/// Activation is the CFO's acceptance of the offer, so only the CFO party
/// may activate. Either party or an admin may complete or cancel.
pub fn authorize_transition(
    next: ContractStatus,
    party: Option<ContractParty>,
    is_admin: bool,
) -> Result<(), CoreError> {
    match next {
        ContractStatus::Active if party == Some(ContractParty::Cfo) => Ok(()),
        ContractStatus::Active => Err(CoreError::Forbidden(
            "Only the CFO party may activate a contract".into(),
        )),
        ContractStatus::Completed | ContractStatus::Cancelled
            if party.is_some() || is_admin =>
        {
            Ok(())
        }
        ContractStatus::Completed | ContractStatus::Cancelled => Err(CoreError::Forbidden(
            "You are not a party to this contract".into(),
        )),
        ContractStatus::Pending => Err(CoreError::Conflict(
            "Contracts cannot be moved back to pending".into(),
        )),
    }
}

/// Validate the commercial terms of a new contract.
pub fn validate_terms(
    title: &str,
    monthly_fee: Yen,
    start_date: Date,
    end_date: Option<Date>,
) -> Result<(), CoreError> {
    validate_text("title", title, MAX_TITLE_CHARS)?;
    validate_positive("monthly_fee", monthly_fee)?;
    if let Some(end) = end_date {
        if end <= start_date {
            return Err(CoreError::Validation(
                "end_date must be after start_date".into(),
            ));
        }
    }
    Ok(())
}
