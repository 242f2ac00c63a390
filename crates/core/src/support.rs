//! Support ticket statuses and content limits.

use crate::error::CoreError;
use crate::validation::validate_text;

pub const MAX_SUBJECT_CHARS: usize = 200;
pub const MAX_BODY_CHARS: usize = 5000;
pub const MAX_ADMIN_NOTE_CHARS: usize = 2000;

text_enum! {
    /// Support ticket status stored in `support_tickets.status`.
    TicketStatus("ticket status") {
        Open => "open",
        InProgress => "in_progress",
        Resolved => "resolved",
        Closed => "closed",
    }
}

/// Admins may move a ticket anywhere except reopening a closed one.
pub fn validate_transition(current: TicketStatus, next: TicketStatus) -> Result<(), CoreError> {
    if current == TicketStatus::Closed && next == TicketStatus::Open {
        return Err(CoreError::Conflict(
            "A closed ticket cannot be reopened; ask the user to file a new one".into(),
        ));
    }
    Ok(())
}

pub fn validate_ticket(subject: &str, body: &str) -> Result<(), CoreError> {
    validate_text("subject", subject, MAX_SUBJECT_CHARS)?;
    validate_text("body", body, MAX_BODY_CHARS)
}
