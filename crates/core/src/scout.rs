//! Scout lifecycle: who may move a scout between states, and which chat
//! message records each move.
//!
//! ```text
//! pending --accept (receiver)--> accepted
//! pending --decline (receiver)-> declined
//! pending --withdraw (sender)--> withdrawn
//! ```
//!
//! Status lives in `scouts.status`. The chat message written alongside each
//! transition is display text for the conversation view; nothing reads the
//! status back out of it.

use crate::error::CoreError;
use crate::roles::UserType;
use crate::types::DbId;
use crate::validation::validate_text;

/// Maximum scout title length in characters.
pub const MAX_TITLE_CHARS: usize = 200;

/// Maximum scout or message body length in characters.
pub const MAX_BODY_CHARS: usize = 5000;

text_enum! {
    /// Scout status stored in `scouts.status`.
    ScoutStatus("scout status") {
        Pending => "pending",
        Accepted => "accepted",
        Declined => "declined",
        Withdrawn => "withdrawn",
    }
}

impl ScoutStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, ScoutStatus::Pending)
    }

    /// Chat stays open while the scout is pending and after it is accepted.
    pub fn allows_messages(self) -> bool {
        matches!(self, ScoutStatus::Pending | ScoutStatus::Accepted)
    }
}

text_enum! {
    /// Kind of entry in a scout conversation (`messages.message_type`).
    MessageType("message type") {
        Text => "text",
        Scout => "scout",
        Accepted => "accepted",
        Declined => "declined",
        Withdrawn => "withdrawn",
        System => "system",
    }
}

/// Which side of a scout the caller is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoutParty {
    Sender,
    Receiver,
}

/// A state-changing action on a pending scout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoutAction {
    Accept,
    Decline,
    Withdraw,
}

impl ScoutAction {
    pub fn target_status(self) -> ScoutStatus {
        match self {
            ScoutAction::Accept => ScoutStatus::Accepted,
            ScoutAction::Decline => ScoutStatus::Declined,
            ScoutAction::Withdraw => ScoutStatus::Withdrawn,
        }
    }

    pub fn required_party(self) -> ScoutParty {
        match self {
            ScoutAction::Accept | ScoutAction::Decline => ScoutParty::Receiver,
            ScoutAction::Withdraw => ScoutParty::Sender,
        }
    }

    pub fn message_type(self) -> MessageType {
        match self {
            ScoutAction::Accept => MessageType::Accepted,
            ScoutAction::Decline => MessageType::Declined,
            ScoutAction::Withdraw => MessageType::Withdrawn,
        }
    }

    /// Conversation text shown for the transition.
    pub fn message_body(self) -> &'static str {
        match self {
            ScoutAction::Accept => "スカウトを承諾しました",
            ScoutAction::Decline => "スカウトを辞退しました",
            ScoutAction::Withdraw => "スカウトを取り下げました",
        }
    }

    pub fn verb(self) -> &'static str {
        match self {
            ScoutAction::Accept => "accept",
            ScoutAction::Decline => "decline",
            ScoutAction::Withdraw => "withdraw",
        }
    }
}

/// Resolve the caller's side of a scout, if any.
pub fn party_of(sender_id: DbId, receiver_id: DbId, user_id: DbId) -> Option<ScoutParty> {
    if user_id == sender_id {
        Some(ScoutParty::Sender)
    } else if user_id == receiver_id {
        Some(ScoutParty::Receiver)
    } else {
        None
    }
}

/// Compute the next status for `action`, rejecting moves out of a terminal state.
pub fn transition(current: ScoutStatus, action: ScoutAction) -> Result<ScoutStatus, CoreError> {
    if current != ScoutStatus::Pending {
        return Err(CoreError::Conflict(format!(
            "Cannot {} a scout that is already {current}",
            action.verb()
        )));
    }
    Ok(action.target_status())
}

/// Check that the caller is the party allowed to perform `action`.
pub fn authorize_action(action: ScoutAction, party: Option<ScoutParty>) -> Result<(), CoreError> {
    match party {
        Some(p) if p == action.required_party() => Ok(()),
        Some(_) => Err(CoreError::Forbidden(format!(
            "Only the {} of a scout may {} it",
            match action.required_party() {
                ScoutParty::Sender => "sender",
                ScoutParty::Receiver => "receiver",
            },
            action.verb()
        ))),
        None => Err(CoreError::Forbidden(
            "You are not a party to this scout".into(),
        )),
    }
}

/// A scout must go from a company to a CFO or from a CFO to a company.
pub fn validate_counterparty(
    sender_id: DbId,
    sender_type: UserType,
    receiver_id: DbId,
    receiver_type: UserType,
) -> Result<(), CoreError> {
    if sender_id == receiver_id {
        return Err(CoreError::Validation("Cannot send a scout to yourself".into()));
    }
    match sender_type.counterpart() {
        Some(expected) if expected == receiver_type => Ok(()),
        Some(expected) => Err(CoreError::Validation(format!(
            "A {sender_type} account can only scout a {expected} account"
        ))),
        None => Err(CoreError::Forbidden(
            "Admin accounts cannot send scouts".into(),
        )),
    }
}

pub fn validate_scout_content(title: &str, body: &str) -> Result<(), CoreError> {
    validate_text("title", title, MAX_TITLE_CHARS)?;
    validate_text("body", body, MAX_BODY_CHARS)
}

pub fn validate_message_body(body: &str) -> Result<(), CoreError> {
    validate_text("body", body, MAX_BODY_CHARS)
}
