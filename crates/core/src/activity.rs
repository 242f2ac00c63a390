//! Activity log vocabulary (`activities.activity_type`, `activities.entity_type`).

pub const LOGIN: &str = "login";
pub const REGISTERED: &str = "registered";
pub const PROFILE_UPDATED: &str = "profile_updated";
pub const SCOUT_SENT: &str = "scout_sent";
pub const SCOUT_ACCEPTED: &str = "scout_accepted";
pub const SCOUT_DECLINED: &str = "scout_declined";
pub const SCOUT_WITHDRAWN: &str = "scout_withdrawn";
pub const MESSAGE_SENT: &str = "message_sent";
pub const CONTRACT_CREATED: &str = "contract_created";
pub const CONTRACT_STATUS_CHANGED: &str = "contract_status_changed";
pub const INVOICE_ISSUED: &str = "invoice_issued";
pub const INVOICE_PAID: &str = "invoice_paid";
pub const FILE_UPLOADED: &str = "file_uploaded";
pub const TICKET_CREATED: &str = "ticket_created";
pub const USER_STATUS_CHANGED: &str = "user_status_changed";

/// Entity type names used in `activities.entity_type`.
pub mod entity {
    pub const USER: &str = "user";
    pub const PROFILE: &str = "profile";
    pub const COMPANY: &str = "company";
    pub const CFO: &str = "cfo";
    pub const SCOUT: &str = "scout";
    pub const CONTRACT: &str = "contract";
    pub const INVOICE: &str = "invoice";
    pub const FILE: &str = "file";
    pub const TICKET: &str = "support_ticket";
}

/// Activity type recorded for a scout transition.
pub fn for_scout_status(status: crate::scout::ScoutStatus) -> &'static str {
    use crate::scout::ScoutStatus;
    match status {
        ScoutStatus::Pending => SCOUT_SENT,
        ScoutStatus::Accepted => SCOUT_ACCEPTED,
        ScoutStatus::Declined => SCOUT_DECLINED,
        ScoutStatus::Withdrawn => SCOUT_WITHDRAWN,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scout::ScoutStatus;

    #[test]
    fn scout_statuses_map_to_distinct_activity_types() {
        let mut seen: Vec<&str> = ScoutStatus::ALL.iter().map(|s| for_scout_status(*s)).collect();
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen.len(), ScoutStatus::ALL.len());
    }
}
