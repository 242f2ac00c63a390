//! Account types and account statuses.
//!
//! These must match the `CHECK` constraints on `users.user_type` and
//! `users.status` in `20260301000001_create_users.sql`.

use crate::error::CoreError;

text_enum! {
    /// Which side of the marketplace an account belongs to.
    UserType("user type") {
        Company => "company",
        Cfo => "cfo",
        Admin => "admin",
    }
}

impl UserType {
    /// Admin accounts are provisioned out of band, never via `/auth/register`.
    pub fn can_self_register(self) -> bool {
        !matches!(self, UserType::Admin)
    }

    /// The account type a scout from this side must be addressed to.
    pub fn counterpart(self) -> Option<UserType> {
        match self {
            UserType::Company => Some(UserType::Cfo),
            UserType::Cfo => Some(UserType::Company),
            UserType::Admin => None,
        }
    }
}

text_enum! {
    /// Account moderation status.
    UserStatus("user status") {
        Active => "active",
        Suspended => "suspended",
        Pending => "pending",
    }
}

impl UserStatus {
    /// Whether the account may log in and appear in search results.
    pub fn is_usable(self) -> bool {
        matches!(self, UserStatus::Active)
    }
}

/// Reject registration attempts for account types that cannot self-register.
pub fn validate_registration_type(user_type: UserType) -> Result<(), CoreError> {
    if user_type.can_self_register() {
        Ok(())
    } else {
        Err(CoreError::Validation(
            "user_type must be 'company' or 'cfo'".into(),
        ))
    }
}
