//! Shared input validation helpers.
//!
//! Request DTOs derive [`validator::Validate`]; handlers call
//! [`validate_input`] so every failure surfaces as [`CoreError::Validation`].

use validator::Validate;

use crate::error::CoreError;

/// Run the derived `Validate` rules on a DTO.
pub fn validate_input<T: Validate>(input: &T) -> Result<(), CoreError> {
    input
        .validate()
        .map_err(|e| CoreError::Validation(e.to_string()))
}

/// Require a non-blank string of at most `max_chars` characters.
///
/// Length is counted in characters, not bytes, so Japanese text gets the
/// same allowance as ASCII.
pub fn validate_text(field: &str, value: &str, max_chars: usize) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation(format!("{field} must not be empty")));
    }
    let len = value.chars().count();
    if len > max_chars {
        return Err(CoreError::Validation(format!(
            "{field} must be at most {max_chars} characters (got {len})"
        )));
    }
    Ok(())
}

/// Require a strictly positive amount.
pub fn validate_positive(field: &str, value: i64) -> Result<(), CoreError> {
    if value <= 0 {
        return Err(CoreError::Validation(format!(
            "{field} must be greater than zero"
        )));
    }
    Ok(())
}
