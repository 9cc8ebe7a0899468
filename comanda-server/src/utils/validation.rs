//! Input validation helpers
//!
//! Centralized text length constants and validation functions. Validation
//! happens at the API boundary before a write is attempted; the registries
//! never re-check.

use crate::utils::AppError;

// ── Text length limits ──────────────────────────────────────────────

/// Entity names: customer, menu item, category, username
pub const MAX_NAME_LEN: usize = 200;

/// Menu item descriptions, status messages
pub const MAX_TEXT_LEN: usize = 500;

/// Short identifiers: phone numbers, payment method tags
pub const MAX_SHORT_TEXT_LEN: usize = 100;

/// Passwords (stored as-is, no hashing)
pub const MAX_PASSWORD_LEN: usize = 128;

/// Delivery addresses
pub const MAX_ADDRESS_LEN: usize = 500;

// ── Validation helpers ──────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        )));
    }
    Ok(())
}

/// Validate that an amount is not negative.
pub fn validate_non_negative(value: f64, field: &str) -> Result<(), AppError> {
    if value < 0.0 || !value.is_finite() {
        return Err(AppError::validation(format!(
            "{field} must be a non-negative amount"
        )));
    }
    Ok(())
}

/// Validate that a price is strictly positive.
pub fn validate_positive(value: f64, field: &str) -> Result<(), AppError> {
    if value <= 0.0 || !value.is_finite() {
        return Err(AppError::validation(format!(
            "{field} must be a positive amount"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_text() {
        assert!(validate_required_text("ok", "name", MAX_NAME_LEN).is_ok());
        assert!(validate_required_text("", "name", MAX_NAME_LEN).is_err());
        assert!(validate_required_text("   ", "name", MAX_NAME_LEN).is_err());
        assert!(validate_required_text(&"x".repeat(300), "name", MAX_NAME_LEN).is_err());
    }

    #[test]
    fn test_amounts() {
        assert!(validate_non_negative(0.0, "total").is_ok());
        assert!(validate_non_negative(-0.01, "total").is_err());
        assert!(validate_non_negative(f64::NAN, "total").is_err());
        assert!(validate_positive(0.01, "price").is_ok());
        assert!(validate_positive(0.0, "price").is_err());
    }
}
