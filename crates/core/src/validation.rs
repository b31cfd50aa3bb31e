//! Input validators shared by the store services and the HTTP handlers.
//!
//! Each returns `Err(CoreError::Validation)` with a message fit for the
//! client.

use crate::error::CoreError;
use crate::types::Date;

/// Minimum number of copies that may be issued in one call.
pub const MIN_COPIES: i32 = 1;

/// Reject blank required text fields.
pub fn validate_required(field: &str, value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation(format!("{field} must not be empty")));
    }
    Ok(())
}

/// Copies issued must be a positive count.
pub fn validate_copies(copies: i32) -> Result<(), CoreError> {
    if copies < MIN_COPIES {
        return Err(CoreError::Validation(format!(
            "copies must be at least {MIN_COPIES}, got {copies}"
        )));
    }
    Ok(())
}

/// Revision counts start at zero and only go up.
pub fn validate_revision_count(revision_count: i32) -> Result<(), CoreError> {
    if revision_count < 0 {
        return Err(CoreError::Validation(format!(
            "revision_count must not be negative, got {revision_count}"
        )));
    }
    Ok(())
}

/// When both dates are known, the project cannot finish before it starts.
pub fn validate_date_range(start: Option<Date>, end: Option<Date>) -> Result<(), CoreError> {
    if let (Some(start), Some(end)) = (start, end) {
        if end < start {
            return Err(CoreError::Validation(format!(
                "end_date {end} is before start_date {start}"
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn required_rejects_whitespace() {
        assert_matches!(validate_required("title", "   "), Err(CoreError::Validation(_)));
        assert!(validate_required("title", "Electrical").is_ok());
    }

    #[test]
    fn copies_must_be_positive() {
        assert_matches!(validate_copies(0), Err(CoreError::Validation(_)));
        assert_matches!(validate_copies(-3), Err(CoreError::Validation(_)));
        assert!(validate_copies(1).is_ok());
    }

    #[test]
    fn revision_count_cannot_be_negative() {
        assert_matches!(validate_revision_count(-1), Err(CoreError::Validation(_)));
        assert!(validate_revision_count(0).is_ok());
    }

    #[test]
    fn date_range_ordering() {
        let start = date(2024, 3, 1);
        let end = date(2024, 2, 1);
        assert_matches!(
            validate_date_range(Some(start), Some(end)),
            Err(CoreError::Validation(msg)) if msg.contains("before")
        );
        assert!(validate_date_range(Some(end), Some(start)).is_ok());
        assert!(validate_date_range(None, Some(end)).is_ok());
        assert!(validate_date_range(Some(start), Some(start)).is_ok());
    }
}
