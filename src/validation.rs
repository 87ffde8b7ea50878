//! Validation helper functions shared by the mutation API.
//!
//! This module contains validation and coercion for required text fields,
//! goal quantities and date input.

use crate::error::{Error, Result};
use chrono::NaiveDate;

/// Trim a required text field, rejecting input that is empty after
/// trimming.
///
/// # Arguments
/// * `value` - Raw user input
/// * `field` - Field name used in the error message
pub fn require_text(value: &str, field: &'static str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(Error::EmptyField(field));
    }
    Ok(trimmed.to_string())
}

/// Coerce a goal quantity. Missing or zero quantities default to 1.
pub fn coerce_quantity(quantity: Option<u32>) -> u32 {
    match quantity {
        Some(q) if q >= 1 => q,
        _ => 1,
    }
}

/// Parse a date in YYYY-MM-DD format
pub fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| Error::InvalidDate(value.to_string()))
}

/// Reject goal date windows where the end date precedes the start date.
/// Open-ended windows (either side missing) are accepted.
pub fn check_date_window(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Result<()> {
    if let (Some(start), Some(end)) = (start, end)
        && end < start
    {
        return Err(Error::InvalidDateRange);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_text_trims_and_rejects_blank() {
        assert_eq!(
            require_text("  Algebra  ", "subject name").unwrap(),
            "Algebra"
        );
        assert!(matches!(
            require_text("   ", "subject name"),
            Err(Error::EmptyField("subject name"))
        ));
    }

    #[test]
    fn quantity_defaults_to_one() {
        assert_eq!(coerce_quantity(None), 1);
        assert_eq!(coerce_quantity(Some(0)), 1);
        assert_eq!(coerce_quantity(Some(5)), 5);
    }

    #[test]
    fn parse_date_accepts_iso_only() {
        assert!(parse_date("2024-03-15").is_ok());
        assert!(parse_date("15/03/2024").is_err());
        assert!(parse_date("2024-13-01").is_err());
    }

    #[test]
    fn date_window_rejects_inverted_range() {
        let start = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert!(matches!(
            check_date_window(Some(start), Some(end)),
            Err(Error::InvalidDateRange)
        ));
        assert!(check_date_window(Some(end), Some(start)).is_ok());
        assert!(check_date_window(None, Some(end)).is_ok());
        assert!(check_date_window(Some(start), None).is_ok());
    }
}
