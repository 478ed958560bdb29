//! Validation utilities for the Market System

use chrono::NaiveDate;
use rust_decimal::Decimal;
use validator::ValidationError;

/// Date format used by the API (`YYYY-MM-DD`)
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse an API date
pub fn parse_date(value: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
}

/// Prices must not be negative
pub fn validate_non_negative(value: &Decimal) -> Result<(), ValidationError> {
    if *value < Decimal::ZERO {
        let mut err = ValidationError::new("non_negative");
        err.message = Some("must not be negative".into());
        return Err(err);
    }
    Ok(())
}

/// Money columns store cents, so amounts carry at most two decimal places
pub const MONEY_SCALE: u32 = 2;

/// `true` when the amount is representable in cents without rounding.
/// Trailing zeros do not count (`1.500` fits).
pub fn fits_money_scale(value: &Decimal) -> bool {
    value.normalize().scale() <= MONEY_SCALE
}

/// Prices must be non-negative and whole cents
pub fn validate_money(value: &Decimal) -> Result<(), ValidationError> {
    validate_non_negative(value)?;
    if !fits_money_scale(value) {
        let mut err = ValidationError::new("money_scale");
        err.message = Some("must have at most 2 decimal places".into());
        return Err(err);
    }
    Ok(())
}

/// Validate phone number format (digits with optional `+`, spaces and dashes)
pub fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    let digits = phone.chars().filter(|c| c.is_ascii_digit()).count();
    let allowed = phone
        .chars()
        .enumerate()
        .all(|(i, c)| c.is_ascii_digit() || c == ' ' || c == '-' || (c == '+' && i == 0));

    if phone.is_empty() || (allowed && (7..=15).contains(&digits)) {
        Ok(())
    } else {
        let mut err = ValidationError::new("phone");
        err.message = Some("invalid phone number".into());
        Err(err)
    }
}
