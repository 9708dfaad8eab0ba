//! Validation helper functions for option types.

use crate::core::errors::{Result, SigilError};

/// Validate a similarity threshold: it must be finite and non-negative.
pub fn validate_threshold(value: f64, field: &str) -> Result<()> {
    if !value.is_finite() {
        return Err(SigilError::invalid_argument(
            field,
            value,
            "threshold must be a finite number",
        ));
    }
    if value < 0.0 {
        return Err(SigilError::invalid_argument(
            field,
            value,
            "threshold must be non-negative",
        ));
    }
    Ok(())
}

/// Validate that an optional usize limit is greater than zero when set.
pub fn validate_positive_limit(value: Option<usize>, field: &str) -> Result<()> {
    if value == Some(0) {
        return Err(SigilError::config_field(
            format!("{field} must be greater than 0 when set"),
            field,
        ));
    }
    Ok(())
}

/// Interpret an untyped threshold value.
///
/// `null` means "not configured" and yields `None`; any other non-numeric
/// value is rejected.
pub fn parse_threshold(value: &serde_json::Value, field: &str) -> Result<Option<f64>> {
    if value.is_null() {
        return Ok(None);
    }
    let threshold = value
        .as_f64()
        .ok_or_else(|| SigilError::invalid_argument(field, value, "threshold must be a number"))?;
    validate_threshold(threshold, field)?;
    Ok(Some(threshold))
}

/// Interpret an untyped optional limit such as `max_tokens`.
///
/// `null` yields `None`. Anything other than a non-negative integer that
/// fits in `usize` is rejected; zero is left to [`validate_positive_limit`].
pub fn parse_limit(value: &serde_json::Value, field: &str) -> Result<Option<usize>> {
    if value.is_null() {
        return Ok(None);
    }
    let limit = value
        .as_u64()
        .ok_or_else(|| SigilError::invalid_argument(field, value, "expected a positive integer"))?;
    usize::try_from(limit)
        .map(Some)
        .map_err(|_| SigilError::invalid_argument(field, value, "limit does not fit in usize"))
}
