//! Input validation helpers.
//!
//! Every helper returns the checked value so calls compose with `?`. None of
//! them clamp: out-of-range values are reported, never coerced. NaN and
//! infinities are rejected by all of them.

use crate::errors::{FootprintError, FootprintResult};

/// Require `value >= 0`.
pub fn non_negative(field: &str, value: f64) -> FootprintResult<f64> {
    if !value.is_finite() || value < 0.0 {
        return Err(FootprintError::out_of_range(field, "finite and >= 0", value));
    }
    Ok(value)
}

/// Require `value > 0`.
pub fn positive(field: &str, value: f64) -> FootprintResult<f64> {
    if !value.is_finite() || value <= 0.0 {
        return Err(FootprintError::out_of_range(field, "finite and > 0", value));
    }
    Ok(value)
}

/// Require `value` in (0, 1], as for machine efficiencies.
pub fn efficiency(field: &str, value: f64) -> FootprintResult<f64> {
    if !value.is_finite() || value <= 0.0 || value > 1.0 {
        return Err(FootprintError::out_of_range(field, "in (0, 1]", value));
    }
    Ok(value)
}

/// Require an optional override to be `>= 0` when present.
pub fn non_negative_opt(field: &str, value: Option<f64>) -> FootprintResult<Option<f64>> {
    value.map(|v| non_negative(field, v)).transpose()
}
