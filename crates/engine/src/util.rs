//! Internal helpers for input validation.
//!
//! These utilities are **not** part of the public API. They centralize the
//! amount checks so every mutation enforces the same numeric invariants.

use crate::{EngineError, ResultEngine};

/// Validate a bill-wide scalar (tax, fee, tip, discount): finite and >= 0.
pub(crate) fn validate_scalar(label: &str, value: f64) -> ResultEngine<f64> {
    if !value.is_finite() {
        return Err(EngineError::Validation(format!(
            "{label} must be a finite amount"
        )));
    }
    if value < 0.0 {
        return Err(EngineError::Validation(format!("{label} must be >= 0")));
    }
    Ok(value)
}

/// Validate an expense cost or declared total: finite and > 0.
pub(crate) fn validate_positive(label: &str, value: f64) -> ResultEngine<f64> {
    if !value.is_finite() {
        return Err(EngineError::Validation(format!(
            "{label} must be a finite amount"
        )));
    }
    if value <= 0.0 {
        return Err(EngineError::Validation(format!("{label} must be > 0")));
    }
    Ok(value)
}

/// Validate a user-supplied name or label: non-empty once trimmed.
pub(crate) fn validate_label(label: &str, value: &str) -> ResultEngine<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(EngineError::Validation(format!("{label} must not be empty")));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_rejects_negative_and_non_finite() {
        assert!(validate_scalar("tax", -0.01).is_err());
        assert!(validate_scalar("tax", f64::NAN).is_err());
        assert!(validate_scalar("tax", f64::INFINITY).is_err());
        assert_eq!(validate_scalar("tax", 0.0), Ok(0.0));
    }

    #[test]
    fn positive_rejects_zero() {
        assert!(validate_positive("cost", 0.0).is_err());
        assert_eq!(validate_positive("cost", 12.5), Ok(12.5));
    }

    #[test]
    fn label_trims_whitespace() {
        assert_eq!(validate_label("name", "  Ada "), Ok("Ada".to_string()));
        assert!(validate_label("name", "   ").is_err());
    }
}
