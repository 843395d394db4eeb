//! Input validation for the sBG retention model.
//!
//! Purpose
//! -------
//! Centralize the domain checks shared by the churn recurrences, the fitter
//! and the DERL calculator so every public entry point rejects bad input the
//! same way and with the same error variant.
//!
//! Key behaviors
//! -------------
//! - Shape parameters (`alpha`, `beta`) must be finite and strictly positive.
//! - Periods, horizons and the DERL age `t` are 1-based counts and must be
//!   at least 1.
//! - The discount rate must lie strictly inside `(0, 1)`.
//! - Survival fractions must be finite and in `(0, 1]`; cohort counts must
//!   be finite and strictly positive.
//!
//! Conventions
//! -----------
//! - Validators return the checked value on success so they can be used
//!   inline (`let a = validate_shape("alpha", alpha)?;`).
//! - Nothing is clamped. The first offending value is reported.
use crate::retention::errors::{RetentionError, RetentionResult};

/// Minimum number of observed periods needed to identify `(alpha, beta)`.
pub const MIN_OBSERVED_PERIODS: usize = 2;

/// Validate an sBG shape parameter.
///
/// # Errors
/// - [`RetentionError::InvalidParameter`] if `value` is NaN, ±∞ or ≤ 0.
pub fn validate_shape(name: &'static str, value: f64) -> RetentionResult<f64> {
    if !value.is_finite() {
        return Err(RetentionError::InvalidParameter {
            name,
            value,
            reason: "Shape parameters must be finite.",
        });
    }
    if value <= 0.0 {
        return Err(RetentionError::InvalidParameter {
            name,
            value,
            reason: "Shape parameters must be strictly positive.",
        });
    }
    Ok(value)
}

/// Validate a 1-based period count (period, horizon, or DERL age `t`).
///
/// # Errors
/// - [`RetentionError::InvalidParameter`] if `value == 0`.
pub fn validate_period(name: &'static str, value: usize) -> RetentionResult<usize> {
    if value == 0 {
        return Err(RetentionError::InvalidParameter {
            name,
            value: 0.0,
            reason: "Periods are 1-based and must be at least 1.",
        });
    }
    Ok(value)
}

/// Validate a per-period discount rate.
///
/// # Errors
/// - [`RetentionError::InvalidParameter`] unless `0 < d < 1`.
pub fn validate_discount_rate(discount_rate: f64) -> RetentionResult<f64> {
    if !(discount_rate > 0.0 && discount_rate < 1.0) {
        return Err(RetentionError::InvalidParameter {
            name: "discount_rate",
            value: discount_rate,
            reason: "Discount rate must lie strictly between 0 and 1.",
        });
    }
    Ok(discount_rate)
}

/// Validate observed survival fractions for periods `1..=n`.
///
/// # Errors
/// - [`RetentionError::TooFewObservations`] if fewer than
///   [`MIN_OBSERVED_PERIODS`] values are given.
/// - [`RetentionError::InvalidObservation`] for the first value that is
///   non-finite or outside `(0, 1]`.
///
/// Both count as input errors under [`RetentionError::is_invalid_parameter`].
pub fn validate_survival_fractions(observed: &[f64]) -> RetentionResult<()> {
    if observed.len() < MIN_OBSERVED_PERIODS {
        return Err(RetentionError::TooFewObservations {
            len: observed.len(),
            min: MIN_OBSERVED_PERIODS,
        });
    }
    for (index, &value) in observed.iter().enumerate() {
        if !value.is_finite() {
            return Err(RetentionError::InvalidObservation {
                cohort: 0,
                index,
                value,
                reason: "Survival fractions must be finite.",
            });
        }
        if value <= 0.0 || value > 1.0 {
            return Err(RetentionError::InvalidObservation {
                cohort: 0,
                index,
                value,
                reason: "Survival fractions must lie in (0, 1].",
            });
        }
    }
    Ok(())
}

/// Validate one cohort of absolute counts `[c0, c1, ..., cm]`.
///
/// # Errors
/// - [`RetentionError::TooFewObservations`] if the cohort has no period
///   after its initial size.
/// - [`RetentionError::InvalidObservation`] for the first non-finite or
///   non-positive count.
pub fn validate_cohort_counts(cohort: usize, counts: &[f64]) -> RetentionResult<()> {
    if counts.len() < 2 {
        return Err(RetentionError::TooFewObservations { len: counts.len(), min: 2 });
    }
    for (index, &value) in counts.iter().enumerate() {
        if !value.is_finite() {
            return Err(RetentionError::InvalidObservation {
                cohort,
                index,
                value,
                reason: "Cohort counts must be finite.",
            });
        }
        if value <= 0.0 {
            return Err(RetentionError::InvalidObservation {
                cohort,
                index,
                value,
                reason: "Cohort counts must be strictly positive.",
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Acceptance and rejection rules of every validator.
    // - The index reported for the first offending observation.
    //
    // They intentionally DO NOT cover:
    // - How callers wire these validators (see `churn`, `data`, `derl`).
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // `validate_shape` accepts finite positive values and rejects the rest.
    //
    // Given
    // -----
    // - 0.5 (valid) and {0, -1, NaN, ∞} (invalid).
    //
    // Expect
    // ------
    // - `Ok(0.5)`; `InvalidParameter` carrying the name otherwise.
    fn validate_shape_accepts_positive_and_rejects_others() {
        assert_eq!(validate_shape("alpha", 0.5), Ok(0.5));
        for value in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            match validate_shape("beta", value) {
                Err(RetentionError::InvalidParameter { name, reason, .. }) => {
                    assert_eq!(name, "beta");
                    assert!(!reason.is_empty());
                }
                other => panic!("Expected InvalidParameter for {value}, got {other:?}"),
            }
        }
    }

    #[test]
    // Purpose
    // -------
    // The discount rate is an open interval on both ends.
    //
    // Given
    // -----
    // - d ∈ {0, 1, -0.1, NaN} and d = 0.1.
    //
    // Expect
    // ------
    // - Only 0.1 is accepted.
    fn validate_discount_rate_is_open_interval() {
        assert_eq!(validate_discount_rate(0.1), Ok(0.1));
        for d in [0.0, 1.0, -0.1, f64::NAN] {
            assert!(validate_discount_rate(d).is_err(), "d = {d} should be rejected");
        }
    }

    #[test]
    // Purpose
    // -------
    // Periods are 1-based.
    //
    // Given
    // -----
    // - 0 and 1.
    //
    // Expect
    // ------
    // - 0 rejected, 1 accepted.
    fn validate_period_rejects_zero() {
        assert!(validate_period("horizon", 0).is_err());
        assert_eq!(validate_period("horizon", 1), Ok(1));
    }

    #[test]
    // Purpose
    // -------
    // Survival fractions need two periods and values in (0, 1].
    //
    // Given
    // -----
    // - A single value, a value above 1, and a zero at index 2.
    //
    // Expect
    // ------
    // - `TooFewObservations`, then `InvalidObservation` at the right index.
    fn validate_survival_fractions_reports_first_offender() {
        assert_eq!(
            validate_survival_fractions(&[0.9]),
            Err(RetentionError::TooFewObservations { len: 1, min: 2 })
        );
        assert!(matches!(
            validate_survival_fractions(&[1.2, 0.8]),
            Err(RetentionError::InvalidObservation { cohort: 0, index: 0, .. })
        ));
        assert!(matches!(
            validate_survival_fractions(&[0.9, 0.8, 0.0]),
            Err(RetentionError::InvalidObservation { cohort: 0, index: 2, .. })
        ));
        assert!(validate_survival_fractions(&[1.0, 0.8]).is_ok());
    }

    #[test]
    // Purpose
    // -------
    // Cohort counts carry their cohort index in errors.
    //
    // Given
    // -----
    // - Cohort 3 with a negative count at index 1.
    //
    // Expect
    // ------
    // - `InvalidObservation { cohort: 3, index: 1, .. }`.
    fn validate_cohort_counts_reports_cohort_index() {
        assert!(matches!(
            validate_cohort_counts(3, &[100.0, -5.0]),
            Err(RetentionError::InvalidObservation { cohort: 3, index: 1, .. })
        ));
        assert!(matches!(
            validate_cohort_counts(0, &[100.0]),
            Err(RetentionError::TooFewObservations { len: 1, min: 2 })
        ));
    }
}
