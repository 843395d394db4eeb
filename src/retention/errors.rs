//! Errors for the sBG retention model (parameter and data validation,
//! estimation failures, and special-function breakdowns).
//!
//! ## Conventions
//! - Periods are **1-based** (period 1 is the first observed period);
//!   cohort and observation indices are **0-based**.
//! - Every precondition is checked before computation. Nothing is clamped.
//! - Optimizer/backend errors are normalized to
//!   [`RetentionError::FitDidNotConverge`] with a human-readable status.
use crate::{optimization::errors::OptError, special::errors::SpecialError};

/// Crate-wide result alias for retention operations that may produce
/// [`RetentionError`].
pub type RetentionResult<T> = Result<T, RetentionError>;

/// Unified error type for the sBG retention model.
///
/// Input errors span the parameter and data validation variants below.
/// Use [`RetentionError::is_invalid_parameter`] to catch any of them.
///
/// ```
/// use sbg_retention::retention::{fit, RetentionError};
///
/// let err = fit(&[0.9]).unwrap_err();
/// assert!(err.is_invalid_parameter());
/// assert_eq!(err, RetentionError::TooFewObservations { len: 1, min: 2 });
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum RetentionError {
    // ---- Parameter validation ----
    /// A scalar argument is outside its admissible domain
    /// (alpha/beta ≤ 0, discount rate ∉ (0, 1), period/horizon/t < 1, bounds).
    InvalidParameter { name: &'static str, value: f64, reason: &'static str },

    // ---- Data validation ----
    /// Not enough observations to identify both shape parameters.
    TooFewObservations { len: usize, min: usize },

    /// An observation is non-finite or outside its admissible range.
    InvalidObservation { cohort: usize, index: usize, value: f64, reason: &'static str },

    // ---- Estimation ----
    /// The optimizer failed, stopped without converging, or produced
    /// non-finite estimates.
    FitDidNotConverge { status: String },

    // ---- Special functions ----
    /// A series evaluation did not converge or was non-finite.
    NumericalInstability { reason: String },
}

impl RetentionError {
    /// `true` for every error raised by input validation, i.e. the errors a
    /// caller can fix by changing its arguments.
    pub fn is_invalid_parameter(&self) -> bool {
        matches!(
            self,
            RetentionError::InvalidParameter { .. }
                | RetentionError::TooFewObservations { .. }
                | RetentionError::InvalidObservation { .. }
        )
    }
}

impl std::error::Error for RetentionError {}

impl std::fmt::Display for RetentionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Parameter validation ----
            RetentionError::InvalidParameter { name, value, reason } => {
                write!(f, "Invalid parameter {name} = {value}: {reason}")
            }
            // ---- Data validation ----
            RetentionError::TooFewObservations { len, min } => {
                write!(f, "Too few observations: got {len}, need at least {min}.")
            }
            RetentionError::InvalidObservation { cohort, index, value, reason } => {
                write!(f, "Invalid observation {value} in cohort {cohort} at index {index}: {reason}")
            }
            // ---- Estimation ----
            RetentionError::FitDidNotConverge { status } => {
                write!(f, "Fit did not converge: {status}")
            }
            // ---- Special functions ----
            RetentionError::NumericalInstability { reason } => {
                write!(f, "Numerical instability: {reason}")
            }
        }
    }
}

impl From<OptError> for RetentionError {
    fn from(err: OptError) -> Self {
        RetentionError::FitDidNotConverge { status: err.to_string() }
    }
}

impl From<SpecialError> for RetentionError {
    fn from(err: SpecialError) -> Self {
        RetentionError::NumericalInstability { reason: err.to_string() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    // Purpose
    // -------
    // Validation errors are classified as parameter errors; estimation and
    // numerical failures are not.
    //
    // Given
    // -----
    // - One value of each variant.
    //
    // Expect
    // ------
    // - `is_invalid_parameter` is true exactly for the three validation kinds.
    fn is_invalid_parameter_classifies_variants() {
        let invalid = [
            RetentionError::InvalidParameter { name: "alpha", value: 0.0, reason: "" },
            RetentionError::TooFewObservations { len: 1, min: 2 },
            RetentionError::InvalidObservation { cohort: 0, index: 0, value: 1.5, reason: "" },
        ];
        let other = [
            RetentionError::FitDidNotConverge { status: "MaxItersReached".into() },
            RetentionError::NumericalInstability { reason: "series".into() },
        ];
        assert!(invalid.iter().all(RetentionError::is_invalid_parameter));
        assert!(!other.iter().any(RetentionError::is_invalid_parameter));
    }

    #[test]
    // Purpose
    // -------
    // Any optimizer error becomes `FitDidNotConverge` carrying its message.
    //
    // Given
    // -----
    // - `OptError::NonFiniteCost`.
    //
    // Expect
    // ------
    // - `FitDidNotConverge` whose status mentions the non-finite cost.
    fn opt_error_maps_to_fit_did_not_converge() {
        let err: RetentionError = OptError::NonFiniteCost { value: f64::NAN }.into();
        match err {
            RetentionError::FitDidNotConverge { status } => {
                assert!(status.contains("Non-finite cost"))
            }
            other => panic!("Expected FitDidNotConverge, got {other:?}"),
        }
    }

    #[test]
    // Purpose
    // -------
    // A one-period sequence is an input error, not an estimation failure.
    //
    // Given
    // -----
    // - `fit(&[0.9])`.
    //
    // Expect
    // ------
    // - `TooFewObservations { len: 1, min: 2 }` with
    //   `is_invalid_parameter() == true`.
    fn single_observation_is_an_input_error() {
        let err = crate::retention::fit(&[0.9]).expect_err("one period cannot identify two shapes");
        assert_eq!(err, RetentionError::TooFewObservations { len: 1, min: 2 });
        assert!(err.is_invalid_parameter());
    }

    #[test]
    // Purpose
    // -------
    // Special-function failures surface as numerical instability.
    //
    // Given
    // -----
    // - `SpecialError::NotConverged`.
    //
    // Expect
    // ------
    // - `NumericalInstability` whose reason carries the term count.
    fn special_error_maps_to_numerical_instability() {
        let err: RetentionError = SpecialError::NotConverged { terms: 10, z: 0.5 }.into();
        match err {
            RetentionError::NumericalInstability { reason } => assert!(reason.contains("10 terms")),
            other => panic!("Expected NumericalInstability, got {other:?}"),
        }
    }
}
