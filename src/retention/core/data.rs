//! Observed cohort data for sBG estimation.
//!
//! Purpose
//! -------
//! Hold validated cohort observations in a single representation shared by
//! single-curve and multi-cohort fits. Every cohort is a sequence of counts
//! `[c0, c1, ..., cm]` where `c0` is the initial size and `cj` the number
//! still active after period `j`.
//!
//! Key behaviors
//! -------------
//! - [`CohortData::from_survival_fractions`] wraps a survival curve
//!   `[s1, ..., sn]` as one cohort `[1.0, s1, ..., sn]`.
//! - [`CohortData::from_counts`] accepts several cohorts of absolute counts,
//!   possibly of different lengths.
//! - The pooled initial size `Σ c0` and the longest observed window are
//!   computed once at construction.
//!
//! Invariants & assumptions
//! ------------------------
//! - At least one cohort, every cohort has at least one observed period.
//! - The longest cohort observes at least two periods.
//! - Counts are finite and strictly positive; fractions lie in `(0, 1]`.
//! - Monotonicity is assumed but not enforced.
use crate::retention::{
    core::validation::{
        MIN_OBSERVED_PERIODS, validate_cohort_counts, validate_survival_fractions,
    },
    errors::{RetentionError, RetentionResult},
};
use ndarray::Array1;

/// Validated cohorts of per-period active counts.
#[derive(Debug, Clone, PartialEq)]
pub struct CohortData {
    cohorts: Vec<Array1<f64>>,
    total_initial: f64,
    max_periods: usize,
}

impl CohortData {
    /// Build a single fractional cohort from survival values for periods
    /// `1..=n`.
    ///
    /// # Errors
    /// - [`RetentionError::TooFewObservations`] if `n < 2`.
    /// - [`RetentionError::InvalidObservation`] for values outside `(0, 1]`
    ///   or non-finite values.
    pub fn from_survival_fractions(observed: &[f64]) -> RetentionResult<Self> {
        validate_survival_fractions(observed)?;
        let mut counts = Vec::with_capacity(observed.len() + 1);
        counts.push(1.0);
        counts.extend_from_slice(observed);
        Ok(CohortData {
            cohorts: vec![Array1::from(counts)],
            total_initial: 1.0,
            max_periods: observed.len(),
        })
    }

    /// Build from absolute counts of one or more cohorts.
    ///
    /// # Errors
    /// - [`RetentionError::TooFewObservations`] if `cohorts` is empty, a
    ///   cohort lacks an observed period, or no cohort spans two periods.
    /// - [`RetentionError::InvalidObservation`] for non-finite or
    ///   non-positive counts.
    pub fn from_counts(cohorts: &[Vec<f64>]) -> RetentionResult<Self> {
        if cohorts.is_empty() {
            return Err(RetentionError::TooFewObservations { len: 0, min: 1 });
        }
        let mut arrays = Vec::with_capacity(cohorts.len());
        let mut total_initial = 0.0;
        let mut max_periods = 0;
        for (cohort, counts) in cohorts.iter().enumerate() {
            validate_cohort_counts(cohort, counts)?;
            total_initial += counts[0];
            max_periods = max_periods.max(counts.len() - 1);
            arrays.push(Array1::from(counts.clone()));
        }
        if max_periods < MIN_OBSERVED_PERIODS {
            return Err(RetentionError::TooFewObservations {
                len: max_periods,
                min: MIN_OBSERVED_PERIODS,
            });
        }
        Ok(CohortData { cohorts: arrays, total_initial, max_periods })
    }

    /// Cohorts as `[c0, ..., cm]` arrays.
    pub fn cohorts(&self) -> &[Array1<f64>] {
        &self.cohorts
    }

    /// Pooled initial size `Σ c0`.
    pub fn total_initial(&self) -> f64 {
        self.total_initial
    }

    /// Length of the longest observed window.
    pub fn max_periods(&self) -> usize {
        self.max_periods
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover both constructors and the derived totals. Element
    // validation rules are covered in `validation`.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // A survival curve becomes one cohort with initial size 1.
    //
    // Given
    // -----
    // - `[0.9, 0.8, 0.7]`.
    //
    // Expect
    // ------
    // - Cohort `[1, 0.9, 0.8, 0.7]`, total 1, 3 periods.
    fn from_survival_fractions_prepends_unit_cohort() {
        // Act
        let data = CohortData::from_survival_fractions(&[0.9, 0.8, 0.7]).expect("valid");

        // Assert
        assert_eq!(data.cohorts().len(), 1);
        assert_eq!(data.cohorts()[0].to_vec(), vec![1.0, 0.9, 0.8, 0.7]);
        assert_eq!(data.total_initial(), 1.0);
        assert_eq!(data.max_periods(), 3);
    }

    #[test]
    // Purpose
    // -------
    // Ragged cohorts are pooled and the longest window is tracked.
    //
    // Given
    // -----
    // - Two cohorts of 1000 and 500 customers observed 3 and 1 periods.
    //
    // Expect
    // ------
    // - Total 1500, 3 periods.
    fn from_counts_pools_ragged_cohorts() {
        let cohorts = vec![vec![1000.0, 800.0, 650.0, 540.0], vec![500.0, 410.0]];
        let data = CohortData::from_counts(&cohorts).expect("valid");
        assert_eq!(data.total_initial(), 1500.0);
        assert_eq!(data.max_periods(), 3);
    }

    #[test]
    // Purpose
    // -------
    // Data that cannot identify two shape parameters is rejected.
    //
    // Given
    // -----
    // - No cohorts, and cohorts that each observe a single period.
    //
    // Expect
    // ------
    // - `TooFewObservations` in both cases.
    fn from_counts_rejects_unidentifiable_data() {
        assert_eq!(
            CohortData::from_counts(&[]),
            Err(RetentionError::TooFewObservations { len: 0, min: 1 })
        );
        assert_eq!(
            CohortData::from_counts(&[vec![100.0, 80.0], vec![50.0, 45.0]]),
            Err(RetentionError::TooFewObservations { len: 1, min: 2 })
        );
    }
}
