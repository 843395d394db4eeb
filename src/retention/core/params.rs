//! sBG parameter containers and the bounded reparameterization used by the
//! optimizer.
//!
//! Purpose
//! -------
//! - [`SbgParams`]: validated `(alpha, beta)` pair with convenience methods
//!   that forward to the churn recurrences and the DERL calculator.
//! - [`ParamBounds`]: admissible interval for one shape parameter and the
//!   smooth bijection between that interval and the unconstrained optimizer
//!   coordinate `θ ∈ ℝ`.
//!
//! Invariants & assumptions
//! ------------------------
//! - `alpha` and `beta` are finite and strictly positive; an `SbgParams`
//!   cannot be constructed otherwise.
//! - Bounds satisfy `0 < lower < upper` (when `upper` is present), both
//!   finite.
//!
//! Conventions
//! -----------
//! - Unbounded above: `x = lower + softplus(θ)`, `dx/dθ = σ(θ)`.
//! - Bounded: `x = lower + (upper - lower) · σ(θ)`,
//!   `dx/dθ = (upper - lower) · σ(θ) (1 - σ(θ))`.
use crate::{
    optimization::numerical_stability::transformations::{
        safe_logistic, safe_logit, safe_softplus, safe_softplus_inv,
    },
    retention::{
        core::{
            churn::{
                churn_probabilities, churn_probability, retention_rate, survival_curve,
                survival_probability,
            },
            validation::validate_shape,
        },
        derl::derl,
        errors::{RetentionError, RetentionResult},
    },
};
use ndarray::Array1;

/// Validated sBG shape parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SbgParams {
    alpha: f64,
    beta: f64,
}

impl SbgParams {
    /// Construct validated parameters.
    ///
    /// # Errors
    /// - [`RetentionError::InvalidParameter`] if either shape is non-finite
    ///   or ≤ 0.
    pub fn new(alpha: f64, beta: f64) -> RetentionResult<Self> {
        Ok(SbgParams { alpha: validate_shape("alpha", alpha)?, beta: validate_shape("beta", beta)? })
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn beta(&self) -> f64 {
        self.beta
    }

    /// `(alpha, beta)` as a tuple.
    pub fn as_tuple(&self) -> (f64, f64) {
        (self.alpha, self.beta)
    }

    pub fn churn_probability(&self, period: usize) -> RetentionResult<f64> {
        churn_probability(self.alpha, self.beta, period)
    }

    pub fn survival_probability(&self, period: usize) -> RetentionResult<f64> {
        survival_probability(self.alpha, self.beta, period)
    }

    pub fn churn_probabilities(&self, horizon: usize) -> RetentionResult<Array1<f64>> {
        churn_probabilities(self.alpha, self.beta, horizon)
    }

    pub fn survival_curve(&self, horizon: usize) -> RetentionResult<Array1<f64>> {
        survival_curve(self.alpha, self.beta, horizon)
    }

    pub fn retention_rate(&self, period: usize) -> RetentionResult<f64> {
        retention_rate(self.alpha, self.beta, period)
    }

    /// Discounted expected residual lifetime; see [`derl`].
    pub fn derl(&self, discount_rate: f64, t: usize) -> RetentionResult<f64> {
        derl(self.alpha, self.beta, discount_rate, t)
    }
}

/// Admissible interval for one shape parameter.
///
/// Default: `lower = 1e-8`, no upper bound.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamBounds {
    pub lower: f64,
    pub upper: Option<f64>,
}

impl ParamBounds {
    /// Lower bound applied when none is configured.
    pub const DEFAULT_LOWER: f64 = 1e-8;

    /// Construct validated bounds.
    ///
    /// # Errors
    /// - [`RetentionError::InvalidParameter`] if `lower` is non-finite or
    ///   ≤ 0, or if `upper` is non-finite or not above `lower`.
    pub fn new(lower: f64, upper: Option<f64>) -> RetentionResult<Self> {
        if !lower.is_finite() || lower <= 0.0 {
            return Err(RetentionError::InvalidParameter {
                name: "lower_bound",
                value: lower,
                reason: "Lower bound must be finite and strictly positive.",
            });
        }
        if let Some(upper) = upper {
            if !upper.is_finite() || upper <= lower {
                return Err(RetentionError::InvalidParameter {
                    name: "upper_bound",
                    value: upper,
                    reason: "Upper bound must be finite and above the lower bound.",
                });
            }
        }
        Ok(ParamBounds { lower, upper })
    }

    /// Map an unconstrained coordinate into the interval.
    pub fn to_model(&self, theta: f64) -> f64 {
        match self.upper {
            None => self.lower + safe_softplus(theta),
            Some(upper) => self.lower + (upper - self.lower) * safe_logistic(theta),
        }
    }

    /// `d to_model(θ) / dθ`.
    pub fn derivative(&self, theta: f64) -> f64 {
        match self.upper {
            None => safe_logistic(theta),
            Some(upper) => {
                let s = safe_logistic(theta);
                (upper - self.lower) * s * (1.0 - s)
            }
        }
    }

    /// Inverse of [`ParamBounds::to_model`].
    ///
    /// # Errors
    /// - [`RetentionError::InvalidParameter`] if `value` is not strictly
    ///   inside the interval.
    pub fn to_theta(&self, name: &'static str, value: f64) -> RetentionResult<f64> {
        let inside = value.is_finite()
            && value > self.lower
            && self.upper.is_none_or(|upper| value < upper);
        if !inside {
            return Err(RetentionError::InvalidParameter {
                name,
                value,
                reason: "Initial value must lie strictly inside the parameter bounds.",
            });
        }
        Ok(match self.upper {
            None => safe_softplus_inv(value - self.lower),
            Some(upper) => safe_logit((value - self.lower) / (upper - self.lower)),
        })
    }
}

impl Default for ParamBounds {
    fn default() -> Self {
        ParamBounds { lower: Self::DEFAULT_LOWER, upper: None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - `SbgParams` validation and delegation.
    // - `ParamBounds` validation, the θ ↔ model bijection and its derivative.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Shapes must be strictly positive and finite.
    //
    // Given
    // -----
    // - alpha = 0 and beta = -1.
    //
    // Expect
    // ------
    // - `InvalidParameter` naming the offending shape.
    fn sbg_params_reject_non_positive_shapes() {
        assert!(matches!(
            SbgParams::new(0.0, 1.0),
            Err(RetentionError::InvalidParameter { name: "alpha", .. })
        ));
        assert!(matches!(
            SbgParams::new(1.0, -1.0),
            Err(RetentionError::InvalidParameter { name: "beta", .. })
        ));
        let params = SbgParams::new(0.5, 2.0).expect("valid shapes");
        assert_eq!(params.as_tuple(), (0.5, 2.0));
    }

    #[test]
    // Purpose
    // -------
    // Methods forward to the free functions.
    //
    // Given
    // -----
    // - `(α, β) = (1, 1)`.
    //
    // Expect
    // ------
    // - S(3) = 1/4, P(2) = 1/6, r(2) = 2/3, curve of length 4.
    fn sbg_params_methods_delegate() {
        let params = SbgParams::new(1.0, 1.0).expect("valid shapes");
        assert!((params.survival_probability(3).expect("valid") - 0.25).abs() < 1e-15);
        assert!((params.churn_probability(2).expect("valid") - 1.0 / 6.0).abs() < 1e-15);
        assert!((params.retention_rate(2).expect("valid") - 2.0 / 3.0).abs() < 1e-15);
        assert_eq!(params.survival_curve(4).expect("valid").len(), 4);
        assert_eq!(params.churn_probabilities(4).expect("valid").len(), 4);
    }

    #[test]
    // Purpose
    // -------
    // Both bound kinds invert cleanly and stay inside the interval.
    //
    // Given
    // -----
    // - Default bounds and bounds (0.01, 50).
    //
    // Expect
    // ------
    // - `to_model(to_theta(x)) ≈ x`; extreme θ stays within bounds.
    fn param_bounds_map_and_invert() {
        let unbounded = ParamBounds::default();
        let bounded = ParamBounds::new(0.01, Some(50.0)).expect("valid bounds");
        for x in [0.05, 1.0, 3.8, 40.0] {
            let t = unbounded.to_theta("alpha", x).expect("inside");
            assert!((unbounded.to_model(t) - x).abs() < 1e-10 * x.max(1.0));
            let t = bounded.to_theta("alpha", x).expect("inside");
            assert!((bounded.to_model(t) - x).abs() < 1e-9 * x.max(1.0));
        }
        assert!(bounded.to_model(1e3) <= 50.0);
        assert!(bounded.to_model(-1e3) >= 0.01);
        assert!(unbounded.to_model(-1e3) > 0.0);
    }

    #[test]
    // Purpose
    // -------
    // The analytic derivative matches central differences.
    //
    // Given
    // -----
    // - Default and (0.01, 50) bounds at θ ∈ {-3, 0, 2.5}.
    //
    // Expect
    // ------
    // - Agreement within 1e-6.
    fn param_bounds_derivative_matches_finite_difference() {
        let h = 1e-6;
        for bounds in [ParamBounds::default(), ParamBounds::new(0.01, Some(50.0)).expect("valid")] {
            for theta in [-3.0, 0.0, 2.5] {
                let fd = (bounds.to_model(theta + h) - bounds.to_model(theta - h)) / (2.0 * h);
                assert!((bounds.derivative(theta) - fd).abs() < 1e-6);
            }
        }
    }

    #[test]
    // Purpose
    // -------
    // Invalid bounds and out-of-range initial values are rejected.
    //
    // Given
    // -----
    // - lower = 0, upper ≤ lower, and a value above the upper bound.
    //
    // Expect
    // ------
    // - `InvalidParameter` in every case.
    fn param_bounds_reject_invalid_configuration() {
        assert!(ParamBounds::new(0.0, None).is_err());
        assert!(ParamBounds::new(1.0, Some(1.0)).is_err());
        let bounds = ParamBounds::new(0.1, Some(2.0)).expect("valid bounds");
        assert!(matches!(
            bounds.to_theta("beta", 3.0),
            Err(RetentionError::InvalidParameter { name: "beta", .. })
        ));
    }
}
