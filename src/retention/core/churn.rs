//! Churn and survival recurrences of the shifted-beta-geometric model.
//!
//! Purpose
//! -------
//! Evaluate the period churn probabilities `P(t)`, survival probabilities
//! `S(t)` and retention rates `r(t)` of an sBG(alpha, beta) cohort with the
//! forward recurrences of the model, each in a single linear pass.
//!
//! Key behaviors
//! -------------
//! - `P(1) = α / (α + β)`, `P(t) = P(t-1) · (β + t - 2) / (α + β + t - 1)`.
//! - `r(t) = (β + t - 1) / (α + β + t - 1)` and `S(t) = S(t-1) · r(t)`,
//!   which equals `S(t-1) - P(t)` but cannot drift below zero.
//! - [`LogTerms`] runs the same recurrences in log space together with the
//!   partial derivatives of `ln P(t)` and `ln S(t)` with respect to `α` and
//!   `β`. The likelihood and its analytic gradient are built on it.
//!
//! Conventions
//! -----------
//! - Periods are 1-based; returned arrays hold period `t` at index `t - 1`.
//! - Every public function validates `(alpha, beta)` and its period argument
//!   and returns [`RetentionError::InvalidParameter`](crate::retention::errors::RetentionError::InvalidParameter)
//!   on failure.
use crate::retention::{
    core::validation::{validate_period, validate_shape},
    errors::RetentionResult,
};
use ndarray::Array1;

/// Probability that a customer churns exactly in `period`.
pub fn churn_probability(alpha: f64, beta: f64, period: usize) -> RetentionResult<f64> {
    let period = validate_period("period", period)?;
    let probs = churn_probabilities(alpha, beta, period)?;
    Ok(probs[period - 1])
}

/// Probability that a customer is still active after `period` periods.
///
/// Built as `S(t) = S(t-1) · r(t)`, which equals `S(t-1) - P(t)`.
pub fn survival_probability(alpha: f64, beta: f64, period: usize) -> RetentionResult<f64> {
    let period = validate_period("period", period)?;
    let curve = survival_curve(alpha, beta, period)?;
    Ok(curve[period - 1])
}

/// `[P(1), ..., P(horizon)]`.
///
/// # Errors
/// - `InvalidParameter` for non-positive or non-finite shapes, or
///   `horizon == 0`.
pub fn churn_probabilities(alpha: f64, beta: f64, horizon: usize) -> RetentionResult<Array1<f64>> {
    let alpha = validate_shape("alpha", alpha)?;
    let beta = validate_shape("beta", beta)?;
    let horizon = validate_period("horizon", horizon)?;

    let mut probs = Array1::zeros(horizon);
    let mut p = alpha / (alpha + beta);
    probs[0] = p;
    for t in 2..=horizon {
        let tf = t as f64;
        p *= (beta + tf - 2.0) / (alpha + beta + tf - 1.0);
        probs[t - 1] = p;
    }
    Ok(probs)
}

/// `[S(1), ..., S(horizon)]`, non-increasing and inside `[0, 1]`.
///
/// Each step multiplies by the retention rate, so `S(t) = S(t-1) · r(t)
/// = S(t-1) - P(t)` with `S(0) = 1`.
///
/// # Errors
/// - `InvalidParameter` for non-positive or non-finite shapes, or
///   `horizon == 0`.
pub fn survival_curve(alpha: f64, beta: f64, horizon: usize) -> RetentionResult<Array1<f64>> {
    let alpha = validate_shape("alpha", alpha)?;
    let beta = validate_shape("beta", beta)?;
    let horizon = validate_period("horizon", horizon)?;

    let mut curve = Array1::zeros(horizon);
    let mut s = 1.0;
    for t in 1..=horizon {
        let tf = t as f64;
        s *= (beta + tf - 1.0) / (alpha + beta + tf - 1.0);
        curve[t - 1] = s;
    }
    Ok(curve)
}

/// Retention rate `r(t) = S(t) / S(t-1)` for `period = t`.
pub fn retention_rate(alpha: f64, beta: f64, period: usize) -> RetentionResult<f64> {
    let alpha = validate_shape("alpha", alpha)?;
    let beta = validate_shape("beta", beta)?;
    let t = validate_period("period", period)? as f64;
    Ok((beta + t - 1.0) / (alpha + beta + t - 1.0))
}

/// Log-space churn and survival terms with their shape derivatives.
///
/// For `t = 1..=horizon` (stored at index `t - 1`):
/// - `ln_p[t]  = ln P(t)`, `ln_s[t] = ln S(t)`;
/// - `dp_dalpha`, `dp_dbeta`: `∂ ln P(t) / ∂α`, `∂ ln P(t) / ∂β`;
/// - `ds_dalpha`, `ds_dbeta`: `∂ ln S(t) / ∂α`, `∂ ln S(t) / ∂β`.
///
/// Working in logs keeps the likelihood finite even when the optimizer
/// explores extreme shapes where `P(t)` underflows.
#[derive(Debug, Clone, PartialEq)]
pub struct LogTerms {
    pub ln_p: Array1<f64>,
    pub dp_dalpha: Array1<f64>,
    pub dp_dbeta: Array1<f64>,
    pub ln_s: Array1<f64>,
    pub ds_dalpha: Array1<f64>,
    pub ds_dbeta: Array1<f64>,
}

impl LogTerms {
    /// Run the log-space recurrences up to `horizon`.
    ///
    /// # Errors
    /// - `InvalidParameter` for non-positive or non-finite shapes, or
    ///   `horizon == 0`.
    pub fn new(alpha: f64, beta: f64, horizon: usize) -> RetentionResult<Self> {
        let alpha = validate_shape("alpha", alpha)?;
        let beta = validate_shape("beta", beta)?;
        let horizon = validate_period("horizon", horizon)?;

        let mut terms = LogTerms {
            ln_p: Array1::zeros(horizon),
            dp_dalpha: Array1::zeros(horizon),
            dp_dbeta: Array1::zeros(horizon),
            ln_s: Array1::zeros(horizon),
            ds_dalpha: Array1::zeros(horizon),
            ds_dbeta: Array1::zeros(horizon),
        };

        let ab = alpha + beta;
        let (mut lp, mut lp_a, mut lp_b) = (alpha.ln() - ab.ln(), 1.0 / alpha - 1.0 / ab, -1.0 / ab);
        let (mut ls, mut ls_a, mut ls_b) = (0.0, 0.0, 0.0);
        for t in 1..=horizon {
            let tf = t as f64;
            let denom = ab + tf - 1.0;
            if t > 1 {
                let num = beta + tf - 2.0;
                lp += num.ln() - denom.ln();
                lp_a -= 1.0 / denom;
                lp_b += 1.0 / num - 1.0 / denom;
            }
            let keep = beta + tf - 1.0;
            ls += keep.ln() - denom.ln();
            ls_a -= 1.0 / denom;
            ls_b += 1.0 / keep - 1.0 / denom;

            let i = t - 1;
            terms.ln_p[i] = lp;
            terms.dp_dalpha[i] = lp_a;
            terms.dp_dbeta[i] = lp_b;
            terms.ln_s[i] = ls;
            terms.ds_dalpha[i] = ls_a;
            terms.ds_dbeta[i] = ls_b;
        }
        Ok(terms)
    }

    /// Number of periods covered.
    pub fn horizon(&self) -> usize {
        self.ln_p.len()
    }
}
