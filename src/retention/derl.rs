//! Discounted expected residual lifetime (DERL) of an sBG customer.
//!
//! For a customer who has made `t ≥ 1` renewals, with per-period discount
//! rate `d ∈ (0, 1)`:
//!
//! ```text
//! DERL = (β + t) / (α + β + t) · ₂F₁(1, β + t + 1; α + β + t + 1; 1 / (1 + d))
//! ```
//!
//! i.e. the expected number of discounted future renewals, counting the
//! next renewal at a one-period discount. Multiply by the per-period margin
//! to obtain the residual value of the customer.
use crate::{
    retention::{
        core::validation::{validate_discount_rate, validate_period, validate_shape},
        errors::{RetentionError, RetentionResult},
    },
    special::hypergeometric::hyp2f1,
};

/// DERL for shapes `(alpha, beta)`, discount rate `discount_rate` and age `t`.
///
/// # Errors
/// - [`RetentionError::InvalidParameter`] for invalid shapes,
///   `discount_rate ∉ (0, 1)` or `t == 0`.
/// - [`RetentionError::NumericalInstability`] if `₂F₁` does not converge or
///   the result is non-finite.
pub fn derl(alpha: f64, beta: f64, discount_rate: f64, t: usize) -> RetentionResult<f64> {
    let alpha = validate_shape("alpha", alpha)?;
    let beta = validate_shape("beta", beta)?;
    let d = validate_discount_rate(discount_rate)?;
    let t = validate_period("t", t)? as f64;

    let z = 1.0 / (1.0 + d);
    let series = hyp2f1(1.0, beta + t + 1.0, alpha + beta + t + 1.0, z)?;
    let value = (beta + t) / (alpha + beta + t) * series;
    if !value.is_finite() {
        return Err(RetentionError::NumericalInstability {
            reason: format!("DERL evaluated to {value}"),
        });
    }
    Ok(value)
}
