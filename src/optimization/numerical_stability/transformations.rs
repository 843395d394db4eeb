//! Numerical stability utilities.
//!
//! Guarded implementations of transforms that overflow or lose precision in
//! naïve form. The explicit cutoffs (`x > 20.0`) keep `f64` arithmetic in a
//! well-conditioned regime, the same strategy common ML libraries use.

/// Smallest probability fed to [`safe_logit`]; inputs are clamped to
/// `[LOGIT_EPS, 1 - LOGIT_EPS]` before taking logs.
pub const LOGIT_EPS: f64 = 1e-12;

/// Numerically stable softplus: `softplus(x) = ln(1 + exp(x))`.
///
/// - For `x > 20`, `softplus(x) ≈ x` to full `f64` precision.
/// - Otherwise `ln1p(exp(x))`, which stays accurate for very negative `x`.
pub fn safe_softplus(x: f64) -> f64 {
    if x > 20.0 { x } else { x.exp().ln_1p() }
}

/// Stable inverse of softplus on `(0, ∞)`: `t = ln(exp(x) - 1)`.
///
/// Mirrors the guard of [`safe_softplus`]: returns `x` for `x > 20`, and
/// `ln(expm1(x))` otherwise. `x` must be finite and `> 0`.
pub fn safe_softplus_inv(x: f64) -> f64 {
    if x > 20.0 { x } else { x.exp_m1().ln() }
}

/// Numerically stable logistic `σ(x) = 1 / (1 + exp(-x))`.
///
/// Evaluates `exp` only on non-positive arguments so neither tail
/// overflows. `σ` is the derivative of [`safe_softplus`].
pub fn safe_logistic(x: f64) -> f64 {
    if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        let e = x.exp();
        e / (1.0 + e)
    }
}

/// Inverse of [`safe_logistic`]: `ln(p / (1 - p))`.
///
/// `p` is clamped into `[LOGIT_EPS, 1 - LOGIT_EPS]` first so the endpoints
/// map to large but finite values.
pub fn safe_logit(p: f64) -> f64 {
    let p = p.clamp(LOGIT_EPS, 1.0 - LOGIT_EPS);
    p.ln() - (-p).ln_1p()
}
