//! Gauss hypergeometric function `₂F₁(a, b; c; z)` for real arguments.
//!
//! Two evaluators are used:
//!
//! - When a numerator parameter equals 1, `₂F₁(1, b; c; z)` is the ratio
//!   `₂F₁(b, 1; c; z) / ₂F₁(b, 0; c - 1; z)` and has Gauss's continued
//!   fraction
//!
//!   ```text
//!   ₂F₁(1, b; c; z) = 1 / (1 - k₁z / (1 - k₂z / (1 - k₃z / ...)))
//!   k_{2m+1} = (b + m)(c - 1 + m) / ((c - 1 + 2m)(c + 2m))
//!   k_{2m}   = m (c - 1 - b + m) / ((c - 2 + 2m)(c - 1 + 2m))
//!   ```
//!
//!   evaluated with the modified Lentz algorithm. It converges on the whole
//!   interval `z < 1`, with cost growing like `1 / sqrt(1 - z)` instead of
//!   `1 / (1 - z)` for the power series.
//! - Otherwise the Gauss power series
//!   `Σ_k (a)_k (b)_k / ((c)_k k!) z^k` is summed with the term ratio
//!   `(a + k)(b + k) z / ((c + k)(k + 1))` for `|z| < 1`.
//!
//! Both stop once the relative update drops below [`REL_TOL`].
use crate::special::errors::{SpecialError, SpecialResult};

/// Relative size of the last update at which evaluation stops.
pub const REL_TOL: f64 = 1e-15;
/// Maximum number of series terms or continued-fraction levels.
pub const MAX_TERMS: usize = 1_000_000;

const LENTZ_TINY: f64 = 1e-300;

/// Evaluate `₂F₁(a, b; c; z)`.
///
/// Covers `|z| < 1` in general and every `z < 1` when `a` or `b` equals 1.
///
/// # Errors
/// - [`SpecialError::NonFiniteArgument`] for NaN or infinite arguments.
/// - [`SpecialError::PoleInLowerParameter`] if `c` is a non-positive integer.
/// - [`SpecialError::OutsideDomain`] for `z` outside the covered region.
/// - [`SpecialError::NotConverged`] / [`SpecialError::NonFiniteResult`] if
///   evaluation does not settle within [`MAX_TERMS`] or overflows.
pub fn hyp2f1(a: f64, b: f64, c: f64, z: f64) -> SpecialResult<f64> {
    for (name, value) in [("a", a), ("b", b), ("c", c), ("z", z)] {
        if !value.is_finite() {
            return Err(SpecialError::NonFiniteArgument { name, value });
        }
    }
    if c <= 0.0 && c.fract() == 0.0 {
        return Err(SpecialError::PoleInLowerParameter { c });
    }
    if z >= 1.0 {
        return Err(SpecialError::OutsideDomain {
            z,
            reason: "the real branch requires z < 1",
        });
    }
    if a == 1.0 {
        return unit_continued_fraction(b, c, z);
    }
    if b == 1.0 {
        return unit_continued_fraction(a, c, z);
    }
    if z <= -1.0 {
        return Err(SpecialError::OutsideDomain { z, reason: "the power series requires |z| < 1" });
    }
    power_series(a, b, c, z)
}

// ---- Helper Methods ----

fn power_series(a: f64, b: f64, c: f64, z: f64) -> SpecialResult<f64> {
    let mut sum = 1.0;
    let mut term = 1.0;
    for k in 0..MAX_TERMS {
        let kf = k as f64;
        term *= (a + kf) * (b + kf) / ((c + kf) * (kf + 1.0)) * z;
        sum += term;
        if !sum.is_finite() {
            return Err(SpecialError::NonFiniteResult { terms: k + 1 });
        }
        if term == 0.0 || term.abs() < REL_TOL * sum.abs() {
            return Ok(sum);
        }
    }
    Err(SpecialError::NotConverged { terms: MAX_TERMS, z })
}

/// `₂F₁(1, b; c; z)` by Gauss's continued fraction (modified Lentz).
///
/// `c = 1` makes the first coefficient `0 / 0`; there `₂F₁(1, b; 1; z)`
/// is the binomial series `(1 - z)^(-b)`.
fn unit_continued_fraction(b: f64, c: f64, z: f64) -> SpecialResult<f64> {
    if c == 1.0 {
        return Ok((1.0 - z).powf(-b));
    }
    let c1 = c - 1.0;
    let mut value = LENTZ_TINY;
    let mut big_c = value;
    let mut big_d = 0.0;
    for level in 1..=MAX_TERMS {
        let numerator = if level == 1 { 1.0 } else { -gauss_coefficient(b, c1, level - 1) * z };
        big_d = 1.0 + numerator * big_d;
        if big_d == 0.0 {
            big_d = LENTZ_TINY;
        }
        big_c = 1.0 + numerator / big_c;
        if big_c == 0.0 {
            big_c = LENTZ_TINY;
        }
        big_d = 1.0 / big_d;
        let delta = big_c * big_d;
        value *= delta;
        if !value.is_finite() {
            return Err(SpecialError::NonFiniteResult { terms: level });
        }
        if (delta - 1.0).abs() < REL_TOL {
            return Ok(value);
        }
    }
    Err(SpecialError::NotConverged { terms: MAX_TERMS, z })
}

/// `k_n` of Gauss's continued fraction for `₂F₁(b, 1; c1 + 1; z)`.
fn gauss_coefficient(b: f64, c1: f64, n: usize) -> f64 {
    let m = (n / 2) as f64;
    if n % 2 == 1 {
        (b + m) * (c1 + m) / ((c1 + 2.0 * m) * (c1 + 2.0 * m + 1.0))
    } else {
        m * (c1 - b + m) / ((c1 + 2.0 * m - 1.0) * (c1 + 2.0 * m))
    }
}
