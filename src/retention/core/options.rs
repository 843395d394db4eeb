//! Estimation options for the sBG fitter.
//!
//! Purpose
//! -------
//! Bundle everything that configures a fit in one place: optimizer settings
//! ([`MLEOptions`]), per-parameter bounds ([`ParamBounds`]) and the starting
//! point ([`InitialGuess`]).
//!
//! Key behaviors
//! -------------
//! - [`FitOptions::new`] checks that the initial guess lies strictly inside
//!   the bounds so it can be mapped to the unconstrained optimizer space.
//! - [`FitOptions::default`] uses L-BFGS with More–Thuente line search,
//!   `tol_grad = 1e-8`, `tol_cost = 1e-12`, `max_iter = 500`, default bounds
//!   and `alpha = beta = 1` as starting point.
//!
//! Conventions
//! -----------
//! - Optimizer tolerances are validated by `Tolerances::new` and
//!   `MLEOptions::new`; this module only adds the cross-field check between
//!   bounds and initial guess.
use crate::{
    optimization::loglik_optimizer::{LineSearcher, MLEOptions, Tolerances},
    retention::{core::params::ParamBounds, errors::RetentionResult},
};

/// Default gradient-norm tolerance for sBG fits.
pub const DEFAULT_TOL_GRAD: f64 = 1e-8;
/// Default cost-change tolerance for sBG fits.
pub const DEFAULT_TOL_COST: f64 = 1e-12;
/// Default iteration cap for sBG fits.
pub const DEFAULT_MAX_ITER: usize = 500;

/// Starting point of the optimizer in model space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InitialGuess {
    pub alpha: f64,
    pub beta: f64,
}

impl Default for InitialGuess {
    fn default() -> Self {
        InitialGuess { alpha: 1.0, beta: 1.0 }
    }
}

/// Configuration of an sBG fit.
#[derive(Debug, Clone, PartialEq)]
pub struct FitOptions {
    pub mle_opts: MLEOptions,
    pub alpha_bounds: ParamBounds,
    pub beta_bounds: ParamBounds,
    pub init: InitialGuess,
}

impl FitOptions {
    /// Construct fit options.
    ///
    /// # Errors
    /// - [`RetentionError::InvalidParameter`](crate::retention::errors::RetentionError::InvalidParameter)
    ///   if `init.alpha` or `init.beta` is not strictly inside its bounds.
    pub fn new(
        mle_opts: MLEOptions, alpha_bounds: ParamBounds, beta_bounds: ParamBounds,
        init: InitialGuess,
    ) -> RetentionResult<Self> {
        alpha_bounds.to_theta("alpha", init.alpha)?;
        beta_bounds.to_theta("beta", init.beta)?;
        Ok(FitOptions { mle_opts, alpha_bounds, beta_bounds, init })
    }
}

impl Default for FitOptions {
    fn default() -> Self {
        let tols =
            Tolerances::new(Some(DEFAULT_TOL_GRAD), Some(DEFAULT_TOL_COST), Some(DEFAULT_MAX_ITER))
                .unwrap();
        FitOptions {
            mle_opts: MLEOptions::new(tols, LineSearcher::MoreThuente, false, None).unwrap(),
            alpha_bounds: ParamBounds::default(),
            beta_bounds: ParamBounds::default(),
            init: InitialGuess::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::retention::errors::RetentionError;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // Defaults and the bounds / initial-guess consistency check.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Defaults match the documented fitter configuration.
    //
    // Given
    // -----
    // - `FitOptions::default()`.
    //
    // Expect
    // ------
    // - Tolerances (1e-8, 1e-12, 500), More–Thuente, α = β = 1, lower 1e-8.
    fn default_fit_options_match_documented_values() {
        let opts = FitOptions::default();
        assert_eq!(opts.mle_opts.tols.tol_grad, Some(1e-8));
        assert_eq!(opts.mle_opts.tols.tol_cost, Some(1e-12));
        assert_eq!(opts.mle_opts.tols.max_iter, Some(500));
        assert_eq!(opts.mle_opts.line_searcher, LineSearcher::MoreThuente);
        assert_eq!(opts.init, InitialGuess { alpha: 1.0, beta: 1.0 });
        assert_eq!(opts.alpha_bounds, ParamBounds { lower: 1e-8, upper: None });
    }

    #[test]
    // Purpose
    // -------
    // An initial guess outside its bounds is rejected at construction.
    //
    // Given
    // -----
    // - alpha bounds (0.5, 2) with alpha₀ = 3.
    //
    // Expect
    // ------
    // - `InvalidParameter { name: "alpha", .. }`.
    fn fit_options_reject_initial_guess_outside_bounds() {
        let bounds = ParamBounds::new(0.5, Some(2.0)).expect("valid bounds");
        let result = FitOptions::new(
            MLEOptions::default(),
            bounds,
            ParamBounds::default(),
            InitialGuess { alpha: 3.0, beta: 1.0 },
        );
        assert!(matches!(result, Err(RetentionError::InvalidParameter { name: "alpha", .. })));
    }
}
