//! sBG maximum-likelihood fitter.
//!
//! [`SbgModel`] implements [`LogLikelihood`] over [`CohortData`] in the
//! unconstrained coordinates `θ = (θ_α, θ_β)`, each mapped through its
//! [`ParamBounds`]. The free functions [`fit`], [`fit_with_options`],
//! [`fit_cohorts`] and [`fit_cohorts_with_options`] validate the input,
//! run L-BFGS through [`maximize`] and return validated [`SbgParams`].
//!
//! The censored log-likelihood of a cohort `[c0, ..., cm]` is
//!
//! ```text
//! Σ_{j=1..m} (c_{j-1} - c_j) ln P(j) + c_m ln S(m)
//! ```
//!
//! summed over cohorts and divided by the pooled initial size `Σ c0`.
//! A survival curve `[s1, ..., sn]` is the single cohort `[1, s1, ..., sn]`.
use crate::{
    optimization::{
        errors::OptResult,
        loglik_optimizer::{
            Grad, LogLikelihood, MLEOptions, OptimOutcome, Theta, maximize,
            validation::validate_theta,
        },
    },
    retention::{
        core::{
            churn::LogTerms,
            data::CohortData,
            options::{FitOptions, InitialGuess},
            params::{ParamBounds, SbgParams},
            validation::validate_shape,
        },
        errors::{RetentionError, RetentionResult},
    },
};
use ndarray::array;

/// Result of an sBG fit: the estimates and the optimizer outcome.
///
/// `outcome.value` is the log-likelihood at the estimates on the pooled
/// (per initial customer) scale.
#[derive(Debug, Clone, PartialEq)]
pub struct SbgFit {
    pub params: SbgParams,
    pub outcome: OptimOutcome,
}

impl SbgFit {
    /// Log-likelihood at the estimates.
    pub fn log_likelihood(&self) -> f64 {
        self.outcome.value
    }
}

/// sBG log-likelihood in bounded unconstrained coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SbgModel {
    pub alpha_bounds: ParamBounds,
    pub beta_bounds: ParamBounds,
}

impl SbgModel {
    pub fn new(alpha_bounds: ParamBounds, beta_bounds: ParamBounds) -> Self {
        SbgModel { alpha_bounds, beta_bounds }
    }

    /// Map `θ` to `(alpha, beta)`.
    pub fn params_from_theta(&self, theta: &Theta) -> (f64, f64) {
        (self.alpha_bounds.to_model(theta[0]), self.beta_bounds.to_model(theta[1]))
    }

    /// Map model-space values to `θ`.
    ///
    /// # Errors
    /// - [`RetentionError::InvalidParameter`] if a value is not strictly
    ///   inside its bounds.
    pub fn theta_from_params(&self, alpha: f64, beta: f64) -> RetentionResult<Theta> {
        Ok(array![
            self.alpha_bounds.to_theta("alpha", alpha)?,
            self.beta_bounds.to_theta("beta", beta)?
        ])
    }

    /// Maximize the likelihood of `data` starting from `init`.
    ///
    /// # Errors
    /// - [`RetentionError::InvalidParameter`] if `init` is outside the bounds.
    /// - [`RetentionError::FitDidNotConverge`] if the optimizer errors, stops
    ///   without converging, or returns estimates that are not valid shapes.
    pub fn fit(
        &self, data: &CohortData, init: InitialGuess, mle_opts: &MLEOptions,
    ) -> RetentionResult<SbgFit> {
        let theta0 = self.theta_from_params(init.alpha, init.beta)?;
        let outcome = maximize(self, theta0, data, mle_opts)?;
        if !outcome.converged {
            return Err(RetentionError::FitDidNotConverge { status: outcome.status });
        }
        let (alpha, beta) = self.params_from_theta(&outcome.theta_hat);
        let params = SbgParams::new(alpha, beta).map_err(|err| RetentionError::FitDidNotConverge {
            status: format!("optimizer returned invalid estimates: {err}"),
        })?;
        Ok(SbgFit { params, outcome })
    }
}

impl LogLikelihood for SbgModel {
    type Data = CohortData;

    fn value(&self, theta: &Theta, data: &Self::Data) -> OptResult<f64> {
        validate_theta(theta, 2)?;
        let (alpha, beta) = self.params_from_theta(theta);
        let (ll, _, _) = pooled_log_likelihood(alpha, beta, data)?;
        Ok(ll)
    }

    fn check(&self, theta: &Theta, _data: &Self::Data) -> OptResult<()> {
        validate_theta(theta, 2)
    }

    /// `∇ℓ(θ)`: shape derivatives from [`LogTerms`] times the bound
    /// derivatives.
    fn grad(&self, theta: &Theta, data: &Self::Data) -> OptResult<Grad> {
        validate_theta(theta, 2)?;
        let (alpha, beta) = self.params_from_theta(theta);
        let (_, d_alpha, d_beta) = pooled_log_likelihood(alpha, beta, data)?;
        Ok(array![
            d_alpha * self.alpha_bounds.derivative(theta[0]),
            d_beta * self.beta_bounds.derivative(theta[1])
        ])
    }
}

/// Fit `(alpha, beta)` to observed survival fractions for periods `1..=n`
/// with [`FitOptions::default`].
///
/// # Errors
/// - `TooFewObservations` / `InvalidObservation` for bad input; both report
///   `is_invalid_parameter() == true`.
/// - `FitDidNotConverge` if the optimizer does not converge.
pub fn fit(observed_survival: &[f64]) -> RetentionResult<SbgParams> {
    Ok(fit_with_options(observed_survival, &FitOptions::default())?.params)
}

/// [`fit`] with explicit options, returning the full [`SbgFit`].
pub fn fit_with_options(observed_survival: &[f64], opts: &FitOptions) -> RetentionResult<SbgFit> {
    let data = CohortData::from_survival_fractions(observed_survival)?;
    fit_data(&data, opts)
}

/// Fit `(alpha, beta)` to absolute counts of one or more cohorts with
/// [`FitOptions::default`].
///
/// Each cohort is `[c0, c1, ..., cm]`; cohorts may differ in length.
pub fn fit_cohorts(cohorts: &[Vec<f64>]) -> RetentionResult<SbgParams> {
    Ok(fit_cohorts_with_options(cohorts, &FitOptions::default())?.params)
}

/// [`fit_cohorts`] with explicit options, returning the full [`SbgFit`].
pub fn fit_cohorts_with_options(
    cohorts: &[Vec<f64>], opts: &FitOptions,
) -> RetentionResult<SbgFit> {
    let data = CohortData::from_counts(cohorts)?;
    fit_data(&data, opts)
}

/// Censored log-likelihood of a survival curve at `(alpha, beta)`.
///
/// # Errors
/// - `InvalidParameter` for invalid shapes.
/// - `TooFewObservations` / `InvalidObservation` for bad input.
pub fn log_likelihood(alpha: f64, beta: f64, observed_survival: &[f64]) -> RetentionResult<f64> {
    validate_shape("alpha", alpha)?;
    validate_shape("beta", beta)?;
    let data = CohortData::from_survival_fractions(observed_survival)?;
    Ok(pooled_log_likelihood(alpha, beta, &data)?.0)
}

/// Pooled log-likelihood of cohort counts at `(alpha, beta)`, divided by
/// the pooled initial size.
///
/// # Errors
/// - `InvalidParameter` for invalid shapes.
/// - `TooFewObservations` / `InvalidObservation` for bad input.
pub fn log_likelihood_cohorts(alpha: f64, beta: f64, cohorts: &[Vec<f64>]) -> RetentionResult<f64> {
    validate_shape("alpha", alpha)?;
    validate_shape("beta", beta)?;
    let data = CohortData::from_counts(cohorts)?;
    Ok(pooled_log_likelihood(alpha, beta, &data)?.0)
}

// ---- Helper Methods ----

fn fit_data(data: &CohortData, opts: &FitOptions) -> RetentionResult<SbgFit> {
    SbgModel::new(opts.alpha_bounds, opts.beta_bounds).fit(data, opts.init, &opts.mle_opts)
}

/// Pooled log-likelihood and its partials `(ℓ, ∂ℓ/∂α, ∂ℓ/∂β)`.
fn pooled_log_likelihood(
    alpha: f64, beta: f64, data: &CohortData,
) -> RetentionResult<(f64, f64, f64)> {
    let terms = LogTerms::new(alpha, beta, data.max_periods())?;
    let (mut ll, mut d_alpha, mut d_beta) = (0.0, 0.0, 0.0);
    for counts in data.cohorts() {
        let m = counts.len() - 1;
        for j in 1..=m {
            let churned = counts[j - 1] - counts[j];
            ll += churned * terms.ln_p[j - 1];
            d_alpha += churned * terms.dp_dalpha[j - 1];
            d_beta += churned * terms.dp_dbeta[j - 1];
        }
        let active = counts[m];
        ll += active * terms.ln_s[m - 1];
        d_alpha += active * terms.ds_dalpha[m - 1];
        d_beta += active * terms.ds_dbeta[m - 1];
    }
    let n = data.total_initial();
    Ok((ll / n, d_alpha / n, d_beta / n))
}
