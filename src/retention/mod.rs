//! retention: shifted-beta-geometric (sBG) customer-retention model.
//!
//! Purpose
//! -------
//! Estimate, project and value discrete-time customer retention with the
//! sBG model of Fader & Hardie: every customer churns at each renewal with
//! a constant probability drawn once from Beta(alpha, beta).
//!
//! Key behaviors
//! -------------
//! - [`core`]: churn / survival recurrences, validated parameters and data.
//! - [`models`]: maximum-likelihood fitting of `(alpha, beta)` from a
//!   survival curve or from several cohorts of counts.
//! - [`derl`]: closed-form discounted expected residual lifetime.
//! - [`errors`]: [`RetentionError`](errors::RetentionError) and
//!   [`RetentionResult`](errors::RetentionResult).
//!
//! Downstream usage
//! ----------------
//! 1. `fit(&observed)` → [`SbgParams`](core::SbgParams).
//! 2. `params.survival_curve(horizon)` to project retention.
//! 3. `params.derl(discount_rate, t)` to value a surviving customer.
//!
//! Every operation is a pure function of its arguments; nothing here logs
//! or keeps state between calls.

pub mod core;
pub mod derl;
pub mod errors;
pub mod models;

pub use self::core::{
    CohortData, FitOptions, InitialGuess, ParamBounds, SbgParams, churn_probabilities,
    churn_probability, retention_rate, survival_curve, survival_probability,
};
pub use self::derl::derl;
pub use self::errors::{RetentionError, RetentionResult};
pub use self::models::{
    SbgFit, SbgModel, fit, fit_cohorts, fit_cohorts_with_options, fit_with_options, log_likelihood,
    log_likelihood_cohorts,
};

pub mod prelude {
    pub use super::core::prelude::*;
    pub use super::derl::derl;
    pub use super::errors::{RetentionError, RetentionResult};
    pub use super::models::prelude::*;
}
