//! core: sBG parameters, cohort data, churn recurrences and validation.
//!
//! Purpose
//! -------
//! Collect the building blocks of the shifted-beta-geometric retention
//! model: validated parameter and data containers, the churn / survival
//! recurrences, fit options, and the shared input validators.
//!
//! Key behaviors
//! -------------
//! - [`churn`]: `P(t)`, `S(t)`, `r(t)` in one linear pass, plus the
//!   log-space [`LogTerms`] with shape derivatives used by the fitter.
//! - [`params`]: [`SbgParams`] (validated `(alpha, beta)`) and
//!   [`ParamBounds`] (interval ↔ unconstrained coordinate).
//! - [`data`]: [`CohortData`], one representation for survival curves and
//!   multi-cohort counts.
//! - [`options`]: [`FitOptions`] and [`InitialGuess`].
//! - [`validation`]: domain checks returning `RetentionError`.
//!
//! Conventions
//! -----------
//! - Periods are 1-based; arrays store period `t` at index `t - 1`.
//! - No I/O, no logging, no global state.

pub mod churn;
pub mod data;
pub mod options;
pub mod params;
pub mod validation;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::churn::{
    LogTerms, churn_probabilities, churn_probability, retention_rate, survival_curve,
    survival_probability,
};
pub use self::data::CohortData;
pub use self::options::{FitOptions, InitialGuess};
pub use self::params::{ParamBounds, SbgParams};

// ---- Optional convenience prelude for downstream crates -------------------

pub mod prelude {
    pub use super::churn::{
        churn_probabilities, churn_probability, retention_rate, survival_curve,
        survival_probability,
    };
    pub use super::data::CohortData;
    pub use super::options::{FitOptions, InitialGuess};
    pub use super::params::{ParamBounds, SbgParams};
}
