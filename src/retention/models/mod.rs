//! models: estimation entry points for the sBG retention model.
//!
//! [`SbgModel`] implements
//! [`LogLikelihood`](crate::optimization::loglik_optimizer::LogLikelihood)
//! for [`CohortData`](crate::retention::core::CohortData); the free
//! functions below validate input, fit, and return [`SbgParams`](crate::retention::core::SbgParams)
//! or a full [`SbgFit`].

pub mod sbg;

pub use self::sbg::{
    SbgFit, SbgModel, fit, fit_cohorts, fit_cohorts_with_options, fit_with_options, log_likelihood,
    log_likelihood_cohorts,
};

pub mod prelude {
    pub use super::sbg::{SbgFit, SbgModel, fit, fit_cohorts, fit_with_options, log_likelihood};
}
