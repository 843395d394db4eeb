//! loglik_optimizer: MLE-friendly, argmin-powered log-likelihood optimizer.
//!
//! Purpose
//! -------
//! Provide an Argmin-backed layer for **maximizing log-likelihoods** `ℓ(θ)`.
//! Callers implement a single trait, [`LogLikelihood`], and invoke
//! [`maximize`] to run L-BFGS with a configurable line search, tolerances,
//! and a finite-difference fallback for missing gradients.
//!
//! Key behaviors
//! -------------
//! - Convert user log-likelihoods into Argmin cost functions `c(θ) = -ℓ(θ)`
//!   via [`adapter::ArgMinAdapter`].
//! - [`maximize`] validates the initial guess with [`LogLikelihood::check`],
//!   builds the solver ([`builders`]), runs it ([`run::run_lbfgs`]), and
//!   normalizes the result into an [`OptimOutcome`].
//! - Configuration ([`Tolerances`], [`MLEOptions`]) is validated on
//!   construction ([`validation`]).
//!
//! Conventions
//! -----------
//! - Parameters live in an unconstrained space as [`Theta`]. Mapping into a
//!   constrained model space (e.g. the positive sBG shape parameters) happens
//!   in the model layer with the helpers in
//!   [`numerical_stability`](crate::optimization::numerical_stability).
//! - Gradients returned by [`LogLikelihood::grad`] are for `ℓ`, never for the
//!   cost.
//! - Errors bubble up as [`OptResult<T>`](crate::optimization::errors::OptResult);
//!   nothing in this module panics or uses `unsafe`.
//!
//! Testing notes
//! -------------
//! - Unit tests sit next to each submodule: sign conventions and the FD
//!   fallback in [`adapter`], solver wiring in [`builders`], toy concave
//!   problems in [`run`], configuration rules in [`traits`].
//! - The sBG model tests exercise [`maximize`] on real retention data.

pub mod adapter;
pub mod api;
pub mod builders;
pub mod run;
pub mod traits;
pub mod types;
pub mod validation;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::api::maximize;
pub use self::traits::{LineSearcher, LogLikelihood, MLEOptions, OptimOutcome, Tolerances};
pub use self::types::{Cost, DEFAULT_LBFGS_MEM, FnEvalMap, Grad, Theta};

// ---- Optional convenience prelude for downstream crates -------------------

pub mod prelude {
    pub use super::api::maximize;
    pub use super::traits::{LineSearcher, LogLikelihood, MLEOptions, OptimOutcome, Tolerances};
    pub use super::types::{Cost, Grad, Theta};
}
