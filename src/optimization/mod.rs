//! optimization: MLE stack, numerical helpers, and unified error surface.
//!
//! Purpose
//! -------
//! Provide the optimization layer used to fit the sBG retention model: an
//! Argmin-backed log-likelihood maximizer, numerically stable transforms
//! between unconstrained optimizer space and bounded model parameters, and a
//! single error/result surface.
//!
//! Key behaviors
//! -------------
//! - [`loglik_optimizer`]: maximize `ℓ(θ)` with L-BFGS, configurable line
//!   search and stopping rules.
//! - [`numerical_stability`]: overflow-safe softplus/logistic transforms used
//!   to keep shape parameters inside their admissible interval.
//! - [`errors`]: [`OptError`](errors::OptError) and
//!   [`OptResult`](errors::OptResult); raw Argmin errors never leak.
//!
//! Conventions
//! -----------
//! - Solvers maximize `ℓ(θ)` by minimizing `c(θ) = -ℓ(θ)`; user-facing
//!   outcomes are expressed in terms of `ℓ`.
//! - This module performs no I/O. Progress output exists only behind the
//!   `obs_slog` feature when a caller sets `MLEOptions::verbose`.

pub mod errors;
pub mod loglik_optimizer;
pub mod numerical_stability;

pub mod prelude {
    pub use super::errors::{OptError, OptResult};
    pub use super::loglik_optimizer::prelude::*;
    pub use super::numerical_stability::prelude::*;
}
