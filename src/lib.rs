//! sbg_retention: shifted-beta-geometric customer-retention modeling.
//!
//! Purpose
//! -------
//! Fit the sBG discrete-time survival model to observed cohort retention,
//! project survival curves, and value surviving customers through the
//! discounted expected residual lifetime (DERL).
//!
//! Key behaviors
//! -------------
//! - [`retention`]: the sBG model (recurrences, fitting, DERL) and its
//!   error type.
//! - [`optimization`]: Argmin-backed L-BFGS maximizer for user
//!   log-likelihoods, bounded reparameterization helpers, and `OptError`.
//! - [`special`]: the Gauss hypergeometric series `₂F₁`.
//!
//! Conventions
//! -----------
//! - Periods are 1-based. Survival fractions refer to periods `1..=n`; the
//!   initial cohort (`S(0) = 1`) is implicit.
//! - Errors are returned, never panicked. Model-level failures surface as
//!   [`RetentionError`](retention::errors::RetentionError).
//! - The crate performs no I/O. With the `obs_slog` feature and
//!   `MLEOptions::verbose`, optimizer progress is written to the terminal.
//!
//! Example
//! -------
//! ```no_run
//! use sbg_retention::retention::{derl, fit};
//!
//! let observed = [0.869, 0.743, 0.653, 0.593, 0.551, 0.517, 0.491];
//! let params = fit(&observed)?;
//! let curve = params.survival_curve(12)?;
//! let value = derl(params.alpha(), params.beta(), 0.10, observed.len())?;
//! println!("S(12) = {:.3}, DERL = {value:.3}", curve[11]);
//! # Ok::<(), sbg_retention::retention::RetentionError>(())
//! ```

pub mod optimization;
pub mod retention;
pub mod special;
