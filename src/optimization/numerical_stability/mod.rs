//! numerical_stability: overflow-safe scalar transforms.
//!
//! Purpose
//! -------
//! Collect the scalar transforms used to move between the unconstrained
//! optimizer space `θ ∈ ℝ` and bounded model parameters, without overflow or
//! catastrophic cancellation in `f64`.
//!
//! Key behaviors
//! -------------
//! - `safe_softplus` / `safe_softplus_inv`: ℝ ↔ (0, ∞).
//! - `safe_logistic` / `safe_logit`: ℝ ↔ (0, 1); `safe_logistic` is also the
//!   derivative of softplus and is used by the chain rule in analytic
//!   gradients.
//!
//! Conventions
//! -----------
//! - Inputs are assumed finite; domain validation happens in the model layer.
//! - Nothing here logs, allocates, or touches global state.

pub mod transformations;

pub use self::transformations::{
    LOGIT_EPS, safe_logistic, safe_logit, safe_softplus, safe_softplus_inv,
};

pub mod prelude {
    pub use super::transformations::{
        LOGIT_EPS, safe_logistic, safe_logit, safe_softplus, safe_softplus_inv,
    };
}
