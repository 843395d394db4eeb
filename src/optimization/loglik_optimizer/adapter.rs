//! Adapter that exposes a user `LogLikelihood` as an `argmin` problem.
//!
//! Maximizing `ℓ(θ)` becomes minimizing `c(θ) = -ℓ(θ)`. Analytic gradients
//! are negated accordingly. Without an analytic gradient we finite-difference
//! the **cost** closure, so no sign flip is needed in that branch.
use std::cell::RefCell;

use crate::optimization::{
    errors::OptError,
    loglik_optimizer::{
        traits::LogLikelihood,
        types::{Cost, Grad, Theta},
        validation::validate_grad,
    },
};
use argmin::core::{CostFunction, Error, Gradient};
use finitediff::FiniteDiff;

/// Bridges a user `LogLikelihood` to `argmin`'s `CostFunction` and `Gradient`.
///
/// - `CostFunction::cost` returns `-ℓ(θ)` (negative log-likelihood).
/// - `Gradient::gradient` returns:
///   - `-∇ℓ(θ)` if the user provides an analytic gradient, or
///   - a finite-difference gradient of the cost (no sign flip needed).
#[derive(Debug, Clone)]
pub struct ArgMinAdapter<'a, F: LogLikelihood> {
    pub f: &'a F,
    pub data: &'a F::Data,
}

impl<'a, F: LogLikelihood> ArgMinAdapter<'a, F> {
    /// Construct a new adapter over a user `LogLikelihood` and its data.
    pub fn new(f: &'a F, data: &'a F::Data) -> Self {
        Self { f, data }
    }
}

impl<F: LogLikelihood> CostFunction for ArgMinAdapter<'_, F> {
    type Param = Theta;
    type Output = Cost;

    /// Evaluate the cost `c(θ) = -ℓ(θ)`.
    ///
    /// # Errors
    /// - Propagates any `OptError` from the user’s `value`.
    /// - `OptError::NonFiniteCost` if `ℓ(θ)` is NaN or infinite.
    fn cost(&self, theta: &Self::Param) -> Result<Self::Output, Error> {
        let output = self.f.value(theta, self.data)?;
        if !output.is_finite() {
            return Err((OptError::NonFiniteCost { value: output }).into());
        }
        Ok(-output)
    }
}

impl<F: LogLikelihood> Gradient for ArgMinAdapter<'_, F> {
    type Param = Theta;
    type Gradient = Grad;

    /// Evaluate the gradient of the cost at `θ`.
    ///
    /// - With an analytic `grad(θ, data)`: validate it and return `-grad`.
    /// - With `GradientNotImplemented`: central differences of the cost,
    ///   retried once with forward differences if a cost evaluation failed or
    ///   the central gradient does not validate.
    ///
    /// The FD closure must return `f64`, so the first cost error is parked in
    /// `closure_err` and the closure returns `NaN`.
    ///
    /// # Errors
    /// - User errors from `grad` other than `GradientNotImplemented`.
    /// - Cost errors captured during the forward-difference retry.
    /// - Dimension or finiteness failures from gradient validation.
    fn gradient(&self, theta: &Self::Param) -> Result<Self::Gradient, Error> {
        let dim = theta.len();
        match self.f.grad(theta, self.data) {
            Ok(g) => {
                validate_grad(&g, dim)?;
                Ok(-g)
            }
            Err(OptError::GradientNotImplemented) => {
                let closure_err: RefCell<Option<Error>> = RefCell::new(None);
                let cost_func = |theta: &Theta| -> f64 {
                    match self.cost(theta) {
                        Ok(val) => val,
                        Err(e) => {
                            let mut slot = closure_err.borrow_mut();
                            if slot.is_none() {
                                *slot = Some(e);
                            }
                            f64::NAN
                        }
                    }
                };
                let fd_grad = theta.central_diff(&cost_func);
                if closure_err.borrow().is_some() {
                    return run_fd_diff(theta, &cost_func, &closure_err);
                }
                match validate_grad(&fd_grad, dim) {
                    Ok(()) => Ok(fd_grad),
                    Err(_) => run_fd_diff(theta, &cost_func, &closure_err),
                }
            }
            Err(e) => Err(e.into()),
        }
    }
}

/// Forward-difference gradient of `func` at `theta`, with error capture.
///
/// Clears `closure_err`, runs `forward_diff`, returns any error captured
/// while evaluating `func`, and validates the resulting gradient.
fn run_fd_diff<G: Fn(&Theta) -> f64>(
    theta: &Theta, func: &G, closure_err: &RefCell<Option<Error>>,
) -> Result<Grad, Error> {
    closure_err.replace(None);
    let fd_grad = theta.forward_diff(func);
    if let Some(err) = closure_err.take() {
        return Err(err);
    }
    validate_grad(&fd_grad, theta.len())?;
    Ok(fd_grad)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimization::errors::OptResult;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - The sign convention of the cost and of analytic gradients.
    // - The finite-difference fallback when no analytic gradient exists.
    // - Rejection of non-finite log-likelihood values.
    //
    // They intentionally DO NOT cover:
    // - Solver behavior; see `run` and the sBG model tests.
    // -------------------------------------------------------------------------

    /// ℓ(θ) = -Σ (θ_i - 1)², with or without its analytic gradient.
    struct Bowl {
        analytic: bool,
    }

    impl LogLikelihood for Bowl {
        type Data = ();

        fn value(&self, theta: &Theta, _data: &()) -> OptResult<f64> {
            Ok(-theta.mapv(|x| (x - 1.0).powi(2)).sum())
        }

        fn check(&self, _theta: &Theta, _data: &()) -> OptResult<()> {
            Ok(())
        }

        fn grad(&self, theta: &Theta, _data: &()) -> OptResult<Grad> {
            if self.analytic {
                Ok(theta.mapv(|x| -2.0 * (x - 1.0)))
            } else {
                Err(OptError::GradientNotImplemented)
            }
        }
    }

    struct NanLik;

    impl LogLikelihood for NanLik {
        type Data = ();

        fn value(&self, _theta: &Theta, _data: &()) -> OptResult<f64> {
            Ok(f64::NAN)
        }

        fn check(&self, _theta: &Theta, _data: &()) -> OptResult<()> {
            Ok(())
        }
    }

    #[test]
    // Purpose
    // -------
    // The adapter minimizes `-ℓ`, so both cost and analytic gradient flip sign.
    //
    // Given
    // -----
    // - The `Bowl` likelihood with its analytic gradient at θ = (2, 0).
    //
    // Expect
    // ------
    // - cost = 2 and gradient = (2, -2).
    fn analytic_gradient_is_negated() {
        // Arrange
        let model = Bowl { analytic: true };
        let adapter = ArgMinAdapter::new(&model, &());
        let theta = array![2.0, 0.0];

        // Act
        let cost = adapter.cost(&theta).expect("cost should evaluate");
        let grad = adapter.gradient(&theta).expect("gradient should evaluate");

        // Assert
        assert!((cost - 2.0).abs() < 1e-12);
        assert!((grad[0] - 2.0).abs() < 1e-12);
        assert!((grad[1] + 2.0).abs() < 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // Without an analytic gradient the finite-difference path must agree with
    // the analytic cost gradient.
    //
    // Given
    // -----
    // - The `Bowl` likelihood without gradient at θ = (2, 0).
    //
    // Expect
    // ------
    // - FD gradient ≈ (2, -2).
    fn finite_difference_fallback_matches_analytic() {
        // Arrange
        let model = Bowl { analytic: false };
        let adapter = ArgMinAdapter::new(&model, &());
        let theta = array![2.0, 0.0];

        // Act
        let grad = adapter.gradient(&theta).expect("FD gradient should evaluate");

        // Assert
        assert!((grad[0] - 2.0).abs() < 1e-5);
        assert!((grad[1] + 2.0).abs() < 1e-5);
    }

    #[test]
    // Purpose
    // -------
    // A NaN log-likelihood is reported instead of being handed to the solver.
    //
    // Given
    // -----
    // - A likelihood that always returns NaN.
    //
    // Expect
    // ------
    // - `cost` fails and converts back into `OptError::NonFiniteCost`.
    fn non_finite_value_is_rejected() {
        // Arrange
        let model = NanLik;
        let adapter = ArgMinAdapter::new(&model, &());

        // Act
        let err = adapter.cost(&array![0.0]).expect_err("NaN cost must fail");

        // Assert
        assert!(matches!(OptError::from(err), OptError::NonFiniteCost { .. }));
    }
}
