//! Errors raised by special-function evaluators.

/// Result alias for special-function evaluation.
pub type SpecialResult<T> = Result<T, SpecialError>;

/// Failure modes of [`hyp2f1`](super::hypergeometric::hyp2f1).
#[derive(Debug, Clone, PartialEq)]
pub enum SpecialError {
    /// An argument is NaN or infinite.
    NonFiniteArgument { name: &'static str, value: f64 },
    /// The argument lies outside the region the evaluator covers.
    OutsideDomain { z: f64, reason: &'static str },
    /// The lower parameter is a pole (non-positive integer).
    PoleInLowerParameter { c: f64 },
    /// The series or continued fraction did not settle within its term cap.
    NotConverged { terms: usize, z: f64 },
    /// Evaluation overflowed or produced NaN.
    NonFiniteResult { terms: usize },
}

impl std::error::Error for SpecialError {}

impl std::fmt::Display for SpecialError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SpecialError::NonFiniteArgument { name, value } => {
                write!(f, "2F1 argument {name} must be finite, got {value}")
            }
            SpecialError::OutsideDomain { z, reason } => {
                write!(f, "2F1 cannot be evaluated at z={z}: {reason}")
            }
            SpecialError::PoleInLowerParameter { c } => {
                write!(f, "2F1 is undefined for non-positive integer c={c}")
            }
            SpecialError::NotConverged { terms, z } => {
                write!(f, "2F1 did not converge within {terms} terms (z={z})")
            }
            SpecialError::NonFiniteResult { terms } => {
                write!(f, "2F1 evaluation diverged after {terms} terms")
            }
        }
    }
}
