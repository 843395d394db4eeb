//! special: special functions not provided by the numeric crates in use.
//!
//! - [`hypergeometric::hyp2f1`]: Gauss hypergeometric function, by
//!   continued fraction when a numerator parameter is 1 and by power series
//!   otherwise. Used by the closed-form DERL.
//! - [`errors`]: [`SpecialError`](errors::SpecialError) and
//!   [`SpecialResult`](errors::SpecialResult).

pub mod errors;
pub mod hypergeometric;

pub use self::errors::{SpecialError, SpecialResult};
pub use self::hypergeometric::hyp2f1;
