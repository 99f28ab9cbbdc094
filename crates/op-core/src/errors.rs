//! Error types for the pricing workspace.
//!
//! A single `thiserror`-derived enum covers every failure a pricing call can
//! report. The `ensure!`, `instability!` and `fail!` macros give terse early
//! returns for the common cases.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// One violated input constraint, as reported by the validation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// Name of the offending parameter (e.g. `"sigma"`).
    pub field: &'static str,
    /// Human-readable description of the constraint.
    pub message: String,
}

impl Violation {
    /// Create a new violation for `field`.
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

fn join_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// The top-level error type used throughout the workspace.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// Inputs outside the mathematical domain of a model
    /// (T ≤ 0, σ ≤ 0, non-positive prices or strikes).
    #[error("domain error: {0}")]
    Domain(String),

    /// A numerical scheme cannot produce a meaningful answer
    /// (lattice probability outside (0, 1), fewer than two samples, …).
    #[error("numerical instability: {0}")]
    NumericalInstability(String),

    /// An observed option price lies outside its no-arbitrage bounds.
    #[error("price {price} outside no-arbitrage bounds [{lower}, {upper}]")]
    PriceOutOfBounds {
        /// The observed price.
        price: f64,
        /// Lower bound.
        lower: f64,
        /// Upper bound.
        upper: f64,
    },

    /// One or more inputs failed validation.
    #[error("invalid parameters: {}", join_violations(.0))]
    Validation(Vec<Violation>),

    /// A simulation was stopped by its cancellation token or deadline.
    #[error("computation cancelled")]
    Cancelled,

    /// General runtime error.
    #[error("{0}")]
    Runtime(String),
}

/// Shorthand `Result` type used throughout the workspace.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Returns `Err(Error::Domain(...))` if `$cond` is false.
///
/// # Example
/// ```
/// use op_core::{ensure, errors::Error};
/// fn positive(x: f64) -> op_core::errors::Result<f64> {
///     ensure!(x > 0.0, "x must be positive, got {x}");
///     Ok(x)
/// }
/// assert!(positive(1.0).is_ok());
/// assert!(matches!(positive(-1.0), Err(Error::Domain(_))));
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $($msg:tt)*) => {
        if !$cond {
            return Err($crate::errors::Error::Domain(
                format!($($msg)*)
            ));
        }
    };
}

/// Returns `Err(Error::NumericalInstability(...))` if `$cond` is false.
///
/// # Example
/// ```
/// use op_core::{instability, errors::Error};
/// fn probability(p: f64) -> op_core::errors::Result<f64> {
///     instability!(p > 0.0 && p < 1.0, "p = {p} outside (0, 1)");
///     Ok(p)
/// }
/// assert!(probability(0.5).is_ok());
/// assert!(matches!(probability(1.5), Err(Error::NumericalInstability(_))));
/// ```
#[macro_export]
macro_rules! instability {
    ($cond:expr, $($msg:tt)*) => {
        if !$cond {
            return Err($crate::errors::Error::NumericalInstability(
                format!($($msg)*)
            ));
        }
    };
}

/// Returns `Err(Error::Runtime(...))` immediately.
///
/// # Example
/// ```
/// use op_core::{fail, errors::Error};
/// fn always_err() -> op_core::errors::Result<()> {
///     fail!("something went wrong");
/// }
/// assert!(always_err().is_err());
/// ```
#[macro_export]
macro_rules! fail {
    ($($msg:tt)*) => {
        return Err($crate::errors::Error::Runtime(format!($($msg)*)))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_message_lists_every_violation() {
        let err = Error::Validation(vec![
            Violation::new("spot", "must be positive"),
            Violation::new("sigma", "must not exceed 2"),
        ]);
        assert_eq!(
            err.to_string(),
            "invalid parameters: spot: must be positive; sigma: must not exceed 2"
        );
    }

    #[test]
    fn out_of_bounds_message() {
        let err = Error::PriceOutOfBounds {
            price: 120.0,
            lower: 0.0,
            upper: 100.0,
        };
        assert!(err.to_string().contains("120"));
    }
}
